//! Cache Entry Module
//!
//! Defines the owned key/value pair stored for each cached association.

// == Cache Entry ==
/// A single cached association.
///
/// Both halves are copied in from caller slices, so nothing outside the
/// cache can mutate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// The key, fixed once stored
    pub key: Vec<u8>,
    /// The stored value
    pub value: Vec<u8>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry by copying the given key and value.
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            value: value.to_vec(),
        }
    }

    // == Replace Value ==
    /// Overwrites the stored value, reusing the existing allocation when it fits.
    pub fn replace_value(&mut self, value: &[u8]) {
        self.value.clear();
        self.value.extend_from_slice(value);
    }
}
