//! Background Tasks Module
//!
//! Contains the tokio tasks the soak runner drives against a shared cache.
//!
//! # Tasks
//! - Soak workers: Issue a seeded get/set/remove mix concurrently

mod soak;

pub use soak::{run_soak, spawn_soak_worker, SoakReport, WorkerReport};
