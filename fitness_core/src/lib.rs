#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitness tracker.
//!
//! This crate provides:
//! - Domain types (cardio and strength workouts, exercises)
//! - Validation and tracking capabilities
//! - Sorting helpers
//! - Repositories (in-memory, JSON table files)
//! - Services enforcing validation and existence checks
//! - CSV export

pub mod types;
pub mod error;
pub mod capability;
pub mod sorting;
pub mod repository;
pub mod service;
pub mod config;
pub mod logging;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use capability::{tracking_report, validation_result, Track, Validate};
pub use config::{Config, StoreBackend};
pub use repository::{Entity, JsonTableRepository, MemoryRepository, Repository};
pub use service::{ExerciseService, ServiceOptions, WorkoutService};
pub use export::{export_csv, ExportSummary};
