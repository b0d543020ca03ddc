//! Carbontally Core - ingestion pipeline, emissions derivation, and session state
//!
//! This crate contains the core domain logic for the carbontally system:
//! parsing facility energy reports, deriving carbon emissions and facility
//! classifications from consumption data, and tracking batches of files
//! through an in-memory session.

pub mod classify;
pub mod config;
pub mod error;
pub mod factors;
pub mod ingest;
pub mod models;
pub mod rng;
pub mod session;
pub mod summary;
pub mod trend;
pub mod validation;

pub use error::{CarbontallyError, Result};
