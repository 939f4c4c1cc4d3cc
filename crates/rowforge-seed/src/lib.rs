//! Seeding engine: foreign-key sampling and dependency-ordered insertion.

pub mod engine;
pub mod error;
pub mod sampler;

pub use engine::{RunOptions, RunReport, Seeder, TableReport, truncate_table};
pub use error::{Result, SeedError};
pub use sampler::FkSampler;
