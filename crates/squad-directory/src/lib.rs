//! Squad-Directory: Player Directory Boundary for Squadscan
//!
//! This crate is the read-only edge between the reconstruction pipeline and
//! the league data provider. Records are validated once here, so the rest of
//! the system works with fixed, typed records instead of loose maps.
//!
//! ## Layer 0 - Data
//!
//! Focus: record validation, immutable snapshots, substitutable providers.
//!
//! ## Key Components
//!
//! - `PlayerRecord` / `Position`: typed player entity supplied by the provider
//! - `PlayerDirectory`: async collaborator trait (`lookup_all`)
//! - `DirectorySnapshot`: immutable, id-ordered view handed to one pipeline run
//! - `JsonFileDirectory`: provider bootstrap document on disk
//! - `fakes`: in-memory directories for tests

mod error;
pub mod directory_traits;
pub mod fakes;
pub mod json_file;
mod record;

pub use directory_traits::{DirectorySnapshot, PlayerDirectory};
pub use error::{DirectoryError, DirectoryResult};
pub use json_file::JsonFileDirectory;
pub use record::{PlayerRecord, Position};
