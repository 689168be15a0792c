//! Synthesizes a per-individual and per-household population from gridded
//! demographic tiles and an address point database (§1).

pub mod address;
pub mod age_band;
pub mod config;
pub mod error;
pub mod household;
pub mod individual;
pub mod pipeline;
pub mod rng;
pub mod territory;
pub mod tile;

pub use address::{AddressPoint, AddressPool};
pub use age_band::{AgeBand, AgeHistogram};
pub use config::{Config, OutputOptions};
pub use error::{FeasibilityError, InputError, PopSynthError};
pub use household::Household;
pub use individual::{Individual, Status};
pub use pipeline::{Batch, RunSummary, run_pipeline};
pub use rng::TileRng;
pub use territory::Territory;
pub use tile::{RawTile, RefinedTile, refine_tile};
