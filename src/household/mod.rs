//! Per-tile household synthesis (§4.2).

mod synth;
mod types;

pub use synth::synthesize_households;
pub use types::Household;
