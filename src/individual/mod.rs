//! Individual expansion (§4.4).

mod expander;
mod types;

pub use expander::expand_household;
pub use types::{Individual, Status};
