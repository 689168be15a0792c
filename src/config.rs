//! Run configuration: territory, seed, batch size, output flags (§6).
//!
//! Follows the teacher's plain-struct, validated-constructor pattern
//! (`sim::SimConfig::new`, `worldgen::WorldGenConfig::default`) rather than a
//! builder — the field set is small and every field is required up front.

use crate::error::InputError;
use crate::territory::Territory;

/// Flags controlling what the (external) output writer does with a row.
/// The writer itself is out of scope for this crate; this struct only
/// threads the caller's intent through the pipeline driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Whether geometry should be attached to emitted rows at all, or
    /// omitted for a caller that only wants tabular marginals.
    pub include_geometry: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { include_geometry: true }
    }
}

impl OutputOptions {
    /// The only option keys this crate recognises; anything else is a
    /// caller mistake, not a value to silently ignore (§6: "unknown options
    /// must be rejected").
    const KNOWN_KEYS: &'static [&'static str] = &["include_geometry"];

    /// Parse caller-supplied `key=value` output flags (as they'd arrive from
    /// a config file or CLI, both out of this crate's scope) into a
    /// validated [`OutputOptions`], starting from the default.
    pub fn from_raw(options: &[(&str, &str)]) -> Result<Self, InputError> {
        let mut result = Self::default();
        for &(key, value) in options {
            if !Self::KNOWN_KEYS.contains(&key) {
                return Err(InputError::UnknownOption(key.to_string()));
            }
            match key {
                "include_geometry" => {
                    result.include_geometry = value.eq_ignore_ascii_case("true") || value == "1";
                }
                _ => unreachable!("checked against KNOWN_KEYS above"),
            }
        }
        Ok(result)
    }
}

/// Configuration for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub territory: Territory,
    pub seed: u64,
    pub batch_size: u32,
    pub output: OutputOptions,
}

impl Config {
    /// Build a validated configuration. Unknown territory codes and a
    /// non-positive batch size are rejected per §6/§7 (input-shape errors).
    pub fn new(territory_code: &str, seed: u64, batch_size: u32) -> Result<Self, InputError> {
        let territory = Territory::parse(territory_code)?;
        if batch_size == 0 {
            return Err(InputError::InvalidBatchSize(batch_size));
        }
        Ok(Self { territory, seed, batch_size, output: OutputOptions::default() })
    }

    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    /// Apply caller-supplied raw output options, rejecting unknown keys
    /// (§6, §7 input-shape errors).
    pub fn with_raw_options(mut self, options: &[(&str, &str)]) -> Result<Self, InputError> {
        self.output = OutputOptions::from_raw(options)?;
        Ok(self)
    }
}
