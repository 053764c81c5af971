//! Runtime configuration for fake data generation.

use std::env;

use crate::faker;
use crate::sequence;

/// Environment variable holding the fake-data seed.
pub const SEED_ENV_VAR: &str = "MODEL_FACTORIES_SEED";

/// Settings applied before a test run.
///
/// ```ignore
/// FactoryConfig::from_env().with_reset_sequences(true).apply();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
	/// Seed for the fake-data random source. `None` keeps the entropy seed.
	pub seed: Option<u64>,
	/// Whether `apply` restarts every named sequence.
	pub reset_sequences: bool,
}

impl FactoryConfig {
	/// Creates a configuration with no seed.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads the seed from `MODEL_FACTORIES_SEED`.
	///
	/// An unparsable value is ignored with a warning.
	pub fn from_env() -> Self {
		let seed = match env::var(SEED_ENV_VAR) {
			Ok(raw) => match raw.trim().parse::<u64>() {
				Ok(seed) => Some(seed),
				Err(error) => {
					tracing::warn!(
						variable = SEED_ENV_VAR,
						value = %raw,
						%error,
						"ignoring invalid fake data seed"
					);
					None
				}
			},
			Err(_) => None,
		};
		Self {
			seed,
			..Self::default()
		}
	}

	/// Sets the fake-data seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Sets whether `apply` restarts every named sequence.
	pub fn with_reset_sequences(mut self, reset: bool) -> Self {
		self.reset_sequences = reset;
		self
	}

	/// Applies the configuration to the current thread's generators.
	pub fn apply(&self) {
		if let Some(seed) = self.seed {
			faker::reseed(seed);
		}
		if self.reset_sequences {
			sequence::reset_sequences();
		}
		tracing::debug!(
			seed = ?self.seed,
			reset_sequences = self.reset_sequences,
			"applied factory configuration"
		);
	}
}
