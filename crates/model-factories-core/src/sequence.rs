//! Named auto-incrementing counters.
//!
//! Each key owns one process-wide counter starting at 1. The `{n}`
//! placeholder in a format string is replaced with the counter value:
//!
//! ```ignore
//! self.property("username", || sequence("UserFactory_username", "user_{n}"))
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

static SEQUENCES: Lazy<Mutex<HashMap<String, u64>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Advances the counter for `key` and returns its new value.
pub fn next_value(key: &str) -> u64 {
	let mut sequences = SEQUENCES.lock();
	let counter = sequences.entry(key.to_string()).or_insert(0);
	*counter += 1;
	*counter
}

/// Advances the counter for `key` and formats it into `format`.
pub fn sequence(key: &str, format: &str) -> String {
	format.replace("{n}", &next_value(key).to_string())
}

/// Restarts the counter for `key`.
pub fn reset_sequence(key: &str) {
	SEQUENCES.lock().remove(key);
}

/// Restarts every counter.
pub fn reset_sequences() {
	SEQUENCES.lock().clear();
	tracing::debug!("reset all sequences");
}

/// A named counter paired with its format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
	key: String,
	format: String,
}

impl Sequence {
	/// Creates a sequence that substitutes `{n}` in `format`.
	pub fn new(key: impl Into<String>, format: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			format: format.into(),
		}
	}

	/// Creates a sequence that yields the bare counter value.
	pub fn numeric(key: impl Into<String>) -> Self {
		Self::new(key, "{n}")
	}

	/// Counter key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Advances the counter and returns the formatted value.
	pub fn next(&self) -> String {
		sequence(&self.key, &self.format)
	}

	/// Restarts the counter.
	pub fn reset(&self) {
		reset_sequence(&self.key);
	}
}
