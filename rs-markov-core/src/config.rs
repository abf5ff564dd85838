use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::MarkovError;
use crate::io::read_file;
use crate::model::chain::Chain;
use crate::model::fitting::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TOLERANCE, LengthFitter};
use crate::model::generator::{DEFAULT_MAX_WORDS, Generator};

/// Generation settings, as read from a `configuration.json` file.
///
/// Unknown keys are ignored.
///
/// ```json
/// { "prefixCount": 2, "wordCount": 40, "charCount": 270 }
/// ```
///
/// # Responsibilities
/// - Hold the three core knobs (prefix length, minimum words, character budget)
/// - Hold the limits that keep generation and fitting bounded
/// - Reject out-of-range values before any work starts
///
/// # Invariants (after [`Settings::validate`])
/// - `prefix_count >= 1`
/// - `max_attempts >= 1` and `max_words >= 1`
/// - `word_count <= max_words`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
	/// Number of words in a chain prefix.
	pub prefix_count: usize,

	/// Minimum number of words per generation.
	pub word_count: usize,

	/// Character budget of the fitted text.
	pub char_count: usize,

	/// How far below `char_count` a cut may land.
	#[serde(default = "default_tolerance")]
	pub tolerance: usize,

	/// Generations tried before fitting gives up.
	#[serde(default = "default_max_attempts")]
	pub max_attempts: usize,

	/// Words a single generation may produce.
	#[serde(default = "default_max_words")]
	pub max_words: usize,

	/// Fixed RNG seed. A time-derived seed is used when absent.
	#[serde(default)]
	pub seed: Option<u64>,
}

fn default_tolerance() -> usize {
	DEFAULT_TOLERANCE
}

fn default_max_attempts() -> usize {
	DEFAULT_MAX_ATTEMPTS
}

fn default_max_words() -> usize {
	DEFAULT_MAX_WORDS
}

impl Settings {
	/// Creates settings with default limits and no fixed seed.
	pub fn new(prefix_count: usize, word_count: usize, char_count: usize) -> Self {
		Self {
			prefix_count,
			word_count,
			char_count,
			tolerance: DEFAULT_TOLERANCE,
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			max_words: DEFAULT_MAX_WORDS,
			seed: None,
		}
	}

	/// Parses and validates settings from a JSON string.
	///
	/// # Errors
	/// Returns `MarkovError::Configuration` on malformed JSON, missing keys,
	/// negative numbers, or values rejected by [`Settings::validate`].
	pub fn from_json(json: &str) -> Result<Self, MarkovError> {
		let settings: Self = serde_json::from_str(json)
			.map_err(|e| MarkovError::Configuration(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads settings from a JSON file.
	///
	/// # Errors
	/// - `MarkovError::Io` if the file cannot be read
	/// - `MarkovError::Configuration` as in [`Settings::from_json`]
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MarkovError> {
		Self::from_json(&read_file(path)?)
	}

	/// Checks value ranges.
	///
	/// # Errors
	/// Returns `MarkovError::Configuration` naming the first bad field.
	pub fn validate(&self) -> Result<(), MarkovError> {
		if self.prefix_count < 1 {
			return Err(MarkovError::Configuration("prefixCount must be >= 1".to_owned()));
		}
		if self.max_attempts < 1 {
			return Err(MarkovError::Configuration("maxAttempts must be >= 1".to_owned()));
		}
		if self.max_words < 1 {
			return Err(MarkovError::Configuration("maxWords must be >= 1".to_owned()));
		}
		if self.word_count > self.max_words {
			return Err(MarkovError::Configuration(format!(
				"wordCount {} exceeds maxWords {}",
				self.word_count, self.max_words
			)));
		}
		if self.char_count < self.tolerance {
			log::warn!(
				"charCount {} is below the tolerance {}, any boundary up to it will be accepted",
				self.char_count,
				self.tolerance
			);
		}
		Ok(())
	}

	/// Returns the RNG for this run: seeded from `seed` if set,
	/// from the current time otherwise.
	pub fn rng(&self) -> StdRng {
		StdRng::seed_from_u64(self.seed.unwrap_or_else(time_seed))
	}

	/// Builds a generator over `chain` honouring `max_words`.
	pub fn generator<'a>(&self, chain: &'a Chain) -> Result<Generator<'a>, MarkovError> {
		Generator::new(chain).with_max_words(self.max_words)
	}

	/// Builds a length fitter from `word_count`, `char_count`,
	/// `tolerance` and `max_attempts`.
	pub fn fitter(&self) -> Result<LengthFitter, MarkovError> {
		LengthFitter::new(self.word_count, self.char_count)
			.with_tolerance(self.tolerance)
			.with_max_attempts(self.max_attempts)
	}
}

/// Seed derived from the wall clock, in nanoseconds.
pub fn time_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos() as u64)
		.unwrap_or_default()
}
