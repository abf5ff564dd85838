//! Error type shared by every stage of the pipeline.
//!
//! Every failure is fatal for the current run: nothing here is retried by
//! the library itself, and no fallback text is ever produced.

/// Errors raised while loading settings, building a chain, or generating text.
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
	/// Settings are missing, malformed, or out of range.
	#[error("Invalid configuration: {0}")]
	Configuration(String),

	/// The corpus holds no token starting with an uppercase letter,
	/// so no rotation point can be chosen.
	#[error("Corpus contains no sentence-starting word")]
	EmptyCorpus,

	/// A prefix reached during generation is absent from the chain.
	#[error("Chain has no suffixes for prefix {key:?}")]
	ChainConsistency {
		/// Joined prefix key that failed to resolve
		key: String,
	},

	/// The length-fitting loop ran out of attempts.
	#[error("No sentence boundary found near {budget} characters after {attempts} attempts")]
	LengthFitTimeout {
		/// Attempts made before giving up
		attempts: usize,
		/// Character budget that was targeted
		budget: usize,
	},

	/// Generation produced `limit` words without reaching a stopping point.
	#[error("Generation exceeded {limit} words without ending a sentence")]
	WordLimitExceeded {
		/// Configured word cap
		limit: usize,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl MarkovError {
	/// Short, stable name of the failure kind, suitable for logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Configuration(_) => "configuration",
			Self::EmptyCorpus => "empty-corpus",
			Self::ChainConsistency { .. } => "chain-consistency",
			Self::LengthFitTimeout { .. } => "length-fit-timeout",
			Self::WordLimitExceeded { .. } => "word-limit-exceeded",
			Self::Io(_) => "io",
		}
	}
}
