use log::trace;
use rand::Rng;

use super::chain::Chain;
use super::prefix::Prefix;
use crate::error::MarkovError;

/// Default cap on the number of words a single walk may produce.
pub const DEFAULT_MAX_WORDS: usize = 10_000;

/// Characters that end a sentence.
pub const TERMINAL_PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// Random walk over a [`Chain`].
///
/// # Responsibilities
/// - Start from the cold-start (all empty) prefix
/// - Pick each next word with frequency weighting
/// - Stop on a sentence end once enough words were produced
///
/// The generator only borrows the chain, so many generators (on many
/// threads) can share one.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
	chain: &'a Chain,
	max_words: usize,
}

impl<'a> Generator<'a> {
	/// Creates a generator with the default word cap.
	pub fn new(chain: &'a Chain) -> Self {
		Self { chain, max_words: DEFAULT_MAX_WORDS }
	}

	/// Sets the word cap.
	///
	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn with_max_words(mut self, max_words: usize) -> Result<Self, MarkovError> {
		if max_words == 0 {
			return Err(MarkovError::Configuration("max words must be >= 1".to_owned()));
		}
		self.max_words = max_words;
		Ok(self)
	}

	/// Generates at least `min_words` words, ending on a sentence end.
	///
	/// # Returns
	/// The words joined by single spaces. The last word always ends with
	/// one of [`TERMINAL_PUNCTUATION`].
	///
	/// # Errors
	/// - `ChainConsistency` if the walk reaches a prefix missing from the chain
	/// - `WordLimitExceeded` if `max_words` words were produced without
	///   meeting the stopping rule
	pub fn generate<R: Rng + ?Sized>(&self, min_words: usize, rng: &mut R) -> Result<String, MarkovError> {
		let mut prefix = Prefix::new(self.chain.prefix_len());
		let mut words: Vec<&str> = Vec::new();

		loop {
			if words.len() >= self.max_words {
				return Err(MarkovError::WordLimitExceeded { limit: self.max_words });
			}

			let next = self.chain.next_word(&prefix, rng)?;
			words.push(next);
			prefix.shift(next);

			if words.len() >= min_words && ends_sentence(next) {
				break;
			}
		}

		trace!("Generated {} words", words.len());
		Ok(words.join(" "))
	}
}

/// Tells whether `word` ends with terminal punctuation.
pub fn ends_sentence(word: &str) -> bool {
	word.ends_with(TERMINAL_PUNCTUATION)
}
