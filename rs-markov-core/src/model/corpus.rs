use std::io::Read;

use log::debug;
use rand::Rng;

use crate::error::MarkovError;
use crate::io::read_tokens;

/// Tokenized training text plus the positions where sentences start.
///
/// A sentence start is any token whose first character is uppercase.
/// These positions are the only places the corpus may be rotated to
/// before a chain is built from it.
///
/// # Invariants
/// - `starts` is sorted and every index is `< words.len()`
/// - `starts` is non-empty (checked at construction)
#[derive(Clone, Debug)]
pub struct Corpus {
	words: Vec<String>,
	starts: Vec<usize>,
}

impl Corpus {
	/// Builds a corpus from already-split tokens.
	///
	/// # Errors
	/// Returns `MarkovError::EmptyCorpus` if no token starts a sentence
	/// (which includes an empty token list).
	pub fn new(words: Vec<String>) -> Result<Self, MarkovError> {
		let starts: Vec<usize> = words
			.iter()
			.enumerate()
			.filter(|(_, word)| is_sentence_start(word))
			.map(|(i, _)| i)
			.collect();

		if starts.is_empty() {
			return Err(MarkovError::EmptyCorpus);
		}

		debug!("Corpus read: {} words, {} sentence starts", words.len(), starts.len());
		Ok(Self { words, starts })
	}

	/// Reads and tokenizes the whole stream.
	///
	/// # Errors
	/// - `MarkovError::Io` if the stream cannot be read or is not UTF-8
	/// - `MarkovError::EmptyCorpus` as in [`Corpus::new`]
	pub fn from_reader<R: Read>(reader: R) -> Result<Self, MarkovError> {
		Self::new(read_tokens(reader)?)
	}

	/// Indices of the sentence-starting words, in corpus order.
	pub fn sentence_starts(&self) -> &[usize] {
		&self.starts
	}

	/// Rotates the corpus around two sentence starts drawn from `rng`.
	///
	/// Both draws are uniform and independent, so they may coincide.
	/// See [`Corpus::rotate_at`] for what is done with them.
	pub fn rotate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
		let first = self.starts[rng.random_range(0..self.starts.len())];
		let second = self.starts[rng.random_range(0..self.starts.len())];
		debug!("Rotating corpus at {first}/{second}");
		self.rotate_at(first, second)
	}

	/// Returns `words[first..]` followed by `words[..second]`.
	///
	/// This is a plain concatenation, not a circular rotation: when
	/// `second > first` the words in between appear twice, and when
	/// `second < first` the result is shorter than the corpus.
	///
	/// Both indices are clamped to the corpus length.
	pub fn rotate_at(&self, first: usize, second: usize) -> Vec<String> {
		let first = first.min(self.words.len());
		let second = second.min(self.words.len());

		let mut rotated = Vec::with_capacity(self.words.len() - first + second);
		rotated.extend_from_slice(&self.words[first..]);
		rotated.extend_from_slice(&self.words[..second]);
		rotated
	}
}

/// Tells whether `word` starts with an uppercase character.
pub fn is_sentence_start(word: &str) -> bool {
	word.chars().next().is_some_and(char::is_uppercase)
}
