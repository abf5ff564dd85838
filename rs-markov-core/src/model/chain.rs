use std::collections::HashMap;
use std::io::Read;

use log::debug;
use rand::Rng;
use serde::Serialize;

use super::corpus::Corpus;
use super::prefix::Prefix;
use super::suffixes::Suffixes;
use crate::error::MarkovError;

/// Word-level Markov chain.
///
/// Maps every prefix of `prefix_len` words seen in the corpus (joined by a
/// space) to the words that followed it.
///
/// # Responsibilities
/// - Ingest a corpus through a sliding window
/// - Answer suffix lookups during generation
///
/// # Invariants
/// - `prefix_len >= 1`, fixed at construction
/// - Every key maps to at least one suffix
/// - The chain is filled once and only read afterwards, so a shared
///   reference can be handed to several threads
#[derive(Clone, Debug)]
pub struct Chain {
	prefix_len: usize,
	chain: HashMap<String, Suffixes>,
}

/// Size summary of a chain.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainStats {
	pub prefix_len: usize,
	/// Distinct prefix keys
	pub prefixes: usize,
	/// Suffix entries, duplicates included
	pub suffixes: usize,
}

impl Chain {
	/// Creates an empty chain with prefixes of `prefix_len` words.
	///
	/// # Errors
	/// Returns an error if `prefix_len < 1`.
	pub fn new(prefix_len: usize) -> Result<Self, MarkovError> {
		if prefix_len < 1 {
			return Err(MarkovError::Configuration("prefix length must be >= 1".to_owned()));
		}
		Ok(Self { prefix_len, chain: HashMap::new() })
	}

	/// Reads a corpus from `reader`, rotates it and builds a chain from it.
	///
	/// # Errors
	/// - `Configuration` if `prefix_len < 1`
	/// - `Io` if the reader fails
	/// - `EmptyCorpus` if no word starts a sentence
	pub fn build<Rd, R>(reader: Rd, prefix_len: usize, rng: &mut R) -> Result<Self, MarkovError>
	where
		Rd: Read,
		R: Rng + ?Sized,
	{
		let mut chain = Self::new(prefix_len)?;
		let corpus = Corpus::from_reader(reader)?;
		chain.add_words(&corpus.rotate(rng));
		Ok(chain)
	}

	/// Slides the window over `words` and records each transition.
	///
	/// The window starts filled with empty strings, so the first
	/// `prefix_len` entries use partially empty keys.
	pub fn add_words(&mut self, words: &[String]) {
		let mut prefix = Prefix::new(self.prefix_len);
		for word in words {
			self.chain.entry(prefix.key()).or_default().push(word);
			prefix.shift(word);
		}
		debug!("Chain built: {} prefixes from {} words", self.chain.len(), words.len());
	}

	/// Returns the suffixes recorded for `key`, if any.
	pub fn suffixes(&self, key: &str) -> Option<&Suffixes> {
		self.chain.get(key)
	}

	/// Picks the next word after `prefix`, weighted by frequency.
	///
	/// # Errors
	/// Returns `ChainConsistency` if the prefix was never recorded.
	pub fn next_word<R: Rng + ?Sized>(&self, prefix: &Prefix, rng: &mut R) -> Result<&str, MarkovError> {
		let key = prefix.key();
		self.chain
			.get(&key)
			.and_then(|suffixes| suffixes.choose(rng))
			.ok_or(MarkovError::ChainConsistency { key })
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.chain.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.chain.keys().map(String::as_str)
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			prefix_len: self.prefix_len,
			prefixes: self.chain.len(),
			suffixes: self.chain.values().map(Suffixes::len).sum(),
		}
	}
}
