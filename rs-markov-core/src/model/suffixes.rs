use rand::Rng;
use rand::seq::IndexedRandom;

/// Words observed right after a given prefix.
///
/// Conceptually, this is the set of outgoing edges of a node in the Markov
/// chain. Repeated observations are stored as repeated entries rather than
/// counts, so a uniform pick over the entries is a pick weighted by
/// frequency over distinct words.
///
/// ## Invariants
/// - Entries keep their insertion order
/// - Once stored in a chain, a `Suffixes` holds at least one word
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Suffixes {
	words: Vec<String>,
}

impl Suffixes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `word`.
	pub fn push(&mut self, word: &str) {
		self.words.push(word.to_owned());
	}

	/// Picks one entry uniformly.
	///
	/// Returns `None` if there are no entries.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.words.choose(rng).map(String::as_str)
	}

	/// Number of entries, duplicates included.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn as_slice(&self) -> &[String] {
		&self.words
	}

	/// Number of times `word` was observed.
	pub fn count(&self, word: &str) -> usize {
		self.words.iter().filter(|w| *w == word).count()
	}
}
