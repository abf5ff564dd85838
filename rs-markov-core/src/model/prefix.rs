use std::fmt;

/// Sliding window of the last `len` words seen.
///
/// Used both while ingesting a corpus and while walking the chain.
/// A fresh prefix is made of empty strings, which is the "cold start" key
/// every chain contains.
///
/// The window is mutated in place by [`Prefix::shift`], so it is never
/// stored as is: [`Prefix::key`] snapshots it into an owned string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	words: Vec<String>,
}

impl Prefix {
	/// Creates a window of `len` empty words.
	pub fn new(len: usize) -> Self {
		Self { words: vec![String::new(); len] }
	}

	/// Drops the oldest word and appends `word`.
	pub fn shift(&mut self, word: &str) {
		if self.is_empty() {
			return;
		}
		self.words.rotate_left(1);
		if let Some(last) = self.words.last_mut() {
			word.clone_into(last);
		}
	}

	/// Returns the words joined by a single space (the chain key).
	pub fn key(&self) -> String {
		self.words.join(" ")
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.key())
	}
}
