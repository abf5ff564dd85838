use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::LazyLock;
use std::thread;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use super::generator::Generator;
use crate::error::MarkovError;

/// Default distance below the budget a cut may land at.
pub const DEFAULT_TOLERANCE: usize = 10;

/// Default number of generations tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Terminal punctuation followed by a space, i.e. a sentence boundary
/// inside a text.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[.?!] ").expect("sentence boundary pattern is valid"));

/// Range of character positions a text may be cut at.
///
/// Positions are character (not byte) indices of the punctuation mark
/// that ends the kept text. Accepted positions are
/// `budget - tolerance ..= budget`, saturating at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthWindow {
	pub budget: usize,
	pub tolerance: usize,
}

impl LengthWindow {
	pub fn new(budget: usize) -> Self {
		Self { budget, tolerance: DEFAULT_TOLERANCE }
	}

	pub fn contains(&self, position: usize) -> bool {
		self.budget.saturating_sub(self.tolerance) <= position && position <= self.budget
	}
}

/// Cuts `text` right after the first sentence boundary whose punctuation
/// mark sits inside `window`.
///
/// Only punctuation followed by a space counts, so the very end of the
/// text is never a candidate. Returns `None` if no boundary fits.
pub fn fit_text(text: &str, window: LengthWindow) -> Option<&str> {
	let mut chars_before = 0;
	let mut last_byte = 0;

	for boundary in SENTENCE_BOUNDARY.find_iter(text) {
		chars_before += text[last_byte..boundary.start()].chars().count();
		last_byte = boundary.start();

		if chars_before > window.budget {
			return None;
		}
		if window.contains(chars_before) {
			// punctuation is a single byte
			return Some(&text[..boundary.start() + 1]);
		}
	}
	None
}

/// Retry loop that keeps generating until a text can be cut to length.
///
/// # Responsibilities
/// - Call the generator with `min_words`
/// - Look for a sentence boundary inside the length window
/// - Discard and retry otherwise, at most `max_attempts` times
///
/// Generation errors are never retried: a chain that fails once will fail
/// again.
#[derive(Clone, Copy, Debug)]
pub struct LengthFitter {
	min_words: usize,
	window: LengthWindow,
	max_attempts: usize,
}

impl LengthFitter {
	/// Creates a fitter targeting `char_budget` with the default tolerance
	/// and attempt cap.
	pub fn new(min_words: usize, char_budget: usize) -> Self {
		Self {
			min_words,
			window: LengthWindow::new(char_budget),
			max_attempts: DEFAULT_MAX_ATTEMPTS,
		}
	}

	pub fn with_tolerance(mut self, tolerance: usize) -> Self {
		self.window.tolerance = tolerance;
		self
	}

	/// Sets the attempt cap.
	///
	/// # Errors
	/// Returns an error if `max_attempts` is 0.
	pub fn with_max_attempts(mut self, max_attempts: usize) -> Result<Self, MarkovError> {
		if max_attempts == 0 {
			return Err(MarkovError::Configuration("max attempts must be >= 1".to_owned()));
		}
		self.max_attempts = max_attempts;
		Ok(self)
	}

	pub fn window(&self) -> LengthWindow {
		self.window
	}

	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	/// Generates texts until one can be cut inside the window.
	///
	/// # Errors
	/// - `LengthFitTimeout` once `max_attempts` texts were discarded
	/// - any error from [`Generator::generate`], unchanged
	pub fn fit<R: Rng + ?Sized>(&self, generator: &Generator<'_>, rng: &mut R) -> Result<String, MarkovError> {
		for attempt in 1..=self.max_attempts {
			let text = generator.generate(self.min_words, rng)?;
			match fit_text(&text, self.window) {
				Some(fitted) => {
					debug!("Fitted {} characters after {attempt} attempt(s)", fitted.chars().count());
					return Ok(fitted.to_owned());
				}
				None => trace!("Attempt {attempt} discarded ({} characters)", text.chars().count()),
			}
		}

		Err(self.timeout())
	}

	/// Same as [`LengthFitter::fit`], racing `workers` threads over the
	/// shared chain.
	///
	/// Each worker gets its own RNG seeded from `rng`, and `max_attempts`
	/// is shared by all of them. The first accepted text wins, so the
	/// result is not reproducible from the seed when `workers > 1`.
	pub fn fit_parallel<R: Rng + ?Sized>(
		&self,
		generator: &Generator<'_>,
		workers: usize,
		rng: &mut R,
	) -> Result<String, MarkovError> {
		let seeds: Vec<u64> = (0..workers.max(1)).map(|_| rng.random()).collect();
		let attempts = AtomicUsize::new(0);
		let done = AtomicBool::new(false);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for seed in seeds {
				let tx = tx.clone();
				let attempts = &attempts;
				let done = &done;

				scope.spawn(move || {
					let mut rng = StdRng::seed_from_u64(seed);
					while !done.load(Ordering::Relaxed) {
						if attempts.fetch_add(1, Ordering::Relaxed) >= self.max_attempts {
							return;
						}
						let outcome = match generator.generate(self.min_words, &mut rng) {
							Ok(text) => match fit_text(&text, self.window) {
								Some(fitted) => Ok(fitted.to_owned()),
								None => continue,
							},
							Err(e) => Err(e),
						};
						done.store(true, Ordering::Relaxed);
						// The receiver outlives the scope
						let _ = tx.send(outcome);
						return;
					}
				});
			}
		});
		drop(tx);

		match rx.try_iter().next() {
			Some(outcome) => {
				let attempts = attempts.load(Ordering::Relaxed).min(self.max_attempts);
				debug!("Parallel fit finished after {attempts} attempt(s)");
				outcome
			}
			None => Err(self.timeout()),
		}
	}

	fn timeout(&self) -> MarkovError {
		MarkovError::LengthFitTimeout { attempts: self.max_attempts, budget: self.window.budget }
	}
}

/// Worker count used when the caller does not pick one.
pub fn default_workers() -> usize {
	num_cpus::get()
}
