use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::model::corpus::Corpus;
use rs_markov_core::model::fitting::{LengthWindow, fit_text};
use rs_markov_core::model::generator::ends_sentence;
use rs_markov_core::model::prefix::Prefix;
use rs_markov_core::{Chain, Generator, LengthFitter, MarkovError, Settings};

/// Capitals only start sentences, and every sentence ends on one of two
/// words that each occur four times.
const CORPUS: &str = "The old man walked home today. A small dog barked again! \
	The child laughed at the dog today. Did the man walk home with the dog again! \
	A bird sang in the old tree today. The dog walked with the old man again! \
	Nobody knew why the bird sang today. The small child sang with the bird again!";

fn build(prefix_len: usize, seed: u64) -> Chain {
	Chain::build(CORPUS.as_bytes(), prefix_len, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Chain over the unrotated corpus: every sentence end word is followed
/// by something at least once.
fn full(prefix_len: usize) -> Chain {
	let corpus = Corpus::from_reader(CORPUS.as_bytes()).unwrap();
	chain_from(&corpus.rotate_at(0, 0), prefix_len)
}

fn chain_from(words: &[String], prefix_len: usize) -> Chain {
	let mut chain = Chain::new(prefix_len).unwrap();
	chain.add_words(words);
	chain
}

#[test]
fn test_same_seed_same_output() {
	for prefix_len in 1..=3 {
		let run = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			let chain = Chain::build(CORPUS.as_bytes(), prefix_len, &mut rng).unwrap();
			Generator::new(&chain).generate(0, &mut rng).unwrap()
		};
		assert_eq!(run(17), run(17));
	}
}

#[test]
fn test_chain_holds_every_window() {
	let corpus = Corpus::from_reader(CORPUS.as_bytes()).unwrap();
	let starts = corpus.sentence_starts().to_vec();

	for &first in &starts {
		for &second in &starts {
			let rotated = corpus.rotate_at(first, second);
			let chain = chain_from(&rotated, 2);

			let mut prefix = Prefix::new(2);
			for word in &rotated {
				let suffixes = chain.suffixes(&prefix.key()).unwrap();
				assert!(!suffixes.is_empty());
				prefix.shift(word);
			}
		}
	}
}

#[test]
fn test_walks_never_miss_a_prefix() {
	for prefix_len in 1..=3 {
		for seed in 0..100 {
			let chain = build(prefix_len, seed);
			let mut rng = StdRng::seed_from_u64(seed);
			let text = Generator::new(&chain).generate(0, &mut rng).unwrap();
			assert!(ends_sentence(&text), "{text}");
		}
	}
}

#[test]
fn test_stopping_rule() {
	let chain = full(1);
	let generator = Generator::new(&chain);
	let mut rng = StdRng::seed_from_u64(8);

	for min_words in [1, 3, 10, 25, 60] {
		let text = generator.generate(min_words, &mut rng).unwrap();
		let words: Vec<&str> = text.split(' ').collect();
		assert!(words.len() >= min_words, "{text}");
		assert!(words.last().is_some_and(|w| ends_sentence(w)), "{text}");
	}
}

#[test]
fn test_hello_goodbye_chain() {
	let corpus = Corpus::from_reader("Hello world. Goodbye world.".as_bytes()).unwrap();
	assert_eq!(corpus.sentence_starts(), [0, 2]);

	let chain = chain_from(&corpus.rotate_at(0, 0), 1);
	assert_eq!(chain.suffixes("").unwrap().as_slice(), ["Hello"]);
	assert_eq!(chain.suffixes("Hello").unwrap().as_slice(), ["world."]);
	assert_eq!(chain.suffixes("world.").unwrap().as_slice(), ["Goodbye"]);
	assert_eq!(chain.suffixes("Goodbye").unwrap().as_slice(), ["world."]);

	// starting on the second sentence and wrapping around
	let chain = chain_from(&corpus.rotate_at(2, 2), 1);
	assert_eq!(chain.suffixes("").unwrap().as_slice(), ["Goodbye"]);
	assert_eq!(chain.suffixes("world.").unwrap().as_slice(), ["Hello"]);
	assert_eq!(chain.suffixes("Hello").unwrap().as_slice(), ["world."]);

	// whatever the draw, only the four known keys exist
	for seed in 0..50 {
		let mut rng = StdRng::seed_from_u64(seed);
		let chain = Chain::build("Hello world. Goodbye world.".as_bytes(), 1, &mut rng).unwrap();
		assert!(chain.suffixes("").is_some());
		assert!(chain.keys().all(|k| ["", "Hello", "world.", "Goodbye"].contains(&k)));
	}
}

#[test]
fn test_single_word_sentence() {
	let corpus = Corpus::from_reader("Stop. Go on now.".as_bytes()).unwrap();
	let chain = chain_from(&corpus.rotate_at(0, 0), 1);
	let mut rng = StdRng::seed_from_u64(0);
	assert_eq!(Generator::new(&chain).generate(0, &mut rng).unwrap(), "Stop.");
}

#[test]
fn test_long_sentences_are_discarded() {
	// a single sentence of 250+ characters, never cut under 50
	let body: Vec<String> = (1..=40).map(|i| format!("word{i}")).collect();
	let text = format!("Once {} over.", body.join(" "));
	let chain = Chain::build(text.as_bytes(), 1, &mut StdRng::seed_from_u64(1)).unwrap();
	let generator = Generator::new(&chain);

	let first = generator.generate(0, &mut StdRng::seed_from_u64(1)).unwrap();
	assert!(first.len() > 200);
	assert_eq!(fit_text(&first, LengthWindow::new(50)), None);

	let fitter = LengthFitter::new(0, 50).with_max_attempts(5).unwrap();
	let err = fitter.fit(&generator, &mut StdRng::seed_from_u64(1)).unwrap_err();
	assert!(matches!(err, MarkovError::LengthFitTimeout { attempts: 5, budget: 50 }));
}

#[test]
fn test_fitted_text_ends_inside_window() {
	let chain = full(1);
	let generator = Generator::new(&chain);
	let fitter = LengthFitter::new(14, 60);
	let mut rng = StdRng::seed_from_u64(21);

	for _ in 0..5 {
		let text = fitter.fit(&generator, &mut rng).unwrap();
		let last = text.chars().count() - 1;
		assert!((50..=60).contains(&last), "{last}: {text}");
		assert!(ends_sentence(&text));
	}

	let text = fitter.fit_parallel(&generator, 3, &mut rng).unwrap();
	assert!((50..=60).contains(&(text.chars().count() - 1)), "{text}");
}

#[test]
fn test_settings_drive_the_pipeline() {
	let settings = Settings::from_json(
		r#"{"prefixCount": 1, "wordCount": 14, "charCount": 60, "seed": 4}"#,
	)
	.unwrap();
	let mut rng = settings.rng();
	let chain = full(settings.prefix_count);
	let generator = settings.generator(&chain).unwrap();
	let fitter = settings.fitter().unwrap();

	let text = fitter.fit(&generator, &mut rng).unwrap();
	assert!(fitter.window().contains(text.chars().count() - 1));
	assert_eq!(chain.stats().prefix_len, 1);
}
