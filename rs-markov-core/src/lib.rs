//! Markov-chain text generation library.
//!
//! This crate provides a word-level text generator including:
//! - Corpus ingestion with sentence-start rotation
//! - A prefix → suffixes chain with frequency-weighted sampling
//! - Sentence-aware random walks with a bounded word count
//! - A retry loop fitting generated text to a character budget
//! - Settings loading and a publishing seam
//!
//! Every randomized operation takes the RNG as a parameter, so seeding a
//! `StdRng` makes a whole run reproducible.

/// Core chain model and generation logic.
pub mod model;

/// Settings file parsing and validation.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Output seam for finished texts.
pub mod publish;

/// I/O utilities (file and stream reading).
///
/// Not exposed
pub(crate) mod io;

pub use config::Settings;
pub use error::MarkovError;
pub use model::chain::{Chain, ChainStats};
pub use model::fitting::LengthFitter;
pub use model::generator::Generator;
