//! Word-level Markov chain text generation.
//!
//! This module provides:
//! - Corpus reading and rotation (`Corpus`)
//! - The prefix → suffixes model (`Chain`)
//! - The sliding word window (`Prefix`)
//! - The random walk producing sentences (`Generator`)
//! - The retry loop fitting a text to a character budget (`LengthFitter`)

/// Prefix → suffixes model built from a rotated corpus.
///
/// Handles the sliding-window ingestion and frequency-weighted lookups.
pub mod chain;

/// Tokenized corpus and its sentence-start rotation.
pub mod corpus;

/// Retry loop cutting generated text at a sentence boundary near a
/// character budget, sequential or raced over several threads.
pub mod fitting;

/// Random walk over a chain with a sentence-aware stopping rule.
pub mod generator;

/// Fixed-size sliding window of words, used as the chain key.
pub mod prefix;

/// Multiset of words observed after a prefix.
pub mod suffixes;
