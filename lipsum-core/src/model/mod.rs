//! Top-level module for the sentence generation pipeline.
//!
//! This module provides:
//! - The shared word and token data model (`types`)
//! - Probability configuration for the grammar (`GrammarConfig`)
//! - The sentence skeleton generator (`Grammar`)
//! - Word dictionaries and their on-disk format (`Dictionary`)
//! - Slot resolution with gender agreement (`Lexicon`)
//! - A high-level interface pairing a grammar with a dictionary (`SentenceGenerator`)

/// Parts of speech, genders, words and skeleton tokens.
pub mod types;

/// Caller-supplied probabilities driving the grammar's optional branches.
///
/// Values are validated on assignment and adjective weights are normalized.
pub mod grammar_config;

/// Probabilistic sentence skeleton generation.
///
/// Builds a structure tree per sentence and flattens it into tokens.
pub mod grammar;

/// Word dictionaries indexed by part of speech.
///
/// Supports the built-in Latin list, a debug list, and text files
/// with a binary cache.
pub mod dictionary;

/// Resolution of skeleton tokens into a finished sentence.
pub mod lexicon;

/// High-level interface producing sentences and paragraphs.
pub mod generator;
