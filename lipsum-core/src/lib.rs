//! Pseudo-Latin filler text generation library.
//!
//! This crate provides a two-stage sentence generator:
//! - A probabilistic grammar that builds a sentence skeleton (a tree of
//!   clauses and phrases) and flattens it into word slots and punctuation
//! - A lexicon filler that resolves each slot to a dictionary word while
//!   keeping adjectives in gender agreement with their noun
//!
//! On top of the core pipeline it offers dictionary loading (with a binary
//! cache) and a composer that assembles whole documents to a target length.

/// Grammar, lexicon, dictionary and the high-level sentence generator.
pub mod model;

/// Document assembly: header, paragraphs, length targets and normalization.
pub mod compose;

/// Error types shared across the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

/// Seed used whenever the caller does not supply one, so that output stays
/// reproducible by default.
pub const DEFAULT_SEED: u64 = 1;
