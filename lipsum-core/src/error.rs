use thiserror::Error;

/// Invalid grammar configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("{name} must be between 0.0 and 1.0, got {value}")]
	ProbabilityOutOfRange { name: &'static str, value: f64 },

	#[error("adjective weight #{index} must be a non-negative finite number, got {value}")]
	InvalidWeight { index: usize, value: f64 },

	#[error("adjective weights must not all be zero")]
	ZeroWeights,

	#[error("failed to read configuration file: {0}")]
	Io(String),

	#[error("failed to parse configuration file: {0}")]
	Parse(String),
}

/// Failure while loading or caching a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("line {line}: {reason}")]
	Parse { line: usize, reason: String },

	#[error("dictionary cache error: {0}")]
	Cache(#[from] postcard::Error),
}

/// Invalid combination of document length targets.
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
	#[error("a byte target is exclusive and cannot be combined with paragraph, sentence, word or character targets")]
	ExclusiveBytes,
}
