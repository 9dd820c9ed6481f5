use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::io;

/// Probabilities used by the grammar at each optional branch point.
///
/// Only `Mode::Normal` consults the clause, prepositional phrase and verb
/// phrase probabilities. The adjective weights are used in every mode.
///
/// # Fields and valid ranges
/// - `second_clause` (0.0..=1.0, default 0.60): chance a second clause is appended.
/// - `third_clause` (0.0..=1.0, default 0.40): chance a third clause follows,
///   drawn only once a second clause exists.
/// - `adjective_weights` (three non-negative weights, default 0.40/0.50/0.10):
///   relative odds of a noun phrase having zero, one or two adjectives.
/// - `pp_inclusion` (0.0..=1.0, default 0.30): chance a clause ends with a
///   prepositional phrase.
/// - `complex_vp` (0.0..=1.0, default 0.40): chance a verb phrase takes an object.
///
/// # Invariants
/// - A validated config always has probabilities in range and at least one
///   positive adjective weight
/// - `adjective_distribution` always sums to 1.0 for a validated config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
	second_clause: f64,
	third_clause: f64,
	adjective_weights: [f64; 3],
	pp_inclusion: f64,
	complex_vp: f64,
}

impl Default for GrammarConfig {
	fn default() -> Self {
		Self {
			second_clause: 0.60,
			third_clause: 0.40,
			adjective_weights: [0.40, 0.50, 0.10],
			pp_inclusion: 0.30,
			complex_vp: 0.40,
		}
	}
}

impl GrammarConfig {
	/// Loads a configuration from a JSON file.
	///
	/// Missing fields take their default value. The result is validated.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let contents = io::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
		let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Checks every probability and weight.
	///
	/// # Errors
	/// - `ProbabilityOutOfRange` for a probability outside `[0, 1]` or not finite.
	/// - `InvalidWeight` for a negative or non-finite adjective weight.
	/// - `ZeroWeights` when every adjective weight is zero.
	pub fn validate(&self) -> Result<(), ConfigError> {
		Self::check_probability("second_clause", self.second_clause)?;
		Self::check_probability("third_clause", self.third_clause)?;
		Self::check_probability("pp_inclusion", self.pp_inclusion)?;
		Self::check_probability("complex_vp", self.complex_vp)?;
		Self::check_weights(&self.adjective_weights)
	}

	fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
		if !(0.0..=1.0).contains(&value) {
			return Err(ConfigError::ProbabilityOutOfRange { name, value });
		}
		Ok(())
	}

	fn check_weights(weights: &[f64; 3]) -> Result<(), ConfigError> {
		for (index, &value) in weights.iter().enumerate() {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::InvalidWeight { index, value });
			}
		}
		if weights.iter().sum::<f64>() <= 0.0 {
			return Err(ConfigError::ZeroWeights);
		}
		Ok(())
	}

	pub fn second_clause(&self) -> f64 {
		self.second_clause
	}

	pub fn third_clause(&self) -> f64 {
		self.third_clause
	}

	pub fn pp_inclusion(&self) -> f64 {
		self.pp_inclusion
	}

	pub fn complex_vp(&self) -> f64 {
		self.complex_vp
	}

	/// Returns the raw (not normalized) adjective weights.
	pub fn adjective_weights(&self) -> [f64; 3] {
		self.adjective_weights
	}

	/// Returns the adjective count distribution normalized to sum to 1.0.
	///
	/// Falls back to the default distribution if the weights sum to zero,
	/// which only an unvalidated config can do.
	pub fn adjective_distribution(&self) -> [f64; 3] {
		let sum: f64 = self.adjective_weights.iter().sum();
		if sum > 0.0 && sum.is_finite() {
			self.adjective_weights.map(|w| w / sum)
		} else {
			Self::default().adjective_weights
		}
	}

	pub fn set_second_clause(&mut self, probability: f64) -> Result<(), ConfigError> {
		Self::check_probability("second_clause", probability)?;
		self.second_clause = probability;
		Ok(())
	}

	pub fn set_third_clause(&mut self, probability: f64) -> Result<(), ConfigError> {
		Self::check_probability("third_clause", probability)?;
		self.third_clause = probability;
		Ok(())
	}

	pub fn set_pp_inclusion(&mut self, probability: f64) -> Result<(), ConfigError> {
		Self::check_probability("pp_inclusion", probability)?;
		self.pp_inclusion = probability;
		Ok(())
	}

	pub fn set_complex_vp(&mut self, probability: f64) -> Result<(), ConfigError> {
		Self::check_probability("complex_vp", probability)?;
		self.complex_vp = probability;
		Ok(())
	}

	/// Sets the zero/one/two adjective weights.
	///
	/// Weights are relative: they need not sum to 1.0.
	pub fn set_adjective_weights(&mut self, weights: [f64; 3]) -> Result<(), ConfigError> {
		Self::check_weights(&weights)?;
		self.adjective_weights = weights;
		Ok(())
	}
}
