use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::grammar_config::GrammarConfig;
use crate::model::types::{Gender, PartOfSpeech, Token};

/// Sentence complexity policy.
///
/// # Variants
/// - `Simple`: one clause, verb-only verb phrases, no prepositional phrases.
/// - `Normal`: every optional branch is drawn from `GrammarConfig`.
/// - `Complex`: three clauses, every verb takes an object, every clause
///   ends with a prepositional phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	Simple,
	#[default]
	Normal,
	Complex,
}

/// A node of a sentence structure tree.
///
/// Composite variants own their children in sentence order. `Punctuation`
/// and `Slot` are leaves. A tree is built for one sentence, flattened once,
/// then dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	Sentence(Vec<Node>),
	Clause(Vec<Node>),
	NounPhrase(Vec<Node>),
	VerbPhrase(Vec<Node>),
	PrepositionalPhrase(Vec<Node>),
	Punctuation(&'static str),
	Slot { pos: PartOfSpeech, gender: Gender },
}

impl Node {
	fn slot(pos: PartOfSpeech, gender: Gender) -> Self {
		Node::Slot { pos, gender }
	}

	/// Returns the children of a composite node, or an empty slice for a leaf.
	pub fn children(&self) -> &[Node] {
		match self {
			Node::Sentence(children)
			| Node::Clause(children)
			| Node::NounPhrase(children)
			| Node::VerbPhrase(children)
			| Node::PrepositionalPhrase(children) => children,
			Node::Punctuation(_) | Node::Slot { .. } => &[],
		}
	}

	/// Flattens the tree into tokens, depth-first and left to right.
	///
	/// Pure and deterministic: the same tree always yields the same tokens.
	pub fn flatten(&self) -> Vec<Token> {
		let mut tokens = Vec::new();
		self.flatten_into(&mut tokens);
		tokens
	}

	fn flatten_into(&self, tokens: &mut Vec<Token>) {
		match self {
			Node::Sentence(children)
			| Node::Clause(children)
			| Node::NounPhrase(children)
			| Node::VerbPhrase(children)
			| Node::PrepositionalPhrase(children) => {
				for child in children {
					child.flatten_into(tokens);
				}
			}
			Node::Punctuation(text) => tokens.push(Token::Punctuation { text: *text }),
			Node::Slot { pos, gender } => tokens.push(Token::Word { pos: *pos, gender: *gender }),
		}
	}
}

/// Builds sentence skeletons from a small probabilistic grammar.
///
/// ```text
/// Sentence   -> Clause ( "," Conjunction Clause )* "."
/// Clause     -> NounPhrase VerbPhrase [PrepositionalPhrase]
/// NounPhrase -> Adjective{0,2} Noun
/// VerbPhrase -> Verb [NounPhrase]
/// PrepPhrase -> Preposition NounPhrase
/// ```
///
/// The grammar holds no random state. Every draw comes from the generator
/// passed to each call, in tree-building order, so a seeded generator
/// reproduces the same skeleton.
#[derive(Debug, Clone)]
pub struct Grammar {
	mode: Mode,
	config: GrammarConfig,
	adjective_distribution: [f64; 3],
}

impl Default for Grammar {
	fn default() -> Self {
		Self::with_mode(Mode::default())
	}
}

impl Grammar {
	/// Creates a grammar with a custom configuration.
	///
	/// # Errors
	/// Returns the first validation failure of `config`.
	pub fn new(mode: Mode, config: GrammarConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let adjective_distribution = config.adjective_distribution();
		Ok(Self { mode, config, adjective_distribution })
	}

	/// Creates a grammar with the default probabilities.
	pub fn with_mode(mode: Mode) -> Self {
		let config = GrammarConfig::default();
		let adjective_distribution = config.adjective_distribution();
		Self { mode, config, adjective_distribution }
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn config(&self) -> &GrammarConfig {
		&self.config
	}

	/// Generates the token sequence of one sentence.
	///
	/// Never fails. The last token is always the `"."` punctuation.
	pub fn generate_sentence_tokens<R: Rng>(&self, rng: &mut R) -> Vec<Token> {
		let tokens = self.build_sentence(rng).flatten();
		debug!("Generated {:?} sentence skeleton with {} tokens", self.mode, tokens.len());
		tokens
	}

	/// Builds the structure tree of one sentence without flattening it.
	pub fn build_sentence<R: Rng>(&self, rng: &mut R) -> Node {
		let mut children = vec![self.clause(rng)];

		match self.mode {
			Mode::Simple => {}
			Mode::Complex => {
				self.append_clause(&mut children, rng);
				self.append_clause(&mut children, rng);
			}
			Mode::Normal => {
				// The third clause is only considered once a second one exists
				if Self::chance(rng, self.config.second_clause()) {
					self.append_clause(&mut children, rng);
					if Self::chance(rng, self.config.third_clause()) {
						self.append_clause(&mut children, rng);
					}
				}
			}
		}

		children.push(Node::Punctuation("."));
		Node::Sentence(children)
	}

	/// Appends `"," Conjunction Clause` to a sentence.
	fn append_clause<R: Rng>(&self, sentence: &mut Vec<Node>, rng: &mut R) {
		sentence.push(Node::Punctuation(","));
		sentence.push(Node::slot(PartOfSpeech::Conjunction, Gender::Unspecified));
		sentence.push(self.clause(rng));
	}

	/// Clause -> NounPhrase VerbPhrase [PrepositionalPhrase]
	fn clause<R: Rng>(&self, rng: &mut R) -> Node {
		let mut children = vec![self.noun_phrase(rng), self.verb_phrase(rng)];

		let with_pp = match self.mode {
			Mode::Simple => false,
			Mode::Complex => true,
			Mode::Normal => Self::chance(rng, self.config.pp_inclusion()),
		};
		if with_pp {
			children.push(self.prepositional_phrase(rng));
		}

		Node::Clause(children)
	}

	/// NounPhrase -> Adjective{0,2} Noun
	///
	/// The gender is drawn once and shared by every slot of the phrase.
	fn noun_phrase<R: Rng>(&self, rng: &mut R) -> Node {
		let gender = Gender::AGREEING[rng.random_range(0..Gender::AGREEING.len())];
		let adjectives = self.adjective_count(rng);

		let mut children = Vec::with_capacity(adjectives + 1);
		for _ in 0..adjectives {
			children.push(Node::slot(PartOfSpeech::Adjective, gender));
		}
		children.push(Node::slot(PartOfSpeech::Noun, gender));

		Node::NounPhrase(children)
	}

	/// VerbPhrase -> Verb [NounPhrase]
	fn verb_phrase<R: Rng>(&self, rng: &mut R) -> Node {
		let mut children = vec![Node::slot(PartOfSpeech::Verb, Gender::Unspecified)];

		let complex = match self.mode {
			Mode::Simple => false,
			Mode::Complex => true,
			Mode::Normal => Self::chance(rng, self.config.complex_vp()),
		};
		if complex {
			children.push(self.noun_phrase(rng));
		}

		Node::VerbPhrase(children)
	}

	/// PrepPhrase -> Preposition NounPhrase
	fn prepositional_phrase<R: Rng>(&self, rng: &mut R) -> Node {
		Node::PrepositionalPhrase(vec![
			Node::slot(PartOfSpeech::Preposition, Gender::Unspecified),
			self.noun_phrase(rng),
		])
	}

	/// Draws the number of adjectives (0, 1 or 2) from the normalized weights.
	///
	/// This method performs a cumulative scan over the three buckets with
	/// a single uniform draw.
	fn adjective_count<R: Rng>(&self, rng: &mut R) -> usize {
		let draw: f64 = rng.random();

		let mut cumulative = 0.0;
		for (count, weight) in self.adjective_distribution.iter().enumerate() {
			cumulative += weight;
			if draw < cumulative {
				return count;
			}
		}

		// Rounding left the cumulative sum just under 1.0: use the last reachable bucket
		self.adjective_distribution.iter().rposition(|w| *w > 0.0).unwrap_or(0)
	}

	/// Bernoulli draw.
	fn chance<R: Rng>(rng: &mut R, probability: f64) -> bool {
		rng.random::<f64>() < probability
	}
}
