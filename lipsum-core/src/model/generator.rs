use rand::Rng;

use crate::model::dictionary::Dictionary;
use crate::model::grammar::Grammar;
use crate::model::lexicon::Lexicon;
use crate::model::types::Token;

/// Smallest number of sentences in a generated paragraph.
pub const MIN_PARAGRAPH_SENTENCES: usize = 4;
/// Largest number of sentences in a generated paragraph.
pub const MAX_PARAGRAPH_SENTENCES: usize = 7;

/// High-level generator pairing a grammar with a dictionary.
///
/// # Responsibilities
/// - Run the grammar then the lexicon for each sentence
/// - Group sentences into paragraphs
///
/// The random source is always supplied by the caller. Reusing the same
/// source across calls keeps a whole document reproducible from one seed.
#[derive(Debug, Clone)]
pub struct SentenceGenerator {
	grammar: Grammar,
	dictionary: Dictionary,
}

impl SentenceGenerator {
	pub fn new(grammar: Grammar, dictionary: Dictionary) -> Self {
		Self { grammar, dictionary }
	}

	pub fn grammar(&self) -> &Grammar {
		&self.grammar
	}

	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	/// Generates the skeleton of one sentence.
	pub fn tokens<R: Rng>(&self, rng: &mut R) -> Vec<Token> {
		self.grammar.generate_sentence_tokens(rng)
	}

	/// Generates one sentence.
	///
	/// All skeleton draws happen before any word draw.
	pub fn sentence<R: Rng>(&self, rng: &mut R) -> String {
		let tokens = self.grammar.generate_sentence_tokens(rng);
		Lexicon::new(&self.dictionary).fill(&tokens, rng)
	}

	/// Generates a paragraph of 4 to 7 sentences separated by single spaces.
	pub fn paragraph<R: Rng>(&self, rng: &mut R) -> String {
		let count = rng.random_range(MIN_PARAGRAPH_SENTENCES..=MAX_PARAGRAPH_SENTENCES);
		(0..count).map(|_| self.sentence(rng)).collect::<Vec<_>>().join(" ")
	}
}
