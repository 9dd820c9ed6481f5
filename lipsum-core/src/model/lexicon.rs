use std::borrow::Cow;

use log::warn;
use rand::Rng;

use crate::model::dictionary::Dictionary;
use crate::model::types::{Gender, PartOfSpeech, Token, Word};

/// Word emitted when the dictionary has nothing for a part of speech.
pub const FALLBACK_WORD: &str = "[fallback]";

/// Why a slot could not be filled as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
	/// No word at all for the part of speech: the fallback marker was used.
	MissingEntry,
	/// No word of the required gender: any word of the part of speech was used.
	NoGenderMatch,
}

/// A slot resolved in degraded mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEvent {
	pub pos: PartOfSpeech,
	pub gender: Gender,
	pub substitute: String,
	pub reason: FallbackReason,
}

/// The word chosen for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
	pub word: Cow<'a, Word>,
	pub fallback: Option<FallbackReason>,
}

/// A finished sentence along with the fallbacks used to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct Filled {
	pub sentence: String,
	pub fallbacks: Vec<FallbackEvent>,
}

/// Resolves skeleton tokens to dictionary words and assembles the sentence.
///
/// ## Responsibilities:
/// - Pick a uniformly random word for each slot, honouring its gender
/// - Degrade gracefully (and warn) when the dictionary cannot satisfy a slot
/// - Join words and punctuation, then capitalize the sentence
///
/// The lexicon borrows its dictionary read-only and takes the random source
/// per call; it holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon<'a> {
	dictionary: &'a Dictionary,
}

impl<'a> Lexicon<'a> {
	pub fn new(dictionary: &'a Dictionary) -> Self {
		Self { dictionary }
	}

	/// Fills the tokens and returns the sentence.
	pub fn fill<R: Rng>(&self, tokens: &[Token], rng: &mut R) -> String {
		self.fill_with_report(tokens, rng).sentence
	}

	/// Fills the tokens and also returns every fallback that was needed.
	///
	/// # Behavior
	/// - Punctuation is appended as-is, never preceded by a space.
	/// - A word is preceded by one space unless it starts the sentence.
	/// - The first alphabetic character of the result is upper-cased.
	pub fn fill_with_report<R: Rng>(&self, tokens: &[Token], rng: &mut R) -> Filled {
		let mut sentence = String::new();
		let mut fallbacks = Vec::new();

		for token in tokens {
			match token {
				Token::Punctuation { text } => sentence.push_str(text),
				Token::Word { pos, gender } => {
					let selection = self.select_word(*pos, *gender, rng);
					if !sentence.is_empty() {
						sentence.push(' ');
					}
					sentence.push_str(&selection.word.text);

					if let Some(reason) = selection.fallback {
						fallbacks.push(FallbackEvent {
							pos: *pos,
							gender: *gender,
							substitute: selection.word.text.clone(),
							reason,
						});
					}
				}
			}
		}

		capitalize_first(&mut sentence);
		Filled { sentence, fallbacks }
	}

	/// Selects a random word for a part of speech and required gender.
	///
	/// # Behavior
	/// - Unspecified gender accepts every word of the part of speech.
	/// - Otherwise only words of exactly that gender are candidates.
	/// - Without candidates, any word of the part of speech is used.
	/// - Without any word for the part of speech, `FALLBACK_WORD` is used.
	///
	/// Both fallbacks log a warning. Each successful pick consumes one draw.
	pub fn select_word<R: Rng>(&self, pos: PartOfSpeech, gender: Gender, rng: &mut R) -> Selection<'a> {
		let words = self.dictionary.words(pos);
		if words.is_empty() {
			warn!(
				"No {} in dictionary (requested gender: {}). Using fallback word: \"{}\"",
				pos, gender, FALLBACK_WORD
			);
			return Selection {
				word: Cow::Owned(Word::new(FALLBACK_WORD, pos, gender)),
				fallback: Some(FallbackReason::MissingEntry),
			};
		}

		let candidates: Vec<&'a Word> = if gender.is_specified() {
			words.iter().filter(|w| w.gender == gender).collect()
		} else {
			words.iter().collect()
		};

		if candidates.is_empty() {
			let word = &words[rng.random_range(0..words.len())];
			warn!(
				"No {} {} in dictionary. Using fallback word: \"{}\" ({})",
				gender, pos, word.text, word.gender
			);
			return Selection { word: Cow::Borrowed(word), fallback: Some(FallbackReason::NoGenderMatch) };
		}

		let word = candidates[rng.random_range(0..candidates.len())];
		Selection { word: Cow::Borrowed(word), fallback: None }
	}
}

/// Upper-cases the first alphabetic character in place.
///
/// Text without any alphabetic character is left unchanged, and so is a
/// letter whose upper-case form is several characters (`ß`).
fn capitalize_first(text: &mut String) {
	if let Some((index, c)) = text.char_indices().find(|(_, c)| c.is_alphabetic()) {
		let mut upper = c.to_uppercase();
		if let (Some(u), None) = (upper.next(), upper.next()) {
			text.replace_range(index..index + c.len_utf8(), u.encode_utf8(&mut [0; 4]));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::grammar::{Grammar, Mode};
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn word(pos: PartOfSpeech, gender: Gender) -> Token {
		Token::Word { pos, gender }
	}

	fn punct(text: &'static str) -> Token {
		Token::Punctuation { text }
	}

	fn small_dictionary() -> Dictionary {
		Dictionary::from_lines([
			"rex noun m",
			"rosa noun f",
			"magnus adj m",
			"magna adj f",
			"currit verb",
			"et conj",
		])
		.unwrap()
	}

	#[test]
	fn spacing_around_punctuation() {
		let dictionary = Dictionary::from_lines(["rex noun m", "currit verb", "et conj"]).unwrap();
		let lexicon = Lexicon::new(&dictionary);
		let tokens = [
			word(PartOfSpeech::Noun, Gender::Masculine),
			word(PartOfSpeech::Verb, Gender::Unspecified),
			punct(","),
			word(PartOfSpeech::Conjunction, Gender::Unspecified),
			word(PartOfSpeech::Noun, Gender::Masculine),
			word(PartOfSpeech::Verb, Gender::Unspecified),
			punct("."),
		];

		let sentence = lexicon.fill(&tokens, &mut StdRng::seed_from_u64(1));
		assert_eq!(sentence, "Rex currit, et rex currit.");
	}

	#[test]
	fn empty_tokens_give_empty_sentence() {
		let dictionary = small_dictionary();
		assert_eq!(Lexicon::new(&dictionary).fill(&[], &mut StdRng::seed_from_u64(1)), "");
	}

	#[test]
	fn required_gender_is_honoured() {
		let dictionary = small_dictionary();
		let lexicon = Lexicon::new(&dictionary);
		let mut rng = StdRng::seed_from_u64(4);

		for _ in 0..100 {
			let selection = lexicon.select_word(PartOfSpeech::Adjective, Gender::Feminine, &mut rng);
			assert_eq!(selection.word.text, "magna");
			assert_eq!(selection.fallback, None);
		}
	}

	#[test]
	fn unspecified_gender_accepts_any_word() {
		let dictionary = small_dictionary();
		let lexicon = Lexicon::new(&dictionary);
		let mut rng = StdRng::seed_from_u64(8);

		let mut seen: Vec<String> = (0..200)
			.map(|_| lexicon.select_word(PartOfSpeech::Noun, Gender::Unspecified, &mut rng).word.text.clone())
			.collect();
		seen.sort();
		seen.dedup();
		assert_eq!(seen, vec!["rex", "rosa"]);
	}

	#[test]
	fn missing_gender_falls_back_to_any_word() {
		let dictionary = small_dictionary();
		let lexicon = Lexicon::new(&dictionary);
		let tokens = [word(PartOfSpeech::Noun, Gender::Neuter), punct(".")];

		let filled = lexicon.fill_with_report(&tokens, &mut StdRng::seed_from_u64(2));
		assert!(filled.sentence == "Rex." || filled.sentence == "Rosa.");
		assert_eq!(filled.fallbacks.len(), 1);
		assert_eq!(filled.fallbacks[0].reason, FallbackReason::NoGenderMatch);
		assert_eq!(filled.fallbacks[0].gender, Gender::Neuter);
	}

	#[test]
	fn missing_entry_uses_marker() {
		let dictionary = Dictionary::from_lines(["rex noun m"]).unwrap();
		let lexicon = Lexicon::new(&dictionary);
		let tokens = [
			word(PartOfSpeech::Noun, Gender::Masculine),
			word(PartOfSpeech::Verb, Gender::Unspecified),
			punct("."),
		];

		let filled = lexicon.fill_with_report(&tokens, &mut StdRng::seed_from_u64(3));
		assert_eq!(filled.sentence, "Rex [fallback].");
		assert_eq!(
			filled.fallbacks,
			vec![FallbackEvent {
				pos: PartOfSpeech::Verb,
				gender: Gender::Unspecified,
				substitute: FALLBACK_WORD.to_owned(),
				reason: FallbackReason::MissingEntry,
			}]
		);
	}

	#[test]
	fn empty_dictionary_never_fails() {
		let dictionary = Dictionary::new();
		let tokens = Grammar::with_mode(Mode::Complex).generate_sentence_tokens(&mut StdRng::seed_from_u64(6));
		let sentence = Lexicon::new(&dictionary).fill(&tokens, &mut StdRng::seed_from_u64(6));

		assert!(sentence.starts_with("[Fallback] "));
		assert!(sentence.ends_with("[fallback]."));
		let words = tokens.iter().filter(|t| matches!(t, Token::Word { .. })).count();
		assert_eq!(sentence.matches("allback]").count(), words);
	}

	#[test]
	fn capitalizes_only_first_letter() {
		let mut text = "rex rex.".to_owned();
		capitalize_first(&mut text);
		assert_eq!(text, "Rex rex.");

		let mut text = "[fallback] rex.".to_owned();
		capitalize_first(&mut text);
		assert_eq!(text, "[Fallback] rex.");

		let mut text = "ære perennius".to_owned();
		capitalize_first(&mut text);
		assert_eq!(text, "Ære perennius");

		let mut text = ", .".to_owned();
		capitalize_first(&mut text);
		assert_eq!(text, ", .");

		let mut text = "ßa.".to_owned();
		capitalize_first(&mut text);
		assert_eq!(text, "ßa.");
	}

	/// Splits a sentence filled from the debug dictionary into `(pos, gender code)` pairs.
	fn debug_slots(sentence: &str) -> Vec<(String, Option<char>)> {
		sentence
			.split_whitespace()
			.map(|w| {
				let w = w.trim_end_matches([',', '.']).to_lowercase();
				match w.split_once('-') {
					Some((pos, code)) => (pos.to_owned(), code.chars().next()),
					None => (w, None),
				}
			})
			.collect()
	}

	#[test]
	fn filled_noun_phrases_agree() {
		let dictionary = Dictionary::debug();
		let lexicon = Lexicon::new(&dictionary);
		let grammar = Grammar::with_mode(Mode::Complex);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..50 {
			let tokens = grammar.generate_sentence_tokens(&mut rng);
			let filled = lexicon.fill_with_report(&tokens, &mut rng);
			assert!(filled.fallbacks.is_empty());

			let mut pending: Vec<char> = Vec::new();
			let mut nouns = 0;
			for (pos, code) in debug_slots(&filled.sentence) {
				match pos.as_str() {
					"adjective" => pending.extend(code),
					"noun" => {
						let code = code.unwrap();
						assert!(pending.iter().all(|c| *c == code), "{}", filled.sentence);
						pending.clear();
						nouns += 1;
					}
					_ => assert!(pending.is_empty(), "{}", filled.sentence),
				}
			}
			assert!(pending.is_empty());
			// Subject, object and prepositional object of three clauses
			assert_eq!(nouns, 9);
		}
	}

	proptest! {
		#[test]
		fn chosen_words_agree_with_their_slot(seed in any::<u64>()) {
			let dictionary = Dictionary::builtin().unwrap();
			let lexicon = Lexicon::new(&dictionary);
			let mut rng = StdRng::seed_from_u64(seed);
			let tokens = Grammar::with_mode(Mode::Complex).generate_sentence_tokens(&mut rng);

			for token in tokens {
				if let Token::Word { pos, gender } = token {
					let selection = lexicon.select_word(pos, gender, &mut rng);
					prop_assert_eq!(selection.fallback, None);
					prop_assert_eq!(selection.word.pos, pos);
					if gender.is_specified() {
						prop_assert_eq!(selection.word.gender, gender);
					}
				}
			}
		}

		#[test]
		fn filled_sentences_are_well_formed(seed in any::<u64>()) {
			let dictionary = Dictionary::builtin().unwrap();
			let mut rng = StdRng::seed_from_u64(seed);
			let tokens = Grammar::default().generate_sentence_tokens(&mut rng);
			let filled = Lexicon::new(&dictionary).fill_with_report(&tokens, &mut rng);
			let sentence = filled.sentence;

			prop_assert!(filled.fallbacks.is_empty());
			prop_assert!(sentence.ends_with('.'));
			prop_assert_eq!(sentence.matches('.').count(), 1);
			prop_assert!(!sentence.contains(" ,") && !sentence.contains(" .") && !sentence.contains("  "));
			prop_assert!(sentence.chars().next().is_some_and(char::is_uppercase));
			// Only the first letter is touched
			prop_assert!(sentence.chars().skip(1).all(|c| !c.is_uppercase()));
		}
	}
}
