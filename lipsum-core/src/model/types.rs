use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grammatical category of a word or of a slot in a sentence skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
	Noun,
	Adjective,
	Verb,
	Adverb,
	Preposition,
	Conjunction,
}

impl PartOfSpeech {
	/// Every part of speech, in declaration order.
	pub const ALL: [PartOfSpeech; 6] = [
		PartOfSpeech::Noun,
		PartOfSpeech::Adjective,
		PartOfSpeech::Verb,
		PartOfSpeech::Adverb,
		PartOfSpeech::Preposition,
		PartOfSpeech::Conjunction,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			PartOfSpeech::Noun => "noun",
			PartOfSpeech::Adjective => "adjective",
			PartOfSpeech::Verb => "verb",
			PartOfSpeech::Adverb => "adverb",
			PartOfSpeech::Preposition => "preposition",
			PartOfSpeech::Conjunction => "conjunction",
		}
	}
}

impl fmt::Display for PartOfSpeech {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PartOfSpeech {
	type Err = String;

	/// Accepts full names and the usual dictionary abbreviations, case-insensitively.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"noun" | "n" => Ok(PartOfSpeech::Noun),
			"adjective" | "adj" => Ok(PartOfSpeech::Adjective),
			"verb" | "v" => Ok(PartOfSpeech::Verb),
			"adverb" | "adv" => Ok(PartOfSpeech::Adverb),
			"preposition" | "prep" => Ok(PartOfSpeech::Preposition),
			"conjunction" | "conj" => Ok(PartOfSpeech::Conjunction),
			_ => Err(format!("unknown part of speech '{}'", s)),
		}
	}
}

/// Grammatical gender.
///
/// `Unspecified` is the "don't care" value: as a requirement it accepts any
/// word, and it is the gender carried by words that take no part in agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
	Masculine,
	Feminine,
	Neuter,
	#[default]
	Unspecified,
}

impl Gender {
	/// Genders a noun phrase may be assigned.
	pub const AGREEING: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Neuter];

	/// Single-letter code used in dictionary files.
	pub fn code(&self) -> char {
		match self {
			Gender::Masculine => 'm',
			Gender::Feminine => 'f',
			Gender::Neuter => 'n',
			Gender::Unspecified => 'x',
		}
	}

	pub fn is_specified(&self) -> bool {
		*self != Gender::Unspecified
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Gender::Masculine => "masculine",
			Gender::Feminine => "feminine",
			Gender::Neuter => "neuter",
			Gender::Unspecified => "unspecified",
		};
		f.write_str(name)
	}
}

impl FromStr for Gender {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"m" | "masculine" => Ok(Gender::Masculine),
			"f" | "feminine" => Ok(Gender::Feminine),
			"n" | "neuter" => Ok(Gender::Neuter),
			"x" | "-" | "unspecified" => Ok(Gender::Unspecified),
			_ => Err(format!("unknown gender '{}'", s)),
		}
	}
}

/// A dictionary word.
///
/// Gender is only meaningful for nouns and adjectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
	pub text: String,
	pub pos: PartOfSpeech,
	pub gender: Gender,
}

impl Word {
	pub fn new(text: &str, pos: PartOfSpeech, gender: Gender) -> Self {
		Self { text: text.to_owned(), pos, gender }
	}
}

/// One instruction of a flattened sentence skeleton.
///
/// # Variants
/// - `Punctuation(text)`: literal text appended as-is.
/// - `Word { pos, gender }`: a request for a dictionary word of the given
///   part of speech and required gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
	Punctuation { text: &'static str },
	Word { pos: PartOfSpeech, gender: Gender },
}

impl Token {
	pub fn is_punctuation(&self, expected: &str) -> bool {
		matches!(self, Token::Punctuation { text } if *text == expected)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_part_of_speech_abbreviations() {
		assert_eq!("adj".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Adjective));
		assert_eq!("PREP".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Preposition));
		assert_eq!("conjunction".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Conjunction));
		assert!("article".parse::<PartOfSpeech>().is_err());
	}

	#[test]
	fn parse_gender_codes_round_trip() {
		for gender in [Gender::Masculine, Gender::Feminine, Gender::Neuter, Gender::Unspecified] {
			assert_eq!(gender.code().to_string().parse::<Gender>(), Ok(gender));
		}
		assert!("q".parse::<Gender>().is_err());
	}

	#[test]
	fn token_serializes_with_kind_tag() {
		let token = Token::Word { pos: PartOfSpeech::Noun, gender: Gender::Feminine };
		let json = serde_json::to_string(&token).unwrap();
		assert_eq!(json, r#"{"kind":"word","pos":"noun","gender":"feminine"}"#);

		let json = serde_json::to_string(&Token::Punctuation { text: "." }).unwrap();
		assert_eq!(json, r#"{"kind":"punctuation","text":"."}"#);
	}
}
