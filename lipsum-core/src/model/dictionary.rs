use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;
use crate::io::{cache_path, is_up_to_date, read_lines};
use crate::model::types::{Gender, PartOfSpeech, Word};

/// Word list compiled into the binary.
const BUILTIN: &str = include_str!("../../data/latin.dat");

/// Words available for each part of speech.
///
/// Order within a part of speech is irrelevant. Duplicates are kept and act
/// as frequency weighting during selection.
///
/// # On-disk format
/// One word per line: `text pos [gender]`, whitespace separated.
/// - `#` starts a comment, blank lines are ignored
/// - `pos` is a full name or abbreviation (`noun`, `adj`, `verb`, `adv`, `prep`, `conj`)
/// - `gender` is `m`, `f`, `n` or `x`; a missing gender means unspecified
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
	entries: HashMap<PartOfSpeech, Vec<Word>>,
}

impl Dictionary {
	/// Creates an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// The built-in Latin dictionary.
	///
	/// # Errors
	/// Only if the embedded word list is malformed.
	pub fn builtin() -> Result<Self, DictionaryError> {
		Self::from_lines(BUILTIN.lines())
	}

	/// A dictionary whose words name their own slot, e.g. `adjective-f`.
	///
	/// Useful to inspect the generated sentence structure.
	pub fn debug() -> Self {
		let mut dictionary = Self::new();
		for pos in PartOfSpeech::ALL {
			match pos {
				PartOfSpeech::Noun | PartOfSpeech::Adjective => {
					for gender in Gender::AGREEING {
						let text = format!("{}-{}", pos, gender.code());
						dictionary.insert(Word::new(&text, pos, gender));
					}
				}
				_ => dictionary.insert(Word::new(pos.as_str(), pos, Gender::Unspecified)),
			}
		}
		dictionary
	}

	/// Loads a dictionary file, going through a binary cache.
	///
	/// # Behavior
	/// - The cache lives next to the file with a `.bin` extension.
	/// - If the cache is at least as recent as the file, it is deserialized
	///   with `postcard`.
	/// - Otherwise the text file is parsed and the cache is rewritten.
	///   A failure to write the cache is logged and otherwise ignored.
	/// - Passing a `.bin` file directly loads it as a cache.
	///
	/// # Errors
	/// I/O failures, malformed lines, or a corrupt cache.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
		let path = path.as_ref();
		let cache = cache_path(path)?;

		let dictionary = if is_up_to_date(&cache, path) {
			debug!("Reading dictionary cache {}", cache.display());
			let bytes = std::fs::read(&cache)?;
			postcard::from_bytes(&bytes)?
		} else {
			debug!("Parsing dictionary file {}", path.display());
			let dictionary = Self::from_lines(read_lines(path)?)?;
			if let Err(e) = dictionary.write_cache(&cache) {
				warn!("Could not write dictionary cache {}: {}", cache.display(), e);
			}
			dictionary
		};

		info!("Loaded {} words from {}", dictionary.len(), path.display());
		Ok(dictionary)
	}

	/// Parses dictionary lines.
	///
	/// # Errors
	/// Returns `DictionaryError::Parse` with the 1-based line number of the
	/// first malformed line.
	pub fn from_lines<I, S>(lines: I) -> Result<Self, DictionaryError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut dictionary = Self::new();

		for (index, line) in lines.into_iter().enumerate() {
			let line = line.as_ref();
			let content = line.split('#').next().unwrap_or_default().trim();
			if content.is_empty() {
				continue;
			}

			let parse_error = |reason: String| DictionaryError::Parse { line: index + 1, reason };
			let fields: Vec<&str> = content.split_whitespace().collect();
			let (text, pos, gender) = match fields.as_slice() {
				[text, pos] => (*text, *pos, None),
				[text, pos, gender] => (*text, *pos, Some(*gender)),
				_ => return Err(parse_error(format!("expected 'text pos [gender]', got '{}'", content))),
			};

			let pos: PartOfSpeech = pos.parse().map_err(parse_error)?;
			let gender = match gender {
				Some(g) => g.parse().map_err(parse_error)?,
				None => Gender::Unspecified,
			};
			dictionary.insert(Word::new(text, pos, gender));
		}

		Ok(dictionary)
	}

	fn write_cache(&self, cache_path: &Path) -> Result<(), DictionaryError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(cache_path, bytes)?;
		Ok(())
	}

	/// Adds a word under its own part of speech.
	pub fn insert(&mut self, word: Word) {
		self.entries.entry(word.pos).or_default().push(word);
	}

	/// Returns the words of a part of speech (empty if none).
	pub fn words(&self, pos: PartOfSpeech) -> &[Word] {
		self.entries.get(&pos).map(Vec::as_slice).unwrap_or_default()
	}

	/// Total number of words.
	pub fn len(&self) -> usize {
		self.entries.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_covers_every_slot() {
		let dictionary = Dictionary::builtin().unwrap();
		for pos in PartOfSpeech::ALL {
			assert!(!dictionary.words(pos).is_empty(), "no {} in builtin dictionary", pos);
		}
		for pos in [PartOfSpeech::Noun, PartOfSpeech::Adjective] {
			for gender in Gender::AGREEING {
				assert!(
					dictionary.words(pos).iter().any(|w| w.gender == gender),
					"no {} {} in builtin dictionary",
					gender,
					pos
				);
			}
		}
	}

	#[test]
	fn debug_words_name_their_slot() {
		let dictionary = Dictionary::debug();
		assert_eq!(dictionary.len(), 3 + 3 + 4);
		assert!(dictionary.words(PartOfSpeech::Adjective).contains(&Word::new(
			"adjective-f",
			PartOfSpeech::Adjective,
			Gender::Feminine
		)));
		assert_eq!(dictionary.words(PartOfSpeech::Verb)[0].text, "verb");
	}

	#[test]
	fn parses_comments_and_optional_gender() {
		let dictionary = Dictionary::from_lines([
			"# header",
			"",
			"rex noun m   # king",
			"  currit verb",
			"rex noun m",
		])
		.unwrap();

		assert_eq!(dictionary.len(), 3);
		assert_eq!(dictionary.words(PartOfSpeech::Noun).len(), 2);
		assert_eq!(dictionary.words(PartOfSpeech::Verb)[0].gender, Gender::Unspecified);
		assert!(dictionary.words(PartOfSpeech::Adverb).is_empty());
	}

	#[test]
	fn reports_line_of_malformed_entry() {
		let error = Dictionary::from_lines(["rex noun m", "rosa", "et conj"]).unwrap_err();
		assert!(matches!(error, DictionaryError::Parse { line: 2, .. }));

		let error = Dictionary::from_lines(["rex pronoun m"]).unwrap_err();
		assert!(matches!(error, DictionaryError::Parse { line: 1, .. }));
		assert!(error.to_string().contains("pronoun"));

		let error = Dictionary::from_lines(["rex noun q"]).unwrap_err();
		assert!(matches!(error, DictionaryError::Parse { line: 1, .. }));
	}

	#[test]
	fn load_writes_then_reads_cache() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("words.dat");
		std::fs::write(&source, "rex noun m\nmagnus adj m\ncurrit verb\n").unwrap();

		let parsed = Dictionary::load(&source).unwrap();
		let cache = dir.path().join("words.bin");
		assert!(cache.exists());

		let cached = Dictionary::load(&source).unwrap();
		assert_eq!(parsed, cached);

		let direct = Dictionary::load(&cache).unwrap();
		assert_eq!(parsed, direct);
	}

	#[test]
	fn load_missing_file_fails() {
		let dir = tempfile::tempdir().unwrap();
		let error = Dictionary::load(dir.path().join("missing.dat")).unwrap_err();
		assert!(matches!(error, DictionaryError::Io(_)));
	}
}
