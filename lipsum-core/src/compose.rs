use rand::Rng;

use crate::error::ComposeError;
use crate::model::generator::SentenceGenerator;

/// The classic Lorem Ipsum passage, used as the document header.
pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. \
Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. \
Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

/// Background on Lorem Ipsum.
pub const HISTORY: &str = r#"What is Lorem Ipsum?

Lorem Ipsum is simply dummy text of the printing and typesetting industry. Lorem Ipsum has been the industry's standard dummy text ever since the 1500s, when an unknown printer took a galley of type and scrambled it to make a type specimen book. It has survived not only five centuries, but also the leap into electronic typesetting, remaining essentially unchanged. It was popularised in the 1960s with the release of Letraset sheets containing Lorem Ipsum passages, and more recently with desktop publishing software like Aldus PageMaker including versions of Lorem Ipsum.

Where does it come from?

Contrary to popular belief, Lorem Ipsum is not simply random text. It has roots in a piece of classical Latin literature from 45 BC, making it over 2000 years old. Richard McClintock, a Latin professor at Hampden-Sydney College in Virginia, looked up one of the more obscure Latin words, consectetur, from a Lorem Ipsum passage, and going through the cites of the word in classical literature, discovered the undoubtable source. Lorem Ipsum comes from sections 1.10.32 and 1.10.33 of "de Finibus Bonorum et Malorum" (The Extremes of Good and Evil) by Cicero, written in 45 BC. This book is a treatise on the theory of ethics, very popular during the Renaissance. The first line of Lorem Ipsum, "Lorem ipsum dolor sit amet..", comes from a line in section 1.10.32.

Why do we use it?

It is a long established fact that a reader will be distracted by the readable content of a page when looking at its layout. The point of using Lorem Ipsum is that it has a more-or-less normal distribution of letters, as opposed to using 'Content here, content here', making it look like readable English. Many desktop publishing packages and web page editors now use Lorem Ipsum as their default model text, and a search for 'lorem ipsum' will uncover many web sites still in their infancy. Various versions have evolved over the years, sometimes by accident, sometimes on purpose (injected humour and the like).

Source: https://www.lipsum.com/"#;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Shape of a composed document.
///
/// Targets set to `None` or `Some(0)` are ignored. `bytes` cannot be
/// combined with any other target.
///
/// # Targets
/// - `paragraphs`: at least this many paragraphs (the header counts as one).
/// - `sentences`: exactly this many sentences.
/// - `words`: exactly this many words.
/// - `characters`: exactly this many characters.
/// - `bytes`: exactly this many bytes, or one less multi-byte character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
	pub header: bool,
	pub paragraph_breaks: bool,
	pub paragraphs: Option<usize>,
	pub sentences: Option<usize>,
	pub words: Option<usize>,
	pub characters: Option<usize>,
	pub bytes: Option<usize>,
}

impl Default for ComposeOptions {
	fn default() -> Self {
		Self {
			header: true,
			paragraph_breaks: true,
			paragraphs: None,
			sentences: None,
			words: None,
			characters: None,
			bytes: None,
		}
	}
}

impl ComposeOptions {
	/// # Errors
	/// `ExclusiveBytes` when a byte target is combined with another target.
	pub fn validate(&self) -> Result<(), ComposeError> {
		let others = [self.paragraphs, self.sentences, self.words, self.characters];
		if active(self.bytes).is_some() && others.into_iter().any(|t| active(t).is_some()) {
			return Err(ComposeError::ExclusiveBytes);
		}
		Ok(())
	}

	fn has_targets(&self) -> bool {
		[self.paragraphs, self.sentences, self.words, self.characters, self.bytes]
			.into_iter()
			.any(|t| active(t).is_some())
	}
}

fn active(target: Option<usize>) -> Option<usize> {
	target.filter(|n| *n > 0)
}

/// Builds a document from the header and generated text.
///
/// # Behavior
/// Targets are applied in order: paragraphs, sentences, words, then
/// whitespace normalization, then characters or bytes. Length targets are
/// applied after normalization so the final length is exact. Without a
/// header and without targets, a single paragraph is generated.
///
/// # Errors
/// Only when `options` fails validation.
pub fn compose<R: Rng>(
	generator: &SentenceGenerator,
	options: &ComposeOptions,
	rng: &mut R,
) -> Result<String, ComposeError> {
	options.validate()?;

	let mut output = if options.header { LOREM_IPSUM.to_owned() } else { String::new() };

	if let Some(target) = active(options.paragraphs) {
		while count_paragraphs(&output) < target {
			push_with(&mut output, PARAGRAPH_SEPARATOR, &generator.paragraph(rng));
		}
	}

	if let Some(target) = active(options.sentences) {
		let current = count_sentences(&output);
		if current > target {
			truncate_sentences(&mut output, target);
		} else if current < target {
			// Dictionary words may carry their own periods
			let mut extra = String::new();
			while current + count_sentences(&extra) < target {
				push_with(&mut extra, " ", &generator.sentence(rng));
			}
			push_with(&mut output, PARAGRAPH_SEPARATOR, &extra);
			truncate_sentences(&mut output, target);
		}
	}

	if let Some(target) = active(options.words) {
		while count_words(&output) < target {
			push_with(&mut output, " ", &generator.sentence(rng));
		}
		truncate_words(&mut output, target);
	}

	output = if options.paragraph_breaks {
		normalize_paragraphs(&output)
	} else {
		normalize_spaces(&output)
	};

	if let Some(target) = active(options.characters) {
		while output.chars().count() < target {
			push_with(&mut output, " ", &generator.sentence(rng));
		}
		truncate_chars(&mut output, target);
	}

	if let Some(target) = active(options.bytes) {
		while output.len() < target {
			push_with(&mut output, " ", &generator.sentence(rng));
		}
		truncate_bytes(&mut output, target);
	}

	if output.is_empty() && !options.header && !options.has_targets() {
		output = generator.paragraph(rng);
	}

	Ok(output)
}

fn push_with(output: &mut String, separator: &str, text: &str) {
	if !output.is_empty() {
		output.push_str(separator);
	}
	output.push_str(text);
}

/// Number of non-blank lines.
pub fn count_paragraphs(text: &str) -> usize {
	text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Number of sentence-ending periods.
pub fn count_sentences(text: &str) -> usize {
	text.matches('.').count()
}

/// Number of whitespace-separated words.
pub fn count_words(text: &str) -> usize {
	text.split_whitespace().count()
}

/// Collapses every run of whitespace, newlines included, to one space.
pub fn normalize_spaces(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses whitespace within each line, drops blank lines and separates
/// the remaining lines with one blank line.
pub fn normalize_paragraphs(text: &str) -> String {
	text.lines()
		.map(normalize_spaces)
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join(PARAGRAPH_SEPARATOR)
}

/// Cuts right after the `count`-th period.
fn truncate_sentences(text: &mut String, count: usize) {
	if let Some((index, _)) = text.match_indices('.').nth(count.saturating_sub(1)) {
		text.truncate(index + 1);
	}
}

/// Cuts right after the `count`-th word, keeping the whitespace before it.
fn truncate_words(text: &mut String, count: usize) {
	let mut words = 0;
	let mut in_word = false;
	let mut end = None;

	for (index, c) in text.char_indices() {
		if c.is_whitespace() {
			if in_word && words == count {
				end = Some(index);
				break;
			}
			in_word = false;
		} else if !in_word {
			in_word = true;
			words += 1;
		}
	}

	if let Some(end) = end {
		text.truncate(end);
	}
}

fn truncate_chars(text: &mut String, count: usize) {
	if let Some((index, _)) = text.char_indices().nth(count) {
		text.truncate(index);
	}
}

/// Cuts to at most `count` bytes, backing off to a character boundary.
fn truncate_bytes(text: &mut String, count: usize) {
	if text.len() <= count {
		return;
	}
	let mut end = count;
	while !text.is_char_boundary(end) {
		end -= 1;
	}
	text.truncate(end);
}
