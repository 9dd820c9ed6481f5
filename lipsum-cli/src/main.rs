use std::path::PathBuf;

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use lipsum_core::DEFAULT_SEED;
use lipsum_core::compose::{ComposeOptions, HISTORY, compose};
use lipsum_core::model::dictionary::Dictionary;
use lipsum_core::model::generator::SentenceGenerator;
use lipsum_core::model::grammar::{Grammar, Mode};
use lipsum_core::model::grammar_config::GrammarConfig;

/// Command-line options.
///
/// Length targets of 0 are treated as absent.
#[derive(Parser, Debug)]
#[command(name = "lipsum", version, about = "Generates pseudo-Latin filler text")]
struct Cli {
	/// Set the random seed for reproducibility.
	#[arg(long, value_name = "NUMBER", default_value_t = DEFAULT_SEED)]
	seed: u64,

	/// Force simple sentences (one clause, simple verb phrase, no prepositional phrase).
	#[arg(long, conflicts_with = "complex")]
	simple: bool,

	/// Force complex sentences (three clauses, verbs with objects, always a prepositional phrase).
	#[arg(long)]
	complex: bool,

	/// Do not insert paragraph breaks (output is one block).
	#[arg(long)]
	no_paragraph: bool,

	/// Do not start with the original Lorem Ipsum text.
	#[arg(long)]
	no_header: bool,

	/// Display the history of Lorem Ipsum and exit.
	#[arg(long)]
	history: bool,

	/// Use a dictionary whose words name their grammatical slot.
	#[arg(long, conflicts_with = "dictionary")]
	debug: bool,

	/// Ensure at least this many paragraphs (the header counts as one).
	#[arg(short = 'p', value_name = "NUMBER")]
	paragraphs: Option<usize>,

	/// Produce exactly this many sentences.
	#[arg(short = 's', value_name = "NUMBER")]
	sentences: Option<usize>,

	/// Produce exactly this many words.
	#[arg(short = 'w', value_name = "NUMBER")]
	words: Option<usize>,

	/// Produce exactly this many characters.
	#[arg(short = 'c', value_name = "NUMBER")]
	characters: Option<usize>,

	/// Produce exactly this many bytes (exclusive with -p, -s, -w and -c).
	#[arg(short = 'b', value_name = "NUMBER", conflicts_with_all = ["paragraphs", "sentences", "words", "characters"])]
	bytes: Option<usize>,

	/// Load words from a dictionary file instead of the built-in list.
	#[arg(long, value_name = "FILE")]
	dictionary: Option<PathBuf>,

	/// Load grammar probabilities from a JSON file.
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,
}

impl Cli {
	fn mode(&self) -> Mode {
		if self.simple {
			Mode::Simple
		} else if self.complex {
			Mode::Complex
		} else {
			Mode::Normal
		}
	}

	fn compose_options(&self) -> ComposeOptions {
		ComposeOptions {
			header: !self.no_header,
			paragraph_breaks: !self.no_paragraph,
			paragraphs: self.paragraphs,
			sentences: self.sentences,
			words: self.words,
			characters: self.characters,
			bytes: self.bytes,
		}
	}

	fn generator(&self) -> Result<SentenceGenerator, Box<dyn std::error::Error>> {
		let config = match &self.config {
			Some(path) => GrammarConfig::from_json_file(path)?,
			None => GrammarConfig::default(),
		};
		let grammar = Grammar::new(self.mode(), config)?;

		let dictionary = match &self.dictionary {
			Some(path) => Dictionary::load(path)?,
			None if self.debug => Dictionary::debug(),
			None => Dictionary::builtin()?,
		};
		debug!("Using {:?} grammar with {} dictionary words", grammar.mode(), dictionary.len());

		Ok(SentenceGenerator::new(grammar, dictionary))
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Cli::parse();
	if cli.history {
		println!("{}", HISTORY);
		return Ok(());
	}

	let generator = cli.generator()?;
	let mut rng = StdRng::seed_from_u64(cli.seed);
	let output = compose(&generator, &cli.compose_options(), &mut rng)?;

	println!("{}", output);
	Ok(())
}
