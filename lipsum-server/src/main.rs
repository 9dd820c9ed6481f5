use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, web};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use lipsum_core::DEFAULT_SEED;
use lipsum_core::compose::{ComposeOptions, HISTORY, compose};
use lipsum_core::model::dictionary::Dictionary;
use lipsum_core::model::generator::SentenceGenerator;
use lipsum_core::model::grammar::{Grammar, Mode};
use lipsum_core::model::grammar_config::GrammarConfig;

/// Server options.
#[derive(Parser, Debug)]
#[command(name = "lipsum-server", version, about = "Serves pseudo-Latin filler text over HTTP")]
struct Args {
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Load words from a dictionary file instead of the built-in list.
	#[arg(long, value_name = "FILE")]
	dictionary: Option<PathBuf>,

	/// Load grammar probabilities from a JSON file.
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,
}

/// Query parameters shared by the sentence and skeleton endpoints.
#[derive(Deserialize)]
struct SentenceParams {
	mode: Option<Mode>,
	seed: Option<u64>,
}

/// Query parameters of the `/v1/lipsum` endpoint.
#[derive(Deserialize)]
struct LipsumParams {
	mode: Option<Mode>,
	seed: Option<u64>,
	paragraphs: Option<usize>,
	sentences: Option<usize>,
	words: Option<usize>,
	characters: Option<usize>,
	bytes: Option<usize>,
	no_header: Option<bool>,
	no_paragraph: Option<bool>,
}

/// Largest length target a single request may ask for.
const MAX_TARGET: usize = 100_000;

impl LipsumParams {
	fn check_limits(&self) -> Result<(), String> {
		let targets = [
			("paragraphs", self.paragraphs),
			("sentences", self.sentences),
			("words", self.words),
			("characters", self.characters),
			("bytes", self.bytes),
		];
		match targets.into_iter().find(|(_, target)| target.is_some_and(|n| n > MAX_TARGET)) {
			Some((name, _)) => Err(format!("{} must not exceed {}", name, MAX_TARGET)),
			None => Ok(()),
		}
	}

	fn compose_options(&self) -> ComposeOptions {
		ComposeOptions {
			header: !self.no_header.unwrap_or(false),
			paragraph_breaks: !self.no_paragraph.unwrap_or(false),
			paragraphs: self.paragraphs,
			sentences: self.sentences,
			words: self.words,
			characters: self.characters,
			bytes: self.bytes,
		}
	}
}

/// Read-only state shared by every worker.
///
/// One generator per mode, all built from the same dictionary and configuration.
struct SharedData {
	simple: SentenceGenerator,
	normal: SentenceGenerator,
	complex: SentenceGenerator,
}

impl SharedData {
	fn new(dictionary: Dictionary, config: GrammarConfig) -> Result<Self, Box<dyn std::error::Error>> {
		let generator = |mode: Mode| -> Result<SentenceGenerator, Box<dyn std::error::Error>> {
			Ok(SentenceGenerator::new(Grammar::new(mode, config.clone())?, dictionary.clone()))
		};
		Ok(Self {
			simple: generator(Mode::Simple)?,
			normal: generator(Mode::Normal)?,
			complex: generator(Mode::Complex)?,
		})
	}

	fn generator(&self, mode: Option<Mode>) -> &SentenceGenerator {
		match mode.unwrap_or_default() {
			Mode::Simple => &self.simple,
			Mode::Normal => &self.normal,
			Mode::Complex => &self.complex,
		}
	}
}

/// Each request gets its own generator seeded from the query, so a given
/// URL always returns the same text.
fn seeded(seed: Option<u64>) -> StdRng {
	StdRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED))
}

/// HTTP GET endpoint `/v1/sentence`
///
/// Returns one generated sentence as plain text.
#[get("/v1/sentence")]
async fn get_sentence(data: web::Data<SharedData>, query: web::Query<SentenceParams>) -> impl Responder {
	let sentence = data.generator(query.mode).sentence(&mut seeded(query.seed));
	HttpResponse::Ok().body(sentence)
}

/// HTTP GET endpoint `/v1/skeleton`
///
/// Returns the token sequence of one sentence as JSON.
#[get("/v1/skeleton")]
async fn get_skeleton(data: web::Data<SharedData>, query: web::Query<SentenceParams>) -> impl Responder {
	let tokens = data.generator(query.mode).tokens(&mut seeded(query.seed));
	HttpResponse::Ok().json(tokens)
}

/// HTTP GET endpoint `/v1/lipsum`
///
/// Returns a composed document. Invalid target combinations and targets
/// above `MAX_TARGET` yield 400.
#[get("/v1/lipsum")]
async fn get_lipsum(data: web::Data<SharedData>, query: web::Query<LipsumParams>) -> impl Responder {
	if let Err(reason) = query.check_limits() {
		return HttpResponse::BadRequest().body(reason);
	}
	let generator = data.generator(query.mode);
	match compose(generator, &query.compose_options(), &mut seeded(query.seed)) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

#[get("/v1/history")]
async fn get_history() -> impl Responder {
	HttpResponse::Ok().body(HISTORY)
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_sentence)
		.service(get_skeleton)
		.service(get_lipsum)
		.service(get_history);
}

/// Main entry point for the server.
///
/// Loads the dictionary and grammar configuration once, shares them
/// read-only across workers, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let dictionary = match &args.dictionary {
		Some(path) => Dictionary::load(path)?,
		None => Dictionary::builtin()?,
	};
	let config = match &args.config {
		Some(path) => GrammarConfig::from_json_file(path)?,
		None => GrammarConfig::default(),
	};
	let shared_data = web::Data::new(SharedData::new(dictionary, config)?);

	let workers = num_cpus::get();
	info!("Listening on {}:{} with {} workers", args.host, args.port, workers);

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.workers(workers)
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn shared_data() -> web::Data<SharedData> {
		let dictionary = Dictionary::builtin().unwrap();
		web::Data::new(SharedData::new(dictionary, GrammarConfig::default()).unwrap())
	}

	#[actix_web::test]
	async fn sentence_is_reproducible() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;

		let first = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/sentence?seed=3&mode=simple").to_request()).await;
		let second = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/sentence?seed=3&mode=simple").to_request()).await;

		assert_eq!(first, second);
		assert!(first.ends_with(b"."));
	}

	#[actix_web::test]
	async fn skeleton_is_json() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let request = test::TestRequest::get().uri("/v1/skeleton?mode=complex").to_request();
		let body = test::call_and_read_body(&app, request).await;
		let text = String::from_utf8(body.to_vec()).unwrap();

		assert!(text.starts_with('['));
		assert!(text.ends_with(r#"{"kind":"punctuation","text":"."}]"#));
		assert_eq!(text.matches(r#""pos":"conjunction""#).count(), 2);
	}

	#[actix_web::test]
	async fn lipsum_rejects_bytes_with_words() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let request = test::TestRequest::get().uri("/v1/lipsum?bytes=10&words=2").to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn lipsum_honours_targets() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let request = test::TestRequest::get().uri("/v1/lipsum?no_header=true&words=12&seed=4").to_request();
		let body = test::call_and_read_body(&app, request).await;
		let text = String::from_utf8(body.to_vec()).unwrap();
		assert_eq!(text.split_whitespace().count(), 12);
	}

	#[actix_web::test]
	async fn lipsum_rejects_oversized_targets() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;

		for query in ["bytes=1000000000", "characters=100001", "words=5000000", "sentences=999999", "paragraphs=100001"] {
			let request = test::TestRequest::get().uri(&format!("/v1/lipsum?{}", query)).to_request();
			let response = test::call_service(&app, request).await;
			assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", query);
		}

		let request = test::TestRequest::get().uri("/v1/lipsum?no_header=true&characters=100000").to_request();
		let body = test::call_and_read_body(&app, request).await;
		assert_eq!(String::from_utf8(body.to_vec()).unwrap().chars().count(), MAX_TARGET);
	}

	#[actix_web::test]
	async fn unknown_mode_is_rejected() {
		let app = test::init_service(App::new().app_data(shared_data()).configure(configure)).await;
		let request = test::TestRequest::get().uri("/v1/sentence?mode=baroque").to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
