use std::env;
use std::fs::File;
use std::io::BufReader;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use rs_markov_core::{Chain, MarkovError, Settings};
use serde::Deserialize;

/// Query parameters of the `/v1/generate` endpoint.
///
/// Missing values fall back to the settings file.
#[derive(Deserialize)]
struct GenerateParams {
	min_words: Option<usize>,
	char_budget: Option<usize>,
	fit: Option<bool>,
}

/// Chain built once at startup, then only read by the handlers.
struct SharedData {
	chain: Chain,
	settings: Settings,
}

impl SharedData {
	fn generate(&self, params: &GenerateParams) -> Result<String, MarkovError> {
		let mut settings = self.settings.clone();
		if let Some(min_words) = params.min_words {
			settings.word_count = min_words;
		}
		if let Some(char_budget) = params.char_budget {
			settings.char_count = char_budget;
		}
		settings.validate()?;

		let mut rng = rand::rng();
		let generator = settings.generator(&self.chain)?;
		if params.fit.unwrap_or(false) {
			settings.fitter()?.fit(&generator, &mut rng)
		} else {
			generator.generate(settings.word_count, &mut rng)
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns a plain generation, or a length-fitted one with `fit=true`.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = data.into_inner();
	let params = query.into_inner();

	// Fitting may retry thousands of times, keep it off the async workers
	let result = web::block(move || shared_data.generate(&params)).await;
	match result {
		Ok(Ok(text)) => HttpResponse::Ok().body(text),
		Ok(Err(e @ MarkovError::Configuration(_))) => HttpResponse::BadRequest().body(e.to_string()),
		Ok(Err(e)) => {
			error!("Generation failed ({}): {e}", e.kind());
			HttpResponse::InternalServerError().body(e.to_string())
		}
		Err(_) => HttpResponse::InternalServerError().body("Generation task failed"),
	}
}

/// HTTP GET endpoint `/v1/chain`
///
/// Returns the chain size summary as JSON.
#[get("/v1/chain")]
async fn get_chain(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(data.chain.stats())
}

fn load() -> Result<SharedData, MarkovError> {
	let corpus_path = env::var("RS_MARKOV_CORPUS").unwrap_or_else(|_| "data.txt".to_owned());
	let config_path = env::var("RS_MARKOV_CONFIG").unwrap_or_else(|_| "configuration.json".to_owned());

	let settings = Settings::load(&config_path)?;
	let mut rng = settings.rng();
	let corpus = BufReader::new(File::open(&corpus_path)?);
	let chain = Chain::build(corpus, settings.prefix_count, &mut rng)?;
	info!("Loaded {corpus_path}: {} prefixes", chain.len());

	Ok(SharedData { chain, settings })
}

/// Main entry point for the server.
///
/// Builds the chain once, shares it read-only between workers (no lock is
/// needed since nothing writes to it) and serves it on 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = match load() {
		Ok(data) => web::Data::new(data),
		Err(e) => {
			error!("Startup failed ({}): {e}", e.kind());
			return Err(std::io::Error::other(e));
		}
	};

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_chain)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
