use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, web};

use log::info;
use rndstring_core::{Error, entropy, generator_names, join, new_generator};
use serde::Deserialize;

mod config;

use config::ServerConfig;

const DEFAULT_LENGTH: i64 = 16;
const DEFAULT_BYTES: i64 = 32;
const MAX_BYTES: usize = 4096;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	name: Option<String>, // one name or a comma-separated list
	length: Option<i64>,
	count: Option<usize>,
	delimiter: Option<String>,
}

/// Struct representing query parameters for the `/v1/bytes` endpoint
#[derive(Deserialize)]
struct BytesParams {
	length: Option<i64>,
	strict: Option<bool>,
}

impl GenerateParams {
	/// Generator names, in request order.
	fn names(&self) -> Result<Vec<&str>, String> {
		let names: Vec<&str> = match &self.name {
			Some(s) => s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect(),
			None => Vec::new(),
		};

		if names.is_empty() {
			Err("Missing or empty generator name".into())
		} else {
			Ok(names)
		}
	}
}

/// Negative lengths mean "nothing", not an error.
fn clamp_length(length: i64) -> usize {
	usize::try_from(length).unwrap_or(0)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Builds one generator per requested name and returns `count` tokens,
/// one per line. Each token joins one output per generator with `delimiter`.
#[get("/v1/generate")]
async fn get_generated(config: web::Data<ServerConfig>, query: web::Query<GenerateParams>) -> impl Responder {
	let names = match query.names() {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let length = clamp_length(query.length.unwrap_or(DEFAULT_LENGTH));
	if length > config.max_length {
		return HttpResponse::BadRequest().body(format!("length must be at most {}", config.max_length));
	}
	let count = query.count.unwrap_or(1);
	if count > config.max_count {
		return HttpResponse::BadRequest().body(format!("count must be at most {}", config.max_count));
	}
	let delimiter = query.delimiter.as_deref().unwrap_or("-");

	let mut generators = Vec::with_capacity(names.len());
	for name in names {
		match new_generator(name, length) {
			Ok(generator) => generators.push(generator),
			Err(e @ Error::UnknownGeneratorName(_)) => return HttpResponse::NotFound().body(e.to_string()),
			Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
		}
	}

	let tokens: Vec<String> = (0..count).map(|_| join(delimiter, &generators)).collect();
	HttpResponse::Ok().body(tokens.join("\n"))
}

#[get("/v1/generators")]
async fn get_generators() -> impl Responder {
	HttpResponse::Ok().body(generator_names().join("\n"))
}

/// HTTP GET endpoint `/v1/bytes`
///
/// Returns hex encoded random bytes. With `strict=true` the OS source must
/// deliver them, otherwise 503 is returned instead of falling back.
#[get("/v1/bytes")]
async fn get_bytes(query: web::Query<BytesParams>) -> impl Responder {
	let length = clamp_length(query.length.unwrap_or(DEFAULT_BYTES));
	if length > MAX_BYTES {
		return HttpResponse::BadRequest().body(format!("length must be at most {MAX_BYTES}"));
	}

	let mut buf = vec![0u8; length];
	if query.strict.unwrap_or(false) {
		if let Err(e) = entropy::fill_random_bytes_strict(&mut buf) {
			return HttpResponse::ServiceUnavailable().body(e.to_string());
		}
	} else {
		entropy::fill_random_bytes(&mut buf);
	}

	HttpResponse::Ok().body(hex::encode(buf))
}

/// Main entry point for the server.
///
/// Reads `ServerConfig` from the environment and starts an Actix-web HTTP
/// server exposing the generator registry.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env()?;
	info!(
		"listening on {}:{} ({} workers, {} generators)",
		config.host,
		config.port,
		config.workers,
		generator_names().len()
	);

	let address = (config.host.clone(), config.port);
	let workers = config.workers;
	let shared_config = web::Data::new(config);

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_config.clone())
			.service(get_generated)
			.service(get_generators)
			.service(get_bytes)
	})
		.workers(workers)
		.bind(address)?
		.run()
		.await
}
