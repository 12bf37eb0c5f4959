use std::env;
use std::fmt::Display;
use std::io;
use std::str::FromStr;

/// Server settings, read from `RNDSTRING_*` environment variables.
///
/// | Variable | Default |
/// |---|---|
/// | `RNDSTRING_HOST` | `127.0.0.1` |
/// | `RNDSTRING_PORT` | `5000` |
/// | `RNDSTRING_WORKERS` | number of CPUs |
/// | `RNDSTRING_MAX_COUNT` | `100` |
/// | `RNDSTRING_MAX_LENGTH` | `4096` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Number of HTTP worker threads.
	pub workers: usize,
	/// Upper bound on tokens returned by one `/v1/generate` request.
	pub max_count: usize,
	/// Upper bound on the per-generator `length` of one `/v1/generate` request.
	pub max_length: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			workers: num_cpus::get(),
			max_count: 100,
			max_length: 4096,
		}
	}
}

impl ServerConfig {
	/// Reads the configuration from the process environment.
	///
	/// # Errors
	/// `InvalidInput` naming the variable if a value can't be parsed or is zero
	/// where zero makes no sense (workers, max count, max length).
	pub fn from_env() -> io::Result<Self> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup<F>(lookup: F) -> io::Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let defaults = Self::default();

		let config = Self {
			host: lookup("RNDSTRING_HOST").unwrap_or(defaults.host),
			port: parse_var(&lookup, "RNDSTRING_PORT", defaults.port)?,
			workers: parse_var(&lookup, "RNDSTRING_WORKERS", defaults.workers)?,
			max_count: parse_var(&lookup, "RNDSTRING_MAX_COUNT", defaults.max_count)?,
			max_length: parse_var(&lookup, "RNDSTRING_MAX_LENGTH", defaults.max_length)?,
		};

		if config.workers == 0 {
			return Err(invalid("RNDSTRING_WORKERS", "must be at least 1"));
		}
		if config.max_count == 0 {
			return Err(invalid("RNDSTRING_MAX_COUNT", "must be at least 1"));
		}
		if config.max_length == 0 {
			return Err(invalid("RNDSTRING_MAX_LENGTH", "must be at least 1"));
		}

		Ok(config)
	}
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> io::Result<T>
where
	T: FromStr,
	T::Err: Display,
	F: Fn(&str) -> Option<String>,
{
	match lookup(key) {
		None => Ok(default),
		Some(raw) => raw.trim().parse().map_err(|e| invalid(key, e)),
	}
}

fn invalid(key: &str, reason: impl Display) -> io::Error {
	io::Error::new(io::ErrorKind::InvalidInput, format!("{key}: {reason}"))
}
