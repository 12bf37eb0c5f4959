//! Generator capability and helpers built on it.
//!
//! A generator produces one random string per call. Generators carry no
//! per-call state: each call performs its own entropy fill, so a single
//! generator may be shared across threads without synchronization.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};

/// Built-in generators (encodings, character classes, custom alphabets).
pub mod builtin;

/// Ready-made helpers for common kinds of random strings.
pub mod shortcuts;

/// Something that produces a random string on demand.
pub trait Generator: Send + Sync {
	/// Generates a new string. Safe for concurrent use.
	fn generate(&self) -> String;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
	fn generate(&self) -> String {
		(**self).generate()
	}
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
	fn generate(&self) -> String {
		(**self).generate()
	}
}

impl<G: Generator + ?Sized> Generator for &G {
	fn generate(&self) -> String {
		(**self).generate()
	}
}

/// Adapts a closure into a `Generator`.
///
/// The closure captures whatever configuration the generator needs
/// (length, alphabets) at construction time.
pub struct FnGenerator<F>(F);

impl<F> FnGenerator<F>
where
	F: Fn() -> String + Send + Sync,
{
	pub fn new(f: F) -> Self {
		Self(f)
	}
}

impl<F> Generator for FnGenerator<F>
where
	F: Fn() -> String + Send + Sync,
{
	fn generate(&self) -> String {
		(self.0)()
	}
}

/// Boxes a closure as a `Generator` trait object.
pub fn from_fn<F>(f: F) -> Box<dyn Generator>
where
	F: Fn() -> String + Send + Sync + 'static,
{
	Box::new(FnGenerator::new(f))
}

/// Generates one string per generator, in order, joined with `delimiter`.
///
/// Example: two `dummy` generators of lengths 4 and 3 joined with `"-"`
/// give `"AAAA-AAA"`.
pub fn join<G: Generator>(delimiter: &str, generators: &[G]) -> String {
	generators
		.iter()
		.map(Generator::generate)
		.collect::<Vec<_>>()
		.join(delimiter)
}

static DEFAULT_GENERATOR: RwLock<Option<Arc<dyn Generator>>> = RwLock::new(None);

/// Sets the process-wide default generator used by [`generate`].
///
/// Replaces any previously set default.
pub fn set_default_generator<G: Generator + 'static>(generator: G) {
	let generator: Arc<dyn Generator> = Arc::new(generator);
	*DEFAULT_GENERATOR
		.write()
		.unwrap_or_else(PoisonError::into_inner) = Some(generator);
}

/// Generates a string with the process-wide default generator.
///
/// # Errors
/// `Error::NoDefaultGenerator` if [`set_default_generator`] was never called.
pub fn generate() -> Result<String> {
	let generator = DEFAULT_GENERATOR
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.clone()
		.ok_or(Error::NoDefaultGenerator)?;

	Ok(generator.generate())
}
