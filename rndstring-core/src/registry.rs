use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use log::debug;

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::generator::builtin::{CLASS_GENERATORS, ENCODING_GENERATORS, class_generator};

/// Builds a generator from a length.
///
/// Depending on the generator, the length counts output characters or the
/// number of random bytes encoded (`hex`, `b32`, `b64`, `b64url`).
pub type Constructor = Arc<dyn Fn(usize) -> Result<Box<dyn Generator>> + Send + Sync>;

/// Mapping from generator names to constructors.
///
/// # Invariants
/// - A name maps to exactly one constructor; registering it twice panics.
#[derive(Clone, Default)]
pub struct Registry {
	constructors: HashMap<String, Constructor>,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding every built-in generator.
	///
	/// Names: `hex`, `hexstr`, `b64`, `b64url`, `b32`, `dummy`, `lcase`,
	/// `ucase`, `digits`, `symbols`, `ascii` and every `&`-combination of
	/// the character classes (`letters` stands for `lcase&ucase`).
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();

		for &(name, constructor) in ENCODING_GENERATORS {
			registry.register(name, constructor);
		}
		for &(name, classes) in CLASS_GENERATORS {
			registry.register(name, move |length| class_generator(length, classes));
		}

		registry
	}

	/// Registers `constructor` under `name`.
	///
	/// # Panics
	/// Panics if `name` is already registered. Registering a name twice is a
	/// programming error, not a runtime condition.
	pub fn register<F>(&mut self, name: &str, constructor: F)
	where
		F: Fn(usize) -> Result<Box<dyn Generator>> + Send + Sync + 'static,
	{
		if self.constructors.contains_key(name) {
			panic!("generator {name:?} is already registered");
		}
		debug!("registering generator {name:?}");
		self.constructors.insert(name.to_owned(), Arc::new(constructor));
	}

	/// Whether a generator is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.constructors.contains_key(name)
	}

	/// The constructor registered under `name`.
	pub fn constructor(&self, name: &str) -> Option<Constructor> {
		self.constructors.get(name).cloned()
	}

	/// Builds the generator registered under `name`.
	///
	/// # Errors
	/// - `Error::UnknownGeneratorName` if nothing is registered under `name`
	/// - whatever the constructor itself returns
	pub fn create(&self, name: &str, length: usize) -> Result<Box<dyn Generator>> {
		let constructor = self
			.constructors
			.get(name)
			.ok_or_else(|| Error::UnknownGeneratorName(name.to_owned()))?;

		constructor(length)
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.constructors.keys().cloned().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.constructors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.constructors.is_empty()
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("names", &self.names())
			.finish()
	}
}

static GLOBAL_REGISTRY: LazyLock<RwLock<Registry>> =
	LazyLock::new(|| RwLock::new(Registry::with_builtins()));

/// Builds a generator by name from the process-wide registry.
///
/// # Errors
/// `Error::UnknownGeneratorName` if `name` is not registered.
pub fn new_generator(name: &str, length: usize) -> Result<Box<dyn Generator>> {
	// The lock is released before the constructor runs so that constructors
	// may use the registry themselves.
	let constructor = GLOBAL_REGISTRY
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.constructor(name)
		.ok_or_else(|| Error::UnknownGeneratorName(name.to_owned()))?;

	constructor(length)
}

/// Names of every generator in the process-wide registry, sorted.
pub fn generator_names() -> Vec<String> {
	GLOBAL_REGISTRY
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.names()
}

/// Registers a generator in the process-wide registry.
///
/// # Panics
/// Panics if `name` is already registered.
pub fn register_generator<F>(name: &str, constructor: F)
where
	F: Fn(usize) -> Result<Box<dyn Generator>> + Send + Sync + 'static,
{
	GLOBAL_REGISTRY
		.write()
		.unwrap_or_else(PoisonError::into_inner)
		.register(name, constructor);
}
