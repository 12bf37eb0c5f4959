//! Random byte sources.
//!
//! - `OsEntropy`: the operating system CSPRNG (primary source)
//! - `FallbackEntropy`: a mixed, clock-seeded PRNG used when the primary fails
//! - `Entropy`: the facade trying the primary first and falling back on error
//!
//! The free functions at the bottom of this module operate on one
//! process-wide `Entropy` instance, created on first use.

use std::sync::LazyLock;

use log::{error, warn};

use crate::error::Result;

/// Clock-seeded fallback source.
pub mod fallback;

/// Operating system source.
pub mod primary;

pub use fallback::FallbackEntropy;
pub use primary::OsEntropy;

/// Anything able to fill a buffer with random bytes, or report that it can't.
///
/// Implementations must be usable from several threads at once.
pub trait EntropySource: Send + Sync {
	/// Fills every byte of `buf`, or returns an error leaving `buf` unspecified.
	fn try_fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Byte-fill facade over a primary source and a fallback source.
///
/// # Responsibilities
/// - `fill`: primary first, fallback on any primary error, never fails
/// - `fill_strict`: primary only, errors are returned to the caller
///
/// The fallback state is owned by the facade. The process-wide instance
/// returned by [`global`] therefore owns the single process-wide fallback PRNG.
#[derive(Debug)]
pub struct Entropy<S = OsEntropy> {
	primary: S,
	fallback: FallbackEntropy,
}

impl Entropy<OsEntropy> {
	/// Facade over the OS source with a freshly seeded fallback.
	pub fn os() -> Self {
		Self::new(OsEntropy)
	}
}

impl<S: EntropySource> Entropy<S> {
	/// Facade over `primary` with a freshly seeded fallback.
	pub fn new(primary: S) -> Self {
		Self::with_fallback(primary, FallbackEntropy::new())
	}

	/// Facade over explicit primary and fallback sources.
	pub fn with_fallback(primary: S, fallback: FallbackEntropy) -> Self {
		Self { primary, fallback }
	}

	/// Fills every byte of `buf`. Never fails.
	///
	/// If the primary source errors, the buffer is refilled from the
	/// fallback source and a warning is logged.
	pub fn fill(&self, buf: &mut [u8]) {
		if let Err(e) = self.primary.try_fill(buf) {
			warn!("primary entropy source failed, using fallback: {e}");
			self.fallback.fill(buf);
		}
	}

	/// Fills every byte of `buf` from the primary source only.
	///
	/// # Errors
	/// Returns `Error::EntropySourceUnavailable` if the primary source fails.
	/// No fallback is attempted: use this where degraded randomness is not
	/// acceptable, and propagate the error.
	pub fn fill_strict(&self, buf: &mut [u8]) -> Result<()> {
		self.primary.try_fill(buf).inspect_err(|e| {
			error!("strict fill refused, primary entropy source failed: {e}");
		})
	}

	/// Returns `n` random bytes, see [`Entropy::fill`].
	#[must_use]
	pub fn random_bytes(&self, n: usize) -> Vec<u8> {
		let mut bytes = vec![0u8; n];
		self.fill(&mut bytes);
		bytes
	}

	/// The fallback source owned by this facade.
	pub fn fallback(&self) -> &FallbackEntropy {
		&self.fallback
	}
}

impl Default for Entropy<OsEntropy> {
	fn default() -> Self {
		Self::os()
	}
}

static GLOBAL: LazyLock<Entropy> = LazyLock::new(Entropy::os);

/// The process-wide facade (OS primary source, clock-seeded fallback).
pub fn global() -> &'static Entropy {
	&GLOBAL
}

/// Fills `buf` with random bytes using the process-wide facade. Never fails.
pub fn fill_random_bytes(buf: &mut [u8]) {
	GLOBAL.fill(buf);
}

/// Fills `buf` from the OS source only.
///
/// # Errors
/// `Error::EntropySourceUnavailable` if the OS source fails.
pub fn fill_random_bytes_strict(buf: &mut [u8]) -> Result<()> {
	GLOBAL.fill_strict(buf)
}

/// Returns `n` random bytes from the process-wide facade.
#[must_use]
pub fn random_bytes(n: usize) -> Vec<u8> {
	GLOBAL.random_bytes(n)
}

/// Fills `buf` straight from the process-wide fallback source.
///
/// Only useful for tests and benchmarks of the degraded path.
pub fn fill_fallback(buf: &mut [u8]) {
	GLOBAL.fallback().fill(buf);
}
