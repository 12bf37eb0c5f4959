use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::entropy::EntropySource;
use crate::error::{Error, Result};

/// The operating system's cryptographic random source.
///
/// Thin wrapper around `rand`'s `OsRng`. It holds no state, so any number of
/// threads may use it at the same time without coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
	/// Fills `buf` from the OS source.
	///
	/// # Errors
	/// Returns `Error::EntropySourceUnavailable` carrying the OS error message
	/// when the kernel (or platform equivalent) cannot deliver bytes.
	fn try_fill(&self, buf: &mut [u8]) -> Result<()> {
		OsRng
			.try_fill_bytes(buf)
			.map_err(|e| Error::EntropySourceUnavailable(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fills_the_whole_buffer() {
		let mut buf = [0u8; 64];
		OsEntropy.try_fill(&mut buf).expect("OS entropy available");
		assert!(buf.iter().any(|&b| b != 0));
	}

	#[test]
	fn empty_buffer_is_fine() {
		let mut buf = [0u8; 0];
		assert!(OsEntropy.try_fill(&mut buf).is_ok());
	}
}
