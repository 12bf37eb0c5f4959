use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Size of the scratch buffer drawn (and thrown away) per skipped draw.
const SKIP_CHUNK: usize = 13;

/// Maximum number of skipped draws per fill, exclusive.
const MAX_SKIPS: u128 = 32;

/// Degraded-quality byte source used when the OS source fails.
///
/// A non-cryptographic PRNG seeded from the wall clock, guarded by a mutex.
/// Every fill:
/// - skips `now % 32` draws of 13 bytes,
/// - draws the output, then an equally long mask,
/// - XORs each output byte with its mask byte and with one clock-derived byte.
///
/// This makes the stream harder to line up with a guessed seed. It is NOT a
/// cryptographic guarantee, only a way to keep going instead of failing.
///
/// # Concurrency
/// The lock is held for the whole fill, skip step included, so concurrent
/// callers are serialized. A poisoned lock is recovered since the PRNG state
/// cannot be left half-updated in a way that matters here.
#[derive(Debug)]
pub struct FallbackEntropy {
	rng: Mutex<SmallRng>,
}

impl FallbackEntropy {
	/// Creates a fallback source seeded from the current time.
	pub fn new() -> Self {
		let seed = clock_nanos() as u64;
		debug!("seeding fallback entropy source from the clock");
		Self::with_seed(seed)
	}

	/// Creates a fallback source from an explicit seed.
	///
	/// Output still varies between calls with the same seed because the skip
	/// and mixing steps read the clock.
	pub fn with_seed(seed: u64) -> Self {
		Self {
			rng: Mutex::new(SmallRng::seed_from_u64(seed)),
		}
	}

	/// Fills `buf` with mixed pseudo-random bytes. Never fails.
	pub fn fill(&self, buf: &mut [u8]) {
		let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

		let mut scratch = [0u8; SKIP_CHUNK];
		for _ in 0..clock_nanos() % MAX_SKIPS {
			rng.fill_bytes(&mut scratch);
		}

		rng.fill_bytes(buf);
		let mut mask = vec![0u8; buf.len()];
		rng.fill_bytes(&mut mask);

		let stamp = (clock_nanos() % 256) as u8;
		for (byte, m) in buf.iter_mut().zip(&mask) {
			*byte ^= m ^ stamp;
		}
	}
}

impl Default for FallbackEntropy {
	fn default() -> Self {
		Self::new()
	}
}

/// Nanoseconds since the Unix epoch, or 0 if the clock is before it.
fn clock_nanos() -> u128 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos())
		.unwrap_or(0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::thread;

	#[test]
	fn consecutive_fills_differ() {
		let source = FallbackEntropy::new();
		let mut a = [0u8; 64];
		let mut b = [0u8; 64];

		source.fill(&mut a);
		source.fill(&mut b);

		assert_ne!(a, b);
	}

	/// Replays a fresh `SmallRng` with the same seed: `skips` scratch draws,
	/// then the raw output, then the mask.
	fn replay(seed: u64, skips: usize, len: usize) -> (Vec<u8>, Vec<u8>) {
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut scratch = [0u8; SKIP_CHUNK];
		for _ in 0..skips {
			rng.fill_bytes(&mut scratch);
		}
		let mut raw = vec![0u8; len];
		rng.fill_bytes(&mut raw);
		let mut mask = vec![0u8; len];
		rng.fill_bytes(&mut mask);
		(raw, mask)
	}

	#[test]
	fn seeded_fill_is_skipped_masked_and_stamped() {
		const SEED: u64 = 7;
		const LEN: usize = 64;

		let source = FallbackEntropy::with_seed(SEED);
		let mut out = [0u8; LEN];
		source.fill(&mut out);

		let matched = (0..MAX_SKIPS as usize).find_map(|skips| {
			let (raw, mask) = replay(SEED, skips, LEN);
			let stamp = out[0] ^ raw[0] ^ mask[0];
			let mixed = out
				.iter()
				.zip(raw.iter().zip(&mask))
				.all(|(&o, (&r, &m))| o == r ^ m ^ stamp);
			mixed.then_some(raw)
		});

		let raw = matched.expect("output is raw ^ mask ^ stamp for some skip count below 32");
		assert_ne!(out.as_slice(), raw.as_slice());
	}

	#[test]
	fn fills_every_length() {
		let source = FallbackEntropy::default();
		for len in [0usize, 1, 13, 255, 1024] {
			let mut buf = vec![0u8; len];
			source.fill(&mut buf);
			assert_eq!(buf.len(), len);
			if len >= 64 {
				assert!(buf.iter().any(|&b| b != 0));
			}
		}
	}

	#[test]
	fn shared_between_threads() {
		let source = Arc::new(FallbackEntropy::new());

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let source = Arc::clone(&source);
				thread::spawn(move || {
					let mut buf = [0u8; 128];
					for _ in 0..50 {
						source.fill(&mut buf);
					}
					buf
				})
			})
			.collect();

		let outputs: Vec<[u8; 128]> = handles
			.into_iter()
			.map(|h| h.join().expect("fallback thread panicked"))
			.collect();

		for (i, a) in outputs.iter().enumerate() {
			for b in &outputs[i + 1..] {
				assert_ne!(a, b);
			}
		}
	}
}
