use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::alphabet::{Alphabet, AlphabetSet, CharClass, HEX_DIGITS};
use crate::entropy;
use crate::error::Result;
use crate::generator::{Generator, from_fn};

use CharClass::{Digits, Lowercase, Symbols, Uppercase};

/// Named generators drawing from combinations of built-in character classes.
///
/// The class order is the alphabet order inside the generated set.
pub(crate) const CLASS_GENERATORS: &[(&str, &[CharClass])] = &[
	("lcase", &[Lowercase]),
	("ucase", &[Uppercase]),
	("digits", &[Digits]),
	("symbols", &[Symbols]),
	("letters", &[Lowercase, Uppercase]),
	("lcase&digits", &[Lowercase, Digits]),
	("ucase&digits", &[Uppercase, Digits]),
	("lcase&symbols", &[Lowercase, Symbols]),
	("ucase&symbols", &[Uppercase, Symbols]),
	("digits&symbols", &[Digits, Symbols]),
	("letters&digits", &[Lowercase, Uppercase, Digits]),
	("letters&symbols", &[Lowercase, Uppercase, Symbols]),
	("lcase&symbols&digits", &[Lowercase, Digits, Symbols]),
	("ucase&symbols&digits", &[Uppercase, Digits, Symbols]),
	("letters&symbols&digits", &[Lowercase, Uppercase, Digits, Symbols]),
	("ascii", &[Lowercase, Uppercase, Digits, Symbols]),
];

/// Named generators with a dedicated constructor.
pub(crate) const ENCODING_GENERATORS: &[(&str, fn(usize) -> Result<Box<dyn Generator>>)] = &[
	("hex", hex_generator),
	("hexstr", hex_str_generator),
	("b64", base64_generator),
	("b64url", base64_url_generator),
	("b32", base32_generator),
	("dummy", dummy_generator),
];

/// `length` random bytes, hex encoded (output is `2 * length` characters).
pub fn hex_generator(length: usize) -> Result<Box<dyn Generator>> {
	Ok(from_fn(move || hex::encode(entropy::random_bytes(length))))
}

/// Exactly `length` characters from `0-9a-f`.
///
/// Unlike [`hex_generator`], `length` counts characters, not bytes.
pub fn hex_str_generator(length: usize) -> Result<Box<dyn Generator>> {
	let set = AlphabetSet::single(Alphabet::try_from(HEX_DIGITS)?);
	Ok(from_fn(move || set.sample(length)))
}

/// `length` random bytes, standard base64 with padding.
pub fn base64_generator(length: usize) -> Result<Box<dyn Generator>> {
	Ok(from_fn(move || STANDARD.encode(entropy::random_bytes(length))))
}

/// `length` random bytes, URL-safe base64 without padding.
pub fn base64_url_generator(length: usize) -> Result<Box<dyn Generator>> {
	Ok(from_fn(move || URL_SAFE_NO_PAD.encode(entropy::random_bytes(length))))
}

/// `length` random bytes, standard (RFC 4648) base32 with padding.
pub fn base32_generator(length: usize) -> Result<Box<dyn Generator>> {
	Ok(from_fn(move || {
		base32::encode(
			base32::Alphabet::Rfc4648 { padding: true },
			&entropy::random_bytes(length),
		)
	}))
}

/// `length` times the letter `A`.
///
/// NOT random at all. Only meant for tests and fixtures.
pub fn dummy_generator(length: usize) -> Result<Box<dyn Generator>> {
	Ok(from_fn(move || "A".repeat(length)))
}

/// `length` symbols drawn from the given built-in classes.
///
/// # Errors
/// `Error::InvalidAlphabetSet` if `classes` is empty.
pub fn class_generator(length: usize, classes: &[CharClass]) -> Result<Box<dyn Generator>> {
	let set = AlphabetSet::from_classes(classes)?;
	Ok(from_fn(move || set.sample(length)))
}

/// `length` symbols drawn from a caller-supplied alphabet.
///
/// # Parameters
/// - `length`: number of symbols per generated string
/// - `alphabet`: candidate symbols, any Unicode scalar values
///
/// # Behavior
/// The alphabet is copied: changing the caller's slice afterwards has no
/// effect on the returned generator.
///
/// # Errors
/// - `Error::AlphabetTooLarge` if `alphabet` holds more than 255 symbols
/// - `Error::EmptyAlphabet` if `alphabet` is empty
pub fn alphabet_generator(length: usize, alphabet: &[char]) -> Result<Box<dyn Generator>> {
	let set = AlphabetSet::single(Alphabet::try_from(alphabet)?);
	Ok(from_fn(move || set.sample(length)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::alphabet::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
	use crate::error::Error;

	#[test]
	fn hex_encodes_bytes() {
		let token = hex_generator(16).unwrap().generate();
		assert_eq!(token.len(), 32);
		assert!(token.chars().all(|c| HEX_DIGITS.contains(c)));
	}

	#[test]
	fn hex_str_counts_characters() {
		let token = hex_str_generator(7).unwrap().generate();
		assert_eq!(token.len(), 7);
		assert!(token.chars().all(|c| HEX_DIGITS.contains(c)));
	}

	#[test]
	fn base64_variants() {
		let standard = base64_generator(10).unwrap().generate();
		assert_eq!(standard.len(), 16);
		assert!(standard.ends_with("=="));

		let url = base64_url_generator(10).unwrap().generate();
		assert_eq!(url.len(), 14);
		assert!(!url.contains(['=', '+', '/']));
	}

	#[test]
	fn base32_is_padded() {
		let token = base32_generator(10).unwrap().generate();
		assert_eq!(token.len(), 16);

		let padded = base32_generator(1).unwrap().generate();
		assert_eq!(padded.len(), 8);
		assert!(padded.ends_with("======"));
	}

	#[test]
	fn dummy_repeats_a() {
		assert_eq!(dummy_generator(4).unwrap().generate(), "AAAA");
		assert_eq!(dummy_generator(0).unwrap().generate(), "");
	}

	#[test]
	fn zero_length_gives_empty_strings() {
		for (_, constructor) in ENCODING_GENERATORS {
			assert_eq!(constructor(0).unwrap().generate(), "");
		}
		for (_, classes) in CLASS_GENERATORS {
			assert_eq!(class_generator(0, classes).unwrap().generate(), "");
		}
	}

	#[test]
	fn class_generators_stay_in_their_classes() {
		for (name, classes) in CLASS_GENERATORS {
			let allowed: String = classes.iter().map(|c| c.symbols()).collect();
			let token = class_generator(64, classes).unwrap().generate();
			assert_eq!(token.chars().count(), 64, "{name}");
			assert!(token.chars().all(|c| allowed.contains(c)), "{name}: {token}");
		}
	}

	#[test]
	fn every_class_combination_is_named() {
		let pools: Vec<String> = CLASS_GENERATORS
			.iter()
			.map(|(_, classes)| {
				let mut pool: Vec<char> = classes.iter().flat_map(|c| c.symbols().chars()).collect();
				pool.sort_unstable();
				pool.into_iter().collect()
			})
			.collect();

		let all = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
		for mask in 1u32..16 {
			let mut pool: Vec<char> = (0..4usize)
				.filter(|&bit| mask & (1u32 << bit) != 0)
				.flat_map(|bit| all[bit].chars())
				.collect();
			pool.sort_unstable();
			let pool: String = pool.into_iter().collect();
			assert!(pools.contains(&pool), "missing combination {mask:04b}");
		}
	}

	#[test]
	fn custom_alphabet_limits() {
		let too_large: Vec<char> = (0..256u32).filter_map(|i| char::from_u32(0x400 + i)).collect();
		assert_eq!(
			alphabet_generator(8, &too_large).err(),
			Some(Error::AlphabetTooLarge(256))
		);

		assert!(alphabet_generator(8, &too_large[..255]).is_ok());
		assert_eq!(alphabet_generator(8, &[]).err(), Some(Error::EmptyAlphabet));
	}

	#[test]
	fn custom_alphabet_is_copied() {
		let mut alphabet = vec!['a', 'b'];
		let generator = alphabet_generator(32, &alphabet).unwrap();

		alphabet[0] = 'x';
		alphabet[1] = 'y';
		alphabet.push('z');

		let token = generator.generate();
		assert_eq!(token.chars().count(), 32);
		assert!(token.chars().all(|c| c == 'a' || c == 'b'));
	}
}
