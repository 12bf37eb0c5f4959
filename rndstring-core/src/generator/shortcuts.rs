use std::net::Ipv4Addr;

use crate::alphabet::{AlphabetSet, CharClass};
use crate::entropy;

use CharClass::{Digits, Lowercase, Symbols, Uppercase};

const PASSWORD_LENGTH: usize = 18;

/// 24 symbols out of 62 is a bit more than 142 bits.
const API_TOKEN_LENGTH: usize = 24;

fn letters_symbols_digits() -> AlphabetSet {
	AlphabetSet::from_builtin(&[Lowercase, Uppercase, Digits, Symbols])
}

/// A random password: 18 letters, digits and symbols.
pub fn random_password() -> String {
	random_string(PASSWORD_LENGTH)
}

/// A random API token: 24 letters and digits, no symbols.
pub fn random_api_token() -> String {
	AlphabetSet::from_builtin(&[Lowercase, Uppercase, Digits]).sample(API_TOKEN_LENGTH)
}

/// `length` random letters, digits and symbols.
pub fn random_string(length: usize) -> String {
	letters_symbols_digits().sample(length)
}

/// A random IPv4 address (any of the 2^32, reserved ranges included).
pub fn random_ipv4() -> Ipv4Addr {
	let mut octets = [0u8; 4];
	entropy::fill_random_bytes(&mut octets);
	Ipv4Addr::from(octets)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn password_shape() {
		let password = random_password();
		assert_eq!(password.chars().count(), 18);
		assert!(password.chars().all(|c| letters_symbols_digits().contains(c)));
	}

	#[test]
	fn api_token_has_no_symbols() {
		let token = random_api_token();
		assert_eq!(token.len(), 24);
		assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
	}

	#[test]
	fn random_string_length() {
		assert_eq!(random_string(0), "");
		assert_eq!(random_string(40).chars().count(), 40);
		assert_ne!(random_string(40), random_string(40));
	}

	#[test]
	fn ipv4_varies() {
		let addresses: Vec<Ipv4Addr> = (0..8).map(|_| random_ipv4()).collect();
		assert!(addresses.iter().any(|a| *a != addresses[0]));
		assert_eq!(addresses[0].to_string().split('.').count(), 4);
	}
}
