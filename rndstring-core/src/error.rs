use std::fmt;

/// Errors returned by the string generation library.
///
/// Construction-time problems (alphabets, unknown names) are reported here
/// so that generation itself never fails once a generator exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// An alphabet holds more than 255 symbols. Carries the offending size.
	AlphabetTooLarge(usize),

	/// An alphabet holds no symbols at all.
	EmptyAlphabet,

	/// An alphabet set is empty or holds more than 255 alphabets.
	InvalidAlphabetSet(usize),

	/// No generator is registered under this name.
	UnknownGeneratorName(String),

	/// The operating system random source failed and falling back was not allowed.
	EntropySourceUnavailable(String),

	/// The parameterless `generate()` was called before a default generator was set.
	NoDefaultGenerator,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::AlphabetTooLarge(size) => {
				write!(f, "alphabet is too large: {size} symbols (at most 255 allowed)")
			}
			Error::EmptyAlphabet => write!(f, "alphabet must contain at least one symbol"),
			Error::InvalidAlphabetSet(count) => {
				write!(f, "an alphabet set needs between 1 and 255 alphabets, got {count}")
			}
			Error::UnknownGeneratorName(name) => {
				write!(f, "no generator registered under {name:?}")
			}
			Error::EntropySourceUnavailable(reason) => {
				write!(f, "entropy source unavailable: {reason}")
			}
			Error::NoDefaultGenerator => write!(f, "no default generator has been set"),
		}
	}
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
