use crate::entropy::{self, Entropy, EntropySource};
use crate::error::{Error, Result};

/// Lower case ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Upper case ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// Punctuation symbols. Contains no quote characters (`'`, `"`, `` ` ``),
/// they are too easily confused or mangled once pasted somewhere.
pub const SYMBOLS: &str = "+-*/@&^%|$#!?[]{}()\\:,.;=";

/// Lower case hexadecimal digits.
pub const HEX_DIGITS: &str = "0123456789abcdef";

/// Built-in symbol classes that named generators combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
	Lowercase,
	Uppercase,
	Digits,
	Symbols,
}

impl CharClass {
	/// The symbols of this class, in alphabet order.
	pub fn symbols(self) -> &'static str {
		match self {
			CharClass::Lowercase => LOWERCASE,
			CharClass::Uppercase => UPPERCASE,
			CharClass::Digits => DIGITS,
			CharClass::Symbols => SYMBOLS,
		}
	}

	/// The class as an `Alphabet`. Built-in classes always fit.
	pub fn alphabet(self) -> Alphabet {
		Alphabet {
			symbols: self.symbols().chars().collect(),
		}
	}
}

/// An ordered, non-empty sequence of at most 255 symbols.
///
/// The size bound comes from index selection: one random byte, reduced
/// modulo the alphabet size, picks a symbol.
///
/// ## Invariants
/// - `1 <= len() <= 255`
/// - Symbols are owned: the caller's source can change afterwards without
///   any effect on this alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	symbols: Vec<char>,
}

impl Alphabet {
	/// Largest number of symbols an alphabet may hold.
	pub const MAX_SIZE: usize = 255;

	/// Builds an alphabet from a sequence of symbols (copied).
	///
	/// # Errors
	/// - `Error::EmptyAlphabet` if `symbols` is empty
	/// - `Error::AlphabetTooLarge` if it holds more than 255 symbols
	pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
		let symbols: Vec<char> = symbols.into_iter().collect();

		if symbols.is_empty() {
			return Err(Error::EmptyAlphabet);
		}
		if symbols.len() > Self::MAX_SIZE {
			return Err(Error::AlphabetTooLarge(symbols.len()));
		}

		Ok(Self { symbols })
	}

	/// Number of symbols.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Always `false`, alphabets can't be empty.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn symbols(&self) -> &[char] {
		&self.symbols
	}

	pub fn contains(&self, symbol: char) -> bool {
		self.symbols.contains(&symbol)
	}
}

impl TryFrom<&str> for Alphabet {
	type Error = Error;

	fn try_from(value: &str) -> Result<Self> {
		Alphabet::new(value.chars())
	}
}

impl TryFrom<&[char]> for Alphabet {
	type Error = Error;

	fn try_from(value: &[char]) -> Result<Self> {
		Alphabet::new(value.iter().copied())
	}
}

/// An ordered list of 1 to 255 alphabets drawn from together.
///
/// Each output symbol first picks an alphabet, then a symbol inside it, so
/// every alphabet gets roughly the same share of the output regardless of
/// its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetSet {
	alphabets: Vec<Alphabet>,
}

impl AlphabetSet {
	/// Largest number of alphabets a set may hold.
	pub const MAX_ALPHABETS: usize = 255;

	/// # Errors
	/// `Error::InvalidAlphabetSet` if `alphabets` is empty or holds more than 255 entries.
	pub fn new(alphabets: Vec<Alphabet>) -> Result<Self> {
		if alphabets.is_empty() || alphabets.len() > Self::MAX_ALPHABETS {
			return Err(Error::InvalidAlphabetSet(alphabets.len()));
		}
		Ok(Self { alphabets })
	}

	/// A set holding a single alphabet.
	pub fn single(alphabet: Alphabet) -> Self {
		Self {
			alphabets: vec![alphabet],
		}
	}

	/// A set made of built-in classes, in the given order.
	///
	/// # Errors
	/// `Error::InvalidAlphabetSet` if `classes` is empty.
	pub fn from_classes(classes: &[CharClass]) -> Result<Self> {
		Self::new(classes.iter().map(|class| class.alphabet()).collect())
	}

	/// Set over a fixed, non-empty list of built-in classes.
	pub(crate) fn from_builtin(classes: &'static [CharClass]) -> Self {
		debug_assert!(!classes.is_empty() && classes.len() <= Self::MAX_ALPHABETS);
		Self {
			alphabets: classes.iter().map(|class| class.alphabet()).collect(),
		}
	}

	pub fn alphabets(&self) -> &[Alphabet] {
		&self.alphabets
	}

	/// Whether `symbol` belongs to any alphabet of the set.
	pub fn contains(&self, symbol: char) -> bool {
		self.alphabets.iter().any(|alphabet| alphabet.contains(symbol))
	}

	/// Draws `length` symbols with the process-wide entropy facade.
	pub fn sample(&self, length: usize) -> String {
		select_from(entropy::global(), length, self).into_iter().collect()
	}
}

/// Selects `length` symbols from `set`.
///
/// # Behavior
/// - `length == 0` returns an empty sequence.
/// - Two buffers of `length` bytes are filled through `entropy`: one picks
///   the alphabet (`byte % number_of_alphabets`), the other the symbol inside
///   it (`byte % alphabet_size`).
///
/// # Notes
/// Reducing a byte modulo `n` is slightly biased whenever `n` does not divide
/// 256 (e.g. for 26 letters, `a`-`v` are drawn 10/256 of the time and `w`-`z`
/// 9/256). This reduction is kept as is so outputs stay compatible across
/// implementations.
pub fn select_from<S: EntropySource>(
	entropy: &Entropy<S>,
	length: usize,
	set: &AlphabetSet,
) -> Vec<char> {
	if length == 0 {
		return Vec::new();
	}

	let mut choices = vec![0u8; length];
	let mut picks = vec![0u8; length];
	entropy.fill(&mut choices);
	entropy.fill(&mut picks);

	// Both bounds are <= 255 by construction.
	let alphabet_count = set.alphabets.len() as u8;

	choices
		.iter()
		.zip(&picks)
		.map(|(&choice, &pick)| {
			let alphabet = &set.alphabets[usize::from(choice % alphabet_count)];
			let size = alphabet.symbols.len() as u8;
			alphabet.symbols[usize::from(pick % size)]
		})
		.collect()
}
