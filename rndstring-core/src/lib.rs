//! Random string ("token") generation library.
//!
//! This crate provides:
//! - A byte-fill facade over the OS CSPRNG with a mixed, clock-seeded fallback
//! - Unbiased-by-class selection of symbols from one or more alphabets
//! - Ready-made generators (hex, base32, base64, character classes, custom alphabets)
//! - A name-based registry of generator constructors
//!
//! ```
//! use rndstring_core::{join, new_generator};
//!
//! let user = new_generator("lcase", 8)?;
//! let pin = new_generator("digits", 4)?;
//! let token = join("-", &[user, pin]);
//! assert_eq!(token.len(), 13);
//! # Ok::<(), rndstring_core::Error>(())
//! ```

/// Alphabets, alphabet sets and symbol selection.
pub mod alphabet;

/// Random byte sources and the byte-fill facade.
pub mod entropy;

/// Error type shared by the whole crate.
pub mod error;

/// Generator capability, built-in generators and helpers.
pub mod generator;

/// Name to constructor mapping.
pub mod registry;

pub use alphabet::{Alphabet, AlphabetSet, CharClass, select_from};
pub use entropy::{fill_random_bytes, fill_random_bytes_strict, random_bytes};
pub use error::{Error, Result};
pub use generator::builtin::alphabet_generator;
pub use generator::shortcuts::{random_api_token, random_ipv4, random_password, random_string};
pub use generator::{Generator, generate, join, set_default_generator};
pub use registry::{generator_names, new_generator, register_generator};
