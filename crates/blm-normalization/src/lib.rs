//! Normalization stages that run before matching.
//!
//! - [`normalize_digits`] rewrites Devanagari digits to ASCII in every text
//!   column of a table.
//! - [`clean_key_column`] trims an identifier column and turns blank and
//!   sentinel values into nulls.
//! - [`NameCanonicalizer`] turns a raw name into the lowercase, punctuation
//!   free, romanized form that the fuzzy matcher compares.

pub mod canonical;
pub mod clean;
pub mod digits;
pub mod transliterate;

pub use canonical::{NameCanonicalizer, clean_name};
pub use clean::{clean_key, clean_key_column};
pub use digits::{normalize_digits, normalize_digits_str};
pub use transliterate::{TransliterationError, transliterate};
