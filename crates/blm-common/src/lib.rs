//! Shared utilities for the blocklist matcher workspace.
//!
//! This crate provides the polars helpers every other crate leans on:
//! rendering `AnyValue` cells as text and reading whole columns as
//! optional strings.

pub mod polars;

pub use polars::{
    any_to_string, any_to_text, column_text_values, format_numeric, has_column, string_column,
};
