//! Exit codes of the `blm` binary.
//!
//! | Code | Meaning                                                    |
//! |------|------------------------------------------------------------|
//! | 0    | Success, including runs that found no matches              |
//! | 1    | I/O or table failure                                       |
//! | 2    | Bad arguments, configuration, or missing columns           |
//! | 3    | A CSV input is not UTF-8                                   |
//! | 4    | Ctrl-C stopped the run before it finished                  |
//!
//! Clap reports its own usage errors with 2, which matches the
//! configuration code.

use blm_ingest::IngestError;
use blm_model::{ErrorKind, MatchError};

pub const EXIT_SUCCESS: u8 = 0;

/// I/O, CSV parsing or DataFrame failure.
pub const EXIT_ERROR: u8 = 1;

/// Invalid threshold, prefixes, config file or column selection.
pub const EXIT_CONFIG: u8 = 2;

/// Input was UTF-16 or contained invalid UTF-8.
pub const EXIT_ENCODING: u8 = 3;

pub const EXIT_CANCELLED: u8 = 4;

pub fn code_for_kind(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Configuration => EXIT_CONFIG,
        ErrorKind::Encoding => EXIT_ENCODING,
        ErrorKind::Cancelled => EXIT_CANCELLED,
        ErrorKind::Io | ErrorKind::Data => EXIT_ERROR,
    }
}

/// Exit code for the first typed error found in the context chain.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<MatchError>()
                .map(MatchError::kind)
                .or_else(|| cause.downcast_ref::<IngestError>().map(IngestError::kind))
        })
        .map_or(EXIT_ERROR, code_for_kind)
}
