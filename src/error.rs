//! Error types for the Cryptdatum codec

use std::io;
use thiserror::Error;

use crate::header::HEADER_SIZE;

/// Result type for Cryptdatum operations
pub type Result<T> = std::result::Result<T, CryptdatumError>;

/// Errors surfaced by the header decoder.
///
/// The recognizer and validator never error; they report `false` instead.
/// Callers wanting structured diagnostics decode first and validate the
/// returned record themselves.
#[derive(Debug, Error)]
pub enum CryptdatumError {
    /// The underlying reader reported a failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The reader ran out of input before a full header was read
    #[error("unexpected end of input: got {read} of {} header bytes", HEADER_SIZE)]
    UnexpectedEof {
        /// Bytes successfully read before end-of-input
        read: usize,
    },

    /// The bytes read do not begin with a Cryptdatum header
    #[error("data does not contain a cryptdatum header")]
    NoHeader,

    /// A decoded header failed validation
    ///
    /// Never produced by `decode_header` itself; reserved for callers that
    /// combine decoding with validation.
    #[error("cryptdatum header is invalid")]
    InvalidHeader,
}
