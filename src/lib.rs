//! Cryptdatum - fixed-layout binary container format, v1 header codec
//!
//! A Cryptdatum artifact is an 80-byte header, an optional signature and a
//! payload. This crate implements the header codec: a structural recognizer,
//! a flag-driven semantic validator and a decoder that parses the header
//! into an immutable record through any [`std::io::Read`] source. Payload
//! handling (compression, encryption, signing, checksumming) is declared by
//! the header but performed elsewhere.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions
)]

pub mod error;
pub mod header;

pub use error::{CryptdatumError, Result};
pub use header::{
    decode_header, has_header, has_valid_header, DatumFlags, Header, DELIMITER, HEADER_SIZE,
    MAGIC, MAGIC_DATE, MIN_VERSION, VERSION,
};
