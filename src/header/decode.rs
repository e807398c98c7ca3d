//! Header decoding from a byte reader

use std::io::Read;

use crate::error::{CryptdatumError, Result};

use super::format::{offset, read_u16, read_u32, read_u64, DatumFlags, Header, HEADER_SIZE};
use super::has_header;

/// Decode a Cryptdatum header from `reader`.
///
/// Reads exactly [`HEADER_SIZE`] bytes, accepting short reads from the
/// reader until the window is full. The bytes are only parsed into a
/// [`Header`] record; semantic validation is the caller's choice, which
/// keeps ill-formed headers inspectable for diagnostics.
///
/// # Errors
///
/// - [`CryptdatumError::Io`] when the reader reports a failure
/// - [`CryptdatumError::UnexpectedEof`] when input ends before 80 bytes
/// - [`CryptdatumError::NoHeader`] when the window fails the recognizer
pub fn decode_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut window = [0u8; HEADER_SIZE];
    read_window(reader, &mut window)?;

    if !has_header(&window) {
        return Err(CryptdatumError::NoHeader);
    }

    Ok(Header::from_window(&window))
}

/// Fill `window` from `reader`, surfacing the first failure without retrying
fn read_window<R: Read>(reader: &mut R, window: &mut [u8; HEADER_SIZE]) -> Result<()> {
    let mut filled = 0;
    while filled < HEADER_SIZE {
        match reader.read(&mut window[filled..]) {
            Ok(0) => return Err(CryptdatumError::UnexpectedEof { read: filled }),
            Ok(n) => filled += n,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

impl Header {
    /// Slice a header record out of a full 80-byte window.
    ///
    /// The window must already have passed the recognizer; magic and
    /// delimiter bytes are not re-checked here.
    pub(crate) fn from_window(window: &[u8; HEADER_SIZE]) -> Self {
        let mut file_ext = [0u8; 8];
        let mut custom = [0u8; 8];
        file_ext.copy_from_slice(&window[offset::FILE_EXT..offset::FILE_EXT + 8]);
        custom.copy_from_slice(&window[offset::CUSTOM..offset::CUSTOM + 8]);

        Self {
            version: read_u16(window, offset::VERSION),
            flags: DatumFlags::from_bits_retain(read_u64(window, offset::FLAGS)),
            timestamp: read_u64(window, offset::TIMESTAMP),
            opc: read_u32(window, offset::OPC),
            checksum: read_u64(window, offset::CHECKSUM),
            size: read_u64(window, offset::SIZE),
            compression_alg: read_u16(window, offset::COMPRESSION_ALG),
            encryption_alg: read_u16(window, offset::ENCRYPTION_ALG),
            signature_type: read_u16(window, offset::SIGNATURE_TYPE),
            signature_size: read_u32(window, offset::SIGNATURE_SIZE),
            file_ext,
            custom,
        }
    }
}
