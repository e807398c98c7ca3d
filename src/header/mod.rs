//! Cryptdatum v1 header codec

mod decode;
mod encode;
mod format;

pub use decode::decode_header;
pub use format::{
    DatumFlags, Header, DELIMITER, HEADER_SIZE, MAGIC, MAGIC_DATE, MIN_VERSION, VERSION,
};

use format::{offset, read_u16, read_u32, read_u64, EMPTY};

/// Check whether `data` plausibly starts with a Cryptdatum header.
///
/// A cheap structural probe: the input must hold at least one header and
/// carry the magic and delimiter tags at their fixed offsets. No field
/// semantics are inspected; use [`has_valid_header`] for that, or
/// [`decode_header`] to examine the fields directly. Too-small input is
/// reported as `false`, never as an error.
#[must_use]
pub fn has_header(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }

    data[offset::MAGIC..offset::MAGIC + 8] == MAGIC
        && data[offset::DELIMITER..offset::DELIMITER + 8] == DELIMITER
}

/// Check whether `data` starts with a semantically valid Cryptdatum header.
///
/// Runs the structural probe first, then walks the flag-conditional field
/// requirements in a fixed order: version, draft/compromised short-circuit,
/// timestamp, operation counter, checksum, the empty-gated size and
/// algorithm cluster, and finally the signature type. Constant time over
/// the fixed 80-byte window; never errors.
#[must_use]
pub fn has_valid_header(data: &[u8]) -> bool {
    if !has_header(data) {
        return false;
    }

    if read_u16(data, offset::VERSION) < MIN_VERSION {
        return false;
    }

    // A draft or compromised datum is the producer's declaration of
    // incompleteness; nothing past the version is checked for it.
    let flags = DatumFlags::from_bits_retain(read_u64(data, offset::FLAGS));
    if flags.intersects(DatumFlags::DRAFT | DatumFlags::COMPROMISED) {
        return true;
    }

    if read_u64(data, offset::TIMESTAMP) < MAGIC_DATE {
        return false;
    }

    if flags.contains(DatumFlags::OPC) && read_u32(data, offset::OPC) < 1 {
        return false;
    }

    if flags.contains(DatumFlags::CHECKSUM) && data[offset::CHECKSUM..offset::CHECKSUM + 8] == EMPTY
    {
        return false;
    }

    // The size and algorithm requirements are gated on the empty flag.
    if flags.contains(DatumFlags::EMPTY) {
        if read_u64(data, offset::SIZE) < 1 {
            return false;
        }

        if flags.contains(DatumFlags::COMPRESSED) && read_u16(data, offset::COMPRESSION_ALG) < 1 {
            return false;
        }

        if flags.contains(DatumFlags::ENCRYPTED) && read_u16(data, offset::ENCRYPTION_ALG) < 1 {
            return false;
        }

        if flags.contains(DatumFlags::EXTRACTABLE)
            && data[offset::FILE_EXT..offset::FILE_EXT + 8] == EMPTY
        {
            return false;
        }
    }

    // Signature size may stay 0; some signature schemes imply their length.
    if flags.contains(DatumFlags::SIGNED) && read_u16(data, offset::SIGNATURE_TYPE) < 1 {
        return false;
    }

    true
}
