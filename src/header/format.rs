//! Header layout, constants and the decoded record type

use bitflags::bitflags;

/// Current version of the Cryptdatum format
pub const VERSION: u16 = 1;

/// Minimum header version this library accepts
pub const MIN_VERSION: u16 = 1;

/// Size of a Cryptdatum header in bytes
pub const HEADER_SIZE: usize = 80;

/// Magic bytes identifying a Cryptdatum header at offset 0
pub const MAGIC: [u8; 8] = [0xA7, 0xF6, 0xE5, 0xD4, 0xC3, 0xB2, 0xA1, 0xE1];

/// Delimiter bytes terminating a Cryptdatum header at offset 72
pub const DELIMITER: [u8; 8] = [0xC8, 0xB7, 0xA6, 0xE5, 0xD4, 0xC3, 0xB2, 0xF1];

/// Earliest timestamp a non-draft datum may carry (Unix nanoseconds)
pub const MAGIC_DATE: u64 = 1_652_155_382_000_000_001;

/// All-zero sentinel marking an 8-byte field as unset
pub(crate) const EMPTY: [u8; 8] = [0; 8];

/// Byte offset of each field inside the 80-byte header window
pub(crate) mod offset {
    pub const MAGIC: usize = 0;
    pub const VERSION: usize = 8;
    pub const FLAGS: usize = 10;
    pub const TIMESTAMP: usize = 18;
    pub const OPC: usize = 26;
    pub const CHECKSUM: usize = 30;
    pub const SIZE: usize = 38;
    pub const COMPRESSION_ALG: usize = 46;
    pub const ENCRYPTION_ALG: usize = 48;
    pub const SIGNATURE_TYPE: usize = 50;
    pub const SIGNATURE_SIZE: usize = 52;
    pub const FILE_EXT: usize = 56;
    pub const CUSTOM: usize = 64;
    pub const DELIMITER: usize = 72;
}

// The field offsets must tile the header without gaps or overlap.
static_assertions::const_assert_eq!(offset::VERSION, offset::MAGIC + 8);
static_assertions::const_assert_eq!(offset::FLAGS, offset::VERSION + 2);
static_assertions::const_assert_eq!(offset::TIMESTAMP, offset::FLAGS + 8);
static_assertions::const_assert_eq!(offset::OPC, offset::TIMESTAMP + 8);
static_assertions::const_assert_eq!(offset::CHECKSUM, offset::OPC + 4);
static_assertions::const_assert_eq!(offset::SIZE, offset::CHECKSUM + 8);
static_assertions::const_assert_eq!(offset::COMPRESSION_ALG, offset::SIZE + 8);
static_assertions::const_assert_eq!(offset::ENCRYPTION_ALG, offset::COMPRESSION_ALG + 2);
static_assertions::const_assert_eq!(offset::SIGNATURE_TYPE, offset::ENCRYPTION_ALG + 2);
static_assertions::const_assert_eq!(offset::SIGNATURE_SIZE, offset::SIGNATURE_TYPE + 2);
static_assertions::const_assert_eq!(offset::FILE_EXT, offset::SIGNATURE_SIZE + 4);
static_assertions::const_assert_eq!(offset::CUSTOM, offset::FILE_EXT + 8);
static_assertions::const_assert_eq!(offset::DELIMITER, offset::CUSTOM + 8);
static_assertions::const_assert_eq!(HEADER_SIZE, offset::DELIMITER + 8);

// Little-endian field reads over a header window. Callers guarantee the
// window holds at least HEADER_SIZE bytes.
pub(crate) fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

pub(crate) fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

pub(crate) fn read_u64(buf: &[u8], at: usize) -> u64 {
    u64::from_le_bytes([
        buf[at],
        buf[at + 1],
        buf[at + 2],
        buf[at + 3],
        buf[at + 4],
        buf[at + 5],
        buf[at + 6],
        buf[at + 7],
    ])
}

bitflags! {
    /// Feature bits carried in the header's 64-bit flag word.
    ///
    /// Bit assignments are append-only across format revisions: new bits may
    /// be added but existing ones are never repurposed. Unknown bits survive
    /// a decode/encode round trip untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DatumFlags: u64 {
        /// Producer marked the datum as invalid
        const INVALID = 1 << 0;
        /// Datum is a work in progress; validation is relaxed
        const DRAFT = 1 << 1;
        /// No payload follows the header
        const EMPTY = 1 << 2;
        /// Checksum field carries a value
        const CHECKSUM = 1 << 3;
        /// Operation counter is in use
        const OPC = 1 << 4;
        /// Payload is compressed; compression algorithm is set
        const COMPRESSED = 1 << 5;
        /// Payload is encrypted; encryption algorithm is set
        const ENCRYPTED = 1 << 6;
        /// Payload can be written out under the stored file extension
        const EXTRACTABLE = 1 << 7;
        /// Datum is signed; signature type is set
        const SIGNED = 1 << 8;
        /// Payload supports streaming decode
        const STREAMABLE = 1 << 9;
        /// Custom field carries producer-defined meaning
        const CUSTOM = 1 << 10;
        /// Producer flagged the datum's integrity as suspect
        const COMPROMISED = 1 << 11;
    }
}

/// Decoded Cryptdatum header.
///
/// An immutable value record over the 80-byte wire window. The magic and
/// delimiter tags are format constants and are not stored; everything else
/// maps one-to-one onto the wire fields. Fields whose wire encoding uses the
/// all-zero "unset" sentinel have flag-gated accessors alongside the raw
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format version the producer wrote
    pub version: u16,
    /// Feature flag set
    pub flags: DatumFlags,
    /// Creation time, Unix nanoseconds
    pub timestamp: u64,
    /// Operation counter disambiguating same-timestamp datums
    pub opc: u32,
    /// CRC64 checksum over the payload, 0 when unset
    pub checksum: u64,
    /// Total datum size, header and optional signature included
    pub size: u64,
    /// Compression algorithm id, 0 when unset
    pub compression_alg: u16,
    /// Encryption algorithm id, 0 when unset
    pub encryption_alg: u16,
    /// Signature type id, 0 when unset
    pub signature_type: u16,
    /// Signature byte length; 0 for schemes with an implied size
    pub signature_size: u32,
    /// Payload file extension, printable ASCII padded with zero bytes
    pub file_ext: [u8; 8],
    /// Opaque producer-defined field
    pub custom: [u8; 8],
}

impl Header {
    /// Whether the producer declared the datum a draft
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.flags.contains(DatumFlags::DRAFT)
    }

    /// Whether the producer flagged the datum's integrity as suspect
    #[must_use]
    pub fn is_compromised(&self) -> bool {
        self.flags.contains(DatumFlags::COMPROMISED)
    }

    /// Checksum value, when the checksum flag declares one
    #[must_use]
    pub fn declared_checksum(&self) -> Option<u64> {
        self.flags
            .contains(DatumFlags::CHECKSUM)
            .then_some(self.checksum)
    }

    /// Compression algorithm id, when the compressed flag declares one
    #[must_use]
    pub fn declared_compression(&self) -> Option<u16> {
        self.flags
            .contains(DatumFlags::COMPRESSED)
            .then_some(self.compression_alg)
    }

    /// Encryption algorithm id, when the encrypted flag declares one
    #[must_use]
    pub fn declared_encryption(&self) -> Option<u16> {
        self.flags
            .contains(DatumFlags::ENCRYPTED)
            .then_some(self.encryption_alg)
    }

    /// Signature type and size, when the signed flag declares them
    #[must_use]
    pub fn declared_signature(&self) -> Option<(u16, u32)> {
        self.flags
            .contains(DatumFlags::SIGNED)
            .then_some((self.signature_type, self.signature_size))
    }

    /// Payload extension as text, zero-byte padding stripped
    #[must_use]
    pub fn file_ext_str(&self) -> String {
        let len = self
            .file_ext
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.file_ext.len());
        String::from_utf8_lossy(&self.file_ext[..len]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bit_values() {
        assert_eq!(DatumFlags::INVALID.bits(), 1);
        assert_eq!(DatumFlags::DRAFT.bits(), 2);
        assert_eq!(DatumFlags::EMPTY.bits(), 4);
        assert_eq!(DatumFlags::CHECKSUM.bits(), 8);
        assert_eq!(DatumFlags::OPC.bits(), 16);
        assert_eq!(DatumFlags::COMPRESSED.bits(), 32);
        assert_eq!(DatumFlags::ENCRYPTED.bits(), 64);
        assert_eq!(DatumFlags::EXTRACTABLE.bits(), 128);
        assert_eq!(DatumFlags::SIGNED.bits(), 256);
        assert_eq!(DatumFlags::STREAMABLE.bits(), 512);
        assert_eq!(DatumFlags::CUSTOM.bits(), 1024);
        assert_eq!(DatumFlags::COMPROMISED.bits(), 2048);
    }

    #[test]
    fn test_unknown_flag_bits_are_preserved() {
        let raw = DatumFlags::DRAFT.bits() | (1 << 42);
        let flags = DatumFlags::from_bits_retain(raw);

        assert!(flags.contains(DatumFlags::DRAFT));
        assert_eq!(flags.bits(), raw);
    }

    #[test]
    fn test_file_ext_str_strips_padding() {
        let header = Header {
            version: VERSION,
            flags: DatumFlags::empty(),
            timestamp: 0,
            opc: 0,
            checksum: 0,
            size: 0,
            compression_alg: 0,
            encryption_alg: 0,
            signature_type: 0,
            signature_size: 0,
            file_ext: *b"txt\0\0\0\0\0",
            custom: [0; 8],
        };

        assert_eq!(header.file_ext_str(), "txt");
    }

    #[test]
    fn test_declared_accessors_follow_flags() {
        let mut header = Header {
            version: VERSION,
            flags: DatumFlags::empty(),
            timestamp: MAGIC_DATE,
            opc: 0,
            checksum: 77,
            size: 0,
            compression_alg: 4,
            encryption_alg: 5,
            signature_type: 6,
            signature_size: 7,
            file_ext: [0; 8],
            custom: [0; 8],
        };

        // Values without flags stay undeclared
        assert_eq!(header.declared_checksum(), None);
        assert_eq!(header.declared_compression(), None);
        assert_eq!(header.declared_encryption(), None);
        assert_eq!(header.declared_signature(), None);

        header.flags = DatumFlags::CHECKSUM
            | DatumFlags::COMPRESSED
            | DatumFlags::ENCRYPTED
            | DatumFlags::SIGNED;

        assert_eq!(header.declared_checksum(), Some(77));
        assert_eq!(header.declared_compression(), Some(4));
        assert_eq!(header.declared_encryption(), Some(5));
        assert_eq!(header.declared_signature(), Some((6, 7)));
    }
}
