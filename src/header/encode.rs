//! Header encoding into the wire layout

use super::format::{offset, Header, DELIMITER, HEADER_SIZE, MAGIC};

impl Header {
    /// Encode the record into its 80-byte wire form.
    ///
    /// Magic and delimiter tags are written from the format constants;
    /// every other field comes from the record, multi-byte integers in
    /// little-endian order. The output of a record that satisfies the
    /// format's invariants passes [`has_valid_header`](super::has_valid_header).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut window = [0u8; HEADER_SIZE];

        window[offset::MAGIC..offset::MAGIC + 8].copy_from_slice(&MAGIC);
        window[offset::VERSION..offset::VERSION + 2].copy_from_slice(&self.version.to_le_bytes());
        window[offset::FLAGS..offset::FLAGS + 8]
            .copy_from_slice(&self.flags.bits().to_le_bytes());
        window[offset::TIMESTAMP..offset::TIMESTAMP + 8]
            .copy_from_slice(&self.timestamp.to_le_bytes());
        window[offset::OPC..offset::OPC + 4].copy_from_slice(&self.opc.to_le_bytes());
        window[offset::CHECKSUM..offset::CHECKSUM + 8]
            .copy_from_slice(&self.checksum.to_le_bytes());
        window[offset::SIZE..offset::SIZE + 8].copy_from_slice(&self.size.to_le_bytes());
        window[offset::COMPRESSION_ALG..offset::COMPRESSION_ALG + 2]
            .copy_from_slice(&self.compression_alg.to_le_bytes());
        window[offset::ENCRYPTION_ALG..offset::ENCRYPTION_ALG + 2]
            .copy_from_slice(&self.encryption_alg.to_le_bytes());
        window[offset::SIGNATURE_TYPE..offset::SIGNATURE_TYPE + 2]
            .copy_from_slice(&self.signature_type.to_le_bytes());
        window[offset::SIGNATURE_SIZE..offset::SIGNATURE_SIZE + 4]
            .copy_from_slice(&self.signature_size.to_le_bytes());
        window[offset::FILE_EXT..offset::FILE_EXT + 8].copy_from_slice(&self.file_ext);
        window[offset::CUSTOM..offset::CUSTOM + 8].copy_from_slice(&self.custom);
        window[offset::DELIMITER..offset::DELIMITER + 8].copy_from_slice(&DELIMITER);

        window
    }
}

#[cfg(test)]
mod tests {
    use super::super::format::{DatumFlags, MAGIC_DATE, VERSION};
    use super::super::{has_header, has_valid_header};
    use super::*;

    fn sample_header() -> Header {
        Header {
            version: VERSION,
            flags: DatumFlags::CHECKSUM | DatumFlags::OPC | DatumFlags::SIGNED,
            timestamp: MAGIC_DATE + 1,
            opc: 9,
            checksum: 0xDEAD_BEEF_CAFE_F00D,
            size: 4096,
            compression_alg: 1,
            encryption_alg: 2,
            signature_type: 3,
            signature_size: 64,
            file_ext: *b"tar\0\0\0\0\0",
            custom: *b"whatever",
        }
    }

    #[test]
    fn test_encode_writes_tags() {
        let window = sample_header().to_bytes();

        assert_eq!(window[0..8], MAGIC);
        assert_eq!(window[72..80], DELIMITER);
        assert!(has_header(&window));
    }

    #[test]
    fn test_encode_is_little_endian() {
        let mut header = sample_header();
        header.version = 256;

        let window = header.to_bytes();

        assert_eq!(window[8], 0x00);
        assert_eq!(window[9], 0x01);
    }

    #[test]
    fn test_round_trip() {
        let header = sample_header();
        let window = header.to_bytes();
        let decoded = Header::from_window(&window);

        assert_eq!(decoded, header);
    }

    #[test]
    fn test_encoded_sample_validates() {
        assert!(has_valid_header(&sample_header().to_bytes()));
    }

    #[test]
    fn test_unknown_flag_bits_round_trip() {
        let mut header = sample_header();
        header.flags = DatumFlags::from_bits_retain(header.flags.bits() | (1 << 63));

        let decoded = Header::from_window(&header.to_bytes());

        assert_eq!(decoded.flags.bits(), header.flags.bits());
    }
}
