// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DRDF chunk tags and framing constants.
//!
//! Every chunk is `length: u32 LE`, `tag: [u8; 4]`, then `length` payload
//! bytes. Keeping the tags and their fixed lengths in one place keeps the
//! reader and writer from drifting apart.

use std::fmt;

/// Size of a chunk header (length + tag).
pub const CHUNK_HEADER_LEN: usize = 8;

/// Initial value of the running CRC-32, applied before the first byte.
pub const CRC_SEED: u32 = 0xFFFF_FFFF;

/// Literal bytes every DRDF file starts with: an empty `HRAW` chunk.
pub const FILE_HEADER: [u8; CHUNK_HEADER_LEN] = [0, 0, 0, 0, b'H', b'R', b'A', b'W'];

/// Header of the trailing `ERAW` chunk, folded into the checksum it carries.
pub const TRAILER_HEADER: [u8; CHUNK_HEADER_LEN] = [4, 0, 0, 0, b'E', b'R', b'A', b'W'];

/// Payload length of `IFMT`: width, height, code and three pad bytes.
pub const IFMT_LEN: usize = 8;

/// Default cap on a single chunk payload: the whole range of the 32-bit
/// length field, which is also the writer's limit.
pub const DEFAULT_MAX_CHUNK_LEN: u32 = u32::MAX;

/// A four-character chunk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Stream start marker.
    pub const HRAW: Tag = Tag(*b"HRAW");
    /// Run start, payload is the 16-byte run UUID.
    pub const RSTA: Tag = Tag(*b"RSTA");
    /// Run georeference text.
    pub const RGEO: Tag = Tag(*b"RGEO");
    /// Event start, payload is the u32 event id.
    pub const EVNT: Tag = Tag(*b"EVNT");
    /// Image source name.
    pub const ISRC: Tag = Tag(*b"ISRC");
    /// Image format: width, height, format code, padding.
    pub const IFMT: Tag = Tag(*b"IFMT");
    /// Raw pixel bytes.
    pub const IDAT: Tag = Tag(*b"IDAT");
    /// End marker, payload is the u32 running checksum.
    pub const ERAW: Tag = Tag(*b"ERAW");

    /// Tags understood by the hierarchy codec.
    pub const KNOWN: [Tag; 8] = [
        Tag::HRAW,
        Tag::RSTA,
        Tag::RGEO,
        Tag::EVNT,
        Tag::ISRC,
        Tag::IFMT,
        Tag::IDAT,
        Tag::ERAW,
    ];

    /// Payload length required for fixed-size tags.
    pub fn fixed_len(&self) -> Option<u32> {
        match *self {
            Tag::HRAW => Some(0),
            Tag::RSTA => Some(16),
            Tag::EVNT => Some(4),
            Tag::IFMT => Some(IFMT_LEN as u32),
            Tag::ERAW => Some(4),
            _ => None,
        }
    }

    /// Whether the tag is one of [`Tag::KNOWN`].
    pub fn is_known(&self) -> bool {
        Tag::KNOWN.contains(self)
    }

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_lengths() {
        assert_eq!(Tag::HRAW.fixed_len(), Some(0));
        assert_eq!(Tag::RSTA.fixed_len(), Some(16));
        assert_eq!(Tag::EVNT.fixed_len(), Some(4));
        assert_eq!(Tag::IFMT.fixed_len(), Some(8));
        assert_eq!(Tag::ERAW.fixed_len(), Some(4));
        assert_eq!(Tag::RGEO.fixed_len(), None);
        assert_eq!(Tag::ISRC.fixed_len(), None);
        assert_eq!(Tag::IDAT.fixed_len(), None);
    }

    #[test]
    fn test_headers_match_tags() {
        assert_eq!(&FILE_HEADER[4..], Tag::HRAW.as_bytes());
        assert_eq!(&TRAILER_HEADER[4..], Tag::ERAW.as_bytes());
    }

    #[test]
    fn test_display_escapes_binary() {
        assert_eq!(Tag::IDAT.to_string(), "IDAT");
        assert_eq!(Tag([b'A', 0, b'B', 0xff]).to_string(), "A\\x00B\\xff");
        assert!(!Tag(*b"XXXX").is_known());
    }
}
