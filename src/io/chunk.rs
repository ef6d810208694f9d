// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chunk transport.
//!
//! Frames tagged payloads as `length + tag + payload` and keeps a running
//! CRC-32 over every byte that passes through, from the `HRAW` header to
//! the `ERAW` header. The `ERAW` payload is the checksum itself and is
//! never folded in.
//!
//! The CRC follows the zlib convention: the running value is fed back as
//! the initial value of the next update, starting from [`CRC_SEED`].

use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use super::constants::{Tag, CHUNK_HEADER_LEN, CRC_SEED, FILE_HEADER, TRAILER_HEADER};
use crate::core::{DrdfError, Result};

/// A decoded chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk tag
    pub tag: Tag,
    /// Chunk payload
    pub payload: Vec<u8>,
}

/// Fold `bytes` into a running CRC-32.
pub fn update_crc(crc: u32, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(crc);
    hasher.update(bytes);
    hasher.finalize()
}

/// Encode a chunk header.
pub fn encode_header(tag: Tag, len: u32) -> [u8; CHUNK_HEADER_LEN] {
    let mut head = [0u8; CHUNK_HEADER_LEN];
    LittleEndian::write_u32(&mut head[..4], len);
    head[4..].copy_from_slice(tag.as_bytes());
    head
}

/// Largest payload buffer reserved before any payload bytes arrive.
const PAYLOAD_PREALLOC: usize = 1 << 20;

/// Write one chunk and return the updated running CRC.
pub fn write_chunk<W: Write>(writer: &mut W, tag: Tag, payload: &[u8], crc: u32) -> Result<u32> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        DrdfError::encoding(format!(
            "{tag} payload of {} bytes exceeds the 32-bit length field",
            payload.len()
        ))
    })?;
    let head = encode_header(tag, len);
    writer.write_all(&head)?;
    writer.write_all(payload)?;
    let crc = update_crc(update_crc(crc, &head), payload);
    trace!("wrote chunk {tag} ({len} bytes), crc {crc:08X}");
    Ok(crc)
}

/// Read one chunk and return it with the updated running CRC.
///
/// Fixed-length tags are checked before the payload is read, and any
/// declared length above `max_len` is rejected before allocating. The
/// payload buffer grows with the bytes actually read, so a corrupt length
/// ends in a truncation error rather than a huge allocation.
pub fn read_chunk<R: Read>(reader: &mut R, crc: u32, max_len: u32) -> Result<(Chunk, u32)> {
    let mut head = [0u8; CHUNK_HEADER_LEN];
    read_exact_or_truncated(reader, &mut head, "chunk header")?;
    let len = LittleEndian::read_u32(&head[..4]);
    let tag = Tag([head[4], head[5], head[6], head[7]]);

    if let Some(expected) = tag.fixed_len() {
        if len != expected {
            return Err(DrdfError::format(
                tag.to_string(),
                format!("chunk size {len} does not match expected value {expected}"),
            ));
        }
    }
    if len > max_len {
        return Err(DrdfError::format(
            tag.to_string(),
            format!("chunk size {len} exceeds limit of {max_len} bytes"),
        ));
    }

    let mut payload = Vec::with_capacity((len as usize).min(PAYLOAD_PREALLOC));
    reader.by_ref().take(u64::from(len)).read_to_end(&mut payload)?;
    if payload.len() != len as usize {
        return Err(DrdfError::format(
            "stream",
            format!("truncated chunk payload: expected {len} bytes, got {}", payload.len()),
        ));
    }

    let mut crc = update_crc(crc, &head);
    if tag != Tag::ERAW {
        crc = update_crc(crc, &payload);
    }
    trace!("read chunk {tag} ({len} bytes), crc {crc:08X}");
    Ok((Chunk { tag, payload }, crc))
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            DrdfError::format("stream", format!("truncated {what}: expected {} bytes", buf.len()))
        }
        _ => DrdfError::from(e),
    })
}

/// Streaming chunk writer carrying the running checksum.
pub struct ChunkWriter<W: Write> {
    writer: W,
    crc: u32,
    chunks_written: u64,
    bytes_written: u64,
}

impl<W: Write> ChunkWriter<W> {
    /// Wrap a writer and emit the `HRAW` stream header.
    pub fn start(writer: W) -> Result<Self> {
        let mut this = Self {
            writer,
            crc: CRC_SEED,
            chunks_written: 0,
            bytes_written: 0,
        };
        this.write_chunk(Tag::HRAW, &[])?;
        Ok(this)
    }

    /// Write one chunk.
    pub fn write_chunk(&mut self, tag: Tag, payload: &[u8]) -> Result<()> {
        self.crc = write_chunk(&mut self.writer, tag, payload, self.crc)?;
        self.chunks_written += 1;
        self.bytes_written += (CHUNK_HEADER_LEN + payload.len()) as u64;
        Ok(())
    }

    /// Current running checksum.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Number of chunks written so far, including `HRAW`.
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Emit the `ERAW` trailer and return the inner writer and final checksum.
    pub fn finish(mut self) -> Result<(W, u32)> {
        let crc = update_crc(self.crc, &TRAILER_HEADER);
        let mut payload = [0u8; 4];
        LittleEndian::write_u32(&mut payload, crc);
        self.writer.write_all(&TRAILER_HEADER)?;
        self.writer.write_all(&payload)?;
        self.writer.flush()?;
        self.bytes_written += (TRAILER_HEADER.len() + payload.len()) as u64;
        self.chunks_written += 1;
        trace!("wrote trailer, crc {crc:08X}");
        Ok((self.writer, crc))
    }
}

/// Streaming chunk reader carrying the running checksum.
pub struct ChunkReader<R: Read> {
    reader: R,
    crc: u32,
    max_chunk_len: u32,
    chunks_read: u64,
    bytes_read: u64,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader and consume the literal `HRAW` stream header.
    pub fn start(mut reader: R, max_chunk_len: u32) -> Result<Self> {
        let mut head = [0u8; CHUNK_HEADER_LEN];
        reader.read_exact(&mut head).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                DrdfError::format("HRAW", "file is shorter than the stream header")
            }
            _ => DrdfError::from(e),
        })?;
        if head != FILE_HEADER {
            return Err(DrdfError::format("HRAW", "file header does not match"));
        }
        Ok(Self {
            reader,
            crc: update_crc(CRC_SEED, &head),
            max_chunk_len,
            chunks_read: 1,
            bytes_read: CHUNK_HEADER_LEN as u64,
        })
    }

    /// Read the next chunk.
    pub fn next_chunk(&mut self) -> Result<Chunk> {
        let (chunk, crc) = read_chunk(&mut self.reader, self.crc, self.max_chunk_len)?;
        self.crc = crc;
        self.chunks_read += 1;
        self.bytes_read += (CHUNK_HEADER_LEN + chunk.payload.len()) as u64;
        Ok(chunk)
    }

    /// Running checksum over everything read so far.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Number of chunks read so far, including `HRAW`.
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    /// Number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Unwrap the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::constants::DEFAULT_MAX_CHUNK_LEN;
    use std::io::Cursor;

    #[test]
    fn test_update_crc_is_incremental() {
        let whole = update_crc(CRC_SEED, b"hello world");
        let split = update_crc(update_crc(CRC_SEED, b"hello "), b"world");
        assert_eq!(whole, split);
    }

    #[test]
    fn test_update_crc_matches_zlib_convention() {
        // zlib crc32(b"123456789", 0) is the standard check value
        assert_eq!(update_crc(0, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut out = Vec::new();
        let crc = write_chunk(&mut out, Tag::ISRC, b"CAM", CRC_SEED).unwrap();
        assert_eq!(out, b"\x03\x00\x00\x00ISRCCAM".to_vec());
        assert_eq!(crc, update_crc(CRC_SEED, &out));
    }

    #[test]
    fn test_read_chunk_round_trip_crc() {
        let mut out = Vec::new();
        let crc_w = write_chunk(&mut out, Tag::RGEO, b"DUMMY", CRC_SEED).unwrap();
        let (chunk, crc_r) = read_chunk(&mut Cursor::new(out), CRC_SEED, u32::MAX).unwrap();
        assert_eq!(chunk.tag, Tag::RGEO);
        assert_eq!(chunk.payload, b"DUMMY".to_vec());
        assert_eq!(crc_w, crc_r);
    }

    #[test]
    fn test_read_chunk_rejects_fixed_length_mismatch() {
        let bytes = b"\x05\x00\x00\x00EVNT\x01\x00\x00\x00\x00".to_vec();
        let err = read_chunk(&mut Cursor::new(bytes), CRC_SEED, u32::MAX).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("EVNT"));
    }

    #[test]
    fn test_read_chunk_excludes_eraw_payload() {
        let bytes = b"\x04\x00\x00\x00ERAW\xAA\xBB\xCC\xDD".to_vec();
        let (chunk, crc) = read_chunk(&mut Cursor::new(bytes), CRC_SEED, u32::MAX).unwrap();
        assert_eq!(chunk.payload, vec![0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(crc, update_crc(CRC_SEED, &TRAILER_HEADER));
    }

    #[test]
    fn test_read_chunk_truncated_payload() {
        let bytes = b"\x10\x00\x00\x00IDAT\x01\x02".to_vec();
        let err = read_chunk(&mut Cursor::new(bytes), CRC_SEED, u32::MAX).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_read_chunk_enforces_max_len() {
        let bytes = b"\x00\x10\x00\x00IDAT".to_vec();
        let err = read_chunk(&mut Cursor::new(bytes), CRC_SEED, 1024).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_max_len_is_inclusive() {
        let payload = vec![7u8; 300];
        let mut out = Vec::new();
        write_chunk(&mut out, Tag::IDAT, &payload, CRC_SEED).unwrap();

        let (chunk, _) = read_chunk(&mut Cursor::new(out.clone()), CRC_SEED, 300).unwrap();
        assert_eq!(chunk.payload, payload);
        let err = read_chunk(&mut Cursor::new(out), CRC_SEED, 299).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_default_limit_covers_length_field() {
        // anything write_chunk can frame, the default reader accepts
        assert_eq!(DEFAULT_MAX_CHUNK_LEN, u32::MAX);
    }

    #[test]
    fn test_read_chunk_huge_declared_length_is_truncation() {
        let bytes = b"\xFF\xFF\xFF\xFFIDAT\x01\x02\x03".to_vec();
        let err = read_chunk(&mut Cursor::new(bytes), CRC_SEED, DEFAULT_MAX_CHUNK_LEN).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_chunk_writer_reader_agree() {
        let mut writer = ChunkWriter::start(Vec::new()).unwrap();
        writer.write_chunk(Tag::EVNT, &7u32.to_le_bytes()).unwrap();
        let (bytes, crc) = writer.finish().unwrap();
        assert_eq!(&bytes[..8], &FILE_HEADER);
        assert_eq!(&bytes[bytes.len() - 4..], &crc.to_le_bytes());

        let mut reader = ChunkReader::start(Cursor::new(bytes), u32::MAX).unwrap();
        assert_eq!(reader.next_chunk().unwrap().tag, Tag::EVNT);
        let end = reader.next_chunk().unwrap();
        assert_eq!(end.tag, Tag::ERAW);
        assert_eq!(LittleEndian::read_u32(&end.payload), reader.crc());
        assert_eq!(reader.chunks_read(), 3);
    }

    #[test]
    fn test_chunk_reader_rejects_bad_header() {
        let err = ChunkReader::start(Cursor::new(b"\x00\x00\x00\x00HRAX".to_vec()), u32::MAX)
            .err()
            .unwrap();
        assert!(err.is_format());
        let err = ChunkReader::start(Cursor::new(b"\x00\x00".to_vec()), u32::MAX)
            .err()
            .unwrap();
        assert!(err.is_format());
    }
}
