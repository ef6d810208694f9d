// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DRDF serialization.
//!
//! Walks the run/event/image tree in insertion order and emits:
//!
//! ```text
//! HRAW
//! RSTA RGEO (EVNT (ISRC IFMT IDAT)*)*   per run
//! ERAW
//! ```

pub mod builder;

pub use builder::{WriterBuilder, WriterConfig};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::io::chunk::ChunkWriter;
use crate::io::constants::{Tag, IFMT_LEN};
use crate::io::metadata::FileInfo;
use crate::model::{Drdf, Image};
use crate::Result;

/// Writes a [`Drdf`] container to a file.
#[derive(Debug, Clone)]
pub struct DrdfWriter {
    config: WriterConfig,
}

impl DrdfWriter {
    /// Create a writer for `path` with default settings.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use drdf::io::DrdfWriter;
    /// use drdf::Drdf;
    ///
    /// let file = Drdf::new();
    /// let info = DrdfWriter::create("output.drdf")?.write(&file)?;
    /// println!("checksum {}", info.checksum_hex());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        WriterBuilder::new().path(path).build()
    }

    pub(crate) fn from_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Serialize `file` to the configured path.
    ///
    /// The container is validated first, so nothing is created on disk
    /// when a run lacks its georeference. The file handle is closed on
    /// every exit path.
    pub fn write(&self, file: &Drdf) -> Result<FileInfo> {
        file.validate()?;
        let out = File::create(&self.config.path)?;
        let out = BufWriter::with_capacity(self.config.buffer_capacity, out);
        let (_, info) = encode_validated(file, out)?;
        debug!(
            "Wrote {}: {} runs, {} events, {} images, {} bytes, checksum {}",
            self.config.path.display(),
            info.runs,
            info.events,
            info.images,
            info.bytes,
            info.checksum_hex()
        );
        Ok(info)
    }
}

/// Serialize `file` into `writer`.
///
/// Returns the writer (flushed) together with a summary of what was
/// written.
pub fn encode<W: Write>(file: &Drdf, writer: W) -> Result<(W, FileInfo)> {
    file.validate()?;
    encode_validated(file, writer)
}

/// Serialize a container that has already passed [`Drdf::validate`].
fn encode_validated<W: Write>(file: &Drdf, writer: W) -> Result<(W, FileInfo)> {
    let mut chunks = ChunkWriter::start(writer)?;
    let mut info = FileInfo::default();

    for (run_id, run) in file.runs() {
        chunks.write_chunk(Tag::RSTA, run_id.as_bytes())?;
        // validate() guarantees a georef on every run
        let georef = run.georef().unwrap_or_default();
        chunks.write_chunk(Tag::RGEO, georef.as_bytes())?;
        info.runs += 1;

        for (event_id, event) in run.events() {
            chunks.write_chunk(Tag::EVNT, &event_id.to_le_bytes())?;
            info.events += 1;

            for (source, image) in event.images() {
                chunks.write_chunk(Tag::ISRC, source.as_bytes())?;
                chunks.write_chunk(Tag::IFMT, &encode_format(image))?;
                chunks.write_chunk(Tag::IDAT, &image.to_le_bytes())?;
                info.images += 1;
            }
        }
    }

    let chunks_before_trailer = chunks.chunks_written();
    let bytes_before_trailer = chunks.bytes_written();
    let (writer, checksum) = chunks.finish()?;
    info.chunks = chunks_before_trailer + 1;
    info.bytes = bytes_before_trailer + 8 + 4;
    info.checksum = checksum;
    Ok((writer, info))
}

/// Serialize `file` into a byte vector.
pub fn to_bytes(file: &Drdf) -> Result<Vec<u8>> {
    let (bytes, _) = encode(file, Vec::new())?;
    Ok(bytes)
}

/// Encode the `IFMT` payload: width, height, format code, 3 zero bytes.
pub fn encode_format(image: &Image) -> [u8; IFMT_LEN] {
    let mut payload = [0u8; IFMT_LEN];
    LittleEndian::write_u16(&mut payload[0..2], image.width());
    LittleEndian::write_u16(&mut payload[2..4], image.height());
    payload[4] = image.format_code().as_u8();
    payload
}

impl Drdf {
    /// Write the container to `path`.
    ///
    /// Fails with a usage error, before touching the file system, if any
    /// run has no georeference.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DrdfWriter::create(path)?.write(self)?;
        Ok(())
    }

    /// Serialize the container into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormatCode;
    use uuid::Uuid;

    #[test]
    fn test_encode_format_layout() {
        let image = Image::zeroed(0x0102, 0x0304, FormatCode::Au16Tu16);
        assert_eq!(encode_format(&image), [0x02, 0x01, 0x04, 0x03, 3, 0, 0, 0]);
    }

    #[test]
    fn test_empty_container() {
        let bytes = to_bytes(&Drdf::new()).unwrap();
        assert_eq!(bytes.len(), 8 + 12);
        assert_eq!(&bytes[..8], b"\x00\x00\x00\x00HRAW");
        assert_eq!(&bytes[8..16], b"\x04\x00\x00\x00ERAW");
    }

    #[test]
    fn test_missing_georef_fails_fast() {
        let mut file = Drdf::new();
        file.start_run(Uuid::nil());
        let err = to_bytes(&file).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_summary_counts() {
        let mut file = Drdf::new();
        file.start_run(Uuid::nil());
        file.set_georef("X").unwrap();
        file.start_event(1).unwrap();
        file.add_image("A", Image::zeroed(2, 2, FormatCode::Au8)).unwrap();
        file.add_image("B", Image::zeroed(2, 2, FormatCode::Au8)).unwrap();
        file.start_event(2).unwrap();

        let (bytes, info) = encode(&file, Vec::new()).unwrap();
        assert_eq!(info.runs, 1);
        assert_eq!(info.events, 2);
        assert_eq!(info.images, 2);
        // HRAW RSTA RGEO EVNT (ISRC IFMT IDAT)x2 EVNT ERAW
        assert_eq!(info.chunks, 12);
        assert_eq!(info.bytes, bytes.len() as u64);
        assert_eq!(&bytes[bytes.len() - 4..], &info.checksum.to_le_bytes());
    }
}
