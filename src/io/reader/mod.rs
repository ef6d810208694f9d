// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DRDF deserialization.
//!
//! A single pass over the chunk stream rebuilds the run/event/image tree
//! through the same builder calls a producer would use. `ISRC` and `IFMT`
//! stage the source name and format of the next image; `IDAT` consumes
//! both. Reading stops at `ERAW` once the checksum has been verified.

pub mod builder;

pub use builder::{ReaderBuilder, ReaderConfig};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{DrdfError, Result};
use crate::io::chunk::{Chunk, ChunkReader};
use crate::io::constants::Tag;
use crate::io::metadata::FileInfo;
use crate::model::{Drdf, FormatCode, Image, PixelBuffer};

/// Reads DRDF files into [`Drdf`] containers.
#[derive(Debug, Clone)]
pub struct DrdfReader {
    config: ReaderConfig,
}

impl DrdfReader {
    /// Create a reader for `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReaderBuilder::new().path(path).build()
    }

    pub(crate) fn from_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read the file into a fresh container.
    pub fn read(&self) -> Result<(Drdf, FileInfo)> {
        let mut file = Drdf::new();
        let info = self.read_into(&mut file)?;
        Ok((file, info))
    }

    /// Read the file into `target` through its builder calls.
    ///
    /// On error `target` may hold a partial tree and must not be used.
    pub fn read_into(&self, target: &mut Drdf) -> Result<FileInfo> {
        let input = File::open(&self.config.path)?;
        let info = decode(BufReader::new(input), target, &self.config)?;
        debug!(
            "Read {}: {} runs, {} events, {} images, checksum {}",
            self.config.path.display(),
            info.runs,
            info.events,
            info.images,
            info.checksum_hex()
        );
        Ok(info)
    }
}

/// Position in the `ISRC` -> `IFMT` -> `IDAT` sequence, tracked when
/// staging is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Staging {
    Idle,
    Source,
    Format,
}

/// Decoder state carried between chunks.
struct DecodeState<'a> {
    target: &'a mut Drdf,
    config: &'a ReaderConfig,
    pending_source: Option<String>,
    pending_format: Option<(u16, u16, FormatCode)>,
    staging: Staging,
    /// Run and event opened by this stream, independent of the target's
    /// own cursor.
    run_open: bool,
    event_open: bool,
    info: FileInfo,
}

impl<'a> DecodeState<'a> {
    fn new(target: &'a mut Drdf, config: &'a ReaderConfig) -> Self {
        Self {
            target,
            config,
            pending_source: None,
            pending_format: None,
            staging: Staging::Idle,
            run_open: false,
            event_open: false,
            info: FileInfo::default(),
        }
    }

    /// Enforce the strict `ISRC IFMT IDAT` sequence for an incoming tag.
    fn check_staging(&mut self, tag: Tag) -> Result<()> {
        if !self.config.strict_staging {
            return Ok(());
        }
        let next = match (self.staging, tag) {
            (Staging::Idle, Tag::ISRC) => Staging::Source,
            (Staging::Source, Tag::IFMT) => Staging::Format,
            (Staging::Format, Tag::IDAT) => Staging::Idle,
            (Staging::Idle, t) if t != Tag::IFMT && t != Tag::IDAT => Staging::Idle,
            (state, t) => {
                let expected = match state {
                    Staging::Idle => "ISRC",
                    Staging::Source => "IFMT",
                    Staging::Format => "IDAT",
                };
                return Err(DrdfError::format(
                    t.to_string(),
                    format!("expected {expected} in image sequence"),
                ));
            }
        };
        self.staging = next;
        Ok(())
    }

    fn require_run(&self, tag: Tag) -> Result<()> {
        if !self.run_open {
            return Err(DrdfError::format(tag.to_string(), "chunk appears before any RSTA"));
        }
        Ok(())
    }

    fn on_run_start(&mut self, chunk: &Chunk) -> Result<()> {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&chunk.payload);
        self.target.start_run(Uuid::from_bytes(bytes));
        self.run_open = true;
        self.event_open = false;
        self.info.runs += 1;
        Ok(())
    }

    fn on_georef(&mut self, chunk: &Chunk) -> Result<()> {
        self.require_run(chunk.tag)?;
        let georef = decode_ascii(chunk)?;
        self.target.set_georef(georef)
    }

    fn on_event(&mut self, chunk: &Chunk) -> Result<()> {
        self.require_run(chunk.tag)?;
        self.target.start_event(LittleEndian::read_u32(&chunk.payload))?;
        self.event_open = true;
        self.info.events += 1;
        Ok(())
    }

    fn on_format(&mut self, chunk: &Chunk) -> Result<()> {
        let width = LittleEndian::read_u16(&chunk.payload[0..2]);
        let height = LittleEndian::read_u16(&chunk.payload[2..4]);
        let code = FormatCode::try_from(chunk.payload[4])?;
        self.pending_format = Some((width, height, code));
        Ok(())
    }

    fn on_source(&mut self, chunk: &Chunk) -> Result<()> {
        self.pending_source = Some(decode_ascii(chunk)?);
        Ok(())
    }

    fn on_data(&mut self, chunk: Chunk) -> Result<()> {
        let (width, height, code) = self
            .pending_format
            .take()
            .ok_or_else(|| DrdfError::format("IDAT", "pixel data without a preceding IFMT"))?;
        let source = self
            .pending_source
            .take()
            .ok_or_else(|| DrdfError::format("IDAT", "pixel data without a preceding ISRC"))?;
        if !self.event_open {
            return Err(DrdfError::format("IDAT", "pixel data outside of an event"));
        }

        let expected = code.byte_len(width, height);
        if chunk.payload.len() != expected {
            return Err(DrdfError::format(
                "IDAT",
                format!(
                    "{width}x{height} {code} image needs {expected} bytes, chunk has {}",
                    chunk.payload.len()
                ),
            ));
        }
        let pixels = PixelBuffer::from_le_bytes(code, &chunk.payload)?;
        let image = Image::new(width, height, pixels)?;
        if self.target.add_image(source.as_str(), image)?.is_some() {
            warn!("IDAT replaces an earlier image from source '{source}' in the same event");
        }
        self.info.images += 1;
        Ok(())
    }

    fn on_end(&mut self, chunk: &Chunk, computed: u32) -> Result<()> {
        if self.config.strict_staging && self.staging != Staging::Idle {
            return Err(DrdfError::format("ERAW", "stream ends inside an image sequence"));
        }
        let expected = LittleEndian::read_u32(&chunk.payload);
        if computed != expected {
            return Err(DrdfError::integrity(computed, expected));
        }
        self.info.checksum = expected;
        Ok(())
    }
}

fn decode_ascii(chunk: &Chunk) -> Result<String> {
    if !chunk.payload.is_ascii() {
        return Err(DrdfError::format(
            chunk.tag.to_string(),
            "payload is not ASCII text",
        ));
    }
    // ASCII is valid UTF-8
    Ok(chunk.payload.iter().map(|&b| b as char).collect())
}

/// Decode a DRDF stream into `target`.
pub fn decode<R: Read>(reader: R, target: &mut Drdf, config: &ReaderConfig) -> Result<FileInfo> {
    let mut chunks = ChunkReader::start(reader, config.max_chunk_len)?;
    let mut state = DecodeState::new(target, config);

    loop {
        let chunk = chunks.next_chunk()?;
        state.check_staging(chunk.tag)?;
        match chunk.tag {
            Tag::ERAW => {
                state.on_end(&chunk, chunks.crc())?;
                break;
            }
            Tag::HRAW => {
                return Err(DrdfError::format("HRAW", "HRAW must be the first chunk"));
            }
            Tag::RSTA => state.on_run_start(&chunk)?,
            Tag::RGEO => state.on_georef(&chunk)?,
            Tag::EVNT => state.on_event(&chunk)?,
            Tag::IFMT => state.on_format(&chunk)?,
            Tag::ISRC => state.on_source(&chunk)?,
            Tag::IDAT => state.on_data(chunk)?,
            other => {
                if !config.allow_unknown_tags {
                    return Err(DrdfError::format(other.to_string(), "unknown chunk tag"));
                }
                warn!("Skipping unknown chunk {other} ({} bytes)", chunk.payload.len());
            }
        }
    }

    let mut info = state.info;
    info.chunks = chunks.chunks_read();
    info.bytes = chunks.bytes_read();
    Ok(info)
}

/// Decode a DRDF stream held in memory.
pub fn from_bytes(bytes: &[u8]) -> Result<Drdf> {
    let mut file = Drdf::new();
    decode(bytes, &mut file, &ReaderConfig::default())?;
    Ok(file)
}

impl Drdf {
    /// Read a DRDF file into a new container.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (file, _) = DrdfReader::open(path)?.read()?;
        Ok(file)
    }

    /// Read a DRDF file into this container, appending its runs.
    pub fn read_into<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        DrdfReader::open(path)?.read_into(self)?;
        Ok(())
    }

    /// Decode a DRDF stream held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        from_bytes(bytes)
    }
}
