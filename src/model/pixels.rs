// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pixel buffers.
//!
//! [`PixelBuffer`] holds the pixels of one image with one variant per
//! format code, so the element type and channel count travel with the
//! data. Two-channel formats store `[amplitude, time]` pairs.
//!
//! [`PixelArray`] is the generic `(shape, element type)` view used by
//! producers that hand over already-shaped typed buffers. It can describe
//! element types that have no format code; converting such an array into
//! a [`PixelBuffer`] fails with an encoding error.

use byteorder::{ByteOrder, LittleEndian};

use super::format::{ElementType, FormatCode};
use crate::core::{DrdfError, Result};

/// Typed pixel storage, one variant per format code.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    Au8(Vec<u8>),
    Au8Tu8(Vec<[u8; 2]>),
    Au16(Vec<u16>),
    Au16Tu16(Vec<[u16; 2]>),
    Af32Tf32(Vec<[f32; 2]>),
}

impl PixelBuffer {
    /// Allocate `count` zeroed pixels of the given format.
    pub fn zeroed(code: FormatCode, count: usize) -> Self {
        match code {
            FormatCode::Au8 => PixelBuffer::Au8(vec![0; count]),
            FormatCode::Au8Tu8 => PixelBuffer::Au8Tu8(vec![[0; 2]; count]),
            FormatCode::Au16 => PixelBuffer::Au16(vec![0; count]),
            FormatCode::Au16Tu16 => PixelBuffer::Au16Tu16(vec![[0; 2]; count]),
            FormatCode::Af32Tf32 => PixelBuffer::Af32Tf32(vec![[0.0; 2]; count]),
        }
    }

    /// Interpret little-endian raw bytes as pixels of the given format.
    pub fn from_le_bytes(code: FormatCode, bytes: &[u8]) -> Result<Self> {
        let pixel_size = code.pixel_size();
        if bytes.len() % pixel_size != 0 {
            return Err(DrdfError::encoding(format!(
                "{} bytes is not a whole number of {code} pixels ({pixel_size} bytes each)",
                bytes.len()
            )));
        }
        let buffer = match code {
            FormatCode::Au8 => PixelBuffer::Au8(bytes.to_vec()),
            FormatCode::Au8Tu8 => {
                PixelBuffer::Au8Tu8(bytes.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
            FormatCode::Au16 => {
                let mut out = vec![0u16; bytes.len() / 2];
                LittleEndian::read_u16_into(bytes, &mut out);
                PixelBuffer::Au16(out)
            }
            FormatCode::Au16Tu16 => {
                let mut flat = vec![0u16; bytes.len() / 2];
                LittleEndian::read_u16_into(bytes, &mut flat);
                PixelBuffer::Au16Tu16(flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
            FormatCode::Af32Tf32 => {
                let mut flat = vec![0f32; bytes.len() / 4];
                LittleEndian::read_f32_into(bytes, &mut flat);
                PixelBuffer::Af32Tf32(flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
        };
        Ok(buffer)
    }

    /// Serialize to little-endian bytes in row-major order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            PixelBuffer::Au8(px) => px.clone(),
            PixelBuffer::Au8Tu8(px) => px.iter().flatten().copied().collect(),
            PixelBuffer::Au16(px) => {
                let mut out = vec![0u8; px.len() * 2];
                LittleEndian::write_u16_into(px, &mut out);
                out
            }
            PixelBuffer::Au16Tu16(px) => {
                let flat: Vec<u16> = px.iter().flatten().copied().collect();
                let mut out = vec![0u8; flat.len() * 2];
                LittleEndian::write_u16_into(&flat, &mut out);
                out
            }
            PixelBuffer::Af32Tf32(px) => {
                let flat: Vec<f32> = px.iter().flatten().copied().collect();
                let mut out = vec![0u8; flat.len() * 4];
                LittleEndian::write_f32_into(&flat, &mut out);
                out
            }
        }
    }

    /// Format code matching this variant.
    pub fn format_code(&self) -> FormatCode {
        match self {
            PixelBuffer::Au8(_) => FormatCode::Au8,
            PixelBuffer::Au8Tu8(_) => FormatCode::Au8Tu8,
            PixelBuffer::Au16(_) => FormatCode::Au16,
            PixelBuffer::Au16Tu16(_) => FormatCode::Au16Tu16,
            PixelBuffer::Af32Tf32(_) => FormatCode::Af32Tf32,
        }
    }

    /// Number of pixels (not elements).
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::Au8(px) => px.len(),
            PixelBuffer::Au8Tu8(px) => px.len(),
            PixelBuffer::Au16(px) => px.len(),
            PixelBuffer::Au16Tu16(px) => px.len(),
            PixelBuffer::Af32Tf32(px) => px.len(),
        }
    }

    /// Whether the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel at a linear index.
    pub fn get(&self, index: usize) -> Option<Pixel> {
        match self {
            PixelBuffer::Au8(px) => px.get(index).map(|&a| Pixel::Au8(a)),
            PixelBuffer::Au8Tu8(px) => px.get(index).map(|&[a, t]| Pixel::Au8Tu8(a, t)),
            PixelBuffer::Au16(px) => px.get(index).map(|&a| Pixel::Au16(a)),
            PixelBuffer::Au16Tu16(px) => px.get(index).map(|&[a, t]| Pixel::Au16Tu16(a, t)),
            PixelBuffer::Af32Tf32(px) => px.get(index).map(|&[a, t]| Pixel::Af32Tf32(a, t)),
        }
    }

    /// Flatten into a generic array of the given image dimensions.
    pub fn to_array(&self, width: u16, height: u16) -> PixelArray {
        let shape = self.format_code().shape(width, height);
        let data = match self {
            PixelBuffer::Au8(px) => ArrayData::U8(px.clone()),
            PixelBuffer::Au8Tu8(px) => ArrayData::U8(px.iter().flatten().copied().collect()),
            PixelBuffer::Au16(px) => ArrayData::U16(px.clone()),
            PixelBuffer::Au16Tu16(px) => ArrayData::U16(px.iter().flatten().copied().collect()),
            PixelBuffer::Af32Tf32(px) => ArrayData::F32(px.iter().flatten().copied().collect()),
        };
        PixelArray { shape, data }
    }
}

/// A single pixel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pixel {
    Au8(u8),
    Au8Tu8(u8, u8),
    Au16(u16),
    Au16Tu16(u16, u16),
    Af32Tf32(f32, f32),
}

impl Pixel {
    /// Amplitude channel, widened to `f64`.
    pub fn amplitude(&self) -> f64 {
        match *self {
            Pixel::Au8(a) | Pixel::Au8Tu8(a, _) => a as f64,
            Pixel::Au16(a) | Pixel::Au16Tu16(a, _) => a as f64,
            Pixel::Af32Tf32(a, _) => a as f64,
        }
    }

    /// Time channel for two-channel formats.
    pub fn time(&self) -> Option<f64> {
        match *self {
            Pixel::Au8(_) | Pixel::Au16(_) => None,
            Pixel::Au8Tu8(_, t) => Some(t as f64),
            Pixel::Au16Tu16(_, t) => Some(t as f64),
            Pixel::Af32Tf32(_, t) => Some(t as f64),
        }
    }
}

/// Flat element storage of a [`PixelArray`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ArrayData {
    /// Element type of the storage.
    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::U8(_) => ElementType::U8,
            ArrayData::U16(_) => ElementType::U16,
            ArrayData::U32(_) => ElementType::U32,
            ArrayData::I8(_) => ElementType::I8,
            ArrayData::I16(_) => ElementType::I16,
            ArrayData::I32(_) => ElementType::I32,
            ArrayData::F32(_) => ElementType::F32,
            ArrayData::F64(_) => ElementType::F64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            ArrayData::U8(v) => v.len(),
            ArrayData::U16(v) => v.len(),
            ArrayData::U32(v) => v.len(),
            ArrayData::I8(v) => v.len(),
            ArrayData::I16(v) => v.len(),
            ArrayData::I32(v) => v.len(),
            ArrayData::F32(v) => v.len(),
            ArrayData::F64(v) => v.len(),
        }
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed, shaped, row-major element buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl PixelArray {
    /// Wrap `data` with the given shape.
    ///
    /// Fails if the element count does not equal the product of the shape.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(DrdfError::encoding(format!(
                "shape {shape:?} needs {expected} elements, buffer has {}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Array shape, outermost dimension first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Element type of the storage.
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Convert into the pixel buffer of `code`.
    ///
    /// The element type must be the one `code` uses.
    pub(crate) fn into_pixel_buffer(self, code: FormatCode) -> Result<PixelBuffer> {
        let buffer = match (code, self.data) {
            (FormatCode::Au8, ArrayData::U8(v)) => PixelBuffer::Au8(v),
            (FormatCode::Au16, ArrayData::U16(v)) => PixelBuffer::Au16(v),
            (FormatCode::Au8Tu8, ArrayData::U8(v)) => {
                PixelBuffer::Au8Tu8(v.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
            (FormatCode::Au16Tu16, ArrayData::U16(v)) => {
                PixelBuffer::Au16Tu16(v.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
            (FormatCode::Af32Tf32, ArrayData::F32(v)) => {
                PixelBuffer::Af32Tf32(v.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            }
            (code, data) => {
                return Err(DrdfError::encoding(format!(
                    "format {code} stores {}, buffer holds {}",
                    code.element_type(),
                    data.element_type()
                )));
            }
        };
        Ok(buffer)
    }
}
