// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pixel format codes.
//!
//! A format code selects the element type and channel count of an image.
//! Single-channel codes carry an amplitude, two-channel codes carry an
//! (amplitude, time) pair per pixel.

use std::fmt;

use serde::Serialize;

use crate::core::{DrdfError, Result};

/// Scalar element type of a pixel buffer.
///
/// Only `U8`, `U16` and `F32` map onto a format code. The remaining
/// variants exist so typed buffers coming from producers can be described
/// and rejected with a proper error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F32,
    F64,
}

impl ElementType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::U16 | ElementType::I16 => 2,
            ElementType::U32 | ElementType::I32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    /// Lowercase name (e.g. "uint16").
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::U8 => "uint8",
            ElementType::U16 => "uint16",
            ElementType::U32 => "uint32",
            ElementType::I8 => "int8",
            ElementType::I16 => "int16",
            ElementType::I32 => "int32",
            ElementType::F32 => "float32",
            ElementType::F64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel format code as stored in the `IFMT` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum FormatCode {
    /// Amplitude, 8 bit unsigned.
    Au8 = 0,
    /// Amplitude and time, 8 bit unsigned each.
    Au8Tu8 = 1,
    /// Amplitude, 16 bit unsigned.
    Au16 = 2,
    /// Amplitude and time, 16 bit unsigned each.
    Au16Tu16 = 3,
    /// Amplitude and time, 32 bit float each.
    Af32Tf32 = 4,
}

impl FormatCode {
    /// All codes in numeric order.
    pub const ALL: [FormatCode; 5] = [
        FormatCode::Au8,
        FormatCode::Au8Tu8,
        FormatCode::Au16,
        FormatCode::Au16Tu16,
        FormatCode::Af32Tf32,
    ];

    /// Numeric value written to disk.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Element type of each channel.
    pub fn element_type(&self) -> ElementType {
        match self {
            FormatCode::Au8 | FormatCode::Au8Tu8 => ElementType::U8,
            FormatCode::Au16 | FormatCode::Au16Tu16 => ElementType::U16,
            FormatCode::Af32Tf32 => ElementType::F32,
        }
    }

    /// Number of channels per pixel (1 or 2).
    pub fn channels(&self) -> usize {
        match self {
            FormatCode::Au8 | FormatCode::Au16 => 1,
            FormatCode::Au8Tu8 | FormatCode::Au16Tu16 | FormatCode::Af32Tf32 => 2,
        }
    }

    /// Size of one pixel record in bytes.
    pub fn pixel_size(&self) -> usize {
        self.channels() * self.element_type().size()
    }

    /// Payload size of a `width` x `height` image in this format.
    pub fn byte_len(&self, width: u16, height: u16) -> usize {
        width as usize * height as usize * self.pixel_size()
    }

    /// Look up the code for an element type and channel count.
    pub fn from_parts(element: ElementType, channels: usize) -> Result<Self> {
        match (element, channels) {
            (ElementType::U8, 1) => Ok(FormatCode::Au8),
            (ElementType::U16, 1) => Ok(FormatCode::Au16),
            (ElementType::U8, 2) => Ok(FormatCode::Au8Tu8),
            (ElementType::U16, 2) => Ok(FormatCode::Au16Tu16),
            (ElementType::F32, 2) => Ok(FormatCode::Af32Tf32),
            (element, channels) => Err(DrdfError::encoding(format!(
                "no format code for {channels} channel(s) of {element}"
            ))),
        }
    }

    /// Array shape of a `width` x `height` image: `[w, h]` or `[w, h, 2]`.
    pub fn shape(&self, width: u16, height: u16) -> Vec<usize> {
        let mut shape = vec![width as usize, height as usize];
        if self.channels() == 2 {
            shape.push(2);
        }
        shape
    }

    /// Derive `(width, height, code)` from an array shape and element type.
    pub fn from_shape(shape: &[usize], element: ElementType) -> Result<(u16, u16, Self)> {
        let channels = match shape {
            [_, _] => 1,
            [_, _, 2] => 2,
            _ => {
                return Err(DrdfError::encoding(format!("invalid shape: {shape:?}")));
            }
        };
        let code = Self::from_parts(element, channels)?;
        let width = dimension(shape[0], "width")?;
        let height = dimension(shape[1], "height")?;
        Ok((width, height, code))
    }
}

fn dimension(value: usize, name: &str) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| DrdfError::encoding(format!("{name} {value} does not fit in 16 bits")))
}

impl TryFrom<u8> for FormatCode {
    type Error = DrdfError;

    fn try_from(value: u8) -> Result<Self> {
        FormatCode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| DrdfError::encoding(format!("invalid format code: {value}")))
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatCode::Au8 => "Au8",
            FormatCode::Au8Tu8 => "Au8Tu8",
            FormatCode::Au16 => "Au16",
            FormatCode::Au16Tu16 => "Au16Tu16",
            FormatCode::Af32Tf32 => "Af32Tf32",
        };
        f.write_str(name)
    }
}
