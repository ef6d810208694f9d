// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed detector images.

use super::format::FormatCode;
use super::pixels::{Pixel, PixelArray, PixelBuffer};
use crate::core::{DrdfError, Result};

/// A rectangular pixel buffer captured by one source.
///
/// The pixel count always equals `width * height`; every constructor
/// checks it. Pixel `(x, y)` lives at linear index `x + y * width`, with
/// `(0, 0)` the upper left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u16,
    height: u16,
    pixels: PixelBuffer,
}

impl Image {
    /// Wrap an already-typed buffer.
    pub fn new(width: u16, height: u16, pixels: PixelBuffer) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DrdfError::encoding(format!(
                "{width}x{height} {} image needs {expected} pixels, buffer has {}",
                pixels.format_code(),
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a zeroed image.
    pub fn zeroed(width: u16, height: u16, code: FormatCode) -> Self {
        Self {
            width,
            height,
            pixels: PixelBuffer::zeroed(code, width as usize * height as usize),
        }
    }

    /// Interpret little-endian raw bytes as a `width` x `height` image.
    ///
    /// `code` is the numeric format code; values outside the enumeration
    /// are rejected.
    pub fn from_raw(width: u16, height: u16, code: u8, bytes: &[u8]) -> Result<Self> {
        let code = FormatCode::try_from(code)?;
        let expected = code.byte_len(width, height);
        if bytes.len() != expected {
            return Err(DrdfError::encoding(format!(
                "{width}x{height} {code} image needs {expected} bytes, got {}",
                bytes.len()
            )));
        }
        Self::new(width, height, PixelBuffer::from_le_bytes(code, bytes)?)
    }

    /// Wrap a shaped typed array, deriving width, height and format code.
    ///
    /// The shape is `[width, height]` for single-channel data or
    /// `[width, height, 2]` for (amplitude, time) data.
    pub fn from_array(array: PixelArray) -> Result<Self> {
        let (width, height, code) = FormatCode::from_shape(array.shape(), array.element_type())?;
        Self::new(width, height, array.into_pixel_buffer(code)?)
    }

    /// Wrap a shaped typed array that must agree with `code`.
    pub fn from_array_with_code(code: FormatCode, array: PixelArray) -> Result<Self> {
        match FormatCode::from_shape(array.shape(), array.element_type()) {
            Ok((width, height, derived)) if derived == code => {
                Self::new(width, height, array.into_pixel_buffer(code)?)
            }
            _ => Err(DrdfError::encoding(format!(
                "shape {:?} of {} does not match format {code} ({} channel(s) of {})",
                array.shape(),
                array.element_type(),
                code.channels(),
                code.element_type()
            ))),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Format code of the pixel buffer.
    pub fn format_code(&self) -> FormatCode {
        self.pixels.format_code()
    }

    /// Typed pixel storage.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Array shape (`[w, h]` or `[w, h, 2]`).
    pub fn shape(&self) -> Vec<usize> {
        self.format_code().shape(self.width, self.height)
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u16, y: u16) -> Result<Pixel> {
        if x >= self.width || y >= self.height {
            return Err(DrdfError::usage(
                "Image::pixel",
                format!(
                    "pixel ({x}, {y}) out of range for {}x{} image",
                    self.width, self.height
                ),
            ));
        }
        let index = x as usize + y as usize * self.width as usize;
        self.pixels
            .get(index)
            .ok_or_else(|| DrdfError::usage("Image::pixel", format!("no pixel at index {index}")))
    }

    /// Row-major little-endian payload as written to `IDAT`.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels.to_le_bytes()
    }

    /// Generic array view of the pixels.
    pub fn to_array(&self) -> PixelArray {
        self.pixels.to_array(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pixels::ArrayData;

    #[test]
    fn test_zeroed_image() {
        let image = Image::zeroed(24, 24, FormatCode::Au16Tu16);
        assert_eq!(image.width(), 24);
        assert_eq!(image.height(), 24);
        assert_eq!(image.format_code(), FormatCode::Au16Tu16);
        assert_eq!(image.to_le_bytes().len(), 24 * 24 * 4);
        assert_eq!(image.shape(), vec![24, 24, 2]);
    }

    #[test]
    fn test_from_raw() {
        let image = Image::from_raw(2, 2, 0, &[1, 2, 3, 4]).unwrap();
        assert_eq!(image.format_code(), FormatCode::Au8);
        assert_eq!(image.pixels(), &PixelBuffer::Au8(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_from_raw_rejects_bad_code_and_length() {
        assert!(Image::from_raw(2, 2, 7, &[0; 4]).unwrap_err().is_encoding());
        assert!(Image::from_raw(2, 2, 2, &[0; 4]).unwrap_err().is_encoding());
    }

    #[test]
    fn test_new_checks_pixel_count() {
        let err = Image::new(3, 3, PixelBuffer::Au8(vec![0; 8])).unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_from_array_derives_format() {
        let array = PixelArray::new(vec![3, 2, 2], ArrayData::F32(vec![0.5; 12])).unwrap();
        let image = Image::from_array(array).unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.format_code(), FormatCode::Af32Tf32);
    }

    #[test]
    fn test_from_array_rejects_signed_elements() {
        let array = PixelArray::new(vec![2, 2], ArrayData::I16(vec![0; 4])).unwrap();
        assert!(Image::from_array(array).unwrap_err().is_encoding());
    }

    #[test]
    fn test_two_channel_code_requires_trailing_pair() {
        let array = PixelArray::new(vec![2, 4], ArrayData::U16(vec![0; 8])).unwrap();
        let err = Image::from_array_with_code(FormatCode::Au16Tu16, array).unwrap_err();
        assert!(err.is_encoding());

        let array = PixelArray::new(vec![2, 2, 2], ArrayData::U16(vec![0; 8])).unwrap();
        let image = Image::from_array_with_code(FormatCode::Au16Tu16, array).unwrap();
        assert_eq!(image.format_code(), FormatCode::Au16Tu16);
    }

    #[test]
    fn test_pixel_access() {
        let image = Image::new(3, 2, PixelBuffer::Au16(vec![0, 1, 2, 10, 11, 12])).unwrap();
        assert_eq!(image.pixel(0, 0).unwrap(), Pixel::Au16(0));
        assert_eq!(image.pixel(2, 0).unwrap(), Pixel::Au16(2));
        assert_eq!(image.pixel(1, 1).unwrap(), Pixel::Au16(11));
        assert!(image.pixel(3, 0).unwrap_err().is_usage());
        assert!(image.pixel(0, 2).unwrap_err().is_usage());
    }
}
