/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The Netpbm decoder.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use log::trace;

use crate::bytestream::{ByteSourceTrait, TokenReader};
use crate::colorspace::ColorSpace;
use crate::errors::NetpbmDecodeErrors;
use crate::headers::{NetpbmHeader, NetpbmSignature};

/// Probe some bytes to see
/// if they consist of a Netpbm image
///
/// True iff the bytes start with `P` followed by a digit `1`-`6`.
pub fn probe_netpbm(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        return magic_bytes[0] == b'P' && (b'1'..=b'6').contains(&magic_bytes[1]);
    }
    false
}

/// Decoder options for the Netpbm decoder
///
/// The limits guard against forged headers making the decoder allocate
/// absurd amounts of memory, they are checked once during
/// [`decode_headers`](NetpbmDecoder::decode_headers).
#[derive(Copy, Clone, Debug)]
pub struct NetpbmOptions {
    max_width:  usize,
    max_height: usize
}

impl NetpbmOptions {
    /// Set the maximum width the decoder accepts.
    pub const fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum height the decoder accepts.
    pub const fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Return the maximum width the decoder accepts.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Return the maximum height the decoder accepts.
    pub const fn max_height(&self) -> usize {
        self.max_height
    }
}

impl Default for NetpbmOptions {
    fn default() -> Self {
        Self {
            max_width:  1 << 17,
            max_height: 1 << 17
        }
    }
}

/// A Netpbm decoder
///
/// Decodes the six Netpbm formats (`P1`-`P6`) from any sequential
/// [`ByteSourceTrait`] source into 8-bit samples, one byte per channel.
///
/// # Usage
///
/// ## Extracting image metadata
/// - use [`decode_headers`](Self::decode_headers) + the accessors
/// ```
/// use netpbm::bytestream::ByteCursor;
/// use netpbm::NetpbmDecoder;
///
/// fn main() -> Result<(), netpbm::NetpbmDecodeErrors> {
///     let source = ByteCursor::new(b"P5 3 2 255 \0\0\0\0\0\0");
///     let mut decoder = NetpbmDecoder::new(source);
///     decoder.decode_headers()?;
///     // after decoding headers we can safely access the image metadata
///     // unwrap won't panic
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     println!("Colorspace: {:?}", decoder.colorspace().unwrap());
///     Ok(())
/// }
/// ```
///
/// ## Just getting the pixels
///
/// ```
/// use netpbm::bytestream::ByteCursor;
/// use netpbm::NetpbmDecoder;
///
/// fn main() -> Result<(), netpbm::NetpbmDecodeErrors> {
///     let source = ByteCursor::new(b"P1 2 2  0 1 1 0");
///     let mut decoder = NetpbmDecoder::new(source);
///     let pixels = decoder.decode()?;
///     assert_eq!(pixels, [255, 0, 0, 255]);
///     Ok(())
/// }
/// ```
pub struct NetpbmDecoder<T>
where
    T: ByteSourceTrait
{
    stream:  TokenReader<T>,
    header:  Option<NetpbmHeader>,
    options: NetpbmOptions
}

impl<T> NetpbmDecoder<T>
where
    T: ByteSourceTrait
{
    /// Create a new Netpbm decoder that reads data from `source`
    ///
    /// # Arguments
    /// - `source`: The byte source from which we will read bytes
    ///
    /// # Returns
    /// - A Netpbm decoder instance
    pub fn new(source: T) -> NetpbmDecoder<T> {
        NetpbmDecoder::new_with_options(source, NetpbmOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    /// - `source`: The byte source from which we will read bytes
    /// - `options`: Specialized options for this decoder
    ///
    /// returns: A Netpbm decoder instance
    pub fn new_with_options(source: T, options: NetpbmOptions) -> NetpbmDecoder<T> {
        NetpbmDecoder {
            stream: TokenReader::new(source),
            header: None,
            options
        }
    }

    /// Decode the header of the stream and store the information in the
    /// decode context
    ///
    /// The stream is expected to be at its start. Parsing is idempotent, a
    /// second call is a no-op.
    ///
    /// # Returns
    /// - `Ok(())` Indicates everything was okay during header parsing
    /// - `Err`: Error that occurred when decoding headers, any failure in
    ///    the header stage is wrapped as a single
    ///    [`Header`](NetpbmDecodeErrors::Header) error and is fatal
    pub fn decode_headers(&mut self) -> Result<(), NetpbmDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = self
            .parse_header()
            .map_err(|e| NetpbmDecodeErrors::Header(Box::new(e)))?;

        if header.width > self.options.max_width() {
            return Err(NetpbmDecodeErrors::LargeDimensions(
                self.options.max_width(),
                header.width
            ));
        }
        if header.height > self.options.max_height() {
            return Err(NetpbmDecodeErrors::LargeDimensions(
                self.options.max_height(),
                header.height
            ));
        }

        trace!("Signature: {}", header.signature);
        trace!("Width: {}", header.width);
        trace!("Height: {}", header.height);
        trace!("Max value: {}", header.max_value);

        self.header = Some(header);

        Ok(())
    }

    fn parse_header(&mut self) -> Result<NetpbmHeader, NetpbmDecodeErrors> {
        let signature = match self.stream.read_string_token()? {
            Some(token) => {
                NetpbmSignature::from_token(token).ok_or(NetpbmDecodeErrors::BadSignature)?
            }
            None => return Err(NetpbmDecodeErrors::BadSignature)
        };

        let width = self.read_header_field()?;
        let height = self.read_header_field()?;

        if width == 0 {
            return Err(NetpbmDecodeErrors::Generic("width is zero, invalid image"));
        }
        if height == 0 {
            return Err(NetpbmDecodeErrors::Generic("height is zero, invalid image"));
        }

        // Bitmaps carry no max value field in the stream, it is fixed
        // to 1.
        let max_value = if signature.is_bitmap() {
            1
        } else {
            self.read_header_field()?
        };

        if max_value == 0 {
            return Err(NetpbmDecodeErrors::Generic(
                "max value is zero, invalid image"
            ));
        }

        Ok(NetpbmHeader {
            signature,
            width,
            height,
            max_value
        })
    }

    /// Read one numeric header field from the stream.
    fn read_header_field(&mut self) -> Result<usize, NetpbmDecodeErrors> {
        let token = self
            .stream
            .read_string_token()?
            .ok_or(NetpbmDecodeErrors::Generic("unexpected end of header"))?;

        parse_sample(token).map(|v| v as usize)
    }

    /// Get the header of the image or `None` if the headers weren't
    /// decoded.
    pub const fn header(&self) -> Option<NetpbmHeader> {
        self.header
    }

    /// Get the signature of the image or `None` if the headers weren't
    /// decoded.
    pub fn signature(&self) -> Option<NetpbmSignature> {
        self.header.map(|h| h.signature)
    }

    /// Get dimensions of the image
    ///
    /// This is a tuple of width,height
    ///
    /// # Returns
    /// - `Some((width,height))` - The image dimensions
    /// - `None`: Indicates that the image headers weren't decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|h| (h.width, h.height))
    }

    /// Get the image colorspace or `None` if the headers weren't decoded.
    pub fn colorspace(&self) -> Option<ColorSpace> {
        self.header.map(|h| h.signature.colorspace())
    }

    /// Get the maximum sample value declared by the header or `None` if
    /// the headers weren't decoded.
    pub fn max_value(&self) -> Option<usize> {
        self.header.map(|h| h.max_value)
    }

    /// Return the expected size of the output buffer for which
    /// a contiguous slice of `&[u8]` can store it without needing
    /// reallocation
    ///
    /// Returns `None` if headers haven't been decoded or if calculation
    /// overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let header = self.header?;

        header
            .width
            .checked_mul(header.height)?
            .checked_mul(header.signature.num_components())
    }

    /// Decode a single image row into `row`.
    ///
    /// Fills the first `width * channels` bytes of `row`, one byte per
    /// sample. Rows must be decoded strictly in order, the stream is
    /// sequential.
    ///
    /// When the stream runs out of tokens or bytes mid-row, decoding stops
    /// at the first missing value and the remaining positions of `row`
    /// keep whatever they already held. Callers reusing one row buffer
    /// across rows therefore see the previous row's bytes carried into a
    /// truncated row, which is the historical behavior for damaged files.
    /// Truncation is not an error, a genuine source failure is and is
    /// wrapped as [`Row`](NetpbmDecodeErrors::Row) with `row_index`.
    ///
    /// # Arguments
    /// - `row`: Destination, needs at least `width * channels` bytes
    /// - `row_index`: Index of the row being decoded, used for error
    ///    reporting
    pub fn decode_row(&mut self, row: &mut [u8], row_index: usize) -> Result<(), NetpbmDecodeErrors> {
        let header = self
            .header
            .ok_or(NetpbmDecodeErrors::Generic("headers not decoded"))?;

        let row_length = header.width * header.signature.num_components();

        if row.len() < row_length {
            return Err(NetpbmDecodeErrors::TooSmallBuffer(row_length, row.len()));
        }
        let row = &mut row[..row_length];

        let result = match header.signature {
            NetpbmSignature::P1 => decode_text_bitmap(&mut self.stream, row),
            NetpbmSignature::P2 | NetpbmSignature::P3 => {
                decode_text_samples(&mut self.stream, row, header.max_value)
            }
            NetpbmSignature::P4 => decode_raw_bitmap(&mut self.stream, row),
            NetpbmSignature::P5 | NetpbmSignature::P6 => {
                decode_raw_samples(&mut self.stream, row, header.max_value)
            }
        };

        result.map_err(|e| NetpbmDecodeErrors::Row(row_index, Box::new(e)))
    }

    /// Decode an image returning the decoded bytes as an
    /// allocated `Vec<u8>` or an error if decoding could not be completed
    ///
    /// Also see [`decode_into`](Self::decode_into) which decodes into
    /// a pre-allocated buffer
    pub fn decode(&mut self) -> Result<Vec<u8>, NetpbmDecodeErrors> {
        self.decode_headers()?;
        let mut output = vec![
            0_u8;
            self.output_buf_size()
                .ok_or(NetpbmDecodeErrors::OverflowOccurred)?
        ];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode an encoded image into a buffer or return an error
    /// if something bad occurred
    ///
    /// The rows are decoded through one reused row buffer, so a truncated
    /// stream fills trailing rows with the carryover content described in
    /// [`decode_row`](Self::decode_row) rather than erroring out.
    ///
    /// Also see [`decode`](Self::decode) which allocates and decodes into
    /// a buffer
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), NetpbmDecodeErrors> {
        self.decode_headers()?;

        let output_size = self
            .output_buf_size()
            .ok_or(NetpbmDecodeErrors::OverflowOccurred)?;

        if buf.len() < output_size {
            return Err(NetpbmDecodeErrors::TooSmallBuffer(output_size, buf.len()));
        }

        // decode_headers succeeded above
        let header = self
            .header
            .ok_or(NetpbmDecodeErrors::Generic("headers not decoded"))?;
        let row_length = header.width * header.signature.num_components();

        let mut row = vec![0_u8; row_length];

        for y in 0..header.height {
            self.decode_row(&mut row, y)?;
            buf[y * row_length..(y + 1) * row_length].copy_from_slice(&row);
        }
        Ok(())
    }
}

/// Parse an ASCII decimal sample, rejecting empty, signed and non-numeric
/// input.
fn parse_sample(token: &[u8]) -> Result<u32, NetpbmDecodeErrors> {
    let text = core::str::from_utf8(token)
        .map_err(|_| NetpbmDecodeErrors::Generic("number token is not ascii"))?;

    Ok(text.parse::<u32>()?)
}

/// Decode one `P1` row, one character token per pixel.
///
/// The colors are inverted, `'1'` becomes 0 (black) and `'0'` becomes 255
/// (white). Any other character passes through the same arithmetic
/// unvalidated, matching what this format's decoders have always done.
fn decode_text_bitmap<T: ByteSourceTrait>(
    stream: &mut TokenReader<T>, row: &mut [u8]
) -> Result<(), NetpbmDecodeErrors> {
    for pixel in row.iter_mut() {
        match stream.read_char_token()? {
            Some(chr) => *pixel = chr.wrapping_sub(b'1'),
            None => break
        }
    }
    Ok(())
}

/// Decode one `P2`/`P3` row, one string token per sample, rescaled from
/// `0..=max_value` to `0..=255` rounding half up.
fn decode_text_samples<T: ByteSourceTrait>(
    stream: &mut TokenReader<T>, row: &mut [u8], max_value: usize
) -> Result<(), NetpbmDecodeErrors> {
    let max = max_value as u64;

    for sample in row.iter_mut() {
        let value = match stream.read_string_token()? {
            Some(token) => parse_sample(token)?,
            None => break
        };
        *sample = ((u64::from(value) * 255 + max / 2) / max) as u8;
    }
    Ok(())
}

/// Decode one `P4` row of packed bits, MSB first, bit 1 maps to 0 (black)
/// and bit 0 to 255 (white).
///
/// Only bits covered by bytes actually read are written, a short read
/// leaves the tail of the row untouched.
fn decode_raw_bitmap<T: ByteSourceTrait>(
    stream: &mut TokenReader<T>, row: &mut [u8]
) -> Result<(), NetpbmDecodeErrors> {
    let mut packed = vec![0_u8; (row.len() + 7) / 8];
    let bit_limit = stream.read_bulk(&mut packed)? * 8;

    for (i, pixel) in row.iter_mut().enumerate().take(bit_limit) {
        let bit = (packed[i / 8] >> (7 - (i % 8))) & 1;

        *pixel = if bit == 1 { 0 } else { 255 };
    }
    Ok(())
}

/// Decode one `P5`/`P6` row of raw bytes, rescaled in place from
/// `0..=max_value` to `0..=255` with truncating division.
///
/// Only the prefix actually read is rescaled, a short read leaves the tail
/// of the row untouched.
fn decode_raw_samples<T: ByteSourceTrait>(
    stream: &mut TokenReader<T>, row: &mut [u8], max_value: usize
) -> Result<(), NetpbmDecodeErrors> {
    let num_read = stream.read_bulk(row)?;
    let max = max_value as u64;

    for sample in row[..num_read].iter_mut() {
        *sample = (u64::from(*sample) * 255 / max) as u8;
    }
    Ok(())
}
