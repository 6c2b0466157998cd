/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The buffered token reader driving all Netpbm parsing.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::bytestream::traits::ByteSourceTrait;

/// Size of the internal read buffer.
const BUF_SIZE: usize = 2048;
/// The stream comment character, opens a comment running to end of line.
const COMMENT: u8 = b'#';

/// Errors that can occur in the byte source layer
///
/// These are genuine failures of the underlying source. Running out of
/// data is never an error at this layer, it is reported as a `None` token
/// or a zero/short byte count by the reader.
pub enum ByteSourceError {
    /// An error from an underlying `std::io` reader
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// Generic message
    Generic(&'static str)
}

impl Debug for ByteSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteSourceError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteSourceError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteSourceError {
    fn from(value: std::io::Error) -> Self {
        ByteSourceError::StdIoError(value)
    }
}

impl From<&'static str> for ByteSourceError {
    fn from(value: &'static str) -> Self {
        ByteSourceError::Generic(value)
    }
}

/// Test if a byte from the stream is a whitespace or comment byte.
///
/// The comment character counts as whitespace for skipping purposes.
#[inline]
const fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'#' | b'\r' | b'\t')
}

/// Test if a byte from the stream is a line break byte.
#[inline]
const fn is_line_break(c: u8) -> bool {
    matches!(c, b'\n' | b'\r')
}

/// A buffered reader that supports both binary access to the stream, for
/// reading raw raster data, and text access, for reading numbers and
/// characters from the header and the plain formats.
///
/// Text access comes as two token flavours: [`read_string_token`] reads a
/// whitespace/comment delimited run of bytes (`"0010 1111"` holds two
/// string tokens) and [`read_char_token`] reads single non-whitespace bytes
/// (the same input holds eight character tokens).
///
/// The reader keeps a one byte lookahead for the token methods. The
/// delimiter that terminated a token has therefore already been consumed
/// and is never delivered to a subsequent raw read, which is exactly the
/// single implicit separator between a Netpbm header and its raster data.
///
/// The reader is strictly sequential, it never seeks and never closes the
/// source it owns.
///
/// [`read_string_token`]: TokenReader::read_string_token
/// [`read_char_token`]: TokenReader::read_char_token
pub struct TokenReader<T: ByteSourceTrait> {
    /// The byte source that supplies the data.
    source:    T,
    /// The read buffer.
    buffer:    [u8; BUF_SIZE],
    /// Current position in the buffer, `0` means the buffer is empty and
    /// must be refilled before the next read.
    pos:       usize,
    /// Upper bound (exclusive) of the readable part of the buffer, smaller
    /// than `BUF_SIZE` when the source returned a short read.
    max_pos:   usize,
    /// One byte lookahead for the token methods, `None` at stream start
    /// and after the source is exhausted.
    token_chr: Option<u8>,
    /// Scratch space reused for string tokens.
    scratch:   Vec<u8>
}

impl<T: ByteSourceTrait> TokenReader<T> {
    /// Create a new reader that takes ownership of `source`.
    pub fn new(source: T) -> TokenReader<T> {
        TokenReader {
            source,
            buffer: [0; BUF_SIZE],
            pos: 0,
            max_pos: 0,
            token_chr: None,
            scratch: Vec::new()
        }
    }

    /// Read a single byte from the stream.
    ///
    /// Refills the internal buffer from the source when it is empty.
    ///
    /// # Returns
    /// - `Ok(Some(byte))` - The next byte in the stream
    /// - `Ok(None)` - The stream is exhausted
    /// - `Err()` - The source failed
    pub fn read_byte(&mut self) -> Result<Option<u8>, ByteSourceError> {
        if self.pos == 0 {
            self.max_pos = self.source.read_bytes(&mut self.buffer)?;

            if self.max_pos == 0 {
                return Ok(None);
            }
        }
        let byte = self.buffer[self.pos];

        self.pos += 1;
        if self.pos >= self.max_pos {
            self.pos = 0;
        }
        Ok(Some(byte))
    }

    /// Read bytes into `buf` until it is full or the source is exhausted.
    ///
    /// Buffered bytes are copied first, then the source is read again for
    /// more, so a bulk read can span any number of internal refills.
    ///
    /// # Returns
    /// - `Ok(n)` - Number of bytes copied into `buf`, `0` only when no
    ///    byte at all was available
    /// - `Err()` - The source failed
    pub fn read_bulk(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError> {
        let mut written = 0;

        while written < buf.len() {
            if self.pos == 0 {
                self.max_pos = self.source.read_bytes(&mut self.buffer)?;

                if self.max_pos == 0 {
                    return Ok(written);
                }
            }
            let available = self.max_pos - self.pos;
            let to_copy = (buf.len() - written).min(available);

            buf[written..written + to_copy]
                .copy_from_slice(&self.buffer[self.pos..self.pos + to_copy]);

            written += to_copy;
            self.pos += to_copy;
            if self.pos >= self.max_pos {
                self.pos = 0;
            }
        }
        Ok(written)
    }

    /// Get the next string token from the stream.
    ///
    /// A string token is a run of bytes that contains no whitespace or
    /// comment, any leading whitespace/comment run is skipped first.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - The next token, never empty. The slice
    ///    borrows from internal scratch space and is valid until the next
    ///    read
    /// - `Ok(None)` - No token left before the end of the stream
    /// - `Err()` - The source failed
    pub fn read_string_token(&mut self) -> Result<Option<&[u8]>, ByteSourceError> {
        if self.skip_whitespace_and_comments()?.is_none() {
            return Ok(None);
        }
        self.scratch.clear();

        // The lookahead holds the first byte of the token, accumulate
        // until the next whitespace byte or the end of the stream.
        while let Some(chr) = self.token_chr {
            if is_whitespace(chr) {
                break;
            }
            self.scratch.push(chr);
            self.token_chr = self.read_byte()?;
        }
        Ok(Some(&self.scratch))
    }

    /// Read a single character token from the stream.
    ///
    /// Unlike [`read_string_token`](Self::read_string_token) character
    /// tokens do not need a whitespace separator between them, each
    /// non-whitespace byte is its own token.
    ///
    /// # Returns
    /// - `Ok(Some(byte))` - The next character token
    /// - `Ok(None)` - No token left before the end of the stream
    /// - `Err()` - The source failed
    pub fn read_char_token(&mut self) -> Result<Option<u8>, ByteSourceError> {
        match self.skip_whitespace_and_comments()? {
            Some(chr) => {
                self.token_chr = self.read_byte()?;
                Ok(Some(chr))
            }
            None => Ok(None)
        }
    }

    /// Skip whitespace and comments in the stream.
    ///
    /// On `Ok(Some(_))` the lookahead holds the first non-whitespace byte
    /// after the skipped run.
    fn skip_whitespace_and_comments(&mut self) -> Result<Option<u8>, ByteSourceError> {
        // Prime the lookahead at stream start so that a leading whitespace
        // run can never produce an empty token.
        let mut chr = match self.token_chr {
            Some(chr) => chr,
            None => match self.read_byte()? {
                Some(chr) => chr,
                None => return Ok(None)
            }
        };

        loop {
            if chr == COMMENT {
                // Skip the comment up to the next line break.
                loop {
                    match self.read_byte()? {
                        Some(next) => {
                            chr = next;
                            if is_line_break(next) {
                                break;
                            }
                        }
                        None => {
                            self.token_chr = None;
                            return Ok(None);
                        }
                    }
                }
            } else if is_whitespace(chr) {
                match self.read_byte()? {
                    Some(next) => chr = next,
                    None => {
                        self.token_chr = None;
                        return Ok(None);
                    }
                }
            } else {
                self.token_chr = Some(chr);
                return Ok(Some(chr));
            }
        }
    }
}
