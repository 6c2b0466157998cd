/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Errors possible during decoding.

use alloc::boxed::Box;
use core::fmt::{Debug, Formatter};
use core::num::ParseIntError;

use crate::bytestream::ByteSourceError;

/// Netpbm errors that can occur during decoding
///
/// Failures during the header stage are wrapped in [`Header`] and are
/// fatal, no partial header is usable. Failures during row decoding are
/// wrapped in [`Row`] with the offending row index and are fatal for the
/// whole decode. Truncated pixel data is *not* an error, short rows keep
/// whatever the reused row buffer held before.
///
/// [`Header`]: Self::Header
/// [`Row`]: Self::Row
#[non_exhaustive]
pub enum NetpbmDecodeErrors {
    /// The signature token starts with none of `P1`-`P6`
    BadSignature,
    /// A numeric field could not be parsed
    InvalidNumber(ParseIntError),
    /// Any error raised while reading the header, wrapping its cause
    Header(Box<NetpbmDecodeErrors>),
    /// Any error raised while decoding a row, wrapping the row index and
    /// the cause
    Row(usize, Box<NetpbmDecodeErrors>),
    /// Too large dimensions for a given width or height
    LargeDimensions(usize, usize),
    /// The output buffer is too small, expected at least a size but got
    /// another size
    TooSmallBuffer(usize, usize),
    /// Generic message
    Generic(&'static str),
    /// A calculation overflowed
    OverflowOccurred,
    /// A genuine failure of the byte source, never produced for a short
    /// read
    IoErrors(ByteSourceError)
}

impl Debug for NetpbmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => {
                writeln!(f, "Bad file signature")
            }
            Self::InvalidNumber(err) => {
                writeln!(f, "Invalid number: {}", err)
            }
            Self::Header(cause) => {
                writeln!(f, "Error reading header: {:?}", cause)
            }
            Self::Row(row, cause) => {
                writeln!(f, "Error reading line {}: {:?}", row, cause)
            }
            Self::LargeDimensions(expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {expected} but found {found}"
                )
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small of buffer, expected {} but found {}",
                    expected, found
                )
            }
            Self::Generic(message) => {
                writeln!(f, "{}", message)
            }
            Self::OverflowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ByteSourceError> for NetpbmDecodeErrors {
    fn from(value: ByteSourceError) -> Self {
        NetpbmDecodeErrors::IoErrors(value)
    }
}

impl From<ParseIntError> for NetpbmDecodeErrors {
    fn from(value: ParseIntError) -> Self {
        NetpbmDecodeErrors::InvalidNumber(value)
    }
}

impl From<&'static str> for NetpbmDecodeErrors {
    fn from(value: &'static str) -> Self {
        NetpbmDecodeErrors::Generic(value)
    }
}
