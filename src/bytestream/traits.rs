/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The input trait implemented for byte sources.

use crate::bytestream::reader::ByteSourceError;

/// A sequential source of bytes the decoder can read from.
///
/// This is the minimal contract a Netpbm stream needs: bulk reads that may
/// return fewer bytes than requested, with `Ok(0)` for a non-empty buffer
/// signalling end of stream. There is no seeking, the decoder consumes the
/// stream strictly front to back.
///
/// The crate implements this for [`ByteCursor`](crate::bytestream::ByteCursor)
/// and, with the `std` feature, for [`Cursor`](std::io::Cursor),
/// [`BufReader`](std::io::BufReader) and [`File`](std::fs::File).
///
/// # Considerations
///
/// A short read that is not zero is *not* end of stream, the caller will
/// come back for more. Implementations should only error for genuine I/O
/// failures, never for running out of data.
pub trait ByteSourceTrait {
    /// Read bytes into `buf` returning how many bytes were read or an
    /// error if one occurred.
    ///
    /// ## Arguments
    /// - `buf`: The buffer to fill with bytes
    ///
    /// ## Returns
    /// - `Ok(usize)` - Actual bytes read into the buffer, `0` for a
    ///    non-empty `buf` means the stream is exhausted
    /// - `Err()` - The error encountered when reading bytes for which we
    ///    couldn't recover
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError>;
}
