/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An in-memory byte source usable without `std`.

use crate::bytestream::reader::ByteSourceError;
use crate::bytestream::traits::ByteSourceTrait;

/// A sequential cursor over an in-memory buffer.
///
/// Analogous to [`Cursor`](std::io::Cursor) but present in `no_std` builds,
/// this is the preferred source when the whole file is already in memory.
pub struct ByteCursor<T: AsRef<[u8]>> {
    data:     T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    /// Create a new cursor that reads from the start of `data`.
    pub fn new(data: T) -> ByteCursor<T> {
        ByteCursor { data, position: 0 }
    }

    /// Return the current read position.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Return a reference to the underlying buffer.
    pub fn get_ref(&self) -> &T {
        &self.data
    }

    /// Consume the cursor returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: AsRef<[u8]>> ByteSourceTrait for ByteCursor<T> {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError> {
        let data = self.data.as_ref();
        let remaining = data.len().saturating_sub(self.position);
        let to_copy = remaining.min(buf.len());

        buf[..to_copy].copy_from_slice(&data[self.position..self.position + to_copy]);
        self.position += to_copy;

        Ok(to_copy)
    }
}
