/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]
//! [`ByteSourceTrait`] implementations for `std::io` readers.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};

use crate::bytestream::reader::ByteSourceError;
use crate::bytestream::traits::ByteSourceTrait;

impl<T: AsRef<[u8]>> ByteSourceTrait for Cursor<T> {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError> {
        self.read(buf).map_err(ByteSourceError::from)
    }
}

impl<T: Read> ByteSourceTrait for BufReader<T> {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError> {
        self.read(buf).map_err(ByteSourceError::from)
    }
}

impl ByteSourceTrait for File {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteSourceError> {
        self.read(buf).map_err(ByteSourceError::from)
    }
}
