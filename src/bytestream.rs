/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Sequential byte sources and the buffered token reader.
//!
//! This module exposes [`ByteSourceTrait`], the input abstraction the
//! decoder reads from, an in-memory implementation ([`ByteCursor`]) usable
//! in `no_std` environments, implementations for `std::io` readers when the
//! `std` feature is on, and [`TokenReader`], the buffered reader that mixes
//! whitespace/comment delimited text tokens with raw binary reads over one
//! stream.

pub use self::cursor::ByteCursor;
pub use self::reader::{ByteSourceError, TokenReader};
pub use self::traits::ByteSourceTrait;

mod cursor;
mod reader;
mod std_sources;
mod traits;
