/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A streaming Netpbm decoder
//!
//! This crate features a decoder for the six Netpbm image formats
//! (`P1`-`P6`, the plain and raw variants of PBM, PGM and PPM) reading
//! from a sequential byte source.
//!
//! # Features
//! - `no_std` with `alloc` feature
//! - Minimal dependencies
//! - Region and subsampled extraction into a caller supplied raster
//! - Decoding from any sequential byte source, not just memory
//!
//! # Supported formats
//! - `P1`/`P4`: bitmap, plain text and raw
//! - `P2`/`P5`: graymap, plain text and raw
//! - `P3`/`P6`: pixmap, plain text and raw
//!
//! # Unsupported
//! - Encoding
//! - Multi-image streams, only the first image in a stream is read
//! - The PAM (`P7`) and floatmap (`Pf`/`PF`) extensions
//!
//! # Usage
//!
//! ```
//! use netpbm::bytestream::ByteCursor;
//! use netpbm::NetpbmDecoder;
//!
//! let file = b"P2 2 2 255  0 255 128 64";
//! let mut decoder = NetpbmDecoder::new(ByteCursor::new(file));
//! let pixels = decoder.decode().unwrap();
//! assert_eq!(pixels, [0, 255, 128, 64]);
//! ```
//!
//! # Safety and threading
//!
//! The decoder holds strictly sequential mutable state, one decode session
//! owns one decoder and its source exclusively. Sharing a decoder between
//! threads without external serialization is not supported.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use crate::decoder::{probe_netpbm, NetpbmDecoder, NetpbmOptions};
pub use crate::errors::NetpbmDecodeErrors;
pub use crate::extract::{InterleavedRaster, RasterSinkTrait, Region, RegionOptions};
pub use crate::headers::{NetpbmHeader, NetpbmSignature};

pub mod bytestream;
pub mod colorspace;
mod decoder;
mod errors;
mod extract;
mod headers;
mod serde;
