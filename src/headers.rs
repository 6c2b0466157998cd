/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Netpbm signatures and the parsed image header.

use core::fmt::{Display, Formatter};

use crate::colorspace::ColorSpace;

/// Signatures of the Netpbm image formats supported by this crate
///
/// The signature is the first token of a Netpbm file and determines the
/// pixel encoding for the whole image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NetpbmSignature {
    /// Bitmap image (2 color) with plain text image data
    P1,
    /// Grayscale image with plain text image data
    P2,
    /// Color image with plain text image data
    P3,
    /// Bitmap image (2 color) with binary image data
    P4,
    /// Grayscale image with binary image data
    P5,
    /// Color image with binary image data
    P6
}

impl NetpbmSignature {
    const ALL: [NetpbmSignature; 6] = [
        NetpbmSignature::P1,
        NetpbmSignature::P2,
        NetpbmSignature::P3,
        NetpbmSignature::P4,
        NetpbmSignature::P5,
        NetpbmSignature::P6
    ];

    /// Match a signature token against the known signatures.
    ///
    /// Only the leading bytes of the token are considered, the first match
    /// in `P1..P6` order wins.
    ///
    /// # Returns
    /// - `Some(signature)` - The matching signature
    /// - `None` - The token starts with none of the six signatures
    pub fn from_token(token: &[u8]) -> Option<NetpbmSignature> {
        Self::ALL
            .into_iter()
            .find(|sig| token.starts_with(sig.label()))
    }

    const fn label(&self) -> &'static [u8] {
        match self {
            Self::P1 => b"P1",
            Self::P2 => b"P2",
            Self::P3 => b"P3",
            Self::P4 => b"P4",
            Self::P5 => b"P5",
            Self::P6 => b"P6"
        }
    }

    /// True if the image is a bitmap, i.e. 2 colors.
    pub const fn is_bitmap(&self) -> bool {
        matches!(self, Self::P1 | Self::P4)
    }

    /// True if the image is a grayscale image.
    pub const fn is_graymap(&self) -> bool {
        matches!(self, Self::P2 | Self::P5)
    }

    /// True if the image is a color (RGB pixels) image.
    pub const fn is_pixmap(&self) -> bool {
        matches!(self, Self::P3 | Self::P6)
    }

    /// True if the raster is stored in binary, false for the plain text
    /// formats.
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::P4 | Self::P5 | Self::P6)
    }

    /// The colorspace images with this signature decode into.
    pub const fn colorspace(&self) -> ColorSpace {
        if self.is_pixmap() {
            ColorSpace::RGB
        } else {
            ColorSpace::Luma
        }
    }

    /// Number of channels per pixel, 3 for pixmaps and 1 otherwise.
    pub const fn num_components(&self) -> usize {
        self.colorspace().num_components()
    }
}

impl Display for NetpbmSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Header of a Netpbm file
///
/// A header contains the signature, the width and height of the image and
/// the maximum sample value used to rescale stored samples to the `0..=255`
/// output range.
///
/// A header is produced once per stream by
/// [`decode_headers`](crate::NetpbmDecoder::decode_headers) and is read
/// only afterwards. Width and height are always positive, `max_value` is
/// fixed to `1` for the bitmap formats (it is never present in their
/// streams) and carries no enforced upper bound otherwise.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NetpbmHeader {
    /// The format signature.
    pub signature: NetpbmSignature,
    /// The width of the image.
    pub width:     usize,
    /// The height of the image.
    pub height:    usize,
    /// The maximum sample value for samples in the raster.
    pub max_value: usize
}
