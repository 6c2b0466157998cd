/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Colorspace information for decoded images.

/// The colorspaces a Netpbm image can decode into
///
/// Bitmaps and graymaps decode to `Luma`, pixmaps decode to `RGB`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorSpace {
    /// Grayscale colorspace
    Luma,
    /// Red, Green, Blue
    RGB
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R, G and B colors to make up
    /// a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::RGB => 3
        }
    }
}
