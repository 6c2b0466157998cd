/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Region and subsampled extraction into a caller supplied raster.

use alloc::vec;
use alloc::vec::Vec;

use log::trace;

use crate::bytestream::ByteSourceTrait;
use crate::decoder::NetpbmDecoder;
use crate::errors::NetpbmDecodeErrors;

/// Region of the source image to extract, in pixel coordinates
///
/// Represents a rectangular area defined by its top-left corner
/// coordinates and dimensions, with (0,0) the top-left corner of the
/// image. The region is clipped against the image bounds before use.
#[derive(Copy, Clone, Debug)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x:      usize,
    /// Y-coordinate of the top-left corner (pixels from top)
    pub y:      usize,
    /// Width of the region in pixels
    pub width:  usize,
    /// Height of the region in pixels
    pub height: usize
}

impl Region {
    /// Create a new region.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Region {
        Region {
            x,
            y,
            width,
            height
        }
    }

    /// Get the rightmost X coordinate (exclusive).
    pub const fn end_x(&self) -> usize {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive).
    pub const fn end_y(&self) -> usize {
        self.y + self.height
    }

    /// Clip this region against an image of `width` by `height` pixels.
    fn clip(&self, width: usize, height: usize) -> Region {
        let x = self.x.min(width);
        let y = self.y.min(height);

        Region {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y)
        }
    }
}

/// Options steering a region extraction
///
/// The defaults select the whole image at full resolution, all bands in
/// order, placed at the top-left corner of the destination.
#[derive(Clone, Debug)]
pub struct RegionOptions {
    region:       Option<Region>,
    x_stride:     usize,
    y_stride:     usize,
    dest_x:       usize,
    dest_y:       usize,
    source_bands: Option<Vec<usize>>,
    dest_bands:   Option<Vec<usize>>
}

impl RegionOptions {
    /// Set the source rectangle to extract, in image coordinates.
    ///
    /// The rectangle is clipped against the image bounds, the default is
    /// the full image.
    pub fn set_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the horizontal subsampling stride.
    ///
    /// Every `stride`-th column of the region is extracted, `1` (the
    /// default) extracts every column. A stride of `0` is an error caught
    /// during extraction.
    pub const fn set_x_stride(mut self, stride: usize) -> Self {
        self.x_stride = stride;
        self
    }

    /// Set the vertical subsampling stride.
    ///
    /// Every `stride`-th row of the region is extracted, `1` (the default)
    /// extracts every row. A stride of `0` is an error caught during
    /// extraction.
    pub const fn set_y_stride(mut self, stride: usize) -> Self {
        self.y_stride = stride;
        self
    }

    /// Set the position in the destination raster where the top-left
    /// extracted pixel lands, default `(0, 0)`.
    pub const fn set_dest_offset(mut self, x: usize, y: usize) -> Self {
        self.dest_x = x;
        self.dest_y = y;
        self
    }

    /// Select which source bands are copied, default all bands in order.
    ///
    /// Must have the same length as the destination band list.
    pub fn set_source_bands(mut self, bands: Vec<usize>) -> Self {
        self.source_bands = Some(bands);
        self
    }

    /// Select which destination bands are written, default the first
    /// `n` bands in order where `n` is the number of selected source
    /// bands.
    ///
    /// Must have the same length as the source band list.
    pub fn set_dest_bands(mut self, bands: Vec<usize>) -> Self {
        self.dest_bands = Some(bands);
        self
    }

    /// Return the configured source region, if any.
    pub const fn region(&self) -> Option<Region> {
        self.region
    }

    /// Return the horizontal subsampling stride.
    pub const fn x_stride(&self) -> usize {
        self.x_stride
    }

    /// Return the vertical subsampling stride.
    pub const fn y_stride(&self) -> usize {
        self.y_stride
    }

    /// Return the destination offset.
    pub const fn dest_offset(&self) -> (usize, usize) {
        (self.dest_x, self.dest_y)
    }
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            region: None,
            x_stride: 1,
            y_stride: 1,
            dest_x: 0,
            dest_y: 0,
            source_bands: None,
            dest_bands: None
        }
    }
}

/// A destination raster addressable by `(x, y, band)`
///
/// Anything that implements this trait can receive extracted pixels. The
/// extractor never writes outside `width() * height() * num_bands()`,
/// selected pixels whose destination falls outside those bounds are
/// silently skipped.
pub trait RasterSinkTrait {
    /// Width of the raster in pixels.
    fn width(&self) -> usize;
    /// Height of the raster in pixels.
    fn height(&self) -> usize;
    /// Number of bands per pixel.
    fn num_bands(&self) -> usize;
    /// Store one sample, `x < width()`, `y < height()`, `band < num_bands()`.
    fn set_sample(&mut self, x: usize, y: usize, band: usize, value: u8);
}

/// An interleaved 8-bit raster over a caller supplied slice
///
/// Samples are laid out `(y * width + x) * bands + band`, the layout the
/// decoder itself produces for whole-image decodes.
pub struct InterleavedRaster<'a> {
    data:   &'a mut [u8],
    width:  usize,
    height: usize,
    bands:  usize
}

impl<'a> InterleavedRaster<'a> {
    /// Create a raster view over `data`.
    ///
    /// # Returns
    /// - `Ok(raster)` - The raster view
    /// - `Err` - `data` is smaller than `width * height * bands`
    pub fn new(
        data: &'a mut [u8], width: usize, height: usize, bands: usize
    ) -> Result<InterleavedRaster<'a>, NetpbmDecodeErrors> {
        let needed = width
            .checked_mul(height)
            .and_then(|p| p.checked_mul(bands))
            .ok_or(NetpbmDecodeErrors::OverflowOccurred)?;

        if data.len() < needed {
            return Err(NetpbmDecodeErrors::TooSmallBuffer(needed, data.len()));
        }
        Ok(InterleavedRaster {
            data,
            width,
            height,
            bands
        })
    }
}

impl RasterSinkTrait for InterleavedRaster<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn num_bands(&self) -> usize {
        self.bands
    }

    #[inline]
    fn set_sample(&mut self, x: usize, y: usize, band: usize, value: u8) {
        self.data[(y * self.width + x) * self.bands + band] = value;
    }
}

impl<T> NetpbmDecoder<T>
where
    T: ByteSourceTrait
{
    /// Extract a region of the image into `sink`, optionally subsampled.
    ///
    /// Every row of the image is decoded in order, the stream is
    /// sequential so rows outside the region must still be consumed or
    /// later rows would misalign. A row lands in the sink iff it lies
    /// inside the region and on the vertical stride, a column iff it lies
    /// inside the region and on the horizontal stride. Selected pixels
    /// whose destination coordinate falls outside the sink bounds are
    /// skipped without error.
    ///
    /// # Arguments
    /// - `options`: Region, strides, destination offset and band
    ///    selection
    /// - `sink`: The destination raster
    pub fn decode_region<S: RasterSinkTrait>(
        &mut self, options: &RegionOptions, sink: &mut S
    ) -> Result<(), NetpbmDecodeErrors> {
        self.decode_headers()?;

        let header = self
            .header()
            .ok_or(NetpbmDecodeErrors::Generic("headers not decoded"))?;
        let channels = header.signature.num_components();

        if options.x_stride() == 0 || options.y_stride() == 0 {
            return Err(NetpbmDecodeErrors::Generic(
                "subsampling stride cannot be zero"
            ));
        }
        let (x_stride, y_stride) = (options.x_stride(), options.y_stride());
        let (dest_x, dest_y) = options.dest_offset();

        let region = options
            .region()
            .unwrap_or(Region::new(0, 0, header.width, header.height))
            .clip(header.width, header.height);

        let source_bands = match &options.source_bands {
            Some(bands) => bands.clone(),
            None => (0..channels).collect()
        };
        let dest_bands = match &options.dest_bands {
            Some(bands) => bands.clone(),
            None => (0..source_bands.len()).collect()
        };

        if source_bands.len() != dest_bands.len() {
            return Err(NetpbmDecodeErrors::Generic(
                "source and destination band lists differ in length"
            ));
        }
        if source_bands.iter().any(|b| *b >= channels) {
            return Err(NetpbmDecodeErrors::Generic(
                "source band index out of range"
            ));
        }
        if dest_bands.iter().any(|b| *b >= sink.num_bands()) {
            return Err(NetpbmDecodeErrors::Generic(
                "destination band index out of range"
            ));
        }

        trace!("Region: {:?}", region);
        trace!("Strides: {}x{}", x_stride, y_stride);
        trace!("Destination offset: ({}, {})", dest_x, dest_y);

        // One row buffer reused for every row, short rows deliberately
        // keep the previous row's bytes.
        let mut row = vec![0_u8; header.width * channels];

        for src_y in 0..header.height {
            self.decode_row(&mut row, src_y)?;

            if src_y < region.y || src_y >= region.end_y() {
                continue;
            }
            if (src_y - region.y) % y_stride != 0 {
                continue;
            }
            let dst_y = dest_y + (src_y - region.y) / y_stride;

            if dst_y >= sink.height() {
                continue;
            }

            for src_x in region.x..region.end_x() {
                if (src_x - region.x) % x_stride != 0 {
                    continue;
                }
                let dst_x = dest_x + (src_x - region.x) / x_stride;

                if dst_x >= sink.width() {
                    continue;
                }

                for (src_band, dst_band) in source_bands.iter().zip(dest_bands.iter()) {
                    sink.set_sample(dst_x, dst_y, *dst_band, row[src_x * channels + *src_band]);
                }
            }
        }
        Ok(())
    }
}
