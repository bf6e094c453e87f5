/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};
use pix_core::bytestream::{PxByteReaderTrait, PxReader};
use pix_core::options::DecoderOptions;

use crate::constants::{
    ASE_FILE_MAGIC, ASE_FRAME_MAGIC, ASE_HEADER_SIZE, CHUNK_CEL, CHUNK_CEL_EXTRA, CHUNK_FLI_COLOR,
    CHUNK_FLI_COLOR2, CHUNK_FRAME_TAGS, CHUNK_LAYER, CHUNK_MASK, CHUNK_PALETTE, CHUNK_PATH,
    CHUNK_SLICE, CHUNK_SLICES, CHUNK_USER_DATA
};
use crate::enums::ColorDepth;
use crate::errors::AseDecodeErrors;
use crate::sprite::{Frame, Sprite};

/// A sprite document decoder.
///
/// Reads an Aseprite document from any byte source in a single
/// forward pass, reconstructing the layer tree, palette, frames with
/// their cels and the animation tags into a [`Sprite`].
///
/// Chunks the decoder doesn't understand are skipped via their
/// declared size, a handler is never required to consume exactly the
/// bytes its chunk declares.
pub struct AseDecoder<T>
where
    T: PxByteReaderTrait
{
    pub(crate) stream:  PxReader<T>,
    pub(crate) options: DecoderOptions,
    pub(crate) sprite:  Sprite,
    decoded_headers:    bool,
    frame_count:        usize,
    // layer tree state, the previously appended layer and its nesting
    // level drive parent resolution
    pub(crate) prev_layer:   Option<usize>,
    pub(crate) prev_level:   i32,
    pub(crate) seen_palette: bool
}

impl<T> AseDecoder<T>
where
    T: PxByteReaderTrait
{
    /// Create a new decoder that reads an Aseprite document from
    /// `data`.
    ///
    /// # Arguments
    /// - data: Data source, it has to implement the `PxByteReaderTrait`
    pub fn new(data: T) -> AseDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Creates a new decoder with options that influence decoding
    /// routines.
    ///
    /// # Arguments
    /// - data: Data source
    /// - options: Custom options for the decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> AseDecoder<T> {
        AseDecoder {
            stream: PxReader::new(data),
            options,
            sprite: Sprite::default(),
            decoded_headers: false,
            frame_count: 0,
            prev_layer: None,
            prev_level: -1,
            seen_palette: false
        }
    }

    /// Decode the fixed 128 byte document header.
    ///
    /// This confirms the document magic and extracts dimensions, color
    /// depth and palette bookkeeping. The header carries trailing
    /// reserved space, the cursor is forced past the full record
    /// afterwards regardless of how many bytes the fields consumed.
    pub fn decode_headers(&mut self) -> Result<(), AseDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let header_start = self.stream.position()?;

        let _file_size = self.stream.get_u32_le();
        let magic = self.stream.get_u16_le();

        if magic != ASE_FILE_MAGIC {
            return Err(AseDecodeErrors::WrongMagicBytes(magic));
        }

        let frame_count = self.stream.get_u16_le();
        let width = usize::from(self.stream.get_u16_le());
        let height = usize::from(self.stream.get_u16_le());
        let depth_value = self.stream.get_u16_le();

        let depth = match ColorDepth::from_int(depth_value) {
            Some(depth) => depth,
            None => return Err(AseDecodeErrors::UnsupportedColorDepth(depth_value))
        };

        if width > self.options.max_width() {
            return Err(AseDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(AseDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }

        let _flags = self.stream.get_u32_le();
        // deprecated, frame headers carry the real durations
        let _speed = self.stream.get_u16_le();
        let _reserved_a = self.stream.get_u32_le();
        let _reserved_b = self.stream.get_u32_le();

        let transparent_index = self.stream.get_u8();
        self.stream.skip(3)?;

        let mut declared_colors = self.stream.get_u16_le();
        if declared_colors == 0 {
            // older file quirk, zero means a full legacy palette
            declared_colors = 256;
        }

        let mut pixel_width = self.stream.get_u8();
        let mut pixel_height = self.stream.get_u8();
        if pixel_width == 0 || pixel_height == 0 {
            pixel_width = 1;
            pixel_height = 1;
        }

        self.sprite.width = width;
        self.sprite.height = height;
        self.sprite.depth = depth;
        self.sprite.transparent_index = transparent_index;
        self.sprite.pixel_ratio = (pixel_width, pixel_height);

        self.frame_count = usize::from(frame_count);
        self.decoded_headers = true;

        // the record is 128 bytes no matter how much of it is
        // meaningful, skip the reserved tail by seeking
        self.stream.set_position(header_start + ASE_HEADER_SIZE)?;

        trace!("Sprite width: {width}");
        trace!("Sprite height: {height}");
        trace!("Color depth: {depth:?}");
        trace!("Frames: {frame_count}");
        trace!("Declared palette size: {declared_colors}");

        Ok(())
    }

    /// Decode the whole document.
    ///
    /// Frame and chunk boundaries come from the declared sizes in
    /// their headers, the decoder reseeks to them after every chunk so
    /// unknown or partially parsed chunks cannot derail the pass.
    ///
    /// # Returns
    /// The decoded [`Sprite`], or the structural error that aborted
    /// decoding. Recoverable per chunk conditions do not abort, see
    /// [`AseDecodeErrors`].
    pub fn decode(&mut self) -> Result<Sprite, AseDecodeErrors> {
        self.decode_headers()?;

        for frame_index in 0..self.frame_count {
            let frame_start = self.stream.position()?;

            let frame_size = self.stream.get_u32_le();
            let magic = self.stream.get_u16_le();

            if magic != ASE_FRAME_MAGIC {
                return Err(AseDecodeErrors::WrongFrameMagic(frame_index, magic));
            }

            let chunk_count = self.stream.get_u16_le();
            let duration = self.stream.get_u16_le();
            self.stream.skip(6)?;

            trace!("Frame {frame_index}: {chunk_count} chunks, {duration} ms");

            self.sprite.frames.push(Frame {
                duration,
                cels: vec![]
            });

            for _ in 0..chunk_count {
                let chunk_start = self.stream.position()?;

                let chunk_size = self.stream.get_u32_le();
                let chunk_type = self.stream.get_u16_le();
                let chunk_end = chunk_start + u64::from(chunk_size);

                self.dispatch_chunk(chunk_type, frame_index, chunk_end)?;

                // resynchronize on the declared chunk size, handlers
                // need not consume exactly their body
                self.stream.set_position(chunk_end)?;
            }

            // same resynchronization at the frame level
            self.stream.set_position(frame_start + u64::from(frame_size))?;
        }

        Ok(std::mem::take(&mut self.sprite))
    }

    fn dispatch_chunk(
        &mut self, chunk_type: u16, frame_index: usize, chunk_end: u64
    ) -> Result<(), AseDecodeErrors> {
        match chunk_type {
            CHUNK_PALETTE => self.parse_palette()?,
            CHUNK_LAYER => self.parse_layer()?,
            CHUNK_CEL => self.parse_cel(frame_index, chunk_end)?,
            CHUNK_FRAME_TAGS => self.parse_tags()?,
            CHUNK_FLI_COLOR | CHUNK_FLI_COLOR2 => {
                // legacy color chunks carry pre-palette-chunk colors,
                // there is no support for them either way
                if !self.seen_palette {
                    trace!("Ignoring legacy color chunk {chunk_type:#06x}");
                }
            }
            CHUNK_CEL_EXTRA | CHUNK_MASK | CHUNK_PATH | CHUNK_USER_DATA | CHUNK_SLICES
            | CHUNK_SLICE => { /* explicitly ignored */ }
            _ => {
                warn!("Unknown chunk type {chunk_type:#06x} in frame {frame_index}, skipping");
            }
        }
        Ok(())
    }

    /// Read a length prefixed string, a 16 bit length followed by that
    /// many bytes.
    ///
    /// Tolerant of truncation like every other field read, missing
    /// bytes simply shorten the string.
    pub(crate) fn read_string(&mut self) -> String {
        let length = usize::from(self.stream.get_u16_le());

        let mut bytes = vec![0_u8; length];
        let read = self.stream.read_bytes(&mut bytes).unwrap_or(0);
        bytes.truncate(read);

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Get sprite width and height, or None if the headers haven't
    /// been decoded.
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.sprite.width, self.sprite.height));
        }
        None
    }

    /// Get the document color depth, or None if the headers haven't
    /// been decoded.
    pub const fn depth(&self) -> Option<ColorDepth> {
        if self.decoded_headers {
            return Some(self.sprite.depth);
        }
        None
    }

    /// Get the number of frames the document declares, or None if the
    /// headers haven't been decoded.
    pub const fn frame_count(&self) -> Option<usize> {
        if self.decoded_headers {
            return Some(self.frame_count);
        }
        None
    }
}
