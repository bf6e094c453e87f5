/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunk body parsers.

use log::{error, trace, warn};
use pix_core::bytestream::PxByteReaderTrait;
use pix_inflate::{DeflateDecoder, DeflateOptions};

use crate::constants::{CEL_COMPRESSED, CEL_LINKED, CEL_RAW, PALETTE_FLAG_HAS_NAME};
use crate::decoder::AseDecoder;
use crate::enums::{BlendMode, LayerKind};
use crate::errors::AseDecodeErrors;
use crate::sprite::{Cel, CelData, Layer, LayerFlags, Rgba};

impl<T> AseDecoder<T>
where
    T: PxByteReaderTrait
{
    /// Merge a palette chunk into the document palette.
    ///
    /// The chunk addresses an inclusive index range, entries land at
    /// their absolute indices since indexed cels reference colors by
    /// id. The declared new size is irrelevant for a fixed capacity
    /// table and ignored.
    pub(crate) fn parse_palette(&mut self) -> Result<(), AseDecodeErrors> {
        let _new_size = self.stream.get_u32_le();
        let from = self.stream.get_u32_le() as usize;
        let to = self.stream.get_u32_le() as usize;
        self.stream.skip(8)?;

        trace!("Palette chunk covering [{from}, {to}]");

        if to >= 256 {
            warn!("Palette range ends at {to}, entries past 255 are dropped");
        }

        for index in from..=to.min(255) {
            let entry_flags = self.stream.get_u16_le();
            let packed = self.stream.get_u32_le();

            // the stored word carries red and blue exchanged, swap
            // them back right after reading
            let [r, g, b, a] = packed.to_le_bytes();
            let color = Rgba { r: b, g, b: r, a };

            self.sprite.palette.set_color(index, color);

            if entry_flags & PALETTE_FLAG_HAS_NAME != 0 {
                // color names are not retained
                let _name = self.read_string();
            }
        }

        self.seen_palette = true;
        Ok(())
    }

    /// Build the next layer from a layer chunk and resolve its parent
    /// from the flattened nesting level.
    pub(crate) fn parse_layer(&mut self) -> Result<(), AseDecodeErrors> {
        let flags = LayerFlags::from_bits_truncate(self.stream.get_u16_le());
        let kind_value = self.stream.get_u16_le();
        let child_level = i32::from(self.stream.get_u16_le());
        let _default_width = self.stream.get_u16_le();
        let _default_height = self.stream.get_u16_le();
        let blend_value = self.stream.get_u16_le();
        let opacity = self.stream.get_u8();
        self.stream.skip(3)?;
        let name = self.read_string();

        let kind = match LayerKind::from_int(kind_value) {
            Some(kind) => kind,
            None => {
                // neither image nor group, the record and its name are
                // dropped
                trace!("Dropping layer {name:?} of unsupported kind {kind_value}");
                return Ok(());
            }
        };

        let mut layer = Layer {
            name,
            flags,
            kind,
            blend_mode: BlendMode::default(),
            opacity: 255,
            child_level: child_level as u16,
            parent: -1
        };

        // only transparent layers carry compositing parameters, a
        // background layer keeps the defaults
        if !flags.contains(LayerFlags::BACKGROUND) {
            layer.blend_mode = BlendMode::from_int(blend_value).unwrap_or_default();
            layer.opacity = opacity;
        }

        self.sprite.layers.push(layer);

        let index = self.sprite.layers.len() - 1;
        let parent = self.resolve_layer_parent(index, child_level);

        self.sprite.layers[index].parent = parent;
        self.prev_layer = Some(index);
        self.prev_level = child_level;

        trace!(
            "Layer {index} {:?} level {child_level} parent {parent}",
            self.sprite.layers[index].name
        );

        Ok(())
    }

    /// Resolve the parent index of a freshly appended layer from its
    /// nesting level and the (previous layer, previous level) state.
    fn resolve_layer_parent(&self, index: usize, child_level: i32) -> i32 {
        let prev_parent = self
            .prev_layer
            .map_or(-1, |prev| self.sprite.layers[prev].parent);

        if child_level == 0 {
            // top of the tree
            -1
        } else if child_level == self.prev_level {
            // sibling of the previous layer
            prev_parent
        } else if child_level > self.prev_level {
            // the record before this one is the enclosing group
            index as i32 - 1
        } else {
            // the level dropped, walk back up the ancestry of the
            // previous layer until the enclosing group is reached
            let mut parent = prev_parent;

            if parent >= 0 {
                let mut steps = self.prev_level - child_level;

                while steps > 0 {
                    let ancestor = &self.sprite.layers[parent as usize];
                    if ancestor.parent == -1 {
                        break;
                    }
                    parent = ancestor.parent;
                    steps -= 1;
                }
            }
            parent
        }
    }

    /// Decode a cel chunk into the current frame.
    ///
    /// A cel referencing a missing layer or a layer without pixel
    /// data is dropped without aborting the pass, as is a cel whose
    /// compressed pixels fail to decompress.
    pub(crate) fn parse_cel(
        &mut self, frame_index: usize, chunk_end: u64
    ) -> Result<(), AseDecodeErrors> {
        let layer_index = self.stream.get_u16_le();
        let x = self.stream.get_u16_le() as i16;
        let y = self.stream.get_u16_le() as i16;
        let opacity = self.stream.get_u8();
        let cel_type = self.stream.get_u16_le();
        self.stream.skip(7)?;

        match self.sprite.layers.get(usize::from(layer_index)) {
            Some(layer) if layer.kind == LayerKind::Image => {}
            Some(_) => {
                error!(
                    "Frame {frame_index} puts a cel on layer {layer_index} which does not \
                     contain images, skipping the cel"
                );
                if self.options.strict_mode() {
                    return Err(AseDecodeErrors::Generic("Cel on a non-image layer"));
                }
                return Ok(());
            }
            None => {
                error!("Frame {frame_index} is missing layer {layer_index}, skipping the cel");
                if self.options.strict_mode() {
                    return Err(AseDecodeErrors::Generic("Cel references a missing layer"));
                }
                return Ok(());
            }
        }

        let (width, height, data) = match cel_type {
            CEL_RAW => {
                let width = self.stream.get_u16_le();
                let height = self.stream.get_u16_le();

                (width, height, CelData::Image(self.read_raw_pixels(width, height)))
            }
            CEL_LINKED => {
                let linked_frame = self.stream.get_u16_le();

                trace!("Frame {frame_index} links layer {layer_index} to frame {linked_frame}");
                (0, 0, CelData::Linked(linked_frame))
            }
            CEL_COMPRESSED => {
                let width = self.stream.get_u16_le();
                let height = self.stream.get_u16_le();
                let pixels =
                    self.read_compressed_pixels(width, height, frame_index, chunk_end)?;

                (width, height, CelData::Image(pixels))
            }
            _ => {
                warn!("Frame {frame_index} has a cel of unknown type {cel_type}, skipping");
                return Ok(());
            }
        };

        let cel = Cel {
            layer: layer_index,
            x,
            y,
            width,
            height,
            opacity,
            data
        };

        if let Some(frame) = self.sprite.frames.last_mut() {
            frame.cels.push(cel);
        }
        Ok(())
    }

    /// Read `width * height` raw pixels for the document depth.
    ///
    /// A zero area is legitimate and yields no buffer.
    fn read_raw_pixels(&mut self, width: u16, height: u16) -> Option<Vec<u8>> {
        if width == 0 || height == 0 {
            return None;
        }
        let size =
            usize::from(width) * usize::from(height) * self.sprite.depth.bytes_per_pixel();

        let mut pixels = vec![0_u8; size];
        // truncated pixel data reads as zeroes, like any other field
        let _ = self.stream.read_bytes(&mut pixels);

        Some(pixels)
    }

    /// Inflate the zlib stream of a compressed cel into exactly
    /// `width * height * bytes_per_pixel` bytes.
    ///
    /// The compressed length is not stored, it is everything left
    /// between the cursor and the declared chunk end.
    fn read_compressed_pixels(
        &mut self, width: u16, height: u16, frame_index: usize, chunk_end: u64
    ) -> Result<Option<Vec<u8>>, AseDecodeErrors> {
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let position = self.stream.position()?;
        let compressed_size = chunk_end.saturating_sub(position) as usize;

        let mut compressed = vec![0_u8; compressed_size];
        let read = self.stream.read_bytes(&mut compressed).unwrap_or(0);
        compressed.truncate(read);

        let out_size =
            usize::from(width) * usize::from(height) * self.sprite.depth.bytes_per_pixel();

        let inflate_options = DeflateOptions::default()
            .set_confirm_checksum(self.options.inflate_confirm_adler())
            .set_size_hint(out_size)
            .set_limit(out_size.min(self.options.inflate_limit()));

        let mut inflater = DeflateDecoder::new_with_options(&compressed, inflate_options);

        match inflater.decode_zlib() {
            Ok(mut pixels) => {
                // a stream that stopped short leaves the tail zeroed
                pixels.resize(out_size, 0);
                Ok(Some(pixels))
            }
            Err(error) => {
                error!("Failed to inflate cel pixels in frame {frame_index}: {error:?}");
                if self.options.strict_mode() {
                    return Err(AseDecodeErrors::Generic(
                        "Compressed cel failed to decompress"
                    ));
                }
                Ok(None)
            }
        }
    }

    /// Append the tags of a frame tags chunk to the document.
    pub(crate) fn parse_tags(&mut self) -> Result<(), AseDecodeErrors> {
        let count = self.stream.get_u16_le();
        self.stream.skip(8)?;

        for _ in 0..count {
            let from = self.stream.get_u16_le() as i16;
            let to = self.stream.get_u16_le() as i16;
            let direction = crate::enums::LoopDirection::from_int(self.stream.get_u8());

            self.stream.skip(8)?;
            // tag display color, an editor feature
            self.stream.skip(4)?;

            let name = self.read_string();

            trace!("Tag {name:?} [{from}, {to}] {direction:?}");

            self.sprite.tags.push(crate::sprite::Tag {
                from,
                to,
                direction,
                name
            });
        }
        Ok(())
    }
}
