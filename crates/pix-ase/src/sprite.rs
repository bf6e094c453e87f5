/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The in memory sprite document.
//!
//! A [`Sprite`] owns everything decoded from one document, layers,
//! frames, cels, tags and the palette, and releases them as one unit.
//! Linked cels hold a frame index into the same document, never a
//! reference, resolve them with [`Sprite::linked_cel`].

use crate::enums::{BlendMode, ColorDepth, LayerKind, LoopDirection};

bitflags::bitflags! {
    /// Flag bits of a layer record.
    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    pub struct LayerFlags: u16 {
        const VISIBLE            = 1;
        const EDITABLE           = 2;
        const LOCK_MOVEMENT      = 4;
        const BACKGROUND         = 8;
        const PREFER_LINKED_CELS = 16;
        const GROUP_COLLAPSED    = 32;
        const REFERENCE          = 64;
    }
}

/// A palette color, straight r, g, b, a bytes.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

/// The document palette.
///
/// A fixed capacity table of 256 colors, entry index is the color id
/// indexed cels store per pixel. Successive palette chunks merge into
/// it, the logical count only ever grows during one decode.
#[derive(Clone, Eq, PartialEq)]
pub struct Palette {
    colors: [Rgba; 256],
    count:  usize
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: [Rgba::default(); 256],
            count:  0
        }
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("count", &self.count)
            .field("colors", &&self.colors[..self.count])
            .finish()
    }
}

impl Palette {
    /// Write a color at an absolute index, extending the logical count
    /// to cover it. Indices past the fixed capacity are ignored.
    pub fn set_color(&mut self, index: usize, color: Rgba) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
            self.count = self.count.max(index + 1);
        }
    }

    /// Get the color with the given id, or None past the logical
    /// count.
    pub fn color(&self, index: usize) -> Option<Rgba> {
        if index < self.count {
            return Some(self.colors[index]);
        }
        None
    }

    /// Number of entries the palette logically holds.
    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// One layer of the document.
///
/// Layers are stored in file order and their position in
/// [`Sprite::layers`] is the index cels reference, the nested group
/// structure is flattened into the `child_level` field and resolved
/// into the `parent` index during decoding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layer {
    pub name:        String,
    pub flags:       LayerFlags,
    pub kind:        LayerKind,
    /// Blend mode, meaningful for non background image layers only.
    pub blend_mode:  BlendMode,
    /// Opacity, meaningful for non background image layers only.
    pub opacity:     u8,
    /// Nesting level as encoded in the file, 0 is a top level layer.
    pub child_level: u16,
    /// Index of the enclosing group layer, -1 for root.
    pub parent:      i32
}

impl Layer {
    /// Whether the layer is marked visible.
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE)
    }
}

/// Pixel content of a cel.
///
/// The three storage variants of the format collapse into two states
/// at decode time, either the cel owns pixels or it designates an
/// earlier frame's cel on the same layer as its pixel source.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CelData {
    /// An owned pixel buffer of `width * height *
    /// bytes_per_pixel` bytes.
    ///
    /// `None` when the cel legitimately has no pixel area or when its
    /// compressed pixel stream could not be decompressed.
    Image(Option<Vec<u8>>),
    /// Index of the frame this cel borrows pixels from.
    Linked(u16)
}

/// The pixel content one layer contributes to one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cel {
    /// Index into [`Sprite::layers`], always an image layer.
    pub layer:   u16,
    pub x:       i16,
    pub y:       i16,
    pub width:   u16,
    pub height:  u16,
    pub opacity: u8,
    pub data:    CelData
}

/// One animation frame, its display duration and the cels it carries.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Frame {
    /// Display duration in milliseconds.
    pub duration: u16,
    pub cels:     Vec<Cel>
}

/// A named frame range with a loop direction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    /// First frame of the range, inclusive.
    pub from:      i16,
    /// Last frame of the range, inclusive.
    pub to:        i16,
    pub direction: LoopDirection,
    pub name:      String
}

impl Tag {
    /// Advance a playback cursor one step along this tag.
    ///
    /// Forward wraps from `to` back to `from`, reverse wraps from
    /// `from` back to `to`.
    ///
    /// Ping-pong can return negative values. A negative cursor is a
    /// signed offset from `to`, not a frame index, resolve it as
    /// `to + cursor` before indexing frames:
    ///
    /// ```
    /// use pix_ase::{LoopDirection, Tag};
    ///
    /// let tag = Tag {
    ///     from:      2,
    ///     to:        5,
    ///     direction: LoopDirection::PingPong,
    ///     name:      "walk".into()
    /// };
    /// let cursor = tag.next_frame(5);
    ///
    /// assert_eq!(cursor, -1);
    /// let frame_index = i32::from(tag.to) + cursor;
    /// assert_eq!(frame_index, 4);
    /// ```
    ///
    /// A single frame tag never goes negative.
    pub fn next_frame(&self, frame: i32) -> i32 {
        let from = i32::from(self.from);
        let to = i32::from(self.to);

        match self.direction {
            LoopDirection::Forward => {
                let next = frame + 1;
                if next > to {
                    from
                } else {
                    next
                }
            }
            LoopDirection::Reverse => {
                let next = frame - 1;
                if next < from {
                    to
                } else {
                    next
                }
            }
            LoopDirection::PingPong => {
                if frame >= 0 {
                    let next = frame + 1;
                    if next > to {
                        if from == to {
                            0
                        } else {
                            -1
                        }
                    } else {
                        next
                    }
                } else {
                    // the cursor runs backwards as an offset from `to`
                    // until the implied frame would pass `from`
                    let next = frame - 1;
                    if to + next < from {
                        0
                    } else {
                        next
                    }
                }
            }
        }
    }
}

/// A decoded sprite document.
///
/// Created empty, populated by one decode pass and immutable
/// afterwards. Dropping it releases every layer, frame, cel and tag
/// it owns.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Sprite {
    pub width:             usize,
    pub height:            usize,
    pub depth:             ColorDepth,
    /// Palette index that renders as transparent in indexed documents.
    pub transparent_index: u8,
    /// Pixel aspect ratio, width to height. (1, 1) for square pixels.
    pub pixel_ratio:       (u8, u8),
    pub palette:           Palette,
    pub layers:            Vec<Layer>,
    pub frames:            Vec<Frame>,
    pub tags:              Vec<Tag>
}

impl Sprite {
    /// Number of bytes one pixel occupies, derived from the document
    /// depth.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }

    /// Find a layer by name, first match in file order.
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Find a tag by name, first match in file order.
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Whether a cel should be drawn, which is its owning layer's
    /// visible flag.
    pub fn is_cel_visible(&self, cel: &Cel) -> bool {
        self.layers
            .get(usize::from(cel.layer))
            .is_some_and(Layer::is_visible)
    }

    /// Resolve a linked cel to the cel it borrows pixels from, the
    /// cel sharing its layer inside the referenced frame.
    ///
    /// Returns None for cels that own their pixels and for dangling
    /// links.
    pub fn linked_cel(&self, cel: &Cel) -> Option<&Cel> {
        match cel.data {
            CelData::Linked(frame) => self
                .frames
                .get(usize::from(frame))?
                .cels
                .iter()
                .find(|candidate| candidate.layer == cel.layer),
            CelData::Image(_) => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(from: i16, to: i16, direction: LoopDirection) -> Tag {
        Tag {
            from,
            to,
            direction,
            name: String::new()
        }
    }

    #[test]
    fn forward_wraps_to_from() {
        let tag = tag(2, 5, LoopDirection::Forward);

        assert_eq!(tag.next_frame(2), 3);
        assert_eq!(tag.next_frame(4), 5);
        assert_eq!(tag.next_frame(5), 2);
    }

    #[test]
    fn reverse_wraps_to_to() {
        let tag = tag(2, 5, LoopDirection::Reverse);

        assert_eq!(tag.next_frame(5), 4);
        assert_eq!(tag.next_frame(3), 2);
        assert_eq!(tag.next_frame(2), 5);
    }

    #[test]
    fn ping_pong_full_cycle() {
        let tag = tag(2, 5, LoopDirection::PingPong);

        let mut cursor = 2;
        let mut seen = vec![];

        for _ in 0..8 {
            cursor = tag.next_frame(cursor);
            seen.push(cursor);
        }
        assert_eq!(seen, vec![3, 4, 5, -1, -2, -3, 0, 1]);

        // negative cursors resolve against `to`
        assert_eq!(5 + -1, 4);
        assert_eq!(5 + -2, 3);
        assert_eq!(5 + -3, 2);
    }

    #[test]
    fn ping_pong_single_frame_never_negative() {
        let tag = tag(3, 3, LoopDirection::PingPong);

        let mut cursor = 3;

        for _ in 0..16 {
            cursor = tag.next_frame(cursor);
            assert!(cursor >= 0);
        }
    }

    #[test]
    fn palette_grows_and_never_shrinks() {
        let mut palette = Palette::default();

        palette.set_color(4, Rgba { r: 1, g: 2, b: 3, a: 4 });
        assert_eq!(palette.len(), 5);

        palette.set_color(0, Rgba::default());
        assert_eq!(palette.len(), 5);

        // out of range writes are discarded
        palette.set_color(600, Rgba::default());
        assert_eq!(palette.len(), 5);

        assert!(palette.color(4).is_some());
        assert!(palette.color(5).is_none());
    }

    #[test]
    fn linked_cel_resolution() {
        let cel_with_pixels = Cel {
            layer:   1,
            x:       0,
            y:       0,
            width:   2,
            height:  2,
            opacity: 255,
            data:    CelData::Image(Some(vec![0; 4]))
        };
        let linked = Cel {
            layer:   1,
            x:       0,
            y:       0,
            width:   0,
            height:  0,
            opacity: 255,
            data:    CelData::Linked(0)
        };

        let sprite = Sprite {
            depth: ColorDepth::Indexed8,
            frames: vec![
                Frame {
                    duration: 100,
                    cels:     vec![cel_with_pixels.clone()]
                },
                Frame {
                    duration: 100,
                    cels:     vec![linked.clone()]
                },
            ],
            ..Sprite::default()
        };

        let resolved = sprite.linked_cel(&linked).unwrap();
        assert_eq!(resolved, &cel_with_pixels);

        // cels that own pixels do not resolve
        assert!(sprite.linked_cel(&cel_with_pixels).is_none());
    }
}
