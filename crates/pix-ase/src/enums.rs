/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Color depth of a document, the per pixel storage format every cel
/// in the document shares.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ColorDepth {
    /// One byte per pixel, an index into the document palette.
    Indexed8 = 8,
    /// Two bytes per pixel, gray value and alpha.
    Grayscale16 = 16,
    /// Four bytes per pixel, r, g, b, a.
    #[default]
    Rgba32 = 32
}

impl ColorDepth {
    /// Map the depth field of the document header to a depth,
    /// only three values are recognized.
    pub const fn from_int(int: u16) -> Option<ColorDepth> {
        match int {
            8 => Some(ColorDepth::Indexed8),
            16 => Some(ColorDepth::Grayscale16),
            32 => Some(ColorDepth::Rgba32),
            _ => None
        }
    }

    /// Number of bytes one pixel occupies in cel data.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorDepth::Indexed8 => 1,
            ColorDepth::Grayscale16 => 2,
            ColorDepth::Rgba32 => 4
        }
    }
}

/// What a layer record contains.
///
/// Only these two kinds produce layers, records with any other kind
/// value are dropped during decoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LayerKind {
    /// The layer carries pixel data through cels.
    Image = 0,
    /// The layer groups child layers and never carries pixels.
    Group = 1
}

impl LayerKind {
    pub const fn from_int(int: u16) -> Option<LayerKind> {
        match int {
            0 => Some(LayerKind::Image),
            1 => Some(LayerKind::Group),
            _ => None
        }
    }
}

/// Blend mode of a non background layer.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Multiply = 1,
    Screen = 2,
    Overlay = 3,
    Darken = 4,
    Lighten = 5,
    ColorDodge = 6,
    ColorBurn = 7,
    HardLight = 8,
    SoftLight = 9,
    Difference = 10,
    Exclusion = 11,
    Hue = 12,
    Saturation = 13,
    Color = 14,
    Luminosity = 15,
    Addition = 16,
    Subtract = 17,
    Divide = 18
}

impl BlendMode {
    pub const fn from_int(int: u16) -> Option<BlendMode> {
        match int {
            0 => Some(BlendMode::Normal),
            1 => Some(BlendMode::Multiply),
            2 => Some(BlendMode::Screen),
            3 => Some(BlendMode::Overlay),
            4 => Some(BlendMode::Darken),
            5 => Some(BlendMode::Lighten),
            6 => Some(BlendMode::ColorDodge),
            7 => Some(BlendMode::ColorBurn),
            8 => Some(BlendMode::HardLight),
            9 => Some(BlendMode::SoftLight),
            10 => Some(BlendMode::Difference),
            11 => Some(BlendMode::Exclusion),
            12 => Some(BlendMode::Hue),
            13 => Some(BlendMode::Saturation),
            14 => Some(BlendMode::Color),
            15 => Some(BlendMode::Luminosity),
            16 => Some(BlendMode::Addition),
            17 => Some(BlendMode::Subtract),
            18 => Some(BlendMode::Divide),
            _ => None
        }
    }
}

/// Loop direction of an animation tag.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum LoopDirection {
    #[default]
    Forward = 0,
    Reverse = 1,
    PingPong = 2
}

impl LoopDirection {
    /// Map the direction byte of a tag record, any unrecognized value
    /// is coerced to [`LoopDirection::Forward`].
    pub const fn from_int(int: u8) -> LoopDirection {
        match int {
            1 => LoopDirection::Reverse,
            2 => LoopDirection::PingPong,
            _ => LoopDirection::Forward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_loop_direction_coerces_to_forward() {
        assert_eq!(LoopDirection::from_int(0), LoopDirection::Forward);
        assert_eq!(LoopDirection::from_int(3), LoopDirection::Forward);
        assert_eq!(LoopDirection::from_int(255), LoopDirection::Forward);
    }

    #[test]
    fn depth_maps_to_pixel_size() {
        assert_eq!(ColorDepth::from_int(8).unwrap().bytes_per_pixel(), 1);
        assert_eq!(ColorDepth::from_int(16).unwrap().bytes_per_pixel(), 2);
        assert_eq!(ColorDepth::from_int(32).unwrap().bytes_per_pixel(), 4);
        assert!(ColorDepth::from_int(24).is_none());
    }
}
