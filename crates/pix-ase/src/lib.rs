/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A sprite document decoder for the Aseprite `.ase`/`.aseprite`
//! format.
//!
//! This crate reads the layered, animated sprite documents the
//! Aseprite editor saves, header, palette, nested layer groups,
//! per frame cels and animation tags, and hands back an in memory
//! [`Sprite`] ready for rendering or re-export. It has no dependency
//! on the authoring application.
//!
//! ## What is and isn't here
//!
//! The decoder understands the chunks a game asset pipeline needs.
//! Slices, masks, paths, user data and editor conveniences such as tag
//! colors are skipped over, every chunk carries its size so skipping
//! is always safe. There is no encoder and no compositing, cel pixels
//! come out in the format dictated by the document color depth and
//! blending them is the renderer's business.
//!
//! Malformed input is handled the way the format's legacy readers do,
//! a bad document or frame magic aborts decoding, a bad cel or an
//! unknown chunk is logged and skipped, truncated trailing fields read
//! as zeroes.
//!
//! # Example
//! - Read a sprite from an in memory buffer
//! ```no_run
//! use pix_ase::AseDecoder;
//! use pix_ase::errors::AseDecodeErrors;
//! use pix_core::bytestream::PxCursor;
//!
//! fn main() -> Result<(), AseDecodeErrors> {
//!     let file = std::fs::read("hero.aseprite").unwrap();
//!     let mut decoder = AseDecoder::new(PxCursor::new(&file));
//!     let sprite = decoder.decode()?;
//!
//!     for layer in &sprite.layers {
//!         println!("{} (parent {})", layer.name, layer.parent);
//!     }
//!     Ok(())
//! }
//! ```
pub use crate::decoder::AseDecoder;
pub use crate::enums::{BlendMode, ColorDepth, LayerKind, LoopDirection};
pub use crate::sprite::{Cel, CelData, Frame, Layer, LayerFlags, Palette, Rgba, Sprite, Tag};

mod constants;
pub mod decoder;
mod enums;
pub mod errors;
mod headers;
pub mod sprite;
