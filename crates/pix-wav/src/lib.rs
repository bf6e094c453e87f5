/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A really basic RIFF/WAVE reader.
//!
//! This crate reads uncompressed PCM audio out of the fixed
//! RIFF → WAVE → `fmt ` → `data` chunk layout, nothing more. No
//! compression schemes, no cue points, no extensible format
//! extensions.
//!
//! Sometimes that's all you need.
//!
//! It shares the byte source abstraction of the `pix` decoders and
//! nothing else with them.
//!
//! # Example
//! ```no_run
//! use pix_core::bytestream::PxCursor;
//! use pix_wav::WavDecoder;
//!
//! let file = std::fs::read("jump.wav").unwrap();
//! let mut decoder = WavDecoder::new(PxCursor::new(&file));
//! let samples = decoder.decode().unwrap();
//!
//! println!(
//!     "{} Hz, {} channels, {} sample bytes",
//!     decoder.sample_rate().unwrap(),
//!     decoder.channels().unwrap(),
//!     samples.len()
//! );
//! ```
pub use crate::decoder::WavDecoder;
pub use crate::samples::{to_f32_samples, to_i16_samples, to_i8_samples, SampleFormat};

pub mod decoder;
pub mod errors;
mod samples;
