/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small deflate/zlib decoder.
//!
//! This crate features a decompressor for RFC 1951 deflate streams and
//! their RFC 1950 zlib wrapping, built for embedding into format
//! decoders that carry zlib compressed payloads.
//!
//! Use it if
//! - You want a small library footprint
//! - You want a 100% safe, pure rust implementation
//! - You decode whole buffers that already sit in memory
//!
//! There is deliberately no encoder here, writing deflate streams is a
//! different problem and other crates solve it well.
//!
//! # Usage
//!
//! Decoding deflate data
//!
//! ```no_run
//! use pix_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_deflate();
//! ```
//!
//! Decoding zlib data
//! ```no_run
//! use pix_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Decoding zlib data without confirming the adler32 checksum
//! ```no_run
//! use pix_inflate::DeflateDecoder;
//! use pix_inflate::DeflateOptions;
//! let totally_valid_data = [0; 23];
//! let mut options = DeflateOptions::default()
//!                     .set_confirm_checksum(false);
//! let decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//!
//! ```
pub use crate::decoder::{DeflateDecoder, DeflateOptions};

mod bitstream;
mod constants;
mod decoder;
pub mod errors;
mod huffman;
