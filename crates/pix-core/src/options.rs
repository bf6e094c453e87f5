/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global decoder options
//!
//! This module exposes a struct for which all implemented decoders
//! get shared options for decoding.
//!
//! The same `DecoderOptions` value can be reused across decoders,
//! each decoder documents which options it respects.

/// Decoder options
///
/// Not all options are respected by all decoders.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will not try to decode
    /// images larger than the specified width.
    ///
    /// - Default value: 131072
    /// - Respected by: `ase`
    max_width:            usize,
    /// Maximum height for which decoders will not try to decode
    /// images larger than the specified height.
    ///
    /// - Default value: 131072
    /// - Respected by: `ase`
    max_height:           usize,
    /// Maximum number of bytes a single inflate call may produce.
    ///
    /// - Default value: 1 GiB
    /// - Respected by: decoders that carry zlib streams
    inflate_limit:        usize,
    /// Whether the trailing Adler-32 of zlib streams should be
    /// confirmed against the decompressed output.
    ///
    /// - Default value: true
    inflate_confirm_adler: bool,
    /// Whether decoders should error out on conditions they would
    /// otherwise log and recover from.
    ///
    /// - Default value: false
    strict_mode:          bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:             1 << 17,
            max_height:            1 << 17,
            inflate_limit:         1 << 30,
            inflate_confirm_adler: true,
            strict_mode:           false
        }
    }
}

/// Accessors
impl DecoderOptions {
    /// Get the maximum width configured for which the decoder
    /// should not try to decode images greater than that width.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder
    /// should not try to decode images greater than that height.
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the output ceiling for embedded zlib streams.
    pub const fn inflate_limit(&self) -> usize {
        self.inflate_limit
    }

    /// Whether embedded zlib streams get their Adler-32 confirmed.
    pub const fn inflate_confirm_adler(&self) -> bool {
        self.inflate_confirm_adler
    }

    /// Whether the decoder treats recoverable conditions as errors.
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }
}

/// Setters
impl DecoderOptions {
    /// Set the maximum image width the decoder accepts.
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum image height the decoder accepts.
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the output ceiling for embedded zlib streams.
    pub fn set_inflate_limit(mut self, limit: usize) -> Self {
        self.inflate_limit = limit;
        self
    }

    /// Toggle Adler-32 confirmation for embedded zlib streams.
    pub fn set_inflate_confirm_adler(mut self, yes: bool) -> Self {
        self.inflate_confirm_adler = yes;
        self
    }

    /// Toggle strict mode.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
