/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use pix_core::bytestream::PxByteIoError;

use crate::constants::{ASE_FILE_MAGIC, ASE_FRAME_MAGIC};

/// Errors that abort sprite decoding.
///
/// Only structural failures surface here. A cel referencing a missing
/// layer, an unknown chunk or a failed cel decompression are logged
/// and skipped, decoding continues past them.
pub enum AseDecodeErrors {
    /// The document header magic did not match.
    WrongMagicBytes(u16),
    /// A frame header magic did not match, (frame index, found value).
    WrongFrameMagic(usize, u16),
    /// The document depth is not one of the three recognized values.
    UnsupportedColorDepth(u16),
    /// Configured dimension limit, found dimension.
    LargeDimensions(usize, usize),
    Generic(&'static str),
    IoErrors(PxByteIoError)
}

impl Debug for AseDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AseDecodeErrors::WrongMagicBytes(magic) => {
                writeln!(
                    f,
                    "Expected {ASE_FILE_MAGIC:#06x} but found {magic:#06x}, not an Aseprite document"
                )
            }
            AseDecodeErrors::WrongFrameMagic(frame, magic) => {
                writeln!(
                    f,
                    "Frame {frame} header magic is {magic:#06x}, expected {ASE_FRAME_MAGIC:#06x}"
                )
            }
            AseDecodeErrors::UnsupportedColorDepth(depth) => {
                writeln!(
                    f,
                    "Unsupported color depth {depth}, known depths are 8, 16 and 32"
                )
            }
            AseDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}"
                )
            }
            AseDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            AseDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error: {e:?}")
            }
        }
    }
}

impl From<&'static str> for AseDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<PxByteIoError> for AseDecodeErrors {
    fn from(r: PxByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
