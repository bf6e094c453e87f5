/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use pix_core::bytestream::PxByteIoError;

/// Errors that can occur while reading a WAVE file.
pub enum WavDecodeErrors {
    /// A chunk tag was not where the fixed layout puts it,
    /// (expected, found).
    WrongMagicBytes(&'static [u8; 4], [u8; 4]),
    /// The format tag is not plain PCM.
    UnsupportedFormatTag(u16),
    /// The data chunk declared more sample bytes than the source
    /// holds, (expected, read).
    TruncatedSampleData(usize, usize),
    Generic(&'static str),
    IoErrors(PxByteIoError)
}

impl Debug for WavDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WavDecodeErrors::WrongMagicBytes(expected, found) => {
                writeln!(
                    f,
                    "Expected {:?} but found {:?}, not a plain WAVE file",
                    String::from_utf8_lossy(*expected),
                    String::from_utf8_lossy(found)
                )
            }
            WavDecodeErrors::UnsupportedFormatTag(tag) => {
                writeln!(f, "Format tag {tag} is not supported, only 1 (PCM) is")
            }
            WavDecodeErrors::TruncatedSampleData(expected, read) => {
                writeln!(f, "Only read {read} of {expected} sample bytes")
            }
            WavDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            WavDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error: {e:?}")
            }
        }
    }
}

impl From<&'static str> for WavDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<PxByteIoError> for WavDecodeErrors {
    fn from(r: PxByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
