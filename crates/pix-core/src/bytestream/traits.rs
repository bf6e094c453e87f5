/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits for reading bytes in the pix family of decoders

use crate::bytestream::reader::{PxByteIoError, PxSeekFrom};

/// The de-facto input trait implemented for readers.
///
/// This provides the basic functions needed for sequential reads,
/// seeking and position queries in the pix decoders, with easy support
/// for extending it to custom sources.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`PxCursor`](crate::bytestream::PxCursor)
/// over [`Cursor`](std::io::Cursor). Both work, but `PxCursor` can answer
/// the infallible byte reads without going through `std::io`.
pub trait PxByteReaderTrait {
    /// Read a single byte from the source and return
    /// `0` if we can't read it, e.g because of EOF.
    ///
    /// This is called from hot loops, implementations should make
    /// it as cheap as possible.
    fn read_byte_no_error(&mut self) -> u8;

    /// Read exact bytes required to fill `buf` or return an error if
    /// that isn't possible.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PxByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if
    /// that isn't possible.
    ///
    /// Same as [`read_exact_bytes`](Self::read_exact_bytes) but with a
    /// compile time known length so implementations can optimize it.
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), PxByteIoError>;

    /// Read exact bytes required to fill `buf`, leaving `buf` zero filled
    /// if the source can't satisfy the read.
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]);

    /// Read bytes into `buf` returning how many bytes were read.
    ///
    /// This doesn't guarantee that `buf` will be filled, for such a
    /// guarantee see [`read_exact_bytes`](Self::read_exact_bytes).
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PxByteIoError>;

    /// Seek to a new position in the source.
    ///
    /// Similar to [`seek`](std::io::Seek::seek) in the `std::io` library.
    fn px_seek(&mut self, from: PxSeekFrom) -> Result<u64, PxByteIoError>;

    /// Report whether we are at the end of the stream.
    ///
    /// # Warning
    /// This may cause an additional syscall, e.g when reading from a
    /// file, hence use it with care.
    fn is_eof(&mut self) -> Result<bool, PxByteIoError>;

    /// Return the current position of the inner cursor.
    fn px_position(&mut self) -> Result<u64, PxByteIoError>;

    /// Read all bytes remaining in this input into `sink` until EOF.
    ///
    /// # Returns
    /// The number of bytes added to the sink.
    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PxByteIoError>;
}
