/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::reader::{PxByteIoError, PxSeekFrom};
use crate::bytestream::PxByteReaderTrait;

/// An in memory byte source.
///
/// This wraps anything that dereferences to a byte slice together with
/// a read position, it is the preferred source when the whole input
/// already sits in memory.
pub struct PxCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> PxCursor<T> {
    pub fn new(stream: T) -> PxCursor<T> {
        PxCursor {
            stream,
            position: 0
        }
    }

    /// Return the bytes left in this cursor.
    pub fn remaining(&self) -> usize {
        self.stream.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> PxByteReaderTrait for PxCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PxByteIoError> {
        let stream = self.stream.as_ref();

        match stream.get(self.position..self.position + buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position += buf.len();
                Ok(())
            }
            None => Err(PxByteIoError::NotEnoughBytes(
                buf.len(),
                stream.len().saturating_sub(self.position)
            ))
        }
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), PxByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        if let Some(bytes) = self
            .stream
            .as_ref()
            .get(self.position..self.position + N)
        {
            buf.copy_from_slice(bytes);
            self.position += N;
        }
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PxByteIoError> {
        let stream = self.stream.as_ref();
        let bytes_left = stream.len().saturating_sub(self.position);
        let can_read = buf.len().min(bytes_left);

        buf[..can_read].copy_from_slice(&stream[self.position..self.position + can_read]);
        self.position += can_read;

        Ok(can_read)
    }

    fn px_seek(&mut self, from: PxSeekFrom) -> Result<u64, PxByteIoError> {
        let len = self.stream.as_ref().len() as i64;

        let new_position = match from {
            PxSeekFrom::Start(position) => i64::try_from(position)?,
            PxSeekFrom::End(offset) => len + offset,
            PxSeekFrom::Current(offset) => self.position as i64 + offset
        };

        if new_position < 0 {
            return Err(PxByteIoError::SeekError("Cannot seek before position 0"));
        }
        // seeking beyond the end is allowed, reads there simply fail
        self.position = new_position as usize;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, PxByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    #[inline(always)]
    fn px_position(&mut self) -> Result<u64, PxByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PxByteIoError> {
        let stream = self.stream.as_ref();
        let remaining = &stream[self.position.min(stream.len())..];

        sink.extend_from_slice(remaining);
        self.position = stream.len();

        Ok(remaining.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_read_reports_count() {
        let mut cursor = PxCursor::new([1_u8, 2, 3]);
        let mut buf = [0_u8; 8];

        assert_eq!(cursor.read_bytes(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn seek_past_end_then_read() {
        let mut cursor = PxCursor::new([1_u8, 2, 3]);

        cursor.px_seek(PxSeekFrom::Start(10)).unwrap();
        assert!(cursor.is_eof().unwrap());
        assert_eq!(cursor.read_byte_no_error(), 0);
    }

    #[test]
    fn failed_exact_read_keeps_position() {
        let mut cursor = PxCursor::new([1_u8, 2, 3]);
        let mut buf = [0_u8; 4];

        assert!(cursor.read_exact_bytes(&mut buf).is_err());
        assert_eq!(cursor.px_position().unwrap(), 0);
    }
}
