/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::bytestream::reader::{PxByteIoError, PxSeekFrom};
use crate::bytestream::PxByteReaderTrait;

impl<T> PxByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let position = self.position() as usize;
        let byte = self.get_ref().as_ref().get(position).copied();

        match byte {
            Some(byte) => {
                self.set_position(position as u64 + 1);
                byte
            }
            None => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PxByteIoError> {
        self.read_exact(buf).map_err(PxByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), PxByteIoError> {
        self.read_exact(buf).map_err(PxByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_exact(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PxByteIoError> {
        self.read(buf).map_err(PxByteIoError::from)
    }

    #[inline(always)]
    fn px_seek(&mut self, from: PxSeekFrom) -> Result<u64, PxByteIoError> {
        self.seek(from.to_std_seek()).map_err(PxByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, PxByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    #[inline(always)]
    fn px_position(&mut self) -> Result<u64, PxByteIoError> {
        Ok(self.position())
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PxByteIoError> {
        self.read_to_end(sink).map_err(PxByteIoError::from)
    }
}

impl<T: io::Read + io::Seek> PxByteReaderTrait for BufReader<T> {
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        let _ = self.read_exact(&mut buf);
        buf[0]
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PxByteIoError> {
        self.read_exact(buf).map_err(PxByteIoError::from)
    }

    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), PxByteIoError> {
        self.read_exact(buf).map_err(PxByteIoError::from)
    }

    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_exact(buf);
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PxByteIoError> {
        self.read(buf).map_err(PxByteIoError::from)
    }

    fn px_seek(&mut self, from: PxSeekFrom) -> Result<u64, PxByteIoError> {
        self.seek(from.to_std_seek()).map_err(PxByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, PxByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(PxByteIoError::from)
    }

    fn px_position(&mut self) -> Result<u64, PxByteIoError> {
        self.stream_position().map_err(PxByteIoError::from)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PxByteIoError> {
        self.read_to_end(sink).map_err(PxByteIoError::from)
    }
}
