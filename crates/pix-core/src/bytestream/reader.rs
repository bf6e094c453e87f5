/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::Formatter;

use crate::bytestream::PxByteReaderTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to [SeekFrom](std::io::SeekFrom) in the std library
/// but exists so that the reader trait does not name `std::io` types
/// directly.
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum PxSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of this object plus the specified
    /// number of bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified
    /// number of bytes.
    Current(i64)
}

impl PxSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            PxSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            PxSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            PxSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors that arise from the underlying byte source
pub enum PxByteIoError {
    /// An error from the standard library I/O routines
    StdIoError(std::io::Error),
    /// A numeric cast between position types failed
    TryFromIntError(std::num::TryFromIntError),
    /// Requested bytes, found bytes
    NotEnoughBytes(usize, usize),
    /// A generic error message
    Generic(&'static str),
    /// An error encountered during seeking
    SeekError(&'static str)
}

impl std::fmt::Debug for PxByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PxByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            PxByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {err}")
            }
            PxByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            PxByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            PxByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl From<std::io::Error> for PxByteIoError {
    fn from(value: std::io::Error) -> Self {
        PxByteIoError::StdIoError(value)
    }
}

impl From<std::num::TryFromIntError> for PxByteIoError {
    fn from(value: std::num::TryFromIntError) -> Self {
        PxByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for PxByteIoError {
    fn from(value: &'static str) -> Self {
        PxByteIoError::Generic(value)
    }
}

/// A reader adding endian aware integer reads on top of any
/// [`PxByteReaderTrait`] implementation.
///
/// Integer reads come in paired permissive and erroring variants, see
/// the [module docs](crate::bytestream) for when each is appropriate.
pub struct PxReader<T: PxByteReaderTrait> {
    inner: T
}

impl<T: PxByteReaderTrait> PxReader<T> {
    pub fn new(source: T) -> PxReader<T> {
        PxReader { inner: source }
    }

    /// Destroy this reader returning the underlying source of the bytes
    /// from which we were decoding.
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    /// Skip `num` bytes ahead of the stream.
    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, PxByteIoError> {
        self.inner.px_seek(PxSeekFrom::Current(num as i64))
    }

    /// Move `num` bytes back in the stream.
    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, PxByteIoError> {
        self.inner.px_seek(PxSeekFrom::Current(-(num as i64)))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: PxSeekFrom) -> Result<u64, PxByteIoError> {
        self.inner.px_seek(from)
    }

    /// Seek to an absolute position in the stream.
    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), PxByteIoError> {
        self.seek(PxSeekFrom::Start(position))?;
        Ok(())
    }

    /// Read a single byte, returning `0` on a failed read.
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        self.inner.read_byte_no_error()
    }

    /// Read a single byte, returning an error on a failed read.
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, PxByteIoError> {
        let mut buf = [0];
        self.inner.read_exact_bytes(&mut buf)?;
        Ok(buf[0])
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], PxByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        match self.inner.read_const_bytes(&mut byte_store) {
            Ok(_) => Ok(byte_store),
            Err(e) => Err(e)
        }
    }

    #[inline(always)]
    pub fn get_fixed_bytes_or_zero<const N: usize>(&mut self) -> [u8; N] {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes_no_error(&mut byte_store);
        byte_store
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, PxByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, PxByteIoError> {
        self.inner.px_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), PxByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, PxByteIoError> {
        self.inner.read_bytes(buf)
    }

    pub fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, PxByteIoError> {
        self.inner.read_remaining(sink)
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<T: PxByteReaderTrait> PxReader<T> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                self.inner.read_const_bytes_no_error(&mut space);

                match mode {
                    Mode::BE => $int_type::from_be_bytes(space),
                    Mode::LE => $int_type::from_le_bytes(space)
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, PxByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.inner.read_const_bytes(&mut space) {
                    Ok(_) => match mode {
                        Mode::BE => Ok($int_type::from_be_bytes(space)),
                        Mode::LE => Ok($int_type::from_le_bytes(space))
                    },
                    Err(e) => Err(e)
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, PxByteIoError> {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, PxByteIoError> {
                self.$name2(Mode::LE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);

impl<T> std::io::Read for PxReader<T>
where
    T: PxByteReaderTrait
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::ErrorKind;
        self.read_bytes(buf)
            .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{PxCursor, PxReader};

    #[test]
    fn permissive_reads_return_zero_past_eof() {
        let mut reader = PxReader::new(PxCursor::new([0xAB_u8, 0xCD]));

        assert_eq!(reader.get_u16_le(), 0xCDAB);
        // nothing left, the permissive read yields zero
        assert_eq!(reader.get_u32_le(), 0);
        assert_eq!(reader.get_u8(), 0);
    }

    #[test]
    fn erroring_reads_fail_past_eof() {
        let mut reader = PxReader::new(PxCursor::new([0xAB_u8]));

        assert!(reader.get_u16_le_err().is_err());
        // the failed read did not consume the remaining byte
        assert_eq!(reader.get_u8_err().unwrap(), 0xAB);
    }

    #[test]
    fn endianness() {
        let mut reader = PxReader::new(PxCursor::new([1_u8, 2, 3, 4, 1, 2, 3, 4]));

        assert_eq!(reader.get_u32_le(), 0x04030201);
        assert_eq!(reader.get_u32_be(), 0x01020304);
    }

    #[test]
    fn seek_and_tell() {
        let mut reader = PxReader::new(PxCursor::new([0_u8, 1, 2, 3, 4, 5]));

        reader.skip(4).unwrap();
        assert_eq!(reader.position().unwrap(), 4);
        reader.rewind(2).unwrap();
        assert_eq!(reader.get_u8(), 2);
        reader.set_position(5).unwrap();
        assert_eq!(reader.get_u8(), 5);
        assert!(reader.eof().unwrap());
    }
}
