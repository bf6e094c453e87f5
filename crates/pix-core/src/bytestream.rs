/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bytestream reading
//!
//! This module exposes the [`PxByteReaderTrait`] which anything that
//! wants to feed bytes into a decoder must implement, the [`PxReader`]
//! wrapper which adds endian aware integer reads on top of it, and the
//! [`PxCursor`] in memory implementation.
//!
//! Integer reads come in two flavours
//!
//! - Permissive (`get_u16_le` etc.): a short read returns `0`.
//!   Legacy formats with zero filled trailing fields are decoded with
//!   these, a truncated file simply reads as zeroes.
//! - Erroring (`get_u16_le_err` etc.): a short read returns an error.
//!   Used where an unreadable offset must abort decoding.

pub use cursor::PxCursor;
pub use reader::{PxByteIoError, PxReader, PxSeekFrom};
pub use traits::PxByteReaderTrait;

mod cursor;
mod reader;
mod std_readers;
mod traits;
