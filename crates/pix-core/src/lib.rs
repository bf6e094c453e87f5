/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all libraries
//!
//! This crate provides a set of core routines shared
//! by the decoders under the `pix` umbrella.
//!
//! It currently contains
//!
//! - A bytestream reader with endian aware reads
//! - Shared decoder options
//!
//! The bytestream reader is the only I/O abstraction the decoders
//! depend on, anything that implements
//! [`PxByteReaderTrait`](crate::bytestream::PxByteReaderTrait)
//! can act as a source of bytes, the crate ships implementations
//! for in memory buffers and buffered files.

pub mod bytestream;
pub mod options;
