/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Magic number of the 128 byte document header.
pub const ASE_FILE_MAGIC: u16 = 0xA5E0;

/// Magic number of every frame header.
pub const ASE_FRAME_MAGIC: u16 = 0xF1FA;

/// Size of the fixed document header, trailing reserved space
/// included.
pub const ASE_HEADER_SIZE: u64 = 128;

// chunk type tags
pub const CHUNK_FLI_COLOR2: u16 = 0x0004;
pub const CHUNK_FLI_COLOR: u16 = 0x000B;
pub const CHUNK_LAYER: u16 = 0x2004;
pub const CHUNK_CEL: u16 = 0x2005;
pub const CHUNK_CEL_EXTRA: u16 = 0x2006;
pub const CHUNK_MASK: u16 = 0x2016;
pub const CHUNK_PATH: u16 = 0x2017;
pub const CHUNK_FRAME_TAGS: u16 = 0x2018;
pub const CHUNK_PALETTE: u16 = 0x2019;
pub const CHUNK_USER_DATA: u16 = 0x2020;
// used on dev versions only between v1.2-beta7 and v1.2-beta8
pub const CHUNK_SLICES: u16 = 0x2021;
pub const CHUNK_SLICE: u16 = 0x2022;

// cel storage variants
pub const CEL_RAW: u16 = 0;
pub const CEL_LINKED: u16 = 1;
pub const CEL_COMPRESSED: u16 = 2;

/// Palette entry flag marking a name string after the color word.
pub const PALETTE_FLAG_HAS_NAME: u16 = 1;
