/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bitstream::BitStreamReader;
use crate::constants::{
    fixed_litlen_lengths, fixed_offset_lengths, DEFLATE_LENGTH_BASE, DEFLATE_LENGTH_EXTRA,
    DEFLATE_MAX_LENS_OVERRUN, DEFLATE_NUM_LITLEN_SYMS, DEFLATE_NUM_OFFSET_SYMS,
    DEFLATE_NUM_PRECODE_SYMS, DEFLATE_OFFSET_BASE, DEFLATE_OFFSET_EXTRA,
    DEFLATE_PRECODE_LENS_PERMUTATION
};
use crate::errors::DecodeErrorStatus::{CorruptData, Generic, GenericStr, InsufficientData};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::huffman::HuffmanTable;

/// Block types per the RFC
const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u64 = 0;
const DEFLATE_BLOCKTYPE_STATIC: u64 = 1;
const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u64 = 2;

/// Options influencing decompression
#[derive(Debug, Copy, Clone)]
pub struct DeflateOptions {
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize
}

impl Default for DeflateOptions {
    fn default() -> Self {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: true,
            size_hint:        37000
        }
    }
}

impl DeflateOptions {
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the inbuilt limit and will
    /// return an error if the limit is exceeded
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Set a limit to the internal vector used to store decoded
    /// zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn confirm_checksum(&self) -> bool {
        self.confirm_checksum
    }

    /// Set whether the decoder should confirm a checksum
    /// after decoding
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self {
        self.confirm_checksum = yes;
        self
    }

    /// Get the default size hint for the decompressor
    ///
    /// The decompressor initializes the internal storage for
    /// decompressed bytes with this size
    pub const fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// Set the size hint for the decompressor
    pub fn set_size_hint(mut self, hint: usize) -> Self {
        self.size_hint = hint;
        self
    }
}

/// A deflate decoder instance.
///
/// The decoder manages output buffer as opposed to requiring the
/// caller to provide a pre-allocated buffer, it tracks number of bytes
/// decoded and you can retrieve them via the decode methods.
pub struct DeflateDecoder<'a> {
    data:     &'a [u8],
    position: usize,
    stream:   BitStreamReader<'a>,
    options:  DeflateOptions
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        let options = DeflateOptions::default();

        Self::new_with_options(data, options)
    }

    /// Create new decoder with specified options
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a> {
        DeflateDecoder {
            data,
            position: 0,
            stream: BitStreamReader::new(data),
            options
        }
    }

    /// Decode zlib-encoded data returning the uncompressed bytes.
    ///
    /// The two byte zlib wrapper is validated first, the trailing
    /// Adler-32 is confirmed against the decompressed output when the
    /// `zlib` feature and the [`DeflateOptions`] checksum flag are on.
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        if self.data.len()
            < 2 /* zlib header */
            + 4
        /* adler32 */
        {
            return Err(InflateDecodeErrors::new_with_error(InsufficientData));
        }

        // Zlib flags
        // See https://www.ietf.org/rfc/rfc1950.txt for the RFC
        let cmf = self.data[0];
        let flg = self.data[1];

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;

        // confirm we have the right deflate methods
        if cm != 8 {
            if cm == 15 {
                return Err(InflateDecodeErrors::new_with_error(Generic(
                    "CM of 15 is reserved by the standard, currently don't know how to handle it"
                )));
            }
            return Err(InflateDecodeErrors::new_with_error(GenericStr(format!(
                "Unknown zlib compression method {cm}"
            ))));
        }
        if cinfo > 7 {
            return Err(InflateDecodeErrors::new_with_error(GenericStr(format!(
                "Unknown cinfo `{cinfo}` greater than 7, not allowed"
            ))));
        }
        if (flg >> 5) & 1 == 1 {
            return Err(InflateDecodeErrors::new_with_error(Generic(
                "Preset dictionaries are not supported"
            )));
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            return Err(InflateDecodeErrors::new_with_error(Generic(
                "FCHECK integrity not preserved"
            )));
        }

        self.position = 2;

        let data = self.decode_deflate()?;

        #[cfg(feature = "zlib")]
        if self.options.confirm_checksum {
            use simd_adler32::Adler32;

            // the adler32 sits in the last 4 bytes, big endian
            let mut stored = [0_u8; 4];
            stored.copy_from_slice(&self.data[self.data.len() - 4..]);
            let stored = u32::from_be_bytes(stored);

            let mut hasher = Adler32::new();
            hasher.write(&data);
            let calculated = hasher.finish();

            if stored != calculated {
                return Err(InflateDecodeErrors::new(
                    DecodeErrorStatus::MismatchedAdler(stored, calculated),
                    data
                ));
            }
        }

        Ok(data)
    }

    /// Decode a raw deflate stream returning the uncompressed bytes.
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        let mut out = Vec::with_capacity(self.options.size_hint);

        match self.decode_blocks(&mut out) {
            Ok(()) => Ok(out),
            Err(error) => Err(InflateDecodeErrors::new(error, out))
        }
    }

    fn decode_blocks(&mut self, out: &mut Vec<u8>) -> Result<(), DecodeErrorStatus> {
        // re-read the stream so that we skip bytes read by the zlib
        // wrapper check
        self.stream = BitStreamReader::new(&self.data[self.position..]);

        loop {
            self.stream.refill();

            if self.stream.past_eof() {
                return Err(InsufficientData);
            }

            let is_last_block = self.stream.get_bits(1) == 1;
            let block_type = self.stream.get_bits(2);

            if block_type == DEFLATE_BLOCKTYPE_UNCOMPRESSED {
                self.decode_stored_block(out)?;
            } else if block_type == DEFLATE_BLOCKTYPE_STATIC {
                // the fixed tables are rebuilt per block instead of
                // being cached in shared state, concurrent decodes on
                // different threads must not race on anything
                let litlen_table = HuffmanTable::from_lengths(&fixed_litlen_lengths())?;
                let offset_table = HuffmanTable::from_lengths(&fixed_offset_lengths())?;

                self.decode_huffman_block(&litlen_table, &offset_table, out)?;
            } else if block_type == DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN {
                let (litlen_table, offset_table) = self.read_dynamic_tables()?;

                self.decode_huffman_block(&litlen_table, &offset_table, out)?;
            } else {
                return Err(Generic("Reserved block type 3 in deflate stream"));
            }

            if is_last_block {
                break;
            }
        }
        Ok(())
    }

    /// Uncompressed block: LEN/NLEN then `LEN` bytes copied literally
    /// from the byte aligned input to the output.
    fn decode_stored_block(&mut self, out: &mut Vec<u8>) -> Result<(), DecodeErrorStatus> {
        self.stream.align_to_byte();
        self.stream.refill();

        let len = self.stream.get_bits(16) as usize;
        let nlen = self.stream.get_bits(16) as usize;

        if len != (!nlen & 0xFFFF) {
            return Err(Generic("Len and nlen of stored block do not match"));
        }
        if self.stream.past_eof() {
            return Err(InsufficientData);
        }
        self.check_limit(out.len() + len)?;

        if !self.stream.read_aligned_bytes(out, len) {
            return Err(InsufficientData);
        }
        Ok(())
    }

    /// Dynamic huffman block preamble: codeword lengths for the two
    /// codes, themselves compressed with the precode.
    fn read_dynamic_tables(&mut self) -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus> {
        const COUNT: usize =
            DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS + DEFLATE_MAX_LENS_OVERRUN;

        self.stream.refill();

        let num_litlen_syms = 257 + self.stream.get_bits(5) as usize;
        let num_offset_syms = 1 + self.stream.get_bits(5) as usize;
        let num_explicit_precode_lens = 4 + self.stream.get_bits(4) as usize;

        let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

        for i in DEFLATE_PRECODE_LENS_PERMUTATION
            .iter()
            .take(num_explicit_precode_lens)
        {
            if self.stream.bits_left() < 3 {
                self.stream.refill();
            }
            precode_lens[usize::from(*i)] = self.stream.get_bits(3) as u8;
        }
        if self.stream.past_eof() {
            return Err(InsufficientData);
        }

        let precode_table = HuffmanTable::from_lengths(&precode_lens)?;

        // decode the litlen and offset codeword lengths.
        //
        // the lens array has enough extra space for the worst case
        // overrun of the run-length ops so the fills don't need
        // per-iteration bounds checks
        let mut lens = [0_u8; COUNT];
        let mut i = 0_usize;
        let total = num_litlen_syms + num_offset_syms;

        while i < total {
            if self.stream.past_eof() {
                return Err(InsufficientData);
            }

            let presym = precode_table.decode_symbol(&mut self.stream)?;

            if presym < 16 {
                // explicit codeword length
                lens[i] = presym as u8;
                i += 1;
                continue;
            }

            // run-length encoded codeword lengths
            if self.stream.bits_left() < 7 {
                self.stream.refill();
            }

            if presym == 16 {
                // repeat previous length 3 to 6 times
                if i == 0 {
                    return Err(CorruptData);
                }
                let rep_val = lens[i - 1];
                let rep_count = 3 + self.stream.get_bits(2) as usize;

                lens[i..i + rep_count].fill(rep_val);
                i += rep_count;
            } else if presym == 17 {
                // repeat zero 3 to 10 times, the array is already
                // zeroed
                i += 3 + self.stream.get_bits(3) as usize;
            } else if presym == 18 {
                // repeat zero 11 to 138 times
                i += 11 + self.stream.get_bits(7) as usize;
            } else {
                return Err(CorruptData);
            }
        }
        if i != total {
            return Err(CorruptData);
        }

        let litlen_table = HuffmanTable::from_lengths(&lens[..num_litlen_syms])?;
        let offset_table = HuffmanTable::from_lengths(&lens[num_litlen_syms..total])?;

        Ok((litlen_table, offset_table))
    }

    /// Decode literals and matches until the end of block symbol.
    fn decode_huffman_block(
        &mut self, litlen_table: &HuffmanTable, offset_table: &HuffmanTable, out: &mut Vec<u8>
    ) -> Result<(), DecodeErrorStatus> {
        loop {
            // one refill covers the worst case of a single sequence,
            // 15 litlen bits + 5 length bits + 15 offset bits + 13
            // extra offset bits still leave the buffer non-empty
            self.stream.refill();

            if self.stream.past_eof() {
                return Err(InsufficientData);
            }

            let symbol = litlen_table.decode_symbol(&mut self.stream)?;

            if symbol < 256 {
                self.check_limit(out.len() + 1)?;
                out.push(symbol as u8);
                continue;
            }
            if symbol == 256 {
                // end of block
                return Ok(());
            }

            let length_index = usize::from(symbol - 257);

            if length_index >= DEFLATE_LENGTH_BASE.len() {
                return Err(CorruptData);
            }
            let length = usize::from(DEFLATE_LENGTH_BASE[length_index])
                + self.stream.get_bits(DEFLATE_LENGTH_EXTRA[length_index]) as usize;

            let offset_index = usize::from(offset_table.decode_symbol(&mut self.stream)?);

            if offset_index >= DEFLATE_OFFSET_BASE.len() {
                return Err(CorruptData);
            }
            if self.stream.bits_left() < 13 {
                self.stream.refill();
            }
            let offset = usize::from(DEFLATE_OFFSET_BASE[offset_index])
                + self.stream.get_bits(DEFLATE_OFFSET_EXTRA[offset_index]) as usize;

            if offset > out.len() {
                return Err(CorruptData);
            }
            self.check_limit(out.len() + length)?;

            let match_start = out.len() - offset;

            if offset == 1 {
                // run of one byte, common in images
                let value = out[match_start];
                out.resize(out.len() + length, value);
            } else {
                // overlapping copies are valid and must see the bytes
                // written by their own earlier iterations
                out.reserve(length);
                for idx in 0..length {
                    let byte = out[match_start + idx];
                    out.push(byte);
                }
            }
        }
    }

    fn check_limit(&self, requested: usize) -> Result<(), DecodeErrorStatus> {
        if requested > self.options.limit {
            return Err(DecodeErrorStatus::OutputLimitExceeded(
                self.options.limit,
                requested
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_block() {
        // BFINAL=1, BTYPE=00, then aligned LEN=5, NLEN=!5, "Hello"
        let compressed = [
            0x01, // BFINAL=1, BTYPE=00, padding
            0x05, 0x00, // LEN=5
            0xFA, 0xFF, // NLEN
            b'H', b'e', b'l', b'l', b'o',
        ];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert_eq!(decoder.decode_deflate().unwrap(), b"Hello");
    }

    #[test]
    fn stored_block_empty() {
        let compressed = [0x01, 0x00, 0x00, 0xFF, 0xFF];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert!(decoder.decode_deflate().unwrap().is_empty());
    }

    #[test]
    fn stored_block_len_mismatch() {
        let compressed = [0x01, 0x05, 0x00, 0x00, 0x00, b'H'];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert!(decoder.decode_deflate().is_err());
    }

    #[test]
    fn stored_block_truncated_payload() {
        let compressed = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e'];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert!(decoder.decode_deflate().is_err());
    }

    #[test]
    fn fixed_block_single_literal() {
        // BFINAL=1, BTYPE=01, literal 'A' (codeword 0x71, 8 bits),
        // end of block (7 zero bits)
        let compressed = [0x73, 0x04, 0x00];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert_eq!(decoder.decode_deflate().unwrap(), b"A");
    }

    #[test]
    fn zlib_wrapper_single_literal() {
        // 0x78 0x9C wrapper around the fixed block above plus the
        // adler32 of "A"
        let compressed = [0x78, 0x9C, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert_eq!(decoder.decode_zlib().unwrap(), b"A");
    }

    #[test]
    fn zlib_bad_adler_is_reported() {
        let compressed = [0x78, 0x9C, 0x73, 0x04, 0x00, 0xDE, 0xAD, 0xBE, 0xEF];

        let mut decoder = DeflateDecoder::new(&compressed);
        let err = decoder.decode_zlib().unwrap_err();

        assert!(matches!(
            err.error,
            DecodeErrorStatus::MismatchedAdler(_, _)
        ));
        // the decoded bytes survive in the error
        assert_eq!(err.data, b"A");
    }

    #[test]
    fn zlib_bad_adler_can_be_ignored() {
        let compressed = [0x78, 0x9C, 0x73, 0x04, 0x00, 0xDE, 0xAD, 0xBE, 0xEF];

        let options = DeflateOptions::default().set_confirm_checksum(false);
        let mut decoder = DeflateDecoder::new_with_options(&compressed, options);

        assert_eq!(decoder.decode_zlib().unwrap(), b"A");
    }

    #[test]
    fn zlib_bad_header_magic() {
        // compression method 7 is not deflate
        let compressed = [0x77, 0x01, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];

        let mut decoder = DeflateDecoder::new(&compressed);
        assert!(decoder.decode_zlib().is_err());
    }

    #[test]
    fn output_limit_is_enforced() {
        let compressed = [
            0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o',
        ];

        let options = DeflateOptions::default().set_limit(3);
        let mut decoder = DeflateDecoder::new_with_options(&compressed, options);

        let err = decoder.decode_deflate().unwrap_err();
        assert!(matches!(
            err.error,
            DecodeErrorStatus::OutputLimitExceeded(3, 5)
        ));
    }

    #[test]
    fn empty_input_is_insufficient() {
        let mut decoder = DeflateDecoder::new(&[]);
        assert!(decoder.decode_deflate().is_err());

        let mut decoder = DeflateDecoder::new(&[]);
        assert!(decoder.decode_zlib().is_err());
    }
}
