/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use pix_core::bytestream::{PxByteReaderTrait, PxReader};
use pix_core::options::DecoderOptions;

use crate::errors::WavDecodeErrors;
use crate::samples::SampleFormat;

const RIFF: &[u8; 4] = b"RIFF";
const WAVE: &[u8; 4] = b"WAVE";
const FMT: &[u8; 4] = b"fmt ";
const DATA: &[u8; 4] = b"data";

/// PCM format tag of the `fmt ` chunk, the only one supported.
const FORMAT_PCM: u16 = 1;

/// A barebones WAVE reader.
///
/// Reads the fixed RIFF → WAVE → `fmt ` → `data` layout, every check
/// here is fatal since the container has no self-describing structure
/// to resynchronize on.
pub struct WavDecoder<T>
where
    T: PxByteReaderTrait
{
    stream:          PxReader<T>,
    options:         DecoderOptions,
    decoded_headers: bool,

    channels:          u16,
    sample_rate:       u32,
    avg_bytes_per_sec: u32,
    block_align:       u16,
    bits_per_sample:   u16,
    data_size:         usize
}

impl<T> WavDecoder<T>
where
    T: PxByteReaderTrait
{
    /// Create a new decoder that reads a WAVE file from `data`.
    pub fn new(data: T) -> WavDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Creates a new decoder with custom options.
    pub fn new_with_options(data: T, options: DecoderOptions) -> WavDecoder<T> {
        WavDecoder {
            stream: PxReader::new(data),
            options,
            decoded_headers: false,
            channels: 0,
            sample_rate: 0,
            avg_bytes_per_sec: 0,
            block_align: 0,
            bits_per_sample: 0,
            data_size: 0
        }
    }

    fn expect_tag(&mut self, expected: &'static [u8; 4]) -> Result<(), WavDecodeErrors> {
        let found = self.stream.read_fixed_bytes_or_error::<4>()?;

        if &found != expected {
            return Err(WavDecodeErrors::WrongMagicBytes(expected, found));
        }
        Ok(())
    }

    /// Parse the RIFF wrapper and the `fmt ` chunk, stopping at the
    /// head of the sample data.
    pub fn decode_headers(&mut self) -> Result<(), WavDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        self.expect_tag(RIFF)?;
        // file size minus the RIFF and WAVE tags
        let _riff_size = self.stream.get_u32_le_err()?;
        self.expect_tag(WAVE)?;

        self.expect_tag(FMT)?;
        let fmt_size = self.stream.get_u32_le_err()?;

        let format_tag = self.stream.get_u16_le_err()?;
        if format_tag != FORMAT_PCM {
            return Err(WavDecodeErrors::UnsupportedFormatTag(format_tag));
        }

        self.channels = self.stream.get_u16_le_err()?;
        self.sample_rate = self.stream.get_u32_le_err()?;
        self.avg_bytes_per_sec = self.stream.get_u32_le_err()?;
        self.block_align = self.stream.get_u16_le_err()?;
        self.bits_per_sample = self.stream.get_u16_le_err()?;

        // a fmt chunk may carry an extension we have no use for
        if fmt_size > 16 {
            if self.options.strict_mode() {
                return Err(WavDecodeErrors::Generic(
                    "fmt chunk carries an extension, not plain PCM"
                ));
            }
            self.stream.skip(fmt_size as usize - 16)?;
        }

        self.expect_tag(DATA)?;
        self.data_size = self.stream.get_u32_le_err()? as usize;

        self.decoded_headers = true;

        trace!("Channels: {}", self.channels);
        trace!("Samples per second: {}", self.sample_rate);
        trace!("Avg bytes per second: {}", self.avg_bytes_per_sec);
        trace!("Block align: {}", self.block_align);
        trace!("Bits per sample: {}", self.bits_per_sample);
        trace!("Data chunk size: {}", self.data_size);

        Ok(())
    }

    /// Read the raw PCM sample bytes.
    ///
    /// Unlike the sprite decoder there is no tolerance for truncation
    /// here, a short data chunk fails the whole load.
    pub fn decode(&mut self) -> Result<Vec<u8>, WavDecodeErrors> {
        self.decode_headers()?;

        let mut data = vec![0_u8; self.data_size];
        let read = self.stream.read_bytes(&mut data)?;

        if read != self.data_size {
            return Err(WavDecodeErrors::TruncatedSampleData(self.data_size, read));
        }
        Ok(data)
    }

    /// Channel count, or None if the headers haven't been decoded.
    pub const fn channels(&self) -> Option<u16> {
        if self.decoded_headers {
            return Some(self.channels);
        }
        None
    }

    /// Sample rate in Hz, or None if the headers haven't been decoded.
    pub const fn sample_rate(&self) -> Option<u32> {
        if self.decoded_headers {
            return Some(self.sample_rate);
        }
        None
    }

    /// Bits per sample, or None if the headers haven't been decoded.
    pub const fn bits_per_sample(&self) -> Option<u16> {
        if self.decoded_headers {
            return Some(self.bits_per_sample);
        }
        None
    }

    /// Bytes one frame of samples across all channels occupies.
    pub const fn block_align(&self) -> Option<u16> {
        if self.decoded_headers {
            return Some(self.block_align);
        }
        None
    }

    /// Per channel sample count of the data chunk.
    pub fn sample_count(&self) -> Option<usize> {
        if self.decoded_headers && self.block_align > 0 {
            return Some(self.data_size / usize::from(self.block_align));
        }
        None
    }

    /// The sample format implied by bits per sample, or None for
    /// unknown widths or undecoded headers.
    pub fn sample_format(&self) -> Option<SampleFormat> {
        if self.decoded_headers {
            return SampleFormat::from_bits(self.bits_per_sample);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pix_core::bytestream::PxCursor;

    use super::*;

    fn wav_bytes(
        channels: u16, sample_rate: u32, bits_per_sample: u16, data: &[u8]
    ) -> Vec<u8> {
        let block_align = channels * bits_per_sample / 8;

        let mut out = vec![];
        out.extend(b"RIFF");
        out.extend((36 + data.len() as u32).to_le_bytes());
        out.extend(b"WAVE");

        out.extend(b"fmt ");
        out.extend(16_u32.to_le_bytes());
        out.extend(1_u16.to_le_bytes()); // PCM
        out.extend(channels.to_le_bytes());
        out.extend(sample_rate.to_le_bytes());
        out.extend((sample_rate * u32::from(block_align)).to_le_bytes());
        out.extend(block_align.to_le_bytes());
        out.extend(bits_per_sample.to_le_bytes());

        out.extend(b"data");
        out.extend((data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn plain_pcm_decodes() {
        let samples: Vec<u8> = (0..64).collect();
        let file = wav_bytes(2, 22050, 16, &samples);

        let mut decoder = WavDecoder::new(PxCursor::new(&file));
        let decoded = decoder.decode().unwrap();

        assert_eq!(decoded, samples);
        assert_eq!(decoder.channels(), Some(2));
        assert_eq!(decoder.sample_rate(), Some(22050));
        assert_eq!(decoder.bits_per_sample(), Some(16));
        assert_eq!(decoder.block_align(), Some(4));
        // 64 bytes, 4 bytes per frame
        assert_eq!(decoder.sample_count(), Some(16));
        assert_eq!(decoder.sample_format(), Some(SampleFormat::I16));
    }

    #[test]
    fn fmt_extensions_are_skipped() {
        let samples = [1_u8, 2, 3, 4];
        let mut file = wav_bytes(1, 8000, 8, &samples);

        // grow the fmt chunk by two extension bytes
        file[16..20].copy_from_slice(&18_u32.to_le_bytes());
        file.splice(36..36, [0_u8, 0]);

        let mut decoder = WavDecoder::new(PxCursor::new(&file));
        assert_eq!(decoder.decode().unwrap(), samples);
    }

    #[test]
    fn missing_riff_magic_fails() {
        let mut file = wav_bytes(1, 8000, 8, &[0; 4]);
        file[0] = b'X';

        let mut decoder = WavDecoder::new(PxCursor::new(&file));
        assert!(matches!(
            decoder.decode(),
            Err(WavDecodeErrors::WrongMagicBytes(b"RIFF", _))
        ));
    }

    #[test]
    fn non_pcm_format_fails() {
        let mut file = wav_bytes(1, 8000, 8, &[0; 4]);
        // format tag lives right after the fmt chunk size
        file[20..22].copy_from_slice(&3_u16.to_le_bytes());

        let mut decoder = WavDecoder::new(PxCursor::new(&file));
        assert!(matches!(
            decoder.decode(),
            Err(WavDecodeErrors::UnsupportedFormatTag(3))
        ));
    }

    #[test]
    fn truncated_sample_data_fails() {
        let samples = [7_u8; 32];
        let mut file = wav_bytes(1, 8000, 8, &samples);
        file.truncate(file.len() - 10);

        let mut decoder = WavDecoder::new(PxCursor::new(&file));
        assert!(matches!(
            decoder.decode(),
            Err(WavDecodeErrors::TruncatedSampleData(32, 22))
        ));
    }
}
