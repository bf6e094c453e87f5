/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sample width conversions.
//!
//! Raw `data` chunk bytes convert between the three widths the format
//! family uses, signed 8 bit, signed 16 bit and 32 bit float. Scaling
//! goes through the float midpoint the way the original tooling for
//! these files does it.

/// Storage format of one sample, implied by the bits per sample
/// field.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SampleFormat {
    I8,
    I16,
    F32
}

impl SampleFormat {
    /// Map a bits per sample count to a format.
    pub const fn from_bits(bits: u16) -> Option<SampleFormat> {
        match bits {
            8 => Some(SampleFormat::I8),
            16 => Some(SampleFormat::I16),
            32 => Some(SampleFormat::F32),
            _ => None
        }
    }

    /// Bytes one sample occupies.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::I8 => 1,
            SampleFormat::I16 => 2,
            SampleFormat::F32 => 4
        }
    }
}

fn f32_samples(data: &[u8]) -> impl Iterator<Item = f32> + '_ {
    data.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
}

fn i16_samples(data: &[u8]) -> impl Iterator<Item = i16> + '_ {
    data.chunks_exact(2)
        .map(|chunk| i16::from_le_bytes(chunk.try_into().unwrap()))
}

fn i8_samples(data: &[u8]) -> impl Iterator<Item = i8> + '_ {
    data.iter().map(|byte| *byte as i8)
}

/// Convert raw sample bytes to 32 bit float samples in [-1, 1].
pub fn to_f32_samples(data: &[u8], format: SampleFormat) -> Vec<f32> {
    match format {
        SampleFormat::I8 => i8_samples(data).map(|s| f32::from(s) / 127.0).collect(),
        SampleFormat::I16 => i16_samples(data).map(|s| f32::from(s) / 32767.0).collect(),
        SampleFormat::F32 => f32_samples(data).collect()
    }
}

/// Convert raw sample bytes to signed 16 bit samples.
pub fn to_i16_samples(data: &[u8], format: SampleFormat) -> Vec<i16> {
    match format {
        SampleFormat::I8 => i8_samples(data)
            .map(|s| (f32::from(s) / 127.0 * 32767.0) as i16)
            .collect(),
        SampleFormat::I16 => i16_samples(data).collect(),
        SampleFormat::F32 => f32_samples(data).map(|s| (s * 32767.0) as i16).collect()
    }
}

/// Convert raw sample bytes to signed 8 bit samples.
pub fn to_i8_samples(data: &[u8], format: SampleFormat) -> Vec<i8> {
    match format {
        SampleFormat::I8 => i8_samples(data).collect(),
        SampleFormat::I16 => i16_samples(data)
            .map(|s| (f32::from(s) / 32767.0 * 127.0) as i8)
            .collect(),
        SampleFormat::F32 => f32_samples(data).map(|s| (s * 127.0) as i8).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_conversions() {
        let bytes = [0x00, 0x80, 0x7F, 0xFF];

        assert_eq!(
            to_i8_samples(&bytes, SampleFormat::I8),
            vec![0, -128, 127, -1]
        );
        assert_eq!(
            to_i16_samples(&bytes, SampleFormat::I16),
            vec![i16::from_le_bytes([0x00, 0x80]), i16::from_le_bytes([0x7F, 0xFF])]
        );
    }

    #[test]
    fn extremes_scale_across_widths() {
        let loud: Vec<u8> = i16::MAX.to_le_bytes().to_vec();

        assert_eq!(to_i8_samples(&loud, SampleFormat::I16), vec![127]);
        assert_eq!(to_f32_samples(&loud, SampleFormat::I16), vec![1.0]);

        let quiet = [0_u8, 0];
        assert_eq!(to_f32_samples(&quiet, SampleFormat::I16), vec![0.0]);
    }

    #[test]
    fn float_round_trip_through_i16() {
        let samples = [1.0_f32, -1.0, 0.0, 0.5];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        let ints = to_i16_samples(&bytes, SampleFormat::F32);
        assert_eq!(ints, vec![32767, -32767, 0, 16383]);

        let back = to_f32_samples(
            &ints.iter().flat_map(|s| s.to_le_bytes()).collect::<Vec<u8>>(),
            SampleFormat::I16
        );
        assert!((back[0] - 1.0).abs() < 1e-4);
        assert!((back[1] + 1.0).abs() < 1e-4);
    }
}
