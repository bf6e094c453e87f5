use std::io::prelude::*;

use flate2::Compression;

fn encode_zlib(bytes: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), Compression::new(level));

    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn encode_deflate(bytes: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), Compression::new(level));

    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// Deterministic byte soup, loud enough that every compression level
/// emits dynamic huffman blocks
fn noisy_bytes(len: usize) -> Vec<u8> {
    let mut state = 0x1234_5678_u32;

    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 24) as u8
        })
        .collect()
}

fn payloads() -> Vec<Vec<u8>> {
    vec![
        vec![],
        b"A".to_vec(),
        b"hello world hello world hello world".to_vec(),
        vec![0_u8; 4096],
        b"abcdefgh".repeat(1000),
        noisy_bytes(10_000),
        // long match distances
        {
            let mut v = noisy_bytes(40_000);
            let head = v[..30_000].to_vec();
            v.extend_from_slice(&head);
            v
        },
    ]
}

#[test]
fn zlib_round_trips_match_flate() {
    for payload in payloads() {
        for level in [0, 1, 6, 9] {
            let compressed = encode_zlib(&payload, level);

            let mut decoder = pix_inflate::DeflateDecoder::new(&compressed);
            let decoded = decoder.decode_zlib().unwrap();

            assert_eq!(
                decoded.len(),
                payload.len(),
                "length mismatch at level {level}"
            );
            assert_eq!(decoded, payload, "content mismatch at level {level}");
        }
    }
}

#[test]
fn deflate_round_trips_match_flate() {
    for payload in payloads() {
        for level in [0, 6, 9] {
            let compressed = encode_deflate(&payload, level);

            let mut decoder = pix_inflate::DeflateDecoder::new(&compressed);
            let decoded = decoder.decode_deflate().unwrap();

            assert_eq!(decoded, payload, "content mismatch at level {level}");
        }
    }
}

#[test]
fn truncated_zlib_streams_error_out() {
    let payload = b"abcdefgh".repeat(1000);
    let compressed = encode_zlib(&payload, 6);

    // lop off the adler and some of the stream
    for cut in [compressed.len() / 2, compressed.len() - 5] {
        let mut decoder = pix_inflate::DeflateDecoder::new(&compressed[..cut]);
        assert!(decoder.decode_zlib().is_err(), "cut at {cut} should fail");
    }
}

#[test]
fn corrupting_the_checksum_is_detected() {
    let payload = noisy_bytes(2000);
    let mut compressed = encode_zlib(&payload, 6);

    let last = compressed.len() - 1;
    compressed[last] ^= 0xFF;

    let mut decoder = pix_inflate::DeflateDecoder::new(&compressed);
    let err = decoder.decode_zlib().unwrap_err();

    assert!(matches!(
        err.error,
        pix_inflate::errors::DecodeErrorStatus::MismatchedAdler(_, _)
    ));
    // everything before the checksum decoded fine
    assert_eq!(err.data, payload);
}

#[test]
fn limit_is_respected_for_compressed_data() {
    let payload = vec![7_u8; 100_000];
    let compressed = encode_zlib(&payload, 9);

    let options = pix_inflate::DeflateOptions::default().set_limit(1000);
    let mut decoder = pix_inflate::DeflateDecoder::new_with_options(&compressed, options);

    let err = decoder.decode_zlib().unwrap_err();
    assert!(matches!(
        err.error,
        pix_inflate::errors::DecodeErrorStatus::OutputLimitExceeded(1000, _)
    ));
}
