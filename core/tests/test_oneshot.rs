//! One-shot facade round-trips and the sized-scenario cases.

use compressio::prelude::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 50%-random content: odd positions random, even positions constant.
fn half_random(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|i| if i % 2 == 0 { 0x42 } else { rng.gen() })
        .collect()
}

fn roundtrip(codec: &Codec, payload: &[u8]) {
    let mut src = ByteBuffer::from_slice(payload);
    let mut compressed = codec
        .compress_to_buffer(&mut src)
        .expect("compression should succeed");
    assert_eq!(src.readable_bytes(), 0, "source fully consumed");

    let out = codec
        .decompress_growing(&mut compressed, 16 * 1024 * 1024)
        .expect("decompression should succeed");
    assert_eq!(out.unread(), payload, "round-trip must be exact");
}

#[test]
fn roundtrip_all_codecs_whole_buffer() {
    let payload = half_random(16000, 7);
    for codec in [
        Codec::raw_deflate(),
        Codec::zlib(),
        Codec::gzip(),
        Codec::lz4(),
    ] {
        roundtrip(&codec, &payload);
    }
}

#[test]
fn roundtrip_empty_input() {
    for codec in [Codec::raw_deflate(), Codec::zlib(), Codec::gzip()] {
        roundtrip(&codec, &[]);
    }
}

#[test]
fn roundtrip_into_caller_supplied_destination() {
    let payload = half_random(4096, 11);
    let codec = Codec::zlib();

    let mut src = ByteBuffer::from_slice(&payload);
    let mut compressed = ByteBuffer::with_capacity(8192);
    codec
        .compress(&mut src, &mut compressed)
        .expect("8 KiB is enough for 4 KiB of half-random input");

    let mut out = ByteBuffer::with_capacity(payload.len());
    codec
        .decompress(&mut compressed, &mut out)
        .expect("exactly sized destination must suffice");
    assert_eq!(out.unread(), &payload[..]);
}

#[test]
fn scenario_deflate_16000_bytes_allocating_path() {
    let payload = half_random(16000, 3);
    let codec = Codec::raw_deflate();

    let mut src = ByteBuffer::from_slice(&payload);
    let mut compressed = codec.compress_to_buffer(&mut src).expect("one-shot compress");

    let out = codec
        .decompress_growing(&mut compressed, 1 << 20)
        .expect("one-shot decompress");
    assert_eq!(out.unread(), &payload[..]);
}

#[test]
fn scenario_16_byte_destination_overflows_then_raw_retry_recovers() {
    let payload = half_random(16000, 3);
    let codec = Codec::raw_deflate();

    // One-shot into a 16-byte destination must overflow.
    let mut src = ByteBuffer::from_slice(&payload);
    let mut tiny = ByteBuffer::with_capacity(16);
    match codec.compress(&mut src, &mut tiny) {
        Err(CodecError::BufferOverflow) => {}
        other => panic!("expected BufferOverflow, got {other:?}"),
    }

    // Raw retry: keep the partial 16 bytes, keep feeding the remainder
    // into fresh destinations. No buffer is ever discarded.
    let mut session = codec.compressor();
    session.start_stream().unwrap();
    let mut src = ByteBuffer::from_slice(&payload);
    let mut parts: Vec<ByteBuffer> = Vec::new();
    let mut first = ByteBuffer::with_capacity(16);
    let mut step = session.stream_compress(&mut src, &mut first, FlushMode::Finish);
    parts.push(first);
    while let Err(CodecError::BufferOverflow) = step {
        let mut next = ByteBuffer::with_capacity(512);
        step = session.stream_compress(&mut src, &mut next, FlushMode::Finish);
        parts.push(next);
    }
    step.expect("retry loop must converge");
    session.finish_stream().unwrap();

    let total: usize = parts.iter().map(ByteBuffer::readable_bytes).sum();
    let mut compressed = ByteBuffer::with_capacity(total);
    for part in &mut parts {
        compressed.append_from(part);
    }

    let out = codec
        .decompress_growing(&mut compressed, 1 << 20)
        .expect("concatenated retry output must decompress");
    assert_eq!(out.unread(), &payload[..]);
}

#[test]
fn wrong_algorithm_is_corrupt_data_not_silence() {
    let payload = half_random(1024, 19);
    let mut src = ByteBuffer::from_slice(&payload);
    let mut gzipped = Codec::gzip().compress_to_buffer(&mut src).unwrap();

    match Codec::raw_deflate().decompress_growing(&mut gzipped, 1 << 20) {
        Err(CodecError::CorruptData { codec, .. }) => assert_eq!(codec, "deflate"),
        other => panic!("expected CorruptData, got {other:?}"),
    }
}

#[test]
fn garbage_input_is_corrupt_data() {
    let mut rng = StdRng::seed_from_u64(23);
    let garbage: Vec<u8> = (0..1024).map(|_| rng.gen()).collect();
    let mut src = ByteBuffer::from_slice(&garbage);
    match Codec::zlib().decompress_growing(&mut src, 1 << 20) {
        Err(CodecError::CorruptData { .. }) => {}
        other => panic!("expected CorruptData, got {other:?}"),
    }
}

#[test]
fn growing_decompression_respects_max_size_cap() {
    // Highly compressible payload so the plaintext dwarfs the input.
    let payload = vec![0u8; 256 * 1024];
    let mut src = ByteBuffer::from_slice(&payload);
    let mut compressed = Codec::zlib().compress_to_buffer(&mut src).unwrap();

    match Codec::zlib().decompress_growing(&mut compressed, 1000) {
        Err(CodecError::BufferOverflow) => {}
        other => panic!("expected BufferOverflow at the cap, got {other:?}"),
    }
}
