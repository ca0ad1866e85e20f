//! Property tests: round-trips across random payloads, chunkings and
//! window sizes.

use compressio::prelude::*;
use proptest::prelude::*;

fn deflate_codecs() -> impl Strategy<Value = Codec> {
    prop_oneof![
        Just(Codec::raw_deflate()),
        Just(Codec::zlib()),
        Just(Codec::gzip()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn oneshot_roundtrip(
        codec in deflate_codecs(),
        payload in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        let mut src = ByteBuffer::from_slice(&payload);
        let mut compressed = codec.compress_to_buffer(&mut src).unwrap();
        prop_assert_eq!(src.readable_bytes(), 0);

        let out = codec.decompress_growing(&mut compressed, 1 << 22).unwrap();
        prop_assert_eq!(out.unread(), &payload[..]);
    }

    #[test]
    fn chunked_window_roundtrip(
        codec in deflate_codecs(),
        payload in proptest::collection::vec(any::<u8>(), 1..4096),
        chunk_len in 1usize..512,
        window_len in 32usize..512,
    ) {
        let mut session = codec.compressor();
        session.attach_window(window_len);
        session.start_stream().unwrap();

        let mut compressed = Vec::new();
        for chunk in payload.chunks(chunk_len) {
            let mut src = ByteBuffer::from_slice(chunk);
            session.compress_windowed::<CodecError, _>(&mut src, FlushMode::None, |bytes| {
                compressed.extend_from_slice(bytes);
                Ok(())
            }).unwrap();
        }
        let mut empty = ByteBuffer::with_capacity(0);
        session.compress_windowed::<CodecError, _>(&mut empty, FlushMode::Finish, |bytes| {
            compressed.extend_from_slice(bytes);
            Ok(())
        }).unwrap();
        session.finish_stream().unwrap();

        let mut decomp = codec.decompressor();
        decomp.attach_window(window_len);
        decomp.start_stream().unwrap();
        let mut out = Vec::new();
        let mut src = ByteBuffer::from_slice(&compressed);
        decomp.decompress_windowed::<CodecError, _>(&mut src, |bytes| {
            out.extend_from_slice(bytes);
            Ok(())
        }).unwrap();
        decomp.finish_stream().unwrap();

        prop_assert_eq!(out, payload);
    }

    #[test]
    fn lz4_matching_boundaries_roundtrip(
        payload in proptest::collection::vec(any::<u8>(), 1..16384),
        chunk_len in 1usize..4096,
    ) {
        let codec = Codec::lz4();
        let mut comp = codec.compressor();
        comp.start_stream().unwrap();
        let mut blocks = Vec::new();
        for chunk in payload.chunks(chunk_len) {
            let mut src = ByteBuffer::from_slice(chunk);
            let block = comp.compress_allocating(&mut src, FlushMode::None).unwrap();
            blocks.push((block.into_readable(), chunk.len()));
        }
        comp.finish_stream().unwrap();

        let mut decomp = codec.decompressor();
        decomp.start_stream().unwrap();
        let mut out = Vec::new();
        for (block, plain_len) in &blocks {
            let mut src = ByteBuffer::from_slice(block);
            let mut dst = ByteBuffer::with_capacity(*plain_len);
            decomp.stream_decompress(&mut src, &mut dst).unwrap();
            out.extend_from_slice(dst.unread());
        }
        decomp.finish_stream().unwrap();

        prop_assert_eq!(out, payload);
    }
}
