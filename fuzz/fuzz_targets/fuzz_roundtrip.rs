#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits {
        max_bitmap_bytes: 16 << 20,
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new().with_limits(&limits).decode_bytes(data) else {
        return;
    };

    let reencoded = encode(&decoded).expect("decoded bitmap must re-encode");
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
});
