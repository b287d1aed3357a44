#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the header claims
    let _ = zenbmp::ImageInfo::from_bytes(data);

    let limits = zenbmp::Limits {
        max_bitmap_bytes: 16 << 20,
        ..Default::default()
    };
    let _ = zenbmp::DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(data);
});
