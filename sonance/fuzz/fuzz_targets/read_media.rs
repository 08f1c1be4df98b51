#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use sonance::core::source::ProviderOptions;
use sonance::SampleDecoder;

fuzz_target!(|data: Vec<u8>| {
    let options = ProviderOptions { max_payload_len: 1 << 20 };

    if let Ok(media) = sonance_format_riff::read_media_from(Cursor::new(data), &options) {
        let _ = SampleDecoder::new().decode_media(media);
    }
});
