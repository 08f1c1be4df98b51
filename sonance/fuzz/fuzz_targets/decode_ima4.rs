#![no_main]
use libfuzzer_sys::fuzz_target;
use sonance::core::errors::Error;

fuzz_target!(|data: Vec<u8>| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to select the channel count, and the rest as the stream.
    let n_channels = usize::from(data[0] % 3);

    match sonance_codec_ima4::decode(&data[1..], n_channels) {
        Ok(pcm) => assert_eq!(pcm.len(), (data.len() - 1) / 34 * 128),
        Err(Error::MalformedStream(_)) => (),
        Err(err) => panic!("unexpected error: {}", err),
    }
});
