#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full in-memory framing.
//
// Runs `MessageDecoder::decode_all` over arbitrary bytes, covering the
// preamble, the payload length limit, relayer skipping, type dispatch and
// every body decoder behind it. Consumed lengths must never exceed the
// input.
fuzz_target!(|data: &[u8]| {
    let decoder = stx_decoder::MessageDecoder::default();
    if let Ok((_, consumed)) = decoder.decode(data) {
        assert!(consumed <= data.len());
    }
    let _ = decoder.decode_all(data);
});
