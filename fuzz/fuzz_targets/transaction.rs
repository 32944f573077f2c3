#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: a single transaction from raw bytes.
fuzz_target!(|data: &[u8]| {
    let _ = stx_types::StacksTransaction::decode(data);
});
