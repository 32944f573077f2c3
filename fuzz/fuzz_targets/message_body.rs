#![no_main]

use libfuzzer_sys::fuzz_target;
use stx_types::{StacksHeaderDecoder, StacksMessage};
use stx_wire::ByteCursor;

// Fuzz target: message body starting at the type tag.
//
// Skips the preamble so the fuzzer spends its effort on Blocks and
// Transaction bodies. The cursor must never move past its end.
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data.to_vec());
    let _ = StacksMessage::read_from(&mut cursor, &StacksHeaderDecoder);
    assert!(cursor.position() <= data.len());
});
