#![no_main]

use libfuzzer_sys::fuzz_target;
use stx_types::SpendingCondition;
use stx_wire::ByteCursor;

// Fuzz target: spending conditions, including multisig auth-field lists
// with attacker-chosen counts.
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data.to_vec());
    if let Ok(SpendingCondition::Multisig(multisig)) = SpendingCondition::read_from(&mut cursor) {
        assert!(multisig.fields.len() * 34 <= data.len());
    }
});
