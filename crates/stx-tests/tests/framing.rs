//! Message framing: preamble, relayer skipping and type-tag dispatch.
//!
//! Every one of the sixteen message types is exercised individually. The
//! two decoded types must round-trip through the reference encoder; the
//! other fourteen must be reported as not implemented, by name. Any tag
//! outside the defined set is a parsing error instead.

use stx_decoder::{DecodeError, DecodeErrorKind, DecoderConfig, MessageDecoder};
use stx_tests::encode::{self, WireEncode};
use stx_tests::fixtures;
use stx_types::{StacksMessage, StacksMessageTypeId, TypeError};
use stx_wire::PREAMBLE_ENCODED_SIZE;

fn decode(bytes: &[u8]) -> Result<stx_decoder::DecodedMessage, DecodeError> {
    MessageDecoder::default().decode(bytes).map(|(decoded, _)| decoded)
}

// ── Concrete scenario ─────────────────────────────────────────────────────────

#[test]
fn ping_with_five_byte_payload_is_not_implemented() {
    let mut bytes = fixtures::preamble(1).to_wire_bytes();
    // payload_len occupies bytes 137..141.
    bytes[137..141].copy_from_slice(&5u32.to_be_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0, 13]);

    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::NotImplemented);
    assert!(err.to_string().contains("Ping"), "got: {err}");
}

// ── Tag exhaustiveness ────────────────────────────────────────────────────────

#[test]
fn blocks_message_decodes() {
    let message = StacksMessage::Blocks(vec![
        fixtures::block(1, vec![fixtures::coinbase_tx()]),
        fixtures::block(2, vec![fixtures::token_transfer_tx(500), fixtures::coinbase_tx()]),
    ]);
    let bytes = encode::frame(&fixtures::preamble(2), 0, &message.to_wire_bytes());

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.message, message);
    assert_eq!(decoded.message.type_id(), StacksMessageTypeId::Blocks);
}

#[test]
fn transaction_message_decodes() {
    let message = StacksMessage::Transaction(fixtures::token_transfer_tx(12_000));
    let bytes = encode::frame(&fixtures::preamble(3), 0, &message.to_wire_bytes());

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.message, message);
}

#[test]
fn every_other_type_is_not_implemented_by_name() {
    let undecoded = StacksMessageTypeId::ALL
        .iter()
        .copied()
        .filter(|t| !matches!(t, StacksMessageTypeId::Blocks | StacksMessageTypeId::Transaction));

    let mut seen = 0;
    for type_id in undecoded {
        let bytes = encode::frame_tag(&fixtures::preamble(0), type_id);
        match decode(&bytes) {
            Err(DecodeError::Type(TypeError::NotImplemented { variant, .. })) => {
                assert_eq!(variant, type_id.name());
            }
            other => panic!("{type_id}: expected NotImplemented, got {other:?}"),
        }
        seen += 1;
    }
    assert_eq!(seen, 14);
}

#[test]
fn reserved_tag_is_recognized() {
    let bytes = encode::frame(&fixtures::preamble(0), 0, &[255]);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::NotImplemented);
    assert!(err.to_string().contains("Reserved"));
}

#[test]
fn undefined_tags_are_parsing_errors() {
    for tag in 15u8..=254 {
        let bytes = encode::frame(&fixtures::preamble(0), 0, &[tag]);
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::MessageParsing, "tag {tag}");
        assert!(matches!(
            err,
            DecodeError::Type(TypeError::InvalidEnumValue { value, .. }) if value == tag
        ));
    }
}

// ── Relayers ──────────────────────────────────────────────────────────────────

#[test]
fn relayer_records_are_skipped() {
    let message = StacksMessage::Transaction(fixtures::coinbase_tx());
    let bytes = encode::frame(&fixtures::preamble(4), 3, &message.to_wire_bytes());

    let (decoded, consumed) = MessageDecoder::default().decode(&bytes).unwrap();
    assert_eq!(decoded.relayers, 3);
    assert_eq!(decoded.message, message);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn relayer_count_past_payload_underflows() {
    let mut bytes = fixtures::preamble(0).to_wire_bytes();
    bytes[137..141].copy_from_slice(&8u32.to_be_bytes());
    bytes.extend_from_slice(&1u32.to_be_bytes());
    bytes.extend_from_slice(&[0; 4]);

    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::CursorUnderflow);
}

// ── Sequences ─────────────────────────────────────────────────────────────────

#[test]
fn decode_all_preserves_order_and_envelopes() {
    let mut bytes = Vec::new();
    for seq in 0..4 {
        let tx = fixtures::token_transfer_tx(u64::from(seq) * 10);
        let message = StacksMessage::Transaction(tx);
        bytes.extend(encode::frame(&fixtures::preamble(seq), seq, &message.to_wire_bytes()));
    }

    let messages = MessageDecoder::default().decode_all(&bytes).unwrap();
    assert_eq!(messages.len(), 4);
    for (seq, decoded) in (0u32..).zip(&messages) {
        assert_eq!(decoded.preamble.seq, seq);
        assert_eq!(decoded.relayers, seq);
        assert_eq!(decoded.preamble.burn_block_height, 680_000);
    }
}

#[test]
fn decoded_envelope_reencodes_identically() {
    let message = StacksMessage::Blocks(vec![fixtures::block(0, Vec::new())]);
    let bytes = encode::frame(&fixtures::preamble(9), 2, &message.to_wire_bytes());

    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.to_wire_bytes(),
        bytes,
        "re-encoded:\n{}\noriginal:\n{}",
        encode::hex_dump(&decoded.to_wire_bytes()),
        encode::hex_dump(&bytes)
    );
}

// ── Limits ────────────────────────────────────────────────────────────────────

#[test]
fn payload_limit_is_configurable() {
    let message = StacksMessage::Transaction(fixtures::coinbase_tx());
    let bytes = encode::frame(&fixtures::preamble(0), 0, &message.to_wire_bytes());
    let payload_len = bytes.len() - PREAMBLE_ENCODED_SIZE;

    let exact = u32::try_from(payload_len).unwrap();
    assert!(MessageDecoder::new(DecoderConfig::default().with_max_payload_len(exact))
        .decode(&bytes)
        .is_ok());

    let err = MessageDecoder::new(DecoderConfig::default().with_max_payload_len(exact - 1))
        .decode(&bytes)
        .unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::LimitExceeded);
}
