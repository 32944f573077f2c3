//! Property tests: every tagged union written by the reference encoder
//! decodes back to an equal value and consumes exactly its encoding.

use num_bigint::BigUint;
use proptest::prelude::*;
use stx_tests::encode::WireEncode;
use stx_types::{
    AuthField, CoinbasePayload, FungibleConditionCode, HashMode, MultisigSpendingCondition,
    PostCondition, PostConditionPrincipal, PublicKeyEncoding, SinglesigSpendingCondition,
    SpendingCondition, StacksAddress, StxPostCondition, TokenTransferPayload, TransactionPayload,
};
use stx_wire::hash::{ConsensusHash, Hash160, MessageSignature, PublicKeyBytes};
use stx_wire::{ByteCursor, Preamble};

// ── Strategies ────────────────────────────────────────────────────────────────

fn hash160() -> impl Strategy<Value = Hash160> {
    any::<[u8; 20]>().prop_map(Hash160)
}

fn signature() -> impl Strategy<Value = MessageSignature> {
    proptest::collection::vec(any::<u8>(), 65)
        .prop_map(|v| MessageSignature(v.try_into().expect("65 bytes")))
}

fn key_encoding() -> impl Strategy<Value = PublicKeyEncoding> {
    prop::sample::select(PublicKeyEncoding::ALL)
}

fn address() -> impl Strategy<Value = StacksAddress> {
    (any::<u8>(), hash160()).prop_map(|(version, hash160)| StacksAddress { version, hash160 })
}

fn amount() -> impl Strategy<Value = BigUint> {
    any::<u64>().prop_map(BigUint::from)
}

fn preamble() -> impl Strategy<Value = Preamble> {
    (
        (any::<u32>(), any::<u32>(), any::<u32>(), any::<u64>()),
        any::<[u8; 20]>(),
        any::<u64>(),
        any::<[u8; 20]>(),
        any::<u32>(),
        signature(),
        any::<u32>(),
    )
        .prop_map(
            |((peer_version, network_id, seq, height), tip, stable_height, stable, extra, sig, len)| {
                Preamble {
                    peer_version,
                    network_id,
                    seq,
                    burn_block_height: height,
                    burn_consensus_hash: ConsensusHash(tip),
                    burn_stable_block_height: stable_height,
                    burn_stable_consensus_hash: ConsensusHash(stable),
                    additional_data: extra,
                    signature: sig,
                    payload_len: len,
                }
            },
        )
}

fn auth_field() -> impl Strategy<Value = AuthField> {
    prop_oneof![
        (key_encoding(), proptest::collection::vec(any::<u8>(), 33)).prop_map(|(encoding, key)| {
            AuthField::PublicKey {
                encoding,
                key: PublicKeyBytes(key.try_into().expect("33 bytes")),
            }
        }),
        (key_encoding(), signature())
            .prop_map(|(encoding, signature)| AuthField::Signature { encoding, signature }),
    ]
}

fn spending_condition() -> impl Strategy<Value = SpendingCondition> {
    let singlesig = (
        prop::sample::select(vec![HashMode::P2PKH, HashMode::P2WPKH]),
        hash160(),
        any::<u64>(),
        any::<u64>(),
        key_encoding(),
        signature(),
    )
        .prop_map(|(hash_mode, signer, nonce, fee_rate, key_encoding, signature)| {
            SpendingCondition::Singlesig(SinglesigSpendingCondition {
                hash_mode,
                signer,
                nonce,
                fee_rate,
                key_encoding,
                signature,
            })
        });

    let multisig = (
        prop::sample::select(vec![HashMode::P2SH, HashMode::P2WSH]),
        hash160(),
        any::<u64>(),
        any::<u64>(),
        proptest::collection::vec(auth_field(), 0..6),
    )
        .prop_map(|(hash_mode, signer, nonce, fee_rate, fields)| {
            SpendingCondition::Multisig(MultisigSpendingCondition {
                hash_mode,
                signer,
                nonce,
                fee_rate,
                fields,
            })
        });

    prop_oneof![singlesig, multisig]
}

fn principal() -> impl Strategy<Value = PostConditionPrincipal> {
    prop_oneof![
        Just(PostConditionPrincipal::Origin),
        address().prop_map(PostConditionPrincipal::Standard),
        (address(), "[a-zA-Z][a-zA-Z0-9-]{0,39}").prop_map(|(address, contract_name)| {
            PostConditionPrincipal::Contract { address, contract_name }
        }),
    ]
}

fn post_condition() -> impl Strategy<Value = PostCondition> {
    (principal(), prop::sample::select(FungibleConditionCode::ALL), amount()).prop_map(
        |(principal, condition_code, amount)| {
            PostCondition::Stx(StxPostCondition {
                principal,
                condition_code,
                amount,
            })
        },
    )
}

fn payload() -> impl Strategy<Value = TransactionPayload> {
    prop_oneof![
        (address(), amount(), proptest::collection::vec(any::<u8>(), 34)).prop_map(
            |(recipient, amount, memo)| {
                TransactionPayload::TokenTransfer(TokenTransferPayload {
                    recipient,
                    amount,
                    memo: memo.try_into().expect("34 bytes"),
                })
            }
        ),
        any::<[u8; 32]>().prop_map(|bytes| TransactionPayload::Coinbase(CoinbasePayload(bytes))),
    ]
}

// ── Properties ────────────────────────────────────────────────────────────────

macro_rules! assert_roundtrip {
    ($value:expr, $decode:path) => {{
        let value = $value;
        let mut cursor = ByteCursor::new(value.to_wire_bytes());
        let decoded = $decode(&mut cursor).expect("decodes");
        prop_assert_eq!(&decoded, &value);
        prop_assert!(cursor.is_exhausted(), "{} bytes left over", cursor.remaining());
    }};
}

proptest! {
    #[test]
    fn preamble_roundtrip(value in preamble()) {
        assert_roundtrip!(value, Preamble::read_from);
    }

    #[test]
    fn auth_field_roundtrip(value in auth_field()) {
        assert_roundtrip!(value, AuthField::read_from);
    }

    #[test]
    fn spending_condition_roundtrip(value in spending_condition()) {
        assert_roundtrip!(value, SpendingCondition::read_from);
    }

    #[test]
    fn principal_roundtrip(value in principal()) {
        assert_roundtrip!(value, PostConditionPrincipal::read_from);
    }

    #[test]
    fn post_condition_roundtrip(value in post_condition()) {
        assert_roundtrip!(value, PostCondition::read_from);
    }

    #[test]
    fn payload_roundtrip(value in payload()) {
        assert_roundtrip!(value, TransactionPayload::read_from);
    }

    /// Arbitrary bytes never panic the message decoder.
    #[test]
    fn arbitrary_bytes_do_not_panic(bytes in proptest::collection::vec(any::<u8>(), 0..600)) {
        let _ = stx_decoder::MessageDecoder::default().decode(&bytes);
    }
}
