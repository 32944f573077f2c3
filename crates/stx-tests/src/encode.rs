//! Reference encoder: the inverse of every `read_from` in `stx-wire` and
//! `stx-types`.
//!
//! Only test code uses this. Encoding a value the decoder cannot produce
//! (an amount wider than 8 bytes, a contract name over 255 bytes) panics.

use num_bigint::BigUint;
use stx_decoder::DecodedMessage;
use stx_types::post_condition::AMOUNT_ENCODED_SIZE;
use stx_types::{
    AuthField, PostCondition, PostConditionPrincipal, SpendingCondition, StacksAddress,
    StacksBlock, StacksBlockHeader, StacksMessage, StacksMessageTypeId, StacksTransaction,
    TransactionAuth, TransactionPayload,
};
use stx_wire::relay::RELAY_DATA_ENCODED_SIZE;
use stx_wire::{Preamble, PREAMBLE_PADDING_ENCODED_SIZE};

/// Values that can be written in their wire layout.
pub trait WireEncode {
    fn encode_to(&self, buf: &mut Vec<u8>);

    fn to_wire_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf);
        buf
    }
}

/// 8-byte big-endian amount.
pub fn encode_amount(amount: &BigUint, buf: &mut Vec<u8>) {
    let digits = amount.to_bytes_be();
    assert!(
        digits.len() <= AMOUNT_ENCODED_SIZE,
        "amount {amount} does not fit in {AMOUNT_ENCODED_SIZE} bytes"
    );
    buf.extend(std::iter::repeat_n(0, AMOUNT_ENCODED_SIZE - digits.len()));
    buf.extend_from_slice(&digits);
}

impl WireEncode for Preamble {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.peer_version.to_be_bytes());
        buf.extend_from_slice(&self.network_id.to_be_bytes());
        buf.extend_from_slice(&self.seq.to_be_bytes());
        buf.extend_from_slice(&self.burn_block_height.to_be_bytes());
        buf.extend_from_slice(self.burn_consensus_hash.as_bytes());
        buf.extend_from_slice(&self.burn_stable_block_height.to_be_bytes());
        buf.extend_from_slice(self.burn_stable_consensus_hash.as_bytes());
        buf.extend_from_slice(&self.additional_data.to_be_bytes());
        buf.extend_from_slice(self.signature.as_bytes());
        buf.extend_from_slice(&self.payload_len.to_be_bytes());
        buf.extend_from_slice(&[0; PREAMBLE_PADDING_ENCODED_SIZE]);
    }
}

impl WireEncode for StacksAddress {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.version);
        buf.extend_from_slice(self.hash160.as_bytes());
    }
}

impl WireEncode for AuthField {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.field_type().to_wire_byte());
        buf.extend_from_slice(self.body());
    }
}

impl WireEncode for SpendingCondition {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.hash_mode().to_wire_byte());
        buf.extend_from_slice(self.signer().as_bytes());
        buf.extend_from_slice(&self.nonce().to_be_bytes());
        buf.extend_from_slice(&self.fee_rate().to_be_bytes());
        match self {
            SpendingCondition::Singlesig(c) => {
                buf.push(c.key_encoding.to_wire_byte());
                buf.extend_from_slice(c.signature.as_bytes());
            }
            SpendingCondition::Multisig(c) => {
                let count = u32::try_from(c.fields.len()).expect("auth field count fits u32");
                buf.extend_from_slice(&count.to_be_bytes());
                for field in &c.fields {
                    field.encode_to(buf);
                }
            }
        }
    }
}

impl WireEncode for TransactionAuth {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.auth_type().to_wire_byte());
        self.origin().encode_to(buf);
        if let Some(sponsor) = self.sponsor() {
            sponsor.encode_to(buf);
        }
    }
}

impl WireEncode for PostConditionPrincipal {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.principal_id().to_wire_byte());
        match self {
            PostConditionPrincipal::Origin => {}
            PostConditionPrincipal::Standard(address) => address.encode_to(buf),
            PostConditionPrincipal::Contract {
                address,
                contract_name,
            } => {
                address.encode_to(buf);
                let len = u8::try_from(contract_name.len()).expect("contract name fits u8 length");
                buf.push(len);
                buf.extend_from_slice(contract_name.as_bytes());
            }
        }
    }
}

impl WireEncode for PostCondition {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.asset_info_id().to_wire_byte());
        match self {
            PostCondition::Stx(stx) => {
                stx.principal.encode_to(buf);
                buf.push(stx.condition_code.to_wire_byte());
                encode_amount(&stx.amount, buf);
            }
            other => panic!("no encoder for {:?}", other.asset_info_id()),
        }
    }
}

impl WireEncode for TransactionPayload {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.payload_id().to_wire_byte());
        match self {
            TransactionPayload::TokenTransfer(transfer) => {
                transfer.recipient.encode_to(buf);
                encode_amount(&transfer.amount, buf);
                buf.extend_from_slice(&transfer.memo);
            }
            TransactionPayload::Coinbase(coinbase) => buf.extend_from_slice(&coinbase.0),
            other => panic!("no encoder for {:?}", other.payload_id()),
        }
    }
}

impl WireEncode for StacksTransaction {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.version.to_wire_byte());
        buf.extend_from_slice(&self.chain_id.to_be_bytes());
        self.auth.encode_to(buf);
        buf.push(self.anchor_mode.to_wire_byte());
        buf.push(self.post_condition_mode.to_wire_byte());
        encode_list(&self.post_conditions, buf);
        self.payload.encode_to(buf);
    }
}

impl WireEncode for StacksBlockHeader {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.version);
        buf.extend_from_slice(&self.total_work.burn.to_be_bytes());
        buf.extend_from_slice(&self.total_work.work.to_be_bytes());
        buf.extend_from_slice(self.proof.as_bytes());
        buf.extend_from_slice(self.parent_block.as_bytes());
        buf.extend_from_slice(self.parent_microblock.as_bytes());
        buf.extend_from_slice(&self.parent_microblock_sequence.to_be_bytes());
        buf.extend_from_slice(self.tx_merkle_root.as_bytes());
        buf.extend_from_slice(self.state_index_root.as_bytes());
        buf.extend_from_slice(self.microblock_pubkey_hash.as_bytes());
    }
}

impl WireEncode for StacksBlock {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        self.header.encode_to(buf);
        encode_list(&self.txs, buf);
    }
}

impl WireEncode for StacksMessage {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.type_id().to_wire_byte());
        match self {
            StacksMessage::Blocks(blocks) => encode_list(blocks, buf),
            StacksMessage::Transaction(tx) => tx.encode_to(buf),
            other => panic!("no encoder for {:?}", other.type_id()),
        }
    }
}

impl WireEncode for DecodedMessage {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        let body = self.message.to_wire_bytes();
        frame_to(&self.preamble, self.relayers, &body, buf);
    }
}

/// u32 count followed by each element.
pub fn encode_list<T: WireEncode>(items: &[T], buf: &mut Vec<u8>) {
    let count = u32::try_from(items.len()).expect("list length fits u32");
    buf.extend_from_slice(&count.to_be_bytes());
    for item in items {
        item.encode_to(buf);
    }
}

/// Frame a message body (type tag onward) behind a preamble and `relayers`
/// zero-filled relay records. `payload_len` is filled in from the body.
pub fn frame(preamble: &Preamble, relayers: u32, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    frame_to(preamble, relayers, body, &mut buf);
    buf
}

fn frame_to(preamble: &Preamble, relayers: u32, body: &[u8], buf: &mut Vec<u8>) {
    let relay_len = relayers as usize * RELAY_DATA_ENCODED_SIZE;
    let payload_len = u32::try_from(4 + relay_len + body.len()).expect("payload fits u32");
    Preamble {
        payload_len,
        ..preamble.clone()
    }
    .encode_to(buf);
    buf.extend_from_slice(&relayers.to_be_bytes());
    buf.extend(std::iter::repeat_n(0, relay_len));
    buf.extend_from_slice(body);
}

/// Frame a bare message-type tag with no body, as sent for messages the
/// decoder does not cover.
pub fn frame_tag(preamble: &Preamble, type_id: StacksMessageTypeId) -> Vec<u8> {
    frame(preamble, 0, &[type_id.to_wire_byte()])
}

/// Lowercase hex of `bytes`, for assertion messages.
pub fn hex_dump(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
