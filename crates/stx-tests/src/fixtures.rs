//! Ready-made protocol values.

use num_bigint::BigUint;
use stx_types::address::address_version;
use stx_types::{
    AuthField, CoinbasePayload, FungibleConditionCode, HashMode, MultisigSpendingCondition,
    PostCondition, PostConditionMode, PostConditionPrincipal, PublicKeyEncoding,
    SinglesigSpendingCondition, SpendingCondition, StacksAddress, StacksBlock, StacksBlockHeader,
    StacksTransaction, StacksWorkScore, StxPostCondition, TokenTransferPayload,
    TransactionAnchorMode, TransactionAuth, TransactionPayload, TransactionVersion,
};
use stx_wire::Preamble;
use stx_wire::hash::{ConsensusHash, Hash160, Hash32, MessageSignature, PublicKeyBytes, VrfProof};

/// Mainnet chain id.
pub const MAINNET_CHAIN_ID: u32 = 0x0000_0001;

/// A preamble with recognizable field values. `payload_len` is zero;
/// [`encode::frame`](crate::encode::frame) fills it in.
pub fn preamble(seq: u32) -> Preamble {
    Preamble {
        peer_version: 0x1800_0000,
        network_id: 0x0000_0001,
        seq,
        burn_block_height: 680_000,
        burn_consensus_hash: ConsensusHash([0x11; 20]),
        burn_stable_block_height: 679_993,
        burn_stable_consensus_hash: ConsensusHash([0x22; 20]),
        additional_data: 0,
        signature: MessageSignature([0x33; 65]),
        payload_len: 0,
    }
}

pub fn address(fill: u8) -> StacksAddress {
    StacksAddress {
        version: address_version::MAINNET_SINGLESIG,
        hash160: Hash160([fill; 20]),
    }
}

/// P2PKH single-sig origin.
pub fn singlesig(nonce: u64) -> SpendingCondition {
    SpendingCondition::Singlesig(SinglesigSpendingCondition {
        hash_mode: HashMode::P2PKH,
        signer: Hash160([0xA1; 20]),
        nonce,
        fee_rate: 180,
        key_encoding: PublicKeyEncoding::Compressed,
        signature: MessageSignature([0x5E; 65]),
    })
}

/// 2-of-2 P2SH multisig: one compressed public key, one uncompressed
/// signature.
pub fn multisig(nonce: u64) -> SpendingCondition {
    SpendingCondition::Multisig(MultisigSpendingCondition {
        hash_mode: HashMode::P2SH,
        signer: Hash160([0xB2; 20]),
        nonce,
        fee_rate: 300,
        fields: vec![
            AuthField::PublicKey {
                encoding: PublicKeyEncoding::Compressed,
                key: PublicKeyBytes([0x02; 33]),
            },
            AuthField::Signature {
                encoding: PublicKeyEncoding::Uncompressed,
                signature: MessageSignature([0x7C; 65]),
            },
        ],
    })
}

pub fn coinbase_tx() -> StacksTransaction {
    StacksTransaction {
        version: TransactionVersion::Mainnet,
        chain_id: MAINNET_CHAIN_ID,
        auth: TransactionAuth::Standard(singlesig(0)),
        anchor_mode: TransactionAnchorMode::OnChainOnly,
        post_condition_mode: PostConditionMode::Deny,
        post_conditions: Vec::new(),
        payload: TransactionPayload::Coinbase(CoinbasePayload([0; 32])),
    }
}

/// Sponsored token transfer guarded by two STX post-conditions.
pub fn token_transfer_tx(amount: u64) -> StacksTransaction {
    let mut memo = [0u8; 34];
    memo[..4].copy_from_slice(b"rent");

    StacksTransaction {
        version: TransactionVersion::Testnet,
        chain_id: 0x8000_0000,
        auth: TransactionAuth::Sponsored {
            origin: singlesig(4),
            sponsor: multisig(9),
        },
        anchor_mode: TransactionAnchorMode::OffChainOnly,
        post_condition_mode: PostConditionMode::Allow,
        post_conditions: vec![
            PostCondition::Stx(StxPostCondition {
                principal: PostConditionPrincipal::Origin,
                condition_code: FungibleConditionCode::SentEq,
                amount: BigUint::from(amount),
            }),
            PostCondition::Stx(StxPostCondition {
                principal: PostConditionPrincipal::Contract {
                    address: address(0xC3),
                    contract_name: "pox".to_string(),
                },
                condition_code: FungibleConditionCode::SentLe,
                amount: BigUint::from(0u8),
            }),
        ],
        payload: TransactionPayload::TokenTransfer(TokenTransferPayload {
            recipient: address(0xD4),
            amount: BigUint::from(amount),
            memo,
        }),
    }
}

pub fn block_header(version: u8) -> StacksBlockHeader {
    StacksBlockHeader {
        version,
        total_work: StacksWorkScore {
            burn: 1_000,
            work: 42,
        },
        proof: VrfProof([0x0F; 80]),
        parent_block: Hash32([0x10; 32]),
        parent_microblock: Hash32([0x20; 32]),
        parent_microblock_sequence: 3,
        tx_merkle_root: Hash32([0x30; 32]),
        state_index_root: Hash32([0x40; 32]),
        microblock_pubkey_hash: Hash160([0x50; 20]),
    }
}

pub fn block(version: u8, txs: Vec<StacksTransaction>) -> StacksBlock {
    StacksBlock {
        header: block_header(version),
        txs,
    }
}
