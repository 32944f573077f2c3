//! One-line renderings shared by `inspect` and `tail`.

use stx_decoder::DecodedMessage;
use stx_types::{
    PostCondition, PostConditionPrincipal, StacksMessage, StacksTransaction, TransactionPayload,
};

/// `#<seq> <TYPE> payload=<n>B relayers=<n> <detail>`
pub fn message_line(decoded: &DecodedMessage) -> String {
    let preamble = &decoded.preamble;
    let detail = match &decoded.message {
        StacksMessage::Blocks(blocks) => {
            let txs: usize = blocks.iter().map(|b| b.txs.len()).sum();
            format!("{} block{}, {txs} tx", blocks.len(), plural(blocks.len()))
        }
        StacksMessage::Transaction(tx) => transaction_line(tx),
        other => format!("{other:?}"),
    };
    format!(
        "#{} {} payload={}B relayers={} {detail}",
        preamble.seq,
        decoded.message.type_id(),
        preamble.payload_len,
        decoded.relayers,
    )
}

/// Indented lines listing every transaction in the message.
pub fn transaction_lines(decoded: &DecodedMessage) -> Vec<String> {
    match &decoded.message {
        StacksMessage::Blocks(blocks) => blocks
            .iter()
            .enumerate()
            .flat_map(|(b, block)| {
                let header = format!("    block {b}: {}", block.header);
                std::iter::once(header).chain(
                    block
                        .txs
                        .iter()
                        .enumerate()
                        .map(|(i, tx)| format!("      tx {i}: {}", transaction_line(tx))),
                )
            })
            .collect(),
        StacksMessage::Transaction(tx) => tx
            .post_conditions
            .iter()
            .map(|pc| format!("    {}", post_condition_line(pc)))
            .collect(),
        _ => Vec::new(),
    }
}

fn transaction_line(tx: &StacksTransaction) -> String {
    let origin = tx.auth.origin();
    let payload = match &tx.payload {
        TransactionPayload::TokenTransfer(transfer) => {
            format!("transfer {} to {}", transfer.amount, transfer.recipient)
        }
        TransactionPayload::Coinbase(_) => "coinbase".to_string(),
        other => other.payload_id().to_string(),
    };
    format!(
        "{} {} signer={} nonce={} fee={} {payload}",
        tx.version,
        tx.auth.auth_type(),
        origin.signer(),
        origin.nonce(),
        origin.fee_rate(),
    )
}

fn post_condition_line(pc: &PostCondition) -> String {
    match pc {
        PostCondition::Stx(stx) => {
            let principal = match &stx.principal {
                PostConditionPrincipal::Origin => "origin".to_string(),
                PostConditionPrincipal::Standard(address) => address.to_string(),
                PostConditionPrincipal::Contract {
                    address,
                    contract_name,
                } => format!("{address}.{contract_name}"),
            };
            format!("stx {principal} {} {}", stx.condition_code, stx.amount)
        }
        other => format!("{}", other.asset_info_id()),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
