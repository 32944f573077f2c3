/// Implementation of `stx inspect`.
///
/// Decodes a capture file message by message and prints one summary line
/// per message. With `--transactions`, each block header and transaction
/// is listed beneath its message.
///
/// # Output format
///
/// ```text
/// #1 Transaction payload=260B relayers=0 Mainnet Standard signer=1111… nonce=4 fee=180 coinbase
/// #2 Blocks payload=1009B relayers=1 2 blocks, 3 tx
/// ---
/// 2 messages, 1417 bytes
/// ```
///
/// Decoding stops at the first message that fails; messages before it
/// are still printed.
use std::fs;

use anyhow::{Context, Result};
use stx_decoder::{DecoderConfig, MessageDecoder};

use crate::InspectArgs;
use crate::summary;

/// Run the `stx inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a message fails to
/// decode.
pub fn run(args: &InspectArgs, config: DecoderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let total = bytes.len();
    let decoder = MessageDecoder::new(config);
    let mut count = 0usize;

    for (offset, result) in decoder.messages(bytes) {
        let decoded =
            result.with_context(|| format!("failed to decode message at offset {offset}"))?;

        println!("{}", summary::message_line(&decoded));
        if args.transactions {
            for line in summary::transaction_lines(&decoded) {
                println!("{line}");
            }
        }
        count += 1;
    }

    println!("---");
    println!(
        "{count} message{}, {} bytes",
        if count == 1 { "" } else { "s" },
        total
    );
    Ok(())
}
