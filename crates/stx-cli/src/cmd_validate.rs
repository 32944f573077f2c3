/// Implementation of `stx validate`.
///
/// Decodes every message in a capture file and reports either a success
/// line (`✓`) or the first failure (`✗`) with its offset and error kind.
///
/// ```text
/// ✓ Messages: 12 decoded, 4096 bytes
/// ```
///
/// ```text
/// ✗ Error at offset 1417 (NotImplemented): StacksMessageTypeId::Ping is not implemented
/// ```
///
/// Exits with code 0 when every message decodes and code 1 otherwise.
use std::fs;

use anyhow::{Context, Result, anyhow};
use stx_decoder::{DecoderConfig, MessageDecoder};

use crate::ValidateArgs;

/// Run the `stx validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any message fails to
/// decode.
pub fn run(args: &ValidateArgs, config: DecoderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let total = bytes.len();
    let decoder = MessageDecoder::new(config);
    let mut count = 0usize;

    for (offset, result) in decoder.messages(bytes) {
        if let Err(e) = result {
            println!("✗ Error at offset {offset} ({:?}): {e}", e.kind());
            return Err(anyhow!("validation failed after {count} messages"));
        }
        count += 1;
    }

    println!("✓ Messages: {count} decoded, {total} bytes");
    Ok(())
}
