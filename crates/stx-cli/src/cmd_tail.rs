/// Implementation of `stx tail`.
///
/// Drives a [`MessageStream`] over a TCP connection or a file and prints
/// each message as soon as its body has arrived. A clean close at a
/// message boundary ends the command successfully; anything else is
/// reported as an error.
use std::path::Path;

use anyhow::{Context, Result};
use stx_decoder::{DecoderConfig, MessageStream};
use tokio::io::AsyncRead;
use tokio::net::TcpStream;
use tracing::info;

use crate::TailArgs;
use crate::summary;

/// Run the `stx tail` command.
///
/// # Errors
///
/// Returns an error if the source cannot be opened or a message fails to
/// decode.
pub fn run(args: &TailArgs, config: DecoderConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    runtime.block_on(async {
        if let Some(addr) = &args.connect {
            let peer = TcpStream::connect(addr)
                .await
                .with_context(|| format!("cannot connect to {addr}"))?;
            info!(%addr, "connected");
            follow(peer, config, args.transactions).await
        } else if let Some(path) = &args.file {
            let file = open(path).await?;
            follow(file, config, args.transactions).await
        } else {
            anyhow::bail!("one of --connect or --file is required")
        }
    })
}

async fn open(path: &Path) -> Result<tokio::fs::File> {
    tokio::fs::File::open(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))
}

async fn follow<R: AsyncRead + Unpin>(
    reader: R,
    config: DecoderConfig,
    transactions: bool,
) -> Result<()> {
    let mut stream = MessageStream::new(reader, config);

    while let Some(result) = stream.next().await {
        let decoded = result.with_context(|| {
            format!(
                "stream failed after {} messages",
                stream.messages_decoded()
            )
        })?;

        println!("{}", summary::message_line(&decoded));
        if transactions {
            for line in summary::transaction_lines(&decoded) {
                println!("{line}");
            }
        }
    }

    println!("--- stream closed after {} messages", stream.messages_decoded());
    Ok(())
}
