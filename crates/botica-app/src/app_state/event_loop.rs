//! The interactive input loop.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use botica_common::BoticaError;

use super::core::ChatApp;
use super::dispatch::Flow;

impl ChatApp {
    /// Read lines from stdin until `/quit` or end of input.
    pub async fn run(mut self) -> Result<(), BoticaError> {
        let Some(mut transcripts) = self.transcript_rx.take() else {
            return Err(BoticaError::Other("chat loop already started".into()));
        };
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!(
            "botica v{} - type a message, or /help for commands",
            env!("CARGO_PKG_VERSION")
        );
        info!("Entering chat loop");

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line).await == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                },
                Some(transcript) = transcripts.recv() => self.apply_transcript(&transcript),
            }
        }

        self.shutdown().await;
        Ok(())
    }
}
