//! Shared line-atomic output sink

use tokio::sync::mpsc;

/// Create a connected sink/writer pair.
pub fn channel() -> (OutputSink, OutputWriter) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OutputSink { tx }, OutputWriter { rx })
}

/// Cloneable handle used by service tasks to emit complete output lines.
#[derive(Clone)]
pub struct OutputSink {
    tx: mpsc::UnboundedSender<String>,
}

impl OutputSink {
    /// Queue one complete line for printing.
    ///
    /// Lines from different services may interleave, but only at line
    /// granularity; a queued line is never split or merged.
    pub fn line(&self, line: String) {
        // Send fails only once the writer is gone, and then the output has
        // nowhere to go anyway.
        let _ = self.tx.send(line);
    }
}

/// Single consumer owning stdout; runs until every sink clone is dropped.
pub struct OutputWriter {
    rx: mpsc::UnboundedReceiver<String>,
}

impl OutputWriter {
    pub async fn run(mut self) {
        while let Some(line) = self.rx.recv().await {
            println!("{line}");
        }
    }

    /// Drain into a buffer instead of stdout. Test support.
    #[cfg(test)]
    pub(crate) async fn collect(mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.rx.recv().await {
            lines.push(line);
        }
        lines
    }
}
