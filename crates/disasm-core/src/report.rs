//! Diagnostic reporting for the disassembly pipeline.
//!
//! The pipeline never writes to standard streams itself. Progress and the
//! per-word classification are delivered to a [`ReportSink`] chosen by the
//! caller.

use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted while a program image is analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReportEvent {
    /// Analysis is about to start over `words` instruction words.
    AnalysisStarted {
        /// Number of words in the image.
        words: usize,
    },
    /// Analysis reached its fixpoint.
    AnalysisFinished {
        /// Words marked as code.
        reachable: usize,
        /// Words in the image.
        total: usize,
    },
    /// Classification of one word, emitted in index order.
    Classified {
        /// Word index in the image.
        index: usize,
        /// Memory address of the word.
        address: usize,
        /// Raw word value.
        word: u16,
        /// Whether the word was reached from the entry point.
        reachable: bool,
    },
    /// The image ended with a byte that does not form a full word.
    TrailingByte {
        /// The dangling byte.
        byte: u8,
    },
}

/// Receiver of [`ReportEvent`]s.
pub trait ReportSink {
    /// Records an event in pipeline order.
    fn on_event(&mut self, event: ReportEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReport;

impl ReportSink for NullReport {
    fn on_event(&mut self, _event: ReportEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReport {
    /// Events in the order they were received.
    pub events: Vec<ReportEvent>,
}

impl ReportSink for RecordingReport {
    fn on_event(&mut self, event: ReportEvent) {
        self.events.push(event);
    }
}

/// Renders events as a human-readable report on a writer.
///
/// Write failures are remembered rather than propagated so the pipeline
/// stays infallible; check [`WriterReport::finish`] afterwards.
#[derive(Debug)]
pub struct WriterReport<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterReport<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flushes the writer and returns it, or the first write error seen.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while writing or flushing the report.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn render(&mut self, event: ReportEvent) -> io::Result<()> {
        match event {
            ReportEvent::AnalysisStarted { .. } => writeln!(self.writer, "Analysing reachability..."),
            ReportEvent::AnalysisFinished { reachable, total } => {
                writeln!(
                    self.writer,
                    "ANALYSIS DONE! {reachable} of {total} words reachable. Result:"
                )
            }
            ReportEvent::Classified {
                address,
                word,
                reachable,
                ..
            } => {
                let marker = if reachable { "reachable" } else { "unreachable" };
                writeln!(self.writer, "{address:03X}: {word:04X} {marker}")
            }
            ReportEvent::TrailingByte { byte } => {
                writeln!(self.writer, "trailing byte {byte:02X} ignored")
            }
        }
    }
}

impl<W: Write> ReportSink for WriterReport<W> {
    fn on_event(&mut self, event: ReportEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.render(event) {
            self.error = Some(error);
        }
    }
}
