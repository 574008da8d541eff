//! Line dispatch and record assembly.
//!
//! The assembler owns the per-file state (header store, row store and block
//! tracker) and turns a stream of lines into CSV records:
//!
//! - `</rdata>` emits header values followed by row values as one CSV line,
//!   then clears the row values only
//! - `</hdata>` clears the header values without emitting anything
//! - tag lines update the row store inside a row block, the header store
//!   outside of one
//!
//! Header values therefore carry over to every row block until the header
//! block closes.

use crate::block::{BlockState, BlockTracker, LineKind};
use crate::constants::CSV_SEPARATOR;
use crate::error::Result;
use crate::fields::{FieldSet, FieldStore};
use crate::tag::parse_tag;
use tracing::{debug, trace};

/// Destination for complete CSV lines
pub trait RecordSink {
    fn write_line(&mut self, line: &str) -> Result<()>;
}

impl RecordSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// What a single line did to the assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    RecordEmitted,
    HeaderReset,
    HeaderFieldSet,
    RowFieldSet,
    /// Markers without effect, unknown tags, blank or malformed lines
    Skipped,
}

/// Per-file parser state
#[derive(Debug)]
pub struct RecordAssembler {
    header: FieldStore,
    row: FieldStore,
    tracker: BlockTracker,
}

impl RecordAssembler {
    pub fn new(fields: &FieldSet) -> Self {
        Self {
            header: fields.header_store(),
            row: fields.row_store(),
            tracker: BlockTracker::new(),
        }
    }

    pub fn header(&self) -> &FieldStore {
        &self.header
    }

    pub fn row(&self) -> &FieldStore {
        &self.row
    }

    pub fn block_state(&self) -> BlockState {
        self.tracker.state()
    }

    /// Feed one input line, emitting a record through `sink` when it closes
    /// a row block
    pub fn process_line<S: RecordSink>(
        &mut self,
        line: &str,
        sink: &mut S,
    ) -> Result<LineOutcome> {
        let line = line.trim();
        let kind = LineKind::classify(line);
        let state = self.tracker.advance(kind);

        match (kind, state) {
            (LineKind::RowClose, _) => {
                self.emit_record(sink)?;
                return Ok(LineOutcome::RecordEmitted);
            }
            (LineKind::HeaderClose, BlockState::OutsideRow) => {
                debug!("Header block closed, clearing header values");
                self.header.reset();
                return Ok(LineOutcome::HeaderReset);
            }
            _ => {}
        }

        let Some(tag) = parse_tag(line) else {
            trace!("Skipping non-tag line: {:?}", line);
            return Ok(LineOutcome::Skipped);
        };

        // A known tag without a closing partner still overwrites the field
        let value = tag.content.unwrap_or_default();
        let (store, outcome) = match state {
            BlockState::InsideRow => (&mut self.row, LineOutcome::RowFieldSet),
            BlockState::OutsideRow => (&mut self.header, LineOutcome::HeaderFieldSet),
        };

        if store.set_if_known(tag.name, value) {
            Ok(outcome)
        } else {
            trace!("Ignoring unknown tag <{}> ({:?})", tag.name, state);
            Ok(LineOutcome::Skipped)
        }
    }

    /// Current header and row values as one CSV line
    pub fn record_line(&self) -> String {
        let mut columns = self.header.serialize();
        columns.extend(self.row.serialize());
        columns.join(CSV_SEPARATOR)
    }

    /// Write the current record and clear the row values.
    ///
    /// The row values are only cleared once the sink accepted the line.
    pub fn emit_record<S: RecordSink>(&mut self, sink: &mut S) -> Result<()> {
        let line = self.record_line();
        debug!("Emitting record: {}", line);
        sink.write_line(&line)?;
        self.row.reset();
        Ok(())
    }
}
