//! Block-state tracking for `<rdata>` row blocks.
//!
//! The tracker only knows whether the scan is currently inside a row block.
//! Header blocks need no state: their close marker is recognised on its own.

use crate::constants::{HEADER_BLOCK_CLOSE, ROW_BLOCK_CLOSE, ROW_BLOCK_OPEN};

/// Classification of a trimmed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    RowOpen,
    RowClose,
    HeaderClose,
    /// Anything else: a candidate tag line, blank or free text
    Content,
}

impl LineKind {
    /// Classify a trimmed line; markers must match exactly
    pub fn classify(line: &str) -> Self {
        match line {
            ROW_BLOCK_OPEN => Self::RowOpen,
            ROW_BLOCK_CLOSE => Self::RowClose,
            HEADER_BLOCK_CLOSE => Self::HeaderClose,
            _ => Self::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    OutsideRow,
    InsideRow,
}

/// Inside-row flag, created fresh for every input file
#[derive(Debug, Default)]
pub struct BlockTracker {
    state: BlockState,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Apply the transition for a classified line
    pub fn advance(&mut self, kind: LineKind) -> BlockState {
        match kind {
            LineKind::RowOpen => self.state = BlockState::InsideRow,
            LineKind::RowClose => self.state = BlockState::OutsideRow,
            LineKind::HeaderClose | LineKind::Content => {}
        }
        self.state
    }

    /// Classify `line`, apply its transition and report whether the scan is
    /// inside a row block after it
    pub fn is_inside_row(&mut self, line: &str) -> bool {
        self.advance(LineKind::classify(line)) == BlockState::InsideRow
    }
}
