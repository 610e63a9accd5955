//! The self-extending tape of byte-valued cells.
//!
//! A tape is conceptually infinite to the right. Cells are materialized
//! lazily: addressing index `i` past the current end first extends the
//! backing storage with zeros up to and including `i`. The data pointer
//! is not part of the tape; the VM owns it.

use crate::error::TapeError;

/// A growable sequence of cells, each in `0..=255`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
}

impl Tape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tape from caller-supplied contents.
    ///
    /// Every value must lie in `0..=255`; the first offender is reported
    /// with its index.
    pub fn from_cells<I>(values: I) -> Result<Self, TapeError>
    where
        I: IntoIterator<Item = i64>,
    {
        let cells = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| to_cell(index, value))
            .collect::<Result<Vec<u8>, TapeError>>()?;
        Ok(Self { cells })
    }

    /// Read the cell at `index`, extending the tape if needed.
    pub fn get(&mut self, index: usize) -> u8 {
        self.extend_to(index);
        self.cells[index]
    }

    /// Store `value` at `index`, extending the tape if needed.
    ///
    /// Fails with [`TapeError::ValueOutOfRange`] if `value` is outside
    /// `0..=255`. The stored value is left untouched in that case, though
    /// the tape may already have been extended to cover `index`.
    pub fn set(&mut self, index: usize, value: i64) -> Result<(), TapeError> {
        self.extend_to(index);
        self.cells[index] = to_cell(index, value)?;
        Ok(())
    }

    /// Store a byte at `index`, extending the tape if needed. Any byte is a
    /// valid cell value.
    pub fn write(&mut self, index: usize, value: u8) {
        self.extend_to(index);
        self.cells[index] = value;
    }

    /// Read without extending. Cells past the end read as zero.
    pub fn peek(&self, index: usize) -> u8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The materialized cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn extend_to(&mut self, index: usize) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
    }
}

impl From<Vec<u8>> for Tape {
    fn from(cells: Vec<u8>) -> Self {
        Self { cells }
    }
}

fn to_cell(index: usize, value: i64) -> Result<u8, TapeError> {
    u8::try_from(value).map_err(|_| TapeError::ValueOutOfRange { index, value })
}
