//! Core column types and the row batch

pub mod bitmap;
pub mod column;
pub mod string_column;

pub use bitmap::Bitmap;
pub use column::{Column, ColumnElement};
pub use string_column::{StringColumn, StringColumnBuilder};

use crate::error::{Error, Result};

/// A row batch: named columns addressed by position
///
/// Function calls name their inputs and output by position in the block.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub names: Vec<String>,
    pub columns: Vec<Column>,
}

impl Block {
    pub fn new(names: Vec<String>, columns: Vec<Column>) -> Self {
        assert_eq!(names.len(), columns.len());
        Self { names, columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, position: usize) -> Result<&Column> {
        self.columns
            .get(position)
            .ok_or(Error::ColumnOutOfRange(position))
    }

    /// Replace the column at `position`
    pub fn set(&mut self, position: usize, column: Column) -> Result<()> {
        let slot = self
            .columns
            .get_mut(position)
            .ok_or(Error::ColumnOutOfRange(position))?;
        *slot = column;
        Ok(())
    }

    /// Append a column, return its position
    pub fn push(&mut self, name: impl Into<String>, column: Column) -> usize {
        self.names.push(name.into());
        self.columns.push(column);
        self.columns.len() - 1
    }
}
