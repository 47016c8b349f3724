//! Typed columns
//!
//! Temporal and numeric columns are plain contiguous vectors with no embedded
//! null marker; nullability travels in a separate [`Bitmap`](super::Bitmap).

use super::string_column::StringColumn;
use crate::datetime::DateTimeValue;

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Packed temporal values, 128 bits per row
    DateTime(Vec<DateTimeValue>),

    /// 32-bit integers: extracted fields, epoch seconds
    Int32(Vec<i32>),

    /// Zero-terminated strings with end offsets
    String(StringColumn),
}

impl Column {
    pub fn new_datetime(data: Vec<DateTimeValue>) -> Self {
        Column::DateTime(data)
    }

    pub fn new_int32(data: Vec<i32>) -> Self {
        Column::Int32(data)
    }

    pub fn new_string(data: StringColumn) -> Self {
        Column::String(data)
    }

    pub fn len(&self) -> usize {
        match self {
            Column::DateTime(data) => data.len(),
            Column::Int32(data) => data.len(),
            Column::String(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::DateTime(_) => DateTimeValue::TYPE_NAME,
            Column::Int32(_) => i32::TYPE_NAME,
            Column::String(_) => "String",
        }
    }

    #[inline(always)]
    pub fn as_datetime_slice(&self) -> Option<&[DateTimeValue]> {
        match self {
            Column::DateTime(data) => Some(data),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_int32_slice(&self) -> Option<&[i32]> {
        match self {
            Column::Int32(data) => Some(data),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(data) => Some(data),
            _ => None,
        }
    }

    /// Typed slice for a fixed-width element type
    #[inline(always)]
    pub fn as_slice<T: ColumnElement>(&self) -> Option<&[T]> {
        T::slice(self)
    }
}

/// Fixed-width element type that has a column variant
pub trait ColumnElement: Copy + Sized {
    const TYPE_NAME: &'static str;

    fn slice(column: &Column) -> Option<&[Self]>;

    fn into_column(data: Vec<Self>) -> Column;
}

impl ColumnElement for DateTimeValue {
    const TYPE_NAME: &'static str = "DateTime";

    #[inline(always)]
    fn slice(column: &Column) -> Option<&[Self]> {
        column.as_datetime_slice()
    }

    fn into_column(data: Vec<Self>) -> Column {
        Column::DateTime(data)
    }
}

impl ColumnElement for i32 {
    const TYPE_NAME: &'static str = "Int32";

    #[inline(always)]
    fn slice(column: &Column) -> Option<&[Self]> {
        column.as_int32_slice()
    }

    fn into_column(data: Vec<Self>) -> Column {
        Column::Int32(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_type_names() {
        let col = Column::new_datetime(vec![DateTimeValue::ZERO; 3]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.type_name(), "DateTime");

        let col = Column::new_int32(vec![]);
        assert!(col.is_empty());
        assert_eq!(col.type_name(), "Int32");

        let col = Column::new_string(StringColumn::from_constant("x"));
        assert_eq!(col.type_name(), "String");
    }

    #[test]
    fn test_typed_slices() {
        let col = Column::new_int32(vec![1, 2]);
        assert_eq!(col.as_slice::<i32>(), Some(&[1, 2][..]));
        assert!(col.as_slice::<DateTimeValue>().is_none());
        assert!(col.as_string().is_none());
    }
}
