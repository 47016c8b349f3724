//! Vectorized transform dispatch
//!
//! Applies one catalog entry to a whole column. The input column type is
//! checked once per call; a mismatch is the only invocation-level failure.
//! Bad rows never abort a batch: string transforms mark them null instead.
//!
//! Three paths:
//! - fixed width: independent per row, output pre-sized to N
//! - string, one argument: rows appended in order through a builder
//! - string, with format: same, plus one null-map entry per row

use tracing::{debug, trace, warn};

use super::transforms::{
    CanonicalString, DateFormatTransform, FormatTransform, FromUnixTime, ScalarTransform,
    Timestamp, ToStringTransform, TransformKind, UnixTimestamp,
};
use crate::datetime::DateTimeValue;
use crate::epoch::TimeZone;
use crate::error::{Error, Result};
use crate::format::DateFormat;
use crate::table::{Bitmap, Block, Column, ColumnElement, StringColumnBuilder};

// ===========================================================================
// Kernels
// ===========================================================================

/// Generic unary kernel: out[i] = f(x[i])
#[inline]
pub fn unary_kernel<T, U, F>(x: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    let mut out = Vec::with_capacity(x.len());
    out.extend(x.iter().map(f));
    out
}

#[inline]
fn source_slice<'a, T: ColumnElement>(source: &'a Column, function: &'static str) -> Result<&'a [T]> {
    source
        .as_slice::<T>()
        .ok_or_else(|| Error::illegal_column(source.type_name(), function))
}

// ===========================================================================
// Column-level entry points
// ===========================================================================

/// Fixed-width transform over a whole column
pub fn transform_column<T: ScalarTransform>(transform: &T, source: &Column) -> Result<Column> {
    let values = source_slice::<T::From>(source, transform.name())?;
    debug!(function = transform.name(), rows = values.len(), "fixed-width transform");

    let out = unary_kernel(values, |v| transform.execute(v));
    Ok(T::To::into_column(out))
}

/// Packed value -> string column, no null map
pub fn transform_to_string<T: ToStringTransform>(transform: &T, source: &Column) -> Result<Column> {
    let values = source_slice::<DateTimeValue>(source, transform.name())?;
    debug!(function = transform.name(), rows = values.len(), "string transform");

    let mut builder = StringColumnBuilder::with_capacity(values.len(), transform.max_size());
    for v in values {
        transform.execute(v, &mut builder);
    }
    Ok(Column::String(builder.finish()))
}

/// Value + format spec -> string column, writing one null-map entry per row
///
/// `null_map` belongs to the caller and must be as long as `source`. A spec
/// that cannot be compiled nulls every row without looking at the values.
pub fn transform_to_string_with_format<T: FormatTransform>(
    transform: &T,
    source: &Column,
    format: &str,
    null_map: &mut Bitmap,
) -> Result<Column> {
    let values = source_slice::<T::From>(source, transform.name())?;
    assert_eq!(null_map.len(), values.len(), "null map length must match column length");
    debug!(
        function = transform.name(),
        rows = values.len(),
        format,
        "format transform"
    );

    let mut builder = StringColumnBuilder::with_capacity(values.len(), format.len() + 1);

    let compiled = match DateFormat::parse(format) {
        Ok(compiled) => compiled,
        Err(e) => {
            warn!(function = transform.name(), error = %e, "format rejected, all rows null");
            for i in 0..values.len() {
                builder.append_null();
                null_map.set_null(i, true);
            }
            return Ok(Column::String(builder.finish()));
        }
    };

    for (i, v) in values.iter().enumerate() {
        match transform.execute(v, &compiled) {
            Ok(text) => {
                builder.append(text.as_bytes());
                null_map.set_null(i, false);
            }
            Err(e) => {
                trace!(function = transform.name(), row = i, error = %e, "null row");
                builder.append_null();
                null_map.set_null(i, true);
            }
        }
    }
    Ok(Column::String(builder.finish()))
}

// ===========================================================================
// Block-level entry points
// ===========================================================================

fn check_arguments(function: &'static str, arguments: &[usize], expected: usize) -> Result<()> {
    if arguments.len() != expected {
        return Err(Error::ArgumentCount {
            function,
            expected,
            got: arguments.len(),
        });
    }
    Ok(())
}

/// Read `arguments[0]`, write the result column to `result`
pub fn execute_on_block<T: ScalarTransform>(
    transform: &T,
    block: &mut Block,
    arguments: &[usize],
    result: usize,
) -> Result<()> {
    check_arguments(transform.name(), arguments, 1)?;
    let column = transform_column(transform, block.get(arguments[0])?)?;
    block.set(result, column)
}

pub fn execute_to_string_on_block<T: ToStringTransform>(
    transform: &T,
    block: &mut Block,
    arguments: &[usize],
    result: usize,
) -> Result<()> {
    check_arguments(transform.name(), arguments, 1)?;
    let column = transform_to_string(transform, block.get(arguments[0])?)?;
    block.set(result, column)
}

/// `arguments[1]` is a constant string column; its first row is the format
pub fn execute_with_format_on_block<T: FormatTransform>(
    transform: &T,
    block: &mut Block,
    arguments: &[usize],
    result: usize,
    null_map: &mut Bitmap,
) -> Result<()> {
    check_arguments(transform.name(), arguments, 2)?;
    let format_column = block.get(arguments[1])?;
    let format = match format_column.as_string() {
        Some(s) if !s.is_empty() => s.get(0),
        _ => {
            return Err(Error::IllegalFormatColumn {
                column: format_column.type_name(),
                function: transform.name(),
            })
        }
    };
    let column = transform_to_string_with_format(transform, block.get(arguments[0])?, format, null_map)?;
    block.set(result, column)
}

/// Run a catalog entry resolved by name
///
/// `zone` feeds the epoch transforms; `null_map` is required for the
/// format-driven ones.
pub fn execute_function(
    kind: TransformKind,
    zone: &dyn TimeZone,
    block: &mut Block,
    arguments: &[usize],
    result: usize,
    null_map: Option<&mut Bitmap>,
) -> Result<()> {
    match kind {
        TransformKind::Field(field) => execute_on_block(&field, block, arguments, result),
        TransformKind::ToDate(t) => execute_on_block(&t, block, arguments, result),
        TransformKind::Timestamp => execute_on_block(&Timestamp, block, arguments, result),
        TransformKind::UnixTimestamp => {
            execute_on_block(&UnixTimestamp::new(zone), block, arguments, result)
        }
        TransformKind::Name(t) => execute_to_string_on_block(&t, block, arguments, result),
        TransformKind::ToString => execute_to_string_on_block(&CanonicalString, block, arguments, result),
        TransformKind::DateFormat => {
            let null_map = null_map.ok_or(Error::NullMapRequired { function: kind.name() })?;
            execute_with_format_on_block(&DateFormatTransform, block, arguments, result, null_map)
        }
        TransformKind::FromUnixTime => {
            let null_map = null_map.ok_or(Error::NullMapRequired { function: kind.name() })?;
            execute_with_format_on_block(&FromUnixTime::new(zone), block, arguments, result, null_map)
        }
    }
}
