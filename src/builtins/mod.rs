//! Built-in temporal functions

pub mod dispatch;
pub mod transforms;

pub use dispatch::{
    execute_function, execute_on_block, execute_to_string_on_block, execute_with_format_on_block,
    transform_column, transform_to_string, transform_to_string_with_format,
};
pub use transforms::{
    CanonicalString, DateFormatTransform, DateTimeField, FormatTransform, FromUnixTime,
    NameTransform, ScalarTransform, Timestamp, ToDate, ToStringTransform, TransformKind,
    UnixTimestamp,
};
