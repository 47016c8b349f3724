//! tempocol: columnar temporal value codec
//!
//! Packed 128-bit date/time values, their text forms, epoch conversion, and
//! vectorized transforms over whole columns.

pub mod builtins;
pub mod config;
pub mod datetime;
pub mod epoch;
pub mod error;
pub mod format;
pub mod table;

pub use builtins::{
    execute_function, transform_column, transform_to_string, transform_to_string_with_format,
    DateTimeField, TransformKind,
};
pub use config::TemporalConfig;
pub use datetime::{DateTimeParts, DateTimeValue, TimeKind};
pub use epoch::{from_unixtime, unix_timestamp, FixedOffsetZone, TimeZone};
pub use error::{Error, FormatError, Result, RowError};
pub use format::{date_format, to_canonical_string, DateFormat};
pub use table::{Bitmap, Block, Column, StringColumn, StringColumnBuilder};

/// API Contract Self-Test
///
/// Catches removal of the types and entry points downstream callers use.
#[cfg(test)]
mod api_contract_self_test {
    use super::*;

    #[test]
    fn column_types_api_contract() {
        let _dt = Column::DateTime(vec![DateTimeValue::ZERO]);
        let _i32 = Column::Int32(vec![0]);
        let _str = Column::String(StringColumn::from_constant(""));

        let _dt_ctor = Column::new_datetime(vec![]);
        let _i32_ctor = Column::new_int32(vec![]);
    }

    #[test]
    fn packed_value_api_contract() {
        assert_eq!(std::mem::size_of::<DateTimeValue>(), 16);
        assert_eq!(DateTimeValue::ZERO.to_string(), "0000-00-00 00:00:00");
    }

    #[test]
    fn default_zone_api_contract() {
        let config = TemporalConfig::default();
        assert_eq!(config.utc_offset_secs, config::DEFAULT_UTC_OFFSET_SECS);
        assert_eq!(config.time_zone().unwrap().utc_offset_secs(), 8 * 3600);
    }
}
