//! Conversion between interview records and stored rows.

pub mod cells;
mod flatten;

pub use flatten::{
    RecordFlattener, DATE_COLUMN, DATE_FORMAT, LATITUDE_COLUMN, LONGITUDE_COLUMN,
};
