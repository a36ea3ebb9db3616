pub mod calendar;
pub mod format;
pub mod speech;

pub use calendar::{bucket_by_day, month_grid, month_name, next_month, prev_month};
pub use format::{
    format_date, format_datetime, format_relative_date, parse_datetime_local, to_datetime_local,
};
