use crate::error::{EtlError, EtlResult};
use crate::warehouse::TimeRow;
use chrono::{DateTime, Datelike, Timelike};

/// Break an epoch millisecond timestamp into its UTC calendar components.
///
/// `week` is the ISO-8601 week number, `weekday` counts from Monday = 0.
pub fn time_row(ts_ms: i64) -> EtlResult<TimeRow> {
    let instant =
        DateTime::from_timestamp_millis(ts_ms).ok_or(EtlError::TimestampOutOfRange(ts_ms))?;

    Ok(TimeRow {
        start_time: ts_ms,
        hour: instant.hour(),
        day: instant.day(),
        week: instant.iso_week().week(),
        month: instant.month(),
        year: instant.year(),
        weekday: instant.weekday().num_days_from_monday(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_play_instant() {
        // 2018-11-03 01:05:23.796 UTC, a Saturday
        let row = time_row(1541207123796).unwrap();
        assert_eq!(
            row,
            TimeRow {
                start_time: 1541207123796,
                hour: 1,
                day: 3,
                week: 44,
                month: 11,
                year: 2018,
                weekday: 5,
            }
        );
    }

    #[test]
    fn test_sunday_is_six() {
        // 2018-11-11 02:33:56.796 UTC
        let row = time_row(1541903636796).unwrap();
        assert_eq!(row.weekday, 6);
        assert_eq!(row.week, 45);
    }

    #[test]
    fn test_iso_week_wraps_around_new_year() {
        // 2021-01-01 is a Friday in ISO week 53 of 2020
        let row = time_row(1609459200000).unwrap();
        assert_eq!((row.year, row.month, row.day), (2021, 1, 1));
        assert_eq!(row.week, 53);
        assert_eq!(row.weekday, 4);
    }

    #[test]
    fn test_pre_epoch_instant() {
        let row = time_row(-1).unwrap();
        assert_eq!((row.year, row.month, row.day, row.hour), (1969, 12, 31, 23));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(matches!(
            time_row(i64::MAX),
            Err(EtlError::TimestampOutOfRange(i64::MAX))
        ));
    }
}
