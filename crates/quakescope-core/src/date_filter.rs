//! In-memory date filtering of fetched records.
//!
//! The date range is applied after the store round-trip rather than pushed
//! into SQL. Bounds are inclusive on both ends and compare the UTC calendar
//! date of each record's origin time.

use quakescope_types::{DateRange, QuakeRecord};

/// Keep the records whose date lies within `range`.
///
/// `None` is the identity. Relative order is preserved.
pub fn apply_date_filter(rows: Vec<QuakeRecord>, range: Option<DateRange>) -> Vec<QuakeRecord> {
    let Some(range) = range else {
        return rows;
    };

    let before = rows.len();
    let kept: Vec<QuakeRecord> = rows
        .into_iter()
        .filter(|row| range.contains(row.date()))
        .collect();

    tracing::debug!(
        before,
        after = kept.len(),
        start = %range.start,
        end = %range.end,
        "Applied date filter"
    );

    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> QuakeRecord {
        QuakeRecord {
            time: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            magnitude: 5.0,
            depth_km: 10.0,
            place: format!("{y}-{m}-{d}, Test"),
            latitude: None,
            longitude: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unset_range_is_identity() {
        let rows = vec![at(2024, 1, 1, 0), at(2023, 6, 15, 12), at(2025, 3, 3, 23)];
        assert_eq!(apply_date_filter(rows.clone(), None), rows);
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let rows = vec![
            at(2024, 1, 1, 0),
            at(2024, 1, 1, 23),
            at(2024, 1, 5, 12),
            at(2024, 1, 10, 23),
            at(2024, 1, 11, 0),
            at(2023, 12, 31, 23),
        ];
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 10)).unwrap();
        let kept = apply_date_filter(rows.clone(), Some(range));

        let expected: Vec<QuakeRecord> = rows
            .into_iter()
            .filter(|r| r.date() >= range.start && r.date() <= range.end)
            .collect();
        assert_eq!(kept, expected);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn single_day_range() {
        let rows = vec![at(2024, 2, 29, 0), at(2024, 2, 29, 18), at(2024, 3, 1, 0)];
        let range = DateRange::new(day(2024, 2, 29), day(2024, 2, 29)).unwrap();
        assert_eq!(apply_date_filter(rows, Some(range)).len(), 2);
    }

    #[test]
    fn empty_input_stays_empty() {
        let range = DateRange::new(day(2024, 1, 1), day(2024, 12, 31)).unwrap();
        assert!(apply_date_filter(Vec::new(), Some(range)).is_empty());
    }
}
