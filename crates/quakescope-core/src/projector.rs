//! Derived views over a filtered record set.
//!
//! Everything here is a pure function of its input rows. The pipeline only
//! calls [`derive_views`] on non-empty input; an empty set is reported as
//! "no data" upstream instead of producing undefined statistics.

use quakescope_types::{
    DerivedViews, Histogram, HistogramBin, MapPoint, QuakeRecord, Summary, TrendPoint,
};

/// Number of depth bins used when none is configured.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Errors raised while deriving views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    /// Summary statistics are undefined over zero rows.
    #[error("cannot summarize an empty record set")]
    EmptyRows,

    /// A histogram needs at least one bin.
    #[error("histogram bin count must be at least 1")]
    ZeroBins,
}

/// Count, maximum magnitude, and mean depth.
///
/// # Errors
///
/// Returns [`ProjectionError::EmptyRows`] for an empty slice.
#[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
pub fn summarize(rows: &[QuakeRecord]) -> Result<Summary, ProjectionError> {
    if rows.is_empty() {
        return Err(ProjectionError::EmptyRows);
    }

    let max_magnitude = rows
        .iter()
        .map(|r| r.magnitude)
        .fold(f64::NEG_INFINITY, f64::max);
    let depth_sum: f64 = rows.iter().map(|r| r.depth_km).sum();

    Ok(Summary {
        count: rows.len(),
        max_magnitude,
        mean_depth_km: depth_sum / rows.len() as f64,
    })
}

/// Magnitude over time, ascending by time.
///
/// Rows sharing a timestamp keep their input order.
pub fn build_trend(rows: &[QuakeRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = rows
        .iter()
        .map(|r| TrendPoint {
            time: r.time,
            magnitude: r.magnitude,
        })
        .collect();
    points.sort_by_key(|p| p.time);
    points
}

/// Equal-width depth histogram over `[min depth, max depth]`.
///
/// Bin `i` covers `[lower, upper)`; the last bin also includes its upper
/// edge so the deepest record is counted. When every depth is equal the
/// bins are one kilometre wide starting at that depth. An empty input
/// yields `bins` empty bins starting at zero.
///
/// # Errors
///
/// Returns [`ProjectionError::ZeroBins`] when `bins` is zero.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]
pub fn build_histogram(rows: &[QuakeRecord], bins: usize) -> Result<Histogram, ProjectionError> {
    if bins == 0 {
        return Err(ProjectionError::ZeroBins);
    }

    let (min, max) = rows
        .iter()
        .map(|r| r.depth_km)
        .fold(None, |acc: Option<(f64, f64)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
        .unwrap_or((0.0, 0.0));

    let span = max - min;
    let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };
    let last = bins.saturating_sub(1);

    let mut counts = vec![0_usize; bins];
    for row in rows {
        let offset = (row.depth_km - min) / bin_width;
        // Offsets are non-negative; float-to-usize casts saturate.
        let index = (offset.floor() as usize).min(last);
        if let Some(slot) = counts.get_mut(index) {
            *slot = slot.saturating_add(1);
        }
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = (i as f64).mul_add(bin_width, min);
            HistogramBin {
                lower,
                upper: lower + bin_width,
                count,
            }
        })
        .collect();

    Ok(Histogram { bin_width, bins })
}

/// Coordinates of every row that reports both latitude and longitude.
pub fn build_map_points(rows: &[QuakeRecord]) -> Vec<MapPoint> {
    rows.iter()
        .filter_map(|r| match (r.latitude, r.longitude) {
            (Some(lat), Some(lon)) => Some(MapPoint { lat, lon }),
            _ => None,
        })
        .collect()
}

/// All derived views for a non-empty record set.
///
/// # Errors
///
/// Returns [`ProjectionError::EmptyRows`] for empty input and
/// [`ProjectionError::ZeroBins`] when `bins` is zero.
pub fn derive_views(rows: &[QuakeRecord], bins: usize) -> Result<DerivedViews, ProjectionError> {
    let summary = summarize(rows)?;
    let histogram = build_histogram(rows, bins)?;
    Ok(DerivedViews {
        summary,
        trend: build_trend(rows),
        histogram,
        map_points: build_map_points(rows),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(day: u32, magnitude: f64, depth_km: f64, coords: Option<(f64, f64)>) -> QuakeRecord {
        QuakeRecord {
            time: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            magnitude,
            depth_km,
            place: "Test, Region".to_owned(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
        }
    }

    #[test]
    fn summary_of_tokyo_and_lima() {
        let rows = vec![
            row(1, 7.9, 30.0, Some((35.6, 139.7))),
            row(2, 5.2, 70.0, Some((-12.0, -77.0))),
        ];
        let summary = summarize(&rows).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.max_magnitude, 7.9);
        assert_eq!(summary.mean_depth_km, 50.0);
    }

    #[test]
    fn empty_rows_have_no_summary() {
        assert_eq!(summarize(&[]), Err(ProjectionError::EmptyRows));
        assert_eq!(derive_views(&[], 10), Err(ProjectionError::EmptyRows));
    }

    #[test]
    fn trend_is_sorted_by_time() {
        let rows = vec![row(3, 6.0, 10.0, None), row(1, 5.0, 10.0, None), row(2, 4.5, 10.0, None)];
        let trend = build_trend(&rows);
        let magnitudes: Vec<f64> = trend.iter().map(|p| p.magnitude).collect();
        assert_eq!(magnitudes, vec![5.0, 4.5, 6.0]);
    }

    #[test]
    fn histogram_counts_every_row() {
        let rows: Vec<QuakeRecord> = [0.0, 5.0, 10.0, 55.0, 99.0, 100.0]
            .into_iter()
            .map(|d| row(1, 5.0, d, None))
            .collect();
        let histogram = build_histogram(&rows, 10).unwrap();
        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.total(), rows.len());
        assert_eq!(histogram.bin_width, 10.0);
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[1].count, 1);
        assert_eq!(histogram.bins[5].count, 1);
        // 99 and the maximum 100 share the last bin.
        assert_eq!(histogram.bins[9].count, 2);
    }

    #[test]
    fn histogram_of_equal_depths() {
        let rows = vec![row(1, 5.0, 33.0, None), row(2, 6.0, 33.0, None)];
        let histogram = build_histogram(&rows, 5).unwrap();
        assert_eq!(histogram.bin_width, 1.0);
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[0].lower, 33.0);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn zero_bins_rejected() {
        let rows = vec![row(1, 5.0, 10.0, None)];
        assert_eq!(build_histogram(&rows, 0), Err(ProjectionError::ZeroBins));
    }

    #[test]
    fn map_points_skip_missing_coordinates() {
        let rows = vec![
            row(1, 5.0, 10.0, Some((35.6, 139.7))),
            row(2, 5.0, 10.0, None),
            QuakeRecord {
                latitude: Some(1.0),
                longitude: None,
                ..row(3, 5.0, 10.0, None)
            },
        ];
        let points = build_map_points(&rows);
        assert_eq!(points, vec![MapPoint { lat: 35.6, lon: 139.7 }]);
    }

    #[test]
    fn derive_views_bundles_everything() {
        let rows = vec![row(1, 7.9, 30.0, Some((35.6, 139.7))), row(2, 5.2, 70.0, None)];
        let views = derive_views(&rows, DEFAULT_HISTOGRAM_BINS).unwrap();
        assert_eq!(views.summary.count, 2);
        assert_eq!(views.trend.len(), 2);
        assert_eq!(views.histogram.bins.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(views.histogram.total(), 2);
        assert_eq!(views.map_points.len(), 1);
    }
}
