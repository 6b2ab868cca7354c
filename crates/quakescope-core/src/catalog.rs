//! The fixed catalog of analytical queries shown on the Analysis page.
//!
//! Every entry is static SQL with no parameters, so no user input can reach
//! it. The catalog is a closed enum: code that names an entry can never
//! miss. Only external keys (URL slugs, labels) go through
//! [`CatalogQuery::from_key`], which can fail with
//! [`CatalogError::NotFound`].
//!
//! Labels keep the numbering users know (there are no entries 4 and 12).
//! Queries that group "by country" use the same trailing-comma region
//! rule as the region selector.

use std::str::FromStr;

use quakescope_types::ResultShape;

/// Errors raised when resolving catalog keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No catalog entry has this slug or label.
    #[error("unknown catalog query: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },
}

/// One entry of the analysis catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogQuery {
    // --- Magnitude & depth ---
    /// 1. Ten strongest events.
    TopStrongest,
    /// 2. Ten deepest events.
    TopDeepest,
    /// 3. Shallow (< 50 km) events above magnitude 7.5.
    ShallowAndStrong,
    /// 5. Mean magnitude per magnitude scale.
    AvgMagnitudeByMagType,

    // --- Time ---
    /// 6. The year with the most events.
    BusiestYear,
    /// 7. The calendar month with the most events.
    BusiestMonth,
    /// 8. Event counts per weekday, busiest first.
    BusiestWeekday,
    /// 9. Event counts per hour of day.
    HourlyCounts,
    /// 10. The network that reported the most events.
    MostActiveNetwork,

    // --- Impact & type ---
    /// 11. Five places with the highest total significance.
    MostSignificantPlaces,
    /// 13. Events above magnitude 6 deeper than 300 km.
    StrongAndDeep,
    /// 14. Counts per review status.
    ReviewStatus,
    /// 15. Counts per event type.
    CountByEventType,
    /// 16. Counts per product type list.
    CountByDataType,
    /// 17. Mean RMS residual.
    AverageRmsError,
    /// 18. Number of events reported by more than 50 stations.
    HighStationCoverage,

    // --- Tsunami ---
    /// 19. Tsunami-flagged events per year.
    TsunamisPerYear,
    /// 20. Total tsunami-flagged events.
    TotalTsunamis,

    // --- Advanced ---
    /// 21. Five places with the highest mean magnitude over the last ten years.
    TopPlacesRecentMagnitude,
    /// 22. Regions with both shallow (< 70 km) and deep (> 300 km) events in one month.
    ShallowAndDeepSameMonth,
    /// 23. Yearly event counts with year-over-year growth.
    YearOverYearGrowth,
    /// 24. Three places with the highest count x mean-magnitude score.
    MostActivePlaces,
    /// 25. Mean depth per region within 5 degrees of the equator.
    EquatorialDepth,
    /// 26. Shallow-to-deep event ratio per region.
    ShallowToDeepRatio,
    /// 27. Mean magnitude of tsunami events minus that of the rest.
    TsunamiMagnitudeGap,
    /// 28. Ten events with the largest gap + RMS error score.
    LowestReliability,
    /// 29. Event counts per region.
    EventsPerRegion,
    /// 30. Ten places with the most events deeper than 300 km.
    DeepPlaces,
}

impl CatalogQuery {
    /// Every entry in display order.
    pub const ALL: [Self; 28] = [
        Self::TopStrongest,
        Self::TopDeepest,
        Self::ShallowAndStrong,
        Self::AvgMagnitudeByMagType,
        Self::BusiestYear,
        Self::BusiestMonth,
        Self::BusiestWeekday,
        Self::HourlyCounts,
        Self::MostActiveNetwork,
        Self::MostSignificantPlaces,
        Self::StrongAndDeep,
        Self::ReviewStatus,
        Self::CountByEventType,
        Self::CountByDataType,
        Self::AverageRmsError,
        Self::HighStationCoverage,
        Self::TsunamisPerYear,
        Self::TotalTsunamis,
        Self::TopPlacesRecentMagnitude,
        Self::ShallowAndDeepSameMonth,
        Self::YearOverYearGrowth,
        Self::MostActivePlaces,
        Self::EquatorialDepth,
        Self::ShallowToDeepRatio,
        Self::TsunamiMagnitudeGap,
        Self::LowestReliability,
        Self::EventsPerRegion,
        Self::DeepPlaces,
    ];

    /// The entry shown first in the selector.
    pub const fn first() -> Self {
        Self::TopStrongest
    }

    /// Human-readable label, as shown in the selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopStrongest => "1. Top 10 Strongest Earthquakes",
            Self::TopDeepest => "2. Top 10 Deepest Earthquakes",
            Self::ShallowAndStrong => "3. Shallow (<50km) & Mag > 7.5",
            Self::AvgMagnitudeByMagType => "5. Avg Magnitude by magType",
            Self::BusiestYear => "6. Year with Most Earthquakes",
            Self::BusiestMonth => "7. Month with Highest Earthquakes",
            Self::BusiestWeekday => "8. Most Active Day of Week",
            Self::HourlyCounts => "9. Earthquakes per Hour",
            Self::MostActiveNetwork => "10. Most Active Reporting Network",
            Self::MostSignificantPlaces => "11. Top 5 Places with Highest Significance",
            Self::StrongAndDeep => "13. Earthquakes with High Magnitude & High Depth",
            Self::ReviewStatus => "14. Reviewed vs Automatic Events",
            Self::CountByEventType => "15. Count by Earthquake Type",
            Self::CountByDataType => "16. Count by Data Type",
            Self::AverageRmsError => "17. Average RMS Error",
            Self::HighStationCoverage => "18. High Station Coverage (nst > 50)",
            Self::TsunamisPerYear => "19. Tsunamis per Year",
            Self::TotalTsunamis => "20. Total Tsunami Events",
            Self::TopPlacesRecentMagnitude => "21. Top 5 Countries (Avg Mag - 10 Years)",
            Self::ShallowAndDeepSameMonth => "22. Countries with Shallow & Deep in Same Month",
            Self::YearOverYearGrowth => "23. Year-over-Year Earthquake Growth (%)",
            Self::MostActivePlaces => "24. Top 3 Seismically Active Regions",
            Self::EquatorialDepth => "25. Avg Depth Near Equator (±5° Latitude)",
            Self::ShallowToDeepRatio => "26. Highest Shallow-to-Deep Ratio",
            Self::TsunamiMagnitudeGap => "27. Avg Magnitude Difference (Tsunami vs Non-Tsunami)",
            Self::LowestReliability => "28. Lowest Data Reliability (High Error Score)",
            Self::EventsPerRegion => "29. Total Earthquakes per Country",
            Self::DeepPlaces => "30. Top 10 Deep Earthquakes by Place",
        }
    }

    /// Stable URL-safe key.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TopStrongest => "top-strongest",
            Self::TopDeepest => "top-deepest",
            Self::ShallowAndStrong => "shallow-strong",
            Self::AvgMagnitudeByMagType => "avg-magnitude-by-mag-type",
            Self::BusiestYear => "busiest-year",
            Self::BusiestMonth => "busiest-month",
            Self::BusiestWeekday => "busiest-weekday",
            Self::HourlyCounts => "hourly-counts",
            Self::MostActiveNetwork => "most-active-network",
            Self::MostSignificantPlaces => "most-significant-places",
            Self::StrongAndDeep => "strong-deep",
            Self::ReviewStatus => "review-status",
            Self::CountByEventType => "count-by-event-type",
            Self::CountByDataType => "count-by-data-type",
            Self::AverageRmsError => "average-rms-error",
            Self::HighStationCoverage => "high-station-coverage",
            Self::TsunamisPerYear => "tsunamis-per-year",
            Self::TotalTsunamis => "total-tsunamis",
            Self::TopPlacesRecentMagnitude => "top-places-recent-magnitude",
            Self::ShallowAndDeepSameMonth => "shallow-deep-same-month",
            Self::YearOverYearGrowth => "year-over-year-growth",
            Self::MostActivePlaces => "most-active-places",
            Self::EquatorialDepth => "equatorial-depth",
            Self::ShallowToDeepRatio => "shallow-to-deep-ratio",
            Self::TsunamiMagnitudeGap => "tsunami-magnitude-gap",
            Self::LowestReliability => "lowest-reliability",
            Self::EventsPerRegion => "events-per-region",
            Self::DeepPlaces => "deep-places",
        }
    }

    /// The shape a well-formed result of this query has.
    pub const fn shape(self) -> ResultShape {
        match self {
            Self::AverageRmsError
            | Self::HighStationCoverage
            | Self::TotalTsunamis
            | Self::TsunamiMagnitudeGap => ResultShape::Scalar,
            Self::BusiestYear | Self::BusiestMonth | Self::MostActiveNetwork => {
                ResultShape::Table { max_rows: Some(1) }
            }
            Self::MostActivePlaces => ResultShape::Table { max_rows: Some(3) },
            Self::MostSignificantPlaces | Self::TopPlacesRecentMagnitude => {
                ResultShape::Table { max_rows: Some(5) }
            }
            Self::TopStrongest | Self::TopDeepest | Self::LowestReliability | Self::DeepPlaces => {
                ResultShape::Table { max_rows: Some(10) }
            }
            Self::ShallowAndStrong
            | Self::AvgMagnitudeByMagType
            | Self::BusiestWeekday
            | Self::HourlyCounts
            | Self::StrongAndDeep
            | Self::ReviewStatus
            | Self::CountByEventType
            | Self::CountByDataType
            | Self::TsunamisPerYear
            | Self::ShallowAndDeepSameMonth
            | Self::YearOverYearGrowth
            | Self::EquatorialDepth
            | Self::ShallowToDeepRatio
            | Self::EventsPerRegion => ResultShape::Table { max_rows: None },
        }
    }

    /// The static query text.
    ///
    /// Descending sorts on nullable aggregates put `NULL`s last.
    #[allow(clippy::too_many_lines)]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::TopStrongest => {
                r"SELECT place, mag, depth_km, time
FROM earthquakes
ORDER BY mag DESC NULLS LAST
LIMIT 10"
            }
            Self::TopDeepest => {
                r"SELECT place, depth_km, mag
FROM earthquakes
ORDER BY depth_km DESC NULLS LAST
LIMIT 10"
            }
            Self::ShallowAndStrong => {
                r"SELECT place, mag, depth_km
FROM earthquakes
WHERE depth_km < 50 AND mag > 7.5"
            }
            Self::AvgMagnitudeByMagType => {
                r"SELECT magType, AVG(mag) AS avg_mag
FROM earthquakes
GROUP BY magType"
            }
            Self::BusiestYear => {
                r"SELECT EXTRACT(YEAR FROM time)::INT AS year, COUNT(*) AS total
FROM earthquakes
GROUP BY year
ORDER BY total DESC
LIMIT 1"
            }
            Self::BusiestMonth => {
                r"SELECT EXTRACT(MONTH FROM time)::INT AS month, COUNT(*) AS total
FROM earthquakes
GROUP BY month
ORDER BY total DESC
LIMIT 1"
            }
            Self::BusiestWeekday => {
                r"SELECT TO_CHAR(time, 'FMDay') AS day, COUNT(*) AS total
FROM earthquakes
GROUP BY day
ORDER BY total DESC"
            }
            Self::HourlyCounts => {
                r"SELECT EXTRACT(HOUR FROM time)::INT AS hour, COUNT(*) AS total
FROM earthquakes
GROUP BY hour
ORDER BY hour"
            }
            Self::MostActiveNetwork => {
                r"SELECT net, COUNT(*) AS total
FROM earthquakes
GROUP BY net
ORDER BY total DESC
LIMIT 1"
            }
            Self::MostSignificantPlaces => {
                r"SELECT place, SUM(sig) AS total_significance
FROM earthquakes
GROUP BY place
ORDER BY total_significance DESC NULLS LAST
LIMIT 5"
            }
            Self::StrongAndDeep => {
                r"SELECT place, mag, depth_km
FROM earthquakes
WHERE mag > 6 AND depth_km > 300"
            }
            Self::ReviewStatus => {
                r"SELECT status, COUNT(*) AS total
FROM earthquakes
GROUP BY status"
            }
            Self::CountByEventType => {
                r"SELECT type, COUNT(*) AS total
FROM earthquakes
GROUP BY type"
            }
            Self::CountByDataType => {
                r"SELECT types, COUNT(*) AS total
FROM earthquakes
GROUP BY types"
            }
            Self::AverageRmsError => {
                r"SELECT AVG(rms) AS avg_rms_error
FROM earthquakes"
            }
            Self::HighStationCoverage => {
                r"SELECT COUNT(*) AS high_station_events
FROM earthquakes
WHERE nst > 50"
            }
            Self::TsunamisPerYear => {
                r"SELECT EXTRACT(YEAR FROM time)::INT AS year, SUM(tsunami) AS total
FROM earthquakes
GROUP BY year
ORDER BY year"
            }
            Self::TotalTsunamis => {
                r"SELECT COUNT(*) AS total_tsunamis
FROM earthquakes
WHERE tsunami = 1"
            }
            Self::TopPlacesRecentMagnitude => {
                r"SELECT place, AVG(mag) AS avg_mag
FROM earthquakes
WHERE EXTRACT(YEAR FROM time) >= EXTRACT(YEAR FROM CURRENT_DATE) - 10
GROUP BY place
ORDER BY avg_mag DESC NULLS LAST
LIMIT 5"
            }
            Self::ShallowAndDeepSameMonth => {
                r"SELECT TRIM(REGEXP_REPLACE(place, '^.*,', '')) AS country
FROM earthquakes
GROUP BY country, EXTRACT(YEAR FROM time), EXTRACT(MONTH FROM time)
HAVING SUM(CASE WHEN depth_km < 70 THEN 1 ELSE 0 END) > 0
   AND SUM(CASE WHEN depth_km > 300 THEN 1 ELSE 0 END) > 0"
            }
            Self::YearOverYearGrowth => {
                r"SELECT year,
       total,
       ROUND(
           (total - LAG(total) OVER (ORDER BY year))::NUMERIC
           / LAG(total) OVER (ORDER BY year) * 100, 2
       ) AS yoy_growth_percent
FROM (
    SELECT EXTRACT(YEAR FROM time)::INT AS year, COUNT(*) AS total
    FROM earthquakes
    GROUP BY year
) t
ORDER BY year"
            }
            Self::MostActivePlaces => {
                r"SELECT place,
       COUNT(*) AS frequency,
       AVG(mag) AS avg_magnitude,
       COUNT(*) * AVG(mag) AS activity_score
FROM earthquakes
GROUP BY place
ORDER BY activity_score DESC NULLS LAST
LIMIT 3"
            }
            Self::EquatorialDepth => {
                r"SELECT TRIM(REGEXP_REPLACE(place, '^.*,', '')) AS country,
       AVG(depth_km) AS avg_depth
FROM earthquakes
WHERE latitude BETWEEN -5 AND 5
GROUP BY country
ORDER BY avg_depth DESC NULLS LAST"
            }
            Self::ShallowToDeepRatio => {
                r"SELECT TRIM(REGEXP_REPLACE(place, '^.*,', '')) AS country,
       SUM(CASE WHEN depth_km < 70 THEN 1 ELSE 0 END)::NUMERIC
       / NULLIF(SUM(CASE WHEN depth_km > 300 THEN 1 ELSE 0 END), 0)
       AS shallow_to_deep_ratio
FROM earthquakes
GROUP BY country
ORDER BY shallow_to_deep_ratio DESC NULLS LAST"
            }
            Self::TsunamiMagnitudeGap => {
                r"SELECT ROUND(
    (AVG(CASE WHEN tsunami = 1 THEN mag END)
     - AVG(CASE WHEN tsunami = 0 THEN mag END))::NUMERIC,
2) AS magnitude_difference
FROM earthquakes"
            }
            Self::LowestReliability => {
                r"SELECT id, place,
       COALESCE(gap, 0) + COALESCE(rms, 0) AS error_score
FROM earthquakes
ORDER BY error_score DESC
LIMIT 10"
            }
            Self::EventsPerRegion => {
                r"SELECT TRIM(REGEXP_REPLACE(place, '^.*,', '')) AS country,
       COUNT(*) AS total_earthquakes
FROM earthquakes
GROUP BY country
ORDER BY total_earthquakes DESC"
            }
            Self::DeepPlaces => {
                r"SELECT place, COUNT(*) AS total
FROM earthquakes
WHERE depth_km > 300
GROUP BY place
ORDER BY total DESC
LIMIT 10"
            }
        }
    }

    /// Resolve a slug or label to a catalog entry.
    ///
    /// Labels match exactly; slugs match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if nothing matches.
    pub fn from_key(key: &str) -> Result<Self, CatalogError> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.label() == key || q.slug().eq_ignore_ascii_case(key))
            .ok_or_else(|| CatalogError::NotFound {
                key: key.to_owned(),
            })
    }
}

impl FromStr for CatalogQuery {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl core::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Look up the query text for a catalog key.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] for an unknown key.
pub fn lookup_catalog_query(key: &str) -> Result<&'static str, CatalogError> {
    CatalogQuery::from_key(key).map(CatalogQuery::sql)
}
