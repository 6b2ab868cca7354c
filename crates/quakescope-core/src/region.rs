//! Region derivation from free-text place descriptions.
//!
//! A region is the trimmed text after the last comma of `place`, so
//! `"120 km SE of Tokyo, Japan"` belongs to `"Japan"`. The heuristic is
//! not geocoding: `"10km SE of City, State, Country"` and `"City, Country"`
//! agree, but `"Honshu"` and `"near east coast of Honshu, Japan"` do not.
//! Catalog queries group by the same rule (see [`REGION_SQL`]).

/// SQL expression computing the region of `place`, equivalent to [`region_of`].
///
/// `'^.*,'` is greedy, so it strips everything up to and including the last
/// comma. A `NULL` place yields `NULL`.
pub const REGION_SQL: &str = "TRIM(REGEXP_REPLACE(place, '^.*,', ''))";

/// The region token of a place description.
///
/// A place without a comma is its own region. Never fails.
pub fn region_of(place: &str) -> &str {
    place
        .rsplit_once(',')
        .map_or(place, |(_, tail)| tail)
        .trim()
}
