//! Listing projections: venues grouped by area, and name search

use serde::Serialize;

/// One venue row of the area listing, already sorted by (city, name, state)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Minimal projection used by listings and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Group header: every venue in one city/state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<RecordSummary>,
}

/// Group consecutive venues that share city and state.
///
/// Single pass over input that the caller has sorted by (city, name, state).
/// A new group opens whenever the city or the state differs from the
/// previous row, so a city whose venues interleave two states yields one
/// group per run rather than one per state.
pub fn group_by_area(venues: Vec<AreaVenue>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for venue in venues {
        let summary = RecordSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: venue.num_upcoming_shows,
        };

        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(summary);
            }
            _ => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

/// Search response: match count plus projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<RecordSummary>,
}

impl From<Vec<RecordSummary>> for SearchResults {
    fn from(data: Vec<RecordSummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Build an `ILIKE ... ESCAPE '\'` pattern matching `term` as a literal
/// substring.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
