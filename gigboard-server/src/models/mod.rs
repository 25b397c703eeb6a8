//! Domain models with validation at construction
//!
//! Submitted forms are validated into field sets before they reach the
//! database. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod genres;
pub mod venue;
pub mod artist;
pub mod show;
pub mod listing;
pub mod schedule;

pub use validation::ValidationError;
pub use genres::Genres;
pub use venue::{VenueFields, VenueForm};
pub use artist::{ArtistFields, ArtistForm};
pub use show::{ShowFields, ShowForm};
pub use listing::{group_by_area, Area, AreaVenue, RecordSummary, SearchResults};
pub use schedule::{format_start_time, partition_shows, ShowPartition};
