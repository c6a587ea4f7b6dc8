pub mod place;
pub mod search;

pub use place::{ListingRepository, Place, PlaceFields};
pub use search::matches_query;
