use crate::place::Place;

/// Substring filter used by the search endpoint: a listing matches when the
/// lowercased query appears in its title, address or description. This is
/// deliberately a substring scan, not tokenized full-text search; an empty
/// query matches everything, mirroring an empty regex.
pub fn matches_query(place: &Place, query: &str) -> bool {
    let q = query.to_lowercase();
    place.title.to_lowercase().contains(&q)
        || place.address.to_lowercase().contains(&q)
        || place.description.to_lowercase().contains(&q)
}
