pub mod lifecycle;
pub mod models;

pub use lifecycle::{nights, overlaps, quote_total, validate_stay, BookingError};
pub use models::{Booking, BookingRepository, BookingStatus};
