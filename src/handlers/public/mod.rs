// Tier 1: no authentication. Booking creation and tracking-code lookup are
// the only public writes; the rest are catalog reads.
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod reviews;
