pub mod booking;
pub mod catalog;
pub mod curation;
pub mod review;

pub use booking::Booking;
pub use catalog::{Category, DiscountPlan, PortfolioImage};
pub use curation::HomepageEntry;
pub use review::CustomerReview;
