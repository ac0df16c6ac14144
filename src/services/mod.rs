pub mod bookings;
pub mod catalog;
pub mod curation;
pub mod reviews;

pub use bookings::{BookingPatch, BookingService, NewBooking};
pub use catalog::{
    CatalogService, CategoryPatch, DiscountPlanPatch, NewCategory, NewDiscountPlan,
    NewPortfolioImage, PortfolioImagePatch,
};
pub use curation::{CurationService, HomepageEntryPatch, NewHomepageEntry};
pub use reviews::{NewReview, ReviewPatch, ReviewService};
