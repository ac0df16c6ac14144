// Field-level validation for privileged creates/updates. All checks run
// before any store access so a bad payload never opens a connection.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::services::{
    BookingPatch, CategoryPatch, DiscountPlanPatch, HomepageEntryPatch, NewBooking, NewCategory,
    NewDiscountPlan, NewPortfolioImage, NewReview, PortfolioImagePatch, ReviewPatch,
};

/// Deserialize an action payload, turning serde errors into a validation
/// error that keeps the decoder's message (it names the missing field).
pub fn decode_payload<T: DeserializeOwned>(data: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(data)
        .map_err(|e| ApiError::validation_error(format!("Invalid {} payload: {}", what, e), None))
}

fn require_non_empty(errors: &mut HashMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "must not be empty".to_string());
    }
}

fn check(errors: HashMap<String, String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Missing or invalid fields",
            Some(errors),
        ))
    }
}

// An all-empty patch would still bump updated_at, so it is refused outright.
fn empty_patch() -> ApiError {
    ApiError::validation_error("No fields to update", None)
}

pub fn new_booking(new: &NewBooking) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    require_non_empty(&mut errors, "first_name", &new.first_name);
    require_non_empty(&mut errors, "last_name", &new.last_name);
    require_non_empty(&mut errors, "phone", &new.phone);
    require_non_empty(&mut errors, "plan_type", &new.plan_type);
    if new.plan_price < Decimal::ZERO {
        errors.insert("plan_price".to_string(), "must not be negative".to_string());
    }
    check(errors)
}

pub fn booking_patch(patch: &BookingPatch) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    if patch.tracking_code.is_some() {
        errors.insert(
            "tracking_code".to_string(),
            "immutable after creation".to_string(),
        );
    }
    if let Some(v) = &patch.first_name {
        require_non_empty(&mut errors, "first_name", v);
    }
    if let Some(v) = &patch.last_name {
        require_non_empty(&mut errors, "last_name", v);
    }
    if let Some(v) = &patch.phone {
        require_non_empty(&mut errors, "phone", v);
    }
    if let Some(v) = &patch.plan_type {
        require_non_empty(&mut errors, "plan_type", v);
    }
    if let Some(v) = patch.plan_price {
        if v < Decimal::ZERO {
            errors.insert("plan_price".to_string(), "must not be negative".to_string());
        }
    }
    if let Some(v) = &patch.status {
        require_non_empty(&mut errors, "status", v);
    }
    if errors.is_empty() && patch.is_empty() {
        return Err(empty_patch());
    }
    check(errors)
}

fn check_rating(errors: &mut HashMap<String, String>, rating: i32) {
    if !(1..=5).contains(&rating) {
        errors.insert("rating".to_string(), "must be between 1 and 5".to_string());
    }
}

pub fn new_review(new: &NewReview) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    require_non_empty(&mut errors, "customer_name", &new.customer_name);
    require_non_empty(&mut errors, "review_text", &new.review_text);
    check_rating(&mut errors, new.rating);
    check(errors)
}

pub fn review_patch(patch: &ReviewPatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(empty_patch());
    }
    let mut errors = HashMap::new();
    if let Some(v) = &patch.customer_name {
        require_non_empty(&mut errors, "customer_name", v);
    }
    if let Some(v) = &patch.review_text {
        require_non_empty(&mut errors, "review_text", v);
    }
    if let Some(rating) = patch.rating {
        check_rating(&mut errors, rating);
    }
    check(errors)
}

pub fn homepage_entry_patch(patch: &HomepageEntryPatch) -> Result<(), ApiError> {
    // display_order and active accept any value of their type
    if patch.is_empty() {
        return Err(empty_patch());
    }
    Ok(())
}

pub fn new_category(new: &NewCategory) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    require_non_empty(&mut errors, "name", &new.name);
    require_non_empty(&mut errors, "slug", &new.slug);
    check(errors)
}

pub fn category_patch(patch: &CategoryPatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(empty_patch());
    }
    let mut errors = HashMap::new();
    if let Some(v) = &patch.name {
        require_non_empty(&mut errors, "name", v);
    }
    if let Some(v) = &patch.slug {
        require_non_empty(&mut errors, "slug", v);
    }
    check(errors)
}

pub fn new_portfolio_image(new: &NewPortfolioImage) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    require_non_empty(&mut errors, "title", &new.title);
    require_non_empty(&mut errors, "url", &new.url);
    check(errors)
}

pub fn portfolio_image_patch(patch: &PortfolioImagePatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(empty_patch());
    }
    let mut errors = HashMap::new();
    if let Some(v) = &patch.title {
        require_non_empty(&mut errors, "title", v);
    }
    if let Some(v) = &patch.url {
        require_non_empty(&mut errors, "url", v);
    }
    check(errors)
}

fn check_price(errors: &mut HashMap<String, String>, field: &str, price: Decimal) {
    if price < Decimal::ZERO {
        errors.insert(field.to_string(), "must not be negative".to_string());
    }
}

pub fn new_plan(new: &NewDiscountPlan) -> Result<(), ApiError> {
    let mut errors = HashMap::new();
    require_non_empty(&mut errors, "name", &new.name);
    require_non_empty(&mut errors, "description", &new.description);
    check_price(&mut errors, "original_price", new.original_price);
    if let Some(v) = new.discounted_price {
        check_price(&mut errors, "discounted_price", v);
    }
    check(errors)
}

pub fn plan_patch(patch: &DiscountPlanPatch) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(empty_patch());
    }
    let mut errors = HashMap::new();
    if let Some(v) = &patch.name {
        require_non_empty(&mut errors, "name", v);
    }
    if let Some(v) = &patch.description {
        require_non_empty(&mut errors, "description", v);
    }
    if let Some(v) = patch.original_price {
        check_price(&mut errors, "original_price", v);
    }
    if let Some(v) = patch.discounted_price {
        check_price(&mut errors, "discounted_price", v);
    }
    check(errors)
}

pub fn status_value(status: &str) -> Result<(), ApiError> {
    if status.trim().is_empty() {
        return Err(ApiError::invalid_field("status", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(name: &str, text: &str, rating: i32) -> NewReview {
        serde_json::from_value(serde_json::json!({
            "customer_name": name,
            "review_text": text,
            "rating": rating,
        }))
        .unwrap()
    }

    #[test]
    fn rating_bounds() {
        assert!(new_review(&review("Sara", "lovely shoot", 0)).is_err());
        assert!(new_review(&review("Sara", "lovely shoot", 6)).is_err());
        assert!(new_review(&review("Sara", "lovely shoot", 1)).is_ok());
        assert!(new_review(&review("Sara", "lovely shoot", 5)).is_ok());
    }

    #[test]
    fn empty_customer_name_is_named() {
        let err = new_review(&review("", "hi", 5)).unwrap_err();
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["field_errors"]["customer_name"].is_string());
    }

    #[test]
    fn booking_requires_contact_fields() {
        let new: NewBooking = serde_json::from_value(serde_json::json!({
            "first_name": "Nora",
            "last_name": "",
            "phone": "",
            "plan_type": "portrait",
            "plan_price": "150.00",
        }))
        .unwrap();
        let err = new_booking(&new).unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"]["last_name"].is_string());
        assert!(body["field_errors"]["phone"].is_string());
    }

    #[test]
    fn negative_plan_price_rejected() {
        let new: NewBooking = serde_json::from_value(serde_json::json!({
            "first_name": "Nora",
            "last_name": "K",
            "phone": "555-0100",
            "plan_type": "portrait",
            "plan_price": "-1",
        }))
        .unwrap();
        assert!(new_booking(&new).is_err());
    }

    #[test]
    fn tracking_code_is_immutable() {
        let patch: BookingPatch = serde_json::from_value(serde_json::json!({
            "tracking_code": "NR123456",
        }))
        .unwrap();
        let err = booking_patch(&patch).unwrap_err();
        assert!(err.to_json()["field_errors"]["tracking_code"].is_string());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch = BookingPatch::default();
        let err = booking_patch(&patch).unwrap_err();
        assert!(err.message().contains("No fields"));

        assert!(review_patch(&ReviewPatch::default()).is_err());
        assert!(homepage_entry_patch(&HomepageEntryPatch::default()).is_err());
        assert!(category_patch(&CategoryPatch::default()).is_err());
        assert!(portfolio_image_patch(&PortfolioImagePatch::default()).is_err());
        assert!(plan_patch(&DiscountPlanPatch::default()).is_err());
    }

    #[test]
    fn portfolio_image_requires_title_and_url() {
        let new: NewPortfolioImage = serde_json::from_value(serde_json::json!({
            "title": "",
            "url": " ",
        }))
        .unwrap();
        let err = new_portfolio_image(&new).unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"]["title"].is_string());
        assert!(body["field_errors"]["url"].is_string());
    }

    #[test]
    fn category_requires_name_and_slug() {
        let new: NewCategory = serde_json::from_value(serde_json::json!({
            "name": "Weddings",
            "slug": "",
        }))
        .unwrap();
        let err = new_category(&new).unwrap_err();
        assert!(err.to_json()["field_errors"]["slug"].is_string());
    }

    #[test]
    fn plan_prices_must_not_be_negative() {
        let new: NewDiscountPlan = serde_json::from_value(serde_json::json!({
            "name": "Spring mini sessions",
            "description": "Three looks, ten retouched shots",
            "original_price": "-50",
        }))
        .unwrap();
        let err = new_plan(&new).unwrap_err();
        assert!(err.to_json()["field_errors"]["original_price"].is_string());

        let patch: DiscountPlanPatch = serde_json::from_value(serde_json::json!({
            "discounted_price": "-1",
        }))
        .unwrap();
        assert!(plan_patch(&patch).is_err());
    }

    #[test]
    fn decode_names_missing_field() {
        let err = decode_payload::<NewReview>(
            serde_json::json!({ "review_text": "hi", "rating": 5 }),
            "review",
        )
        .unwrap_err();
        assert!(err.message().contains("customer_name"));
    }
}
