// End-to-end tests against a real database. Ignored by default: run with
// DATABASE_URL pointing at a disposable Postgres and `cargo test -- --ignored`.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};
use uuid::Uuid;

async fn setup() -> Result<()> {
    common::init_with_store();
    nora_studio_api::database::manager::DatabaseManager::migrate().await?;
    Ok(())
}

fn mutation(action: &str, table: &str, id: Option<&str>, data: Value) -> Value {
    let mut body = json!({
        "action": action,
        "target_table": table,
        "data": data,
    });
    if let Some(id) = id {
        body["id"] = json!(id);
    }
    body
}

fn updated_at(row: &Value) -> Result<DateTime<FixedOffset>> {
    let raw = row["updated_at"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("no updated_at in {}", row))?;
    Ok(DateTime::parse_from_rfc3339(raw)?)
}

async fn create_booking() -> Result<Value> {
    let (status, response) = common::request(
        "POST",
        "/bookings",
        None,
        Some(json!({
            "first_name": "Nora",
            "last_name": "K",
            "phone": "555-0100",
            "plan_type": "portrait",
            "plan_price": "150.00",
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create failed: {}", response);
    Ok(response["data"].clone())
}

#[tokio::test]
#[ignore]
async fn repeated_identical_update_succeeds_and_refreshes_updated_at() -> Result<()> {
    setup().await?;
    let token = common::login(false).await?;
    let booking = create_booking().await?;
    let id = booking["id"].as_str().unwrap().to_string();

    let body = mutation("update_called", "bookings", Some(&id), json!({ "called": true }));
    let (status, first) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["called"], json!(true));

    // Same value again: not an error, and the row is touched again
    let (status, second) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"]["called"], json!(true));
    assert!(updated_at(&second["data"])? >= updated_at(&first["data"])?);

    let body = mutation("delete", "bookings", Some(&id), json!({}));
    common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn deleted_booking_is_gone_for_good() -> Result<()> {
    setup().await?;
    let token = common::login(false).await?;
    let booking = create_booking().await?;
    let id = booking["id"].as_str().unwrap().to_string();

    let body = mutation("delete", "bookings", Some(&id), json!({}));
    let (status, response) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["deleted"], json!(true));

    // Any further write against the row is NotFound
    let update = mutation("update_status", "bookings", Some(&id), json!({ "status": "called" }));
    let (status, response) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(update)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", response);

    // Deleting again is NotFound too, not a silent success
    let (status, _) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn booking_lifecycle_reaches_the_public_lookup() -> Result<()> {
    setup().await?;
    let token = common::login(false).await?;

    let booking = create_booking().await?;
    let id = booking["id"].as_str().unwrap().to_string();
    let code = booking["tracking_code"].as_str().unwrap().to_string();
    assert!(code.starts_with("NR") && code.len() == 8, "{}", code);

    // Visible in the admin list
    let (status, response) =
        common::request("GET", "/api/admin/bookings", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(response["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"].as_str() == Some(&id)));

    // Mark called, move the status along
    let body = mutation("update_called", "bookings", Some(&id), json!({ "called": true }));
    let (status, _) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);

    let body = mutation("update_status", "bookings", Some(&id), json!({ "status": "called" }));
    let (status, _) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);

    // The customer sees the new state through the tracking code
    let (status, response) =
        common::request("GET", &format!("/bookings/{}", code), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["status"], json!("called"));
    assert_eq!(response["data"]["called"], json!(true));

    let body = mutation("delete", "bookings", Some(&id), json!({}));
    common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn catalog_write_paths_bootstrap_the_homepage() -> Result<()> {
    setup().await?;
    let token = common::login(false).await?;

    let slug = format!("store-test-{}", Uuid::new_v4());
    let body = mutation(
        "create",
        "categories",
        None,
        json!({ "name": "Store test", "slug": slug }),
    );
    let (status, response) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{}", response);
    let category_id = response["data"]["id"].as_str().unwrap().to_string();

    let body = mutation(
        "create",
        "portfolio_images",
        None,
        json!({
            "title": "Dunes at dusk",
            "url": "https://img.example/dunes.jpg",
            "category_id": category_id,
        }),
    );
    let (status, response) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{}", response);
    let image_id = response["data"]["id"].as_str().unwrap().to_string();

    // The freshly created image can be curated onto the homepage
    let body = mutation(
        "create",
        "homepage_portfolio",
        None,
        json!({ "portfolio_image_id": image_id }),
    );
    let (status, response) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{}", response);

    let (status, response) = common::request("GET", "/homepage", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(response["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["portfolio_image_id"].as_str() == Some(&image_id)));

    // Deleting the image takes its curation entry with it
    let body = mutation("delete", "portfolio_images", Some(&image_id), json!({}));
    let (status, _) =
        common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, response) = common::request("GET", "/homepage", None, None).await?;
    assert!(!response["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["portfolio_image_id"].as_str() == Some(&image_id)));

    let body = mutation("delete", "categories", Some(&category_id), json!({}));
    common::request("POST", "/api/admin/mutations", Some(&token), Some(body)).await?;
    Ok(())
}
