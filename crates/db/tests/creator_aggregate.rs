//! Integration tests for the creator aggregate repositories.
//!
//! Exercises the repository layer against a real database:
//! - Registration with children, then lookup by id and email
//! - Cascade delete removes every row; a failure mid-cascade removes none
//! - Appends are refused for creators that do not exist
//! - Listing by type and photo replacement

use assert_matches::assert_matches;
use creatorhub_core::creator::{CreatorProfile, Registration, ServiceInput};
use creatorhub_core::types::DbId;
use creatorhub_db::models::creator::DeletedCounts;
use creatorhub_db::repositories::{CreatorRepo, PaymentMethodRepo, PortfolioRepo, ServiceRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn profile(creator_type: &str, email: &str) -> CreatorProfile {
    CreatorProfile {
        creator_type: creator_type.to_string(),
        full_name: "Meera Frame".to_string(),
        email: email.to_string(),
        phone: "555-0101".to_string(),
        location: "Goa".to_string(),
        experience: "3 years".to_string(),
        equipment: "DSLR".to_string(),
        bio: "Beach weddings".to_string(),
        website: String::new(),
        instagram: "@meera".to_string(),
        availability: "Weekdays".to_string(),
    }
}

fn service(name: &str, price: f64) -> ServiceInput {
    ServiceInput {
        service_name: name.to_string(),
        price,
        unit: "per session".to_string(),
    }
}

fn registration(email: &str, services: usize, links: usize, methods: usize) -> Registration {
    Registration {
        profile: profile("photographer", email),
        services: (0..services)
            .map(|i| service(&format!("Service {i}"), 100.0 + i as f64))
            .collect(),
        portfolio: (0..links)
            .map(|i| format!("https://portfolio.example/{i}"))
            .collect(),
        payment_methods: (0..methods).map(|i| format!("Method {i}")).collect(),
    }
}

/// Count all rows belonging to a creator across the four tables.
async fn aggregate_row_count(pool: &PgPool, id: DbId) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM creators WHERE id = $1)
              + (SELECT COUNT(*) FROM services WHERE creator_id = $1)
              + (SELECT COUNT(*) FROM portfolio WHERE creator_id = $1)
              + (SELECT COUNT(*) FROM payment_methods WHERE creator_id = $1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

async fn total_row_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM creators)
              + (SELECT COUNT(*) FROM services)
              + (SELECT COUNT(*) FROM portfolio)
              + (SELECT COUNT(*) FROM payment_methods)",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Create + read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_fetch_returns_children(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("a@example.com", 2, 1, 0))
        .await
        .unwrap();

    let agg = CreatorRepo::find_aggregate_by_id(&pool, id)
        .await
        .unwrap()
        .expect("creator should exist");

    assert_eq!(agg.creator.id, id);
    assert_eq!(agg.creator.email, "a@example.com");
    assert!(agg.creator.profile_photo.is_none());
    assert_eq!(agg.services.len(), 2);
    assert_eq!(agg.portfolio.len(), 1);
    assert!(agg.payment_methods.is_empty());
    assert!(agg.services.iter().all(|s| s.creator_id == id));
    assert_eq!(agg.services[0].service_name, "Service 0");
    assert_eq!(agg.services[1].price, 101.0);
    assert_eq!(agg.portfolio[0].creator_id, id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fetch_missing_creator_returns_none(pool: PgPool) {
    let agg = CreatorRepo::find_aggregate_by_id(&pool, 424_242).await.unwrap();
    assert!(agg.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_search_matches_fetch_by_id(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("same@example.com", 1, 2, 1))
        .await
        .unwrap();

    let by_id = CreatorRepo::find_aggregate_by_id(&pool, id).await.unwrap().unwrap();
    let by_email = CreatorRepo::find_aggregate_by_email(&pool, "same@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&by_id).unwrap(),
        serde_json::to_value(&by_email).unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_search_unknown_returns_none(pool: PgPool) {
    let found = CreatorRepo::find_aggregate_by_email(&pool, "nobody@example.com")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_returns_lowest_id(pool: PgPool) {
    let first = CreatorRepo::create(&pool, &registration("dup@example.com", 0, 0, 0))
        .await
        .unwrap();
    CreatorRepo::create(&pool, &registration("dup@example.com", 0, 0, 0))
        .await
        .unwrap();

    let found = CreatorRepo::find_aggregate_by_email(&pool, "dup@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.creator.id, first);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_type_filters_and_projects(pool: PgPool) {
    let mut videographer = registration("v@example.com", 0, 0, 0);
    videographer.profile.creator_type = "videographer".to_string();
    CreatorRepo::create(&pool, &videographer).await.unwrap();
    let photo_id = CreatorRepo::create(&pool, &registration("p@example.com", 0, 0, 0))
        .await
        .unwrap();

    let listed = CreatorRepo::list_by_type(&pool, "photographer").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, photo_id);
    assert_eq!(listed[0].full_name, "Meera Frame");
    assert_eq!(listed[0].location, "Goa");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_unknown_type_is_empty(pool: PgPool) {
    CreatorRepo::create(&pool, &registration("p@example.com", 0, 0, 0))
        .await
        .unwrap();
    let listed = CreatorRepo::list_by_type(&pool, "sculptor").await.unwrap();
    assert!(listed.is_empty());
}

// ---------------------------------------------------------------------------
// Appends
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_children_to_existing_creator(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("a@example.com", 1, 0, 0))
        .await
        .unwrap();

    let added = ServiceRepo::append(&pool, id, &[service("Album", 50.0), service("Reel", 75.0)])
        .await
        .unwrap();
    assert_eq!(added, Some(2));

    let added = PortfolioRepo::append(&pool, id, &["https://x.example".to_string()])
        .await
        .unwrap();
    assert_eq!(added, Some(1));

    let added = PaymentMethodRepo::append(&pool, id, &["UPI".to_string(), "Cash".to_string()])
        .await
        .unwrap();
    assert_eq!(added, Some(2));

    let agg = CreatorRepo::find_aggregate_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(agg.services.len(), 3);
    assert_eq!(agg.portfolio.len(), 1);
    assert_eq!(agg.payment_methods.len(), 2);
    assert_eq!(agg.payment_methods[1].method, "Cash");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_to_missing_creator_writes_nothing(pool: PgPool) {
    let added = ServiceRepo::append(&pool, 999_999, &[service("Ghost", 1.0)])
        .await
        .unwrap();
    assert_eq!(added, None);

    let added = PortfolioRepo::append(&pool, 999_999, &["https://x.example".to_string()])
        .await
        .unwrap();
    assert_eq!(added, None);

    let added = PaymentMethodRepo::append(&pool, 999_999, &["UPI".to_string()])
        .await
        .unwrap();
    assert_eq!(added, None);

    assert_eq!(total_row_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_orphan_insert_rejected_by_foreign_key(pool: PgPool) {
    let result = sqlx::query("INSERT INTO services (creator_id, service_name) VALUES ($1, $2)")
        .bind(555_i64)
        .bind("Orphan")
        .execute(&pool)
        .await;

    assert_matches!(result, Err(sqlx::Error::Database(ref e)) if e.code().as_deref() == Some("23503"));
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_entire_aggregate(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("gone@example.com", 3, 2, 2))
        .await
        .unwrap();
    let keep = CreatorRepo::create(&pool, &registration("stay@example.com", 1, 1, 1))
        .await
        .unwrap();
    assert_eq!(aggregate_row_count(&pool, id).await, 3 + 2 + 2 + 1);

    let counts = CreatorRepo::delete_aggregate(&pool, id).await.unwrap();
    assert_eq!(
        counts,
        Some(DeletedCounts {
            services: 3,
            portfolio: 2,
            payment_methods: 2,
            creators: 1,
        })
    );
    assert_eq!(counts.unwrap().total(), 8);

    assert_eq!(aggregate_row_count(&pool, id).await, 0);
    assert_eq!(aggregate_row_count(&pool, keep).await, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_creator_mutates_nothing(pool: PgPool) {
    CreatorRepo::create(&pool, &registration("stay@example.com", 2, 1, 1))
        .await
        .unwrap();
    let before = total_row_count(&pool).await;

    let counts = CreatorRepo::delete_aggregate(&pool, 987_654).await.unwrap();
    assert_eq!(counts, None);
    assert_eq!(total_row_count(&pool).await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_delete_rolls_back_children(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("fragile@example.com", 2, 3, 1))
        .await
        .unwrap();
    let before = aggregate_row_count(&pool, id).await;
    assert_eq!(before, 2 + 3 + 1 + 1);

    // Let the child deletes succeed, then fail on the parent row.
    sqlx::query(
        "CREATE FUNCTION refuse_creator_delete() RETURNS trigger AS $$
         BEGIN
             RAISE EXCEPTION 'simulated failure';
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_refuse_creator_delete BEFORE DELETE ON creators
         FOR EACH ROW EXECUTE FUNCTION refuse_creator_delete()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = CreatorRepo::delete_aggregate(&pool, id).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    assert_eq!(aggregate_row_count(&pool, id).await, before);
    let agg = CreatorRepo::find_aggregate_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(agg.services.len(), 2);
    assert_eq!(agg.portfolio.len(), 3);
    assert_eq!(agg.payment_methods.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_create_writes_nothing(pool: PgPool) {
    // The creator row and its services go in first; the payment method
    // insert is the one that fails.
    sqlx::query(
        "CREATE FUNCTION refuse_payment_method() RETURNS trigger AS $$
         BEGIN
             RAISE EXCEPTION 'simulated failure';
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_refuse_payment_method BEFORE INSERT ON payment_methods
         FOR EACH ROW EXECUTE FUNCTION refuse_payment_method()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = CreatorRepo::create(&pool, &registration("halfway@example.com", 2, 1, 1)).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    assert_eq!(total_row_count(&pool).await, 0);
    assert!(CreatorRepo::find_aggregate_by_email(&pool, "halfway@example.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_deletes_have_one_winner(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("race@example.com", 2, 1, 1))
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        CreatorRepo::delete_aggregate(&pool, id),
        CreatorRepo::delete_aggregate(&pool, id),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    let winners: Vec<_> = outcomes.iter().flatten().collect();
    assert_eq!(winners.len(), 1, "outcomes: {outcomes:?}");
    assert_eq!(
        *winners[0],
        DeletedCounts {
            services: 2,
            portfolio: 1,
            payment_methods: 1,
            creators: 1,
        }
    );
    assert_eq!(aggregate_row_count(&pool, id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_delete_reports_missing(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("once@example.com", 1, 0, 0))
        .await
        .unwrap();

    assert!(CreatorRepo::delete_aggregate(&pool, id).await.unwrap().is_some());
    assert!(CreatorRepo::delete_aggregate(&pool, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Photo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_photo_round_trips_bytes(pool: PgPool) {
    let id = CreatorRepo::create(&pool, &registration("pic@example.com", 0, 0, 0))
        .await
        .unwrap();
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xFF, 0x10];

    let touched = CreatorRepo::update_photo(&pool, id, &bytes).await.unwrap();
    assert_eq!(touched, 1);

    let creator = CreatorRepo::find_aggregate_by_id(&pool, id)
        .await
        .unwrap()
        .unwrap()
        .creator;
    assert_eq!(creator.profile_photo.as_deref(), Some(bytes.as_slice()));
    assert!(creator.updated_at >= creator.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_photo_for_missing_creator_touches_nothing(pool: PgPool) {
    let touched = CreatorRepo::update_photo(&pool, 31_337, b"GIF89a").await.unwrap();
    assert_eq!(touched, 0);
}
