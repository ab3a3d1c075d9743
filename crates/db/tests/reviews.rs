//! Integration tests for the `reviews` repository.

use creatorhub_core::review::NewReview;
use creatorhub_db::repositories::ReviewRepo;
use sqlx::PgPool;

fn review(name: &str, message: &str) -> NewReview {
    NewReview {
        name: name.to_string(),
        message: message.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_review_returns_row(pool: PgPool) {
    let created = ReviewRepo::create(&pool, &review("Asha", "Lovely photos"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Asha");
    assert_eq!(created.message, "Lovely photos");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_reviews_newest_first(pool: PgPool) {
    // Pin timestamps so ordering does not depend on insert timing.
    for (name, age) in [("oldest", "3 days"), ("newest", "1 hour"), ("middle", "1 day")] {
        sqlx::query(
            "INSERT INTO reviews (name, message, created_at) VALUES ($1, 'msg', NOW() - $2::interval)",
        )
        .bind(name)
        .bind(age)
        .execute(&pool)
        .await
        .unwrap();
    }

    let names: Vec<String> = ReviewRepo::list_newest_first(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_reviews_empty(pool: PgPool) {
    assert!(ReviewRepo::list_newest_first(&pool).await.unwrap().is_empty());
}
