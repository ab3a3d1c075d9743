//! Repository for the `portfolio` table.

use creatorhub_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::portfolio::PortfolioLink;
use crate::repositories::CreatorRepo;

const COLUMNS: &str = "id, creator_id, portfolio_link, created_at";

/// Portfolio links attached to a creator.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Append portfolio links to an existing creator.
    ///
    /// Returns `None` (and writes nothing) when the creator does not exist.
    pub async fn append(
        pool: &PgPool,
        creator_id: DbId,
        links: &[String],
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !CreatorRepo::lock_shared(&mut tx, creator_id).await? {
            tx.rollback().await?;
            return Ok(None);
        }
        let inserted = Self::insert_in_tx(&mut tx, creator_id, links).await?;
        tx.commit().await?;
        Ok(Some(inserted))
    }

    pub async fn list_by_creator(
        conn: &mut PgConnection,
        creator_id: DbId,
    ) -> Result<Vec<PortfolioLink>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM portfolio WHERE creator_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, PortfolioLink>(&query)
            .bind(creator_id)
            .fetch_all(conn)
            .await
    }

    pub(crate) async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        creator_id: DbId,
        links: &[String],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for link in links {
            let result =
                sqlx::query("INSERT INTO portfolio (creator_id, portfolio_link) VALUES ($1, $2)")
                    .bind(creator_id)
                    .bind(link)
                    .execute(&mut **tx)
                    .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    pub(crate) async fn delete_by_creator_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        creator_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio WHERE creator_id = $1")
            .bind(creator_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
