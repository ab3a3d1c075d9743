//! Repository for the `services` table.

use creatorhub_core::creator::ServiceInput;
use creatorhub_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::service::Service;
use crate::repositories::CreatorRepo;

const COLUMNS: &str = "id, creator_id, service_name, price, unit, created_at";

/// Services offered by a creator.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Append services to an existing creator.
    ///
    /// Returns `None` (and writes nothing) when the creator does not exist.
    /// The creator row is share-locked for the duration so a concurrent
    /// delete cannot slip in between the check and the inserts.
    pub async fn append(
        pool: &PgPool,
        creator_id: DbId,
        items: &[ServiceInput],
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !CreatorRepo::lock_shared(&mut tx, creator_id).await? {
            tx.rollback().await?;
            return Ok(None);
        }
        let inserted = Self::insert_in_tx(&mut tx, creator_id, items).await?;
        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// List a creator's services, oldest first.
    pub async fn list_by_creator(
        conn: &mut PgConnection,
        creator_id: DbId,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM services WHERE creator_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Service>(&query)
            .bind(creator_id)
            .fetch_all(conn)
            .await
    }

    /// Insert services within an existing transaction. Returns the row count.
    pub(crate) async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        creator_id: DbId,
        items: &[ServiceInput],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for item in items {
            let result = sqlx::query(
                "INSERT INTO services (creator_id, service_name, price, unit) VALUES ($1, $2, $3, $4)",
            )
            .bind(creator_id)
            .bind(&item.service_name)
            .bind(item.price)
            .bind(&item.unit)
            .execute(&mut **tx)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Delete every service of a creator within an existing transaction.
    pub(crate) async fn delete_by_creator_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        creator_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE creator_id = $1")
            .bind(creator_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
