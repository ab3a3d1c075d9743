//! Repository for the `creators` table and the creator aggregate.
//!
//! A creator owns rows in `services`, `portfolio`, and `payment_methods`.
//! Registration writes the creator and its initial children in one
//! transaction; deletion removes children before the parent, also in one
//! transaction, and rolls back explicitly if any step fails.

use creatorhub_core::creator::Registration;
use creatorhub_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::creator::{Creator, CreatorAggregate, CreatorSummary, DeletedCounts};
use crate::repositories::{PaymentMethodRepo, PortfolioRepo, ServiceRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_type, full_name, email, phone, location, experience, \
     equipment, bio, website, instagram, availability, profile_photo, created_at, updated_at";

/// Projection used by listings.
const SUMMARY_COLUMNS: &str = "id, full_name, location, profile_photo";

pub struct CreatorRepo;

impl CreatorRepo {
    /// Insert a creator and its initial children, returning the new id.
    ///
    /// Nothing is written unless every insert succeeds.
    pub async fn create(pool: &PgPool, input: &Registration) -> Result<DbId, sqlx::Error> {
        let profile = &input.profile;
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO creators (creator_type, full_name, email, phone, location, experience,
                 equipment, bio, website, instagram, availability)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id",
        )
        .bind(&profile.creator_type)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.experience)
        .bind(&profile.equipment)
        .bind(&profile.bio)
        .bind(&profile.website)
        .bind(&profile.instagram)
        .bind(&profile.availability)
        .fetch_one(&mut *tx)
        .await?;

        ServiceRepo::insert_in_tx(&mut tx, id, &input.services).await?;
        PortfolioRepo::insert_in_tx(&mut tx, id, &input.portfolio).await?;
        PaymentMethodRepo::insert_in_tx(&mut tx, id, &input.payment_methods).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Load a creator and all of its children by id.
    pub async fn find_aggregate_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CreatorAggregate>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM creators WHERE id = $1");
        let creator = sqlx::query_as::<_, Creator>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match creator {
            Some(creator) => Self::load_children(&mut conn, creator).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load a creator and all of its children by email.
    ///
    /// Email is not unique; the lowest id wins.
    pub async fn find_aggregate_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<CreatorAggregate>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query =
            format!("SELECT {COLUMNS} FROM creators WHERE email = $1 ORDER BY id ASC LIMIT 1");
        let creator = sqlx::query_as::<_, Creator>(&query)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await?;

        match creator {
            Some(creator) => Self::load_children(&mut conn, creator).await.map(Some),
            None => Ok(None),
        }
    }

    /// List creators of one type, ordered by id.
    pub async fn list_by_type(
        pool: &PgPool,
        creator_type: &str,
    ) -> Result<Vec<CreatorSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM creators WHERE creator_type = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, CreatorSummary>(&query)
            .bind(creator_type)
            .fetch_all(pool)
            .await
    }

    /// Replace a creator's profile photo. Returns the number of rows touched
    /// (0 when the creator does not exist).
    pub async fn update_photo(pool: &PgPool, id: DbId, photo: &[u8]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE creators SET profile_photo = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(photo)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a creator and every dependent row atomically.
    ///
    /// Returns `None` when the creator does not exist (nothing is touched).
    /// Children go first, then the creator. The creator row is locked
    /// `FOR UPDATE` before any delete, so concurrent deletes of the same id
    /// serialize and the loser sees `None`.
    pub async fn delete_aggregate(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeletedCounts>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        match Self::cascade_delete_in_tx(&mut tx, id).await {
            Ok(Some(counts)) => {
                tx.commit().await?;
                Ok(Some(counts))
            }
            Ok(None) => {
                tx.rollback().await?;
                Ok(None)
            }
            Err(err) => {
                match tx.rollback().await {
                    Ok(()) => {
                        tracing::warn!(creator_id = id, error = %err, "Cascade delete rolled back");
                    }
                    Err(rollback_err) => {
                        tracing::warn!(
                            creator_id = id,
                            error = %err,
                            rollback_error = %rollback_err,
                            "Cascade delete failed and rollback also failed",
                        );
                    }
                }
                Err(err)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Share-lock a creator row inside a transaction. Returns `false` when
    /// the creator does not exist.
    pub(crate) async fn lock_shared(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, DbId>("SELECT id FROM creators WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(found.is_some())
    }

    async fn cascade_delete_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<DeletedCounts>, sqlx::Error> {
        let found = sqlx::query_scalar::<_, DbId>("SELECT id FROM creators WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Ok(None);
        }

        let services = ServiceRepo::delete_by_creator_in_tx(tx, id).await?;
        let portfolio = PortfolioRepo::delete_by_creator_in_tx(tx, id).await?;
        let payment_methods = PaymentMethodRepo::delete_by_creator_in_tx(tx, id).await?;

        let creators = sqlx::query("DELETE FROM creators WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(Some(DeletedCounts {
            services,
            portfolio,
            payment_methods,
            creators,
        }))
    }

    async fn load_children(
        conn: &mut PgConnection,
        creator: Creator,
    ) -> Result<CreatorAggregate, sqlx::Error> {
        let services = ServiceRepo::list_by_creator(&mut *conn, creator.id).await?;
        let portfolio = PortfolioRepo::list_by_creator(&mut *conn, creator.id).await?;
        let payment_methods = PaymentMethodRepo::list_by_creator(&mut *conn, creator.id).await?;

        Ok(CreatorAggregate {
            creator,
            services,
            portfolio,
            payment_methods,
        })
    }
}
