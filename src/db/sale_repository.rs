// src/db/sale_repository.rs
// DOCUMENTATION: Database access for sales and revenue aggregates
// PURPOSE: All SQL touching the sales table

use crate::errors::GalleryError;
use crate::models::*;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgExecutor;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Sale columns joined with artwork and artist names
const SALE_SELECT: &str = r#"
    SELECT
        s.id, s.artwork_id, s.buyer, s.buyer_email, s.buyer_phone,
        s.shipping_address, s.price, s.commission, s.payment_method,
        s.payment_status, s.transaction_id, s.date,
        s.created_at, s.updated_at,
        a.title AS artwork_title,
        a.image_url AS artwork_image_url,
        a.price AS artwork_price,
        ar.name AS artist_name
    FROM sales s
    LEFT JOIN artworks a ON a.id = s.artwork_id
    LEFT JOIN artists ar ON ar.id = a.artist_id
"#;

/// Refunded sales do not count towards revenue
const COUNTED_SALES: &str = "payment_status <> 'refunded'";

/// Sale fields written on update
#[derive(Debug, Clone)]
pub struct SaleChanges {
    pub buyer: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub price: f64,
    pub commission: f64,
    pub date: DateTime<Utc>,
}

/// SaleRepository: All database operations for sales
pub struct SaleRepository;

impl SaleRepository {
    /// Insert a sale inside the purchase transaction
    pub async fn insert(conn: &mut PgConnection, sale: &NewSale) -> Result<Uuid, GalleryError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO sales (
                id, artwork_id, buyer, buyer_email, buyer_phone,
                shipping_address, price, commission, payment_method,
                payment_status, transaction_id, date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sale.artwork_id)
        .bind(&sale.buyer)
        .bind(&sale.buyer_email)
        .bind(&sale.buyer_phone)
        .bind(&sale.shipping_address)
        .bind(sale.price)
        .bind(sale.commission)
        .bind(&sale.payment_method)
        .bind(sale.payment_status.as_str())
        .bind(sale.transaction_id)
        .bind(sale.date)
        .fetch_one(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Sale transaction"))?;

        log::info!(
            "Recorded sale {} for artwork {} (transaction {})",
            id,
            sale.artwork_id,
            sale.transaction_id
        );
        Ok(id)
    }

    pub async fn get_by_id<'e, E>(executor: E, id: Uuid) -> Result<Sale, GalleryError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("{} WHERE s.id = $1", SALE_SELECT);

        sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?
            .ok_or_else(|| {
                log::warn!("Sale not found: {}", id);
                GalleryError::NotFound("Sale not found".to_string())
            })
    }

    /// Fetch and row-lock a sale inside a transaction
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Sale, GalleryError> {
        let sql = format!("{} WHERE s.id = $1 FOR UPDATE OF s", SALE_SELECT);

        sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?
            .ok_or_else(|| GalleryError::NotFound("Sale not found".to_string()))
    }

    /// All sales, most recent first
    pub async fn list(pool: &PgPool) -> Result<Vec<Sale>, GalleryError> {
        let sql = format!("{} ORDER BY s.date DESC", SALE_SELECT);

        sqlx::query_as::<_, Sale>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Sale>, GalleryError> {
        let sql = format!("{} ORDER BY s.date DESC LIMIT $1", SALE_SELECT);

        sqlx::query_as::<_, Sale>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &SaleChanges,
    ) -> Result<(), GalleryError> {
        let rows = sqlx::query(
            r#"
            UPDATE sales
            SET buyer = $2,
                buyer_email = $3,
                buyer_phone = $4,
                shipping_address = $5,
                payment_method = $6,
                payment_status = $7,
                price = $8,
                commission = $9,
                date = $10,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.buyer)
        .bind(&changes.buyer_email)
        .bind(&changes.buyer_phone)
        .bind(&changes.shipping_address)
        .bind(&changes.payment_method)
        .bind(changes.payment_status.as_str())
        .bind(changes.price)
        .bind(changes.commission)
        .bind(changes.date)
        .execute(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?
        .rows_affected();

        if rows == 0 {
            return Err(GalleryError::NotFound("Sale not found".to_string()));
        }

        log::info!("Updated sale: {}", id);
        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), GalleryError> {
        let rows = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?
            .rows_affected();

        if rows == 0 {
            return Err(GalleryError::NotFound("Sale not found".to_string()));
        }

        log::info!("Deleted sale: {}", id);
        Ok(())
    }

    /// Number of sales (of any status) referencing an artwork
    pub async fn count_for_artwork<'e, E>(executor: E, artwork_id: Uuid) -> Result<i64, GalleryError>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales WHERE artwork_id = $1")
            .bind(artwork_id)
            .fetch_one(executor)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;
        Ok(count)
    }

    /// Whether a completed sale references the artwork
    pub async fn has_completed_sale<'e, E>(executor: E, artwork_id: Uuid) -> Result<bool, GalleryError>
    where
        E: PgExecutor<'e>,
    {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM sales WHERE artwork_id = $1 AND payment_status = 'completed')",
        )
        .bind(artwork_id)
        .fetch_one(executor)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;
        Ok(exists)
    }

    /// Revenue and sale count over every non-refunded sale
    pub async fn stats(pool: &PgPool) -> Result<SalesStats, GalleryError> {
        let sql = format!(
            r#"
            SELECT COALESCE(SUM(price), 0)::DOUBLE PRECISION AS total, COUNT(*) AS count
            FROM sales
            WHERE {}
            "#,
            COUNTED_SALES
        );

        sqlx::query_as::<_, SalesStats>(&sql)
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))
    }

    /// Revenue and sale count for sales dated in [from, to)
    pub async fn stats_between(
        pool: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<SalesStats, GalleryError> {
        let sql = format!(
            r#"
            SELECT COALESCE(SUM(price), 0)::DOUBLE PRECISION AS total, COUNT(*) AS count
            FROM sales
            WHERE {} AND date >= $1 AND date < $2
            "#,
            COUNTED_SALES
        );

        sqlx::query_as::<_, SalesStats>(&sql)
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))
    }

    /// (date, price) of every counted sale dated at or after `from`
    pub async fn price_points_since(
        pool: &PgPool,
        from: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, f64)>, GalleryError> {
        let sql = format!(
            "SELECT date, price FROM sales WHERE {} AND date >= $1 ORDER BY date ASC",
            COUNTED_SALES
        );

        log::debug!("Loading chart points since {}", from);

        sqlx::query_as::<_, (DateTime<Utc>, f64)>(&sql)
            .bind(from)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))
    }
}
