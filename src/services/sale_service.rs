// src/services/sale_service.rs
// DOCUMENTATION: Business logic for sales
// PURPOSE: Records purchases and keeps each artwork's sold status consistent

use crate::db::{ArtworkRepository, SaleChanges, SaleRepository};
use crate::errors::GalleryError;
use crate::models::{
    commission_for, ArtworkStatus, CreateSaleRequest, NewSale, PaymentStatus, Sale, SaleResponse,
    SalesStats, UpdateSaleRequest,
};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// What a payment status change means for the artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtworkTransition {
    None,
    /// available -> sold
    Reserve,
    /// sold -> available
    Release,
}

fn plan_transition(old: PaymentStatus, new: PaymentStatus) -> ArtworkTransition {
    match (old == PaymentStatus::Completed, new == PaymentStatus::Completed) {
        (false, true) => ArtworkTransition::Reserve,
        (true, false) => ArtworkTransition::Release,
        _ => ArtworkTransition::None,
    }
}

const MAX_BUYER_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 64;
const MAX_PAYMENT_METHOD_LEN: usize = 64;

/// Column widths of the sales table
fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), GalleryError> {
    match value {
        Some(v) if v.chars().count() > max => Err(GalleryError::ValidationError(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

fn check_buyer_fields(
    buyer: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    payment_method: Option<&str>,
) -> Result<(), GalleryError> {
    check_length("buyerName", buyer, MAX_BUYER_LEN)?;
    check_length("buyerEmail", email, MAX_EMAIL_LEN)?;
    check_length("buyerPhone", phone, MAX_PHONE_LEN)?;
    check_length("paymentMethod", payment_method, MAX_PAYMENT_METHOD_LEN)
}

/// Check required fields and price, then compute the server-side fields
/// DOCUMENTATION: A zero price counts as missing
fn validate_new_sale(req: CreateSaleRequest) -> Result<NewSale, GalleryError> {
    let non_blank = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let (artwork_id, buyer, payment_method, price) = match (
        req.artwork_id,
        non_blank(req.buyer_name),
        non_blank(req.payment_method),
        req.price.filter(|p| *p != 0.0),
    ) {
        (Some(artwork_id), Some(buyer), Some(method), Some(price)) => {
            (artwork_id, buyer, method, price)
        }
        _ => {
            return Err(GalleryError::InvalidInput(
                "Missing required fields".to_string(),
            ))
        }
    };

    validate_price(price)?;

    let buyer_email = non_blank(req.buyer_email);
    let buyer_phone = non_blank(req.buyer_phone);
    check_buyer_fields(
        Some(&buyer),
        buyer_email.as_deref(),
        buyer_phone.as_deref(),
        Some(&payment_method),
    )?;

    Ok(NewSale {
        artwork_id,
        buyer,
        buyer_email,
        buyer_phone,
        shipping_address: non_blank(req.shipping_address),
        payment_method,
        price,
        commission: commission_for(price),
        payment_status: PaymentStatus::Completed,
        transaction_id: Uuid::new_v4(),
        date: req.sale_date.unwrap_or_else(Utc::now),
    })
}

fn validate_price(price: f64) -> Result<(), GalleryError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(GalleryError::ValidationError(
            "price must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Merge an update onto the stored sale; commission follows the price
fn merge_changes(existing: &Sale, req: UpdateSaleRequest) -> Result<SaleChanges, GalleryError> {
    check_buyer_fields(
        req.buyer.as_deref(),
        req.buyer_email.as_deref(),
        req.buyer_phone.as_deref(),
        req.payment_method.as_deref(),
    )?;

    let price = match req.price {
        Some(price) => {
            validate_price(price)?;
            price
        }
        None => existing.price,
    };
    let commission = if req.price.is_some() {
        commission_for(price)
    } else {
        existing.commission
    };

    Ok(SaleChanges {
        buyer: req
            .buyer
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| existing.buyer.clone()),
        buyer_email: req.buyer_email.or_else(|| existing.buyer_email.clone()),
        buyer_phone: req.buyer_phone.or_else(|| existing.buyer_phone.clone()),
        shipping_address: req
            .shipping_address
            .or_else(|| existing.shipping_address.clone()),
        payment_method: req
            .payment_method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| existing.payment_method.clone()),
        payment_status: req
            .payment_status
            .unwrap_or_else(|| existing.payment_status()),
        price,
        commission,
        date: req.date.unwrap_or(existing.date),
    })
}

pub struct SaleService;

impl SaleService {
    pub async fn list_sales(pool: &PgPool) -> Result<Vec<SaleResponse>, GalleryError> {
        let sales = SaleRepository::list(pool).await?;
        Ok(sales.iter().map(|s| s.to_response()).collect())
    }

    pub async fn get_sale(pool: &PgPool, id: Uuid) -> Result<SaleResponse, GalleryError> {
        let sale = SaleRepository::get_by_id(pool, id).await?;
        Ok(sale.to_response())
    }

    pub async fn stats(pool: &PgPool) -> Result<SalesStats, GalleryError> {
        SaleRepository::stats(pool).await
    }

    /// Sell an available artwork
    /// DOCUMENTATION: The artwork row is locked and flipped to sold with a
    /// guarded update before the sale row is written, all in one transaction
    pub async fn create_sale(
        pool: &PgPool,
        req: CreateSaleRequest,
    ) -> Result<SaleResponse, GalleryError> {
        let new_sale = validate_new_sale(req)?;

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;

        ArtworkRepository::lock_by_id(&mut tx, new_sale.artwork_id).await?;
        reserve_artwork(&mut tx, new_sale.artwork_id).await?;

        let id = SaleRepository::insert(&mut tx, &new_sale).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;

        Self::get_sale(pool, id).await
    }

    /// Partial update applying payment status side effects to the artwork
    pub async fn update_sale(
        pool: &PgPool,
        id: Uuid,
        req: UpdateSaleRequest,
    ) -> Result<SaleResponse, GalleryError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;

        let existing = SaleRepository::lock_by_id(&mut tx, id).await?;
        let changes = merge_changes(&existing, req)?;

        match plan_transition(existing.payment_status(), changes.payment_status) {
            ArtworkTransition::Reserve => reserve_artwork(&mut tx, existing.artwork_id).await?,
            ArtworkTransition::Release => release_artwork(&mut tx, existing.artwork_id).await?,
            ArtworkTransition::None => {}
        }

        SaleRepository::update(&mut tx, id, &changes).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;

        Self::get_sale(pool, id).await
    }

    /// Delete a sale; a completed sale hands its artwork back
    pub async fn delete_sale(pool: &PgPool, id: Uuid) -> Result<(), GalleryError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;

        let existing = SaleRepository::lock_by_id(&mut tx, id).await?;
        if existing.payment_status() == PaymentStatus::Completed {
            release_artwork(&mut tx, existing.artwork_id).await?;
        }

        SaleRepository::delete(&mut tx, id).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Sale"))?;
        Ok(())
    }
}

async fn reserve_artwork(conn: &mut PgConnection, artwork_id: Uuid) -> Result<(), GalleryError> {
    let moved = ArtworkRepository::transition_status(
        conn,
        artwork_id,
        &[ArtworkStatus::Available],
        ArtworkStatus::Sold,
    )
    .await?;

    if !moved {
        log::warn!("Artwork {} is not available for sale", artwork_id);
        return Err(GalleryError::InvalidInput(
            "Artwork is not available for sale".to_string(),
        ));
    }
    Ok(())
}

async fn release_artwork(conn: &mut PgConnection, artwork_id: Uuid) -> Result<(), GalleryError> {
    let moved = ArtworkRepository::transition_status(
        conn,
        artwork_id,
        &[ArtworkStatus::Sold],
        ArtworkStatus::Available,
    )
    .await?;

    if !moved {
        log::warn!("Artwork {} was not marked sold; status left as is", artwork_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    fn full_request() -> CreateSaleRequest {
        CreateSaleRequest {
            artwork_id: Some(Uuid::new_v4()),
            buyer_name: Some("Peggy Guggenheim".to_string()),
            buyer_email: Some("peggy@example.com".to_string()),
            buyer_phone: None,
            shipping_address: Some("  ".to_string()),
            payment_method: Some("card".to_string()),
            price: Some(1200.0),
            sale_date: None,
        }
    }

    fn stored_sale(status: &str) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4(),
            artwork_id: Uuid::new_v4(),
            buyer: "Peggy Guggenheim".to_string(),
            buyer_email: None,
            buyer_phone: None,
            shipping_address: None,
            price: 1200.0,
            commission: 120.0,
            payment_method: "card".to_string(),
            payment_status: status.to_string(),
            transaction_id: Uuid::new_v4(),
            date: now,
            created_at: now,
            updated_at: now,
            artwork_title: None,
            artwork_image_url: None,
            artwork_price: None,
            artist_name: None,
        }
    }

    #[test]
    fn test_transition_plan() {
        use PaymentStatus::*;

        assert_eq!(plan_transition(Completed, Refunded), ArtworkTransition::Release);
        assert_eq!(plan_transition(Completed, Pending), ArtworkTransition::Release);
        assert_eq!(plan_transition(Refunded, Completed), ArtworkTransition::Reserve);
        assert_eq!(plan_transition(Pending, Completed), ArtworkTransition::Reserve);
        assert_eq!(plan_transition(Completed, Completed), ArtworkTransition::None);
        assert_eq!(plan_transition(Pending, Refunded), ArtworkTransition::None);
    }

    #[test]
    fn test_new_sale_fills_server_fields() {
        let sale = validate_new_sale(full_request()).unwrap();

        assert_eq!(sale.buyer, "Peggy Guggenheim");
        assert_eq!(sale.commission, 120.0);
        assert_eq!(sale.payment_status, PaymentStatus::Completed);
        assert!(sale.shipping_address.is_none());
        assert!(sale.date <= Utc::now());
    }

    #[test]
    fn test_new_sale_missing_fields() {
        for req in [
            CreateSaleRequest { artwork_id: None, ..full_request() },
            CreateSaleRequest { buyer_name: Some(" ".to_string()), ..full_request() },
            CreateSaleRequest { payment_method: None, ..full_request() },
            CreateSaleRequest { price: None, ..full_request() },
            CreateSaleRequest { price: Some(0.0), ..full_request() },
        ] {
            match validate_new_sale(req) {
                Err(GalleryError::InvalidInput(msg)) => assert_eq!(msg, "Missing required fields"),
                other => panic!("expected missing fields error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_sale_rejects_negative_price() {
        let req = CreateSaleRequest { price: Some(-10.0), ..full_request() };
        assert!(matches!(
            validate_new_sale(req),
            Err(GalleryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_new_sale_rejects_overlong_fields() {
        for req in [
            CreateSaleRequest { buyer_name: Some("a".repeat(256)), ..full_request() },
            CreateSaleRequest { buyer_email: Some(format!("{}@example.com", "a".repeat(250))), ..full_request() },
            CreateSaleRequest { buyer_phone: Some("5".repeat(65)), ..full_request() },
            CreateSaleRequest { payment_method: Some("x".repeat(65)), ..full_request() },
        ] {
            assert!(matches!(
                validate_new_sale(req),
                Err(GalleryError::ValidationError(_))
            ));
        }

        let at_limit = CreateSaleRequest { buyer_phone: Some("5".repeat(64)), ..full_request() };
        assert!(validate_new_sale(at_limit).is_ok());
    }

    #[test]
    fn test_update_rejects_overlong_fields() {
        let existing = stored_sale("completed");
        let result = merge_changes(
            &existing,
            UpdateSaleRequest {
                payment_method: Some("wire".repeat(20)),
                ..UpdateSaleRequest::default()
            },
        );

        assert!(matches!(result, Err(GalleryError::ValidationError(_))));
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        let a = validate_new_sale(full_request()).unwrap();
        let b = validate_new_sale(full_request()).unwrap();
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[test]
    fn test_price_change_recomputes_commission() {
        let existing = stored_sale("completed");
        let changes = merge_changes(
            &existing,
            UpdateSaleRequest {
                price: Some(2000.0),
                ..UpdateSaleRequest::default()
            },
        )
        .unwrap();

        assert_eq!(changes.price, 2000.0);
        assert_eq!(changes.commission, 200.0);
        assert_eq!(changes.payment_status, PaymentStatus::Completed);
    }

    #[test]
    fn test_merge_keeps_unchanged_fields() {
        let existing = stored_sale("pending");
        let changes = merge_changes(
            &existing,
            UpdateSaleRequest {
                buyer: Some("Gertrude Stein".to_string()),
                ..UpdateSaleRequest::default()
            },
        )
        .unwrap();

        assert_eq!(changes.buyer, "Gertrude Stein");
        assert_eq!(changes.price, 1200.0);
        assert_eq!(changes.commission, 120.0);
        assert_eq!(changes.payment_status, PaymentStatus::Pending);
        assert_eq!(changes.date, existing.date);
    }

    fn sale_for(artwork_id: Uuid) -> CreateSaleRequest {
        CreateSaleRequest {
            artwork_id: Some(artwork_id),
            ..full_request()
        }
    }

    fn set_payment_status(status: PaymentStatus) -> UpdateSaleRequest {
        UpdateSaleRequest {
            payment_status: Some(status),
            ..UpdateSaleRequest::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_sale_marks_artwork_sold_once(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Frida Kahlo").await;
        let artwork = fixtures::insert_artwork(&pool, artist, "Self-Portrait", 1200.0).await;

        let sale = SaleService::create_sale(&pool, sale_for(artwork)).await.unwrap();
        assert_eq!(sale.payment_status, PaymentStatus::Completed);
        assert_eq!(sale.commission, 120.0);
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "sold");

        let second = SaleService::create_sale(&pool, sale_for(artwork)).await;
        assert!(matches!(second, Err(GalleryError::InvalidInput(_))));

        let stats = SaleService::stats(&pool).await.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.total, 1200.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_sale_of_missing_artwork_is_not_found(pool: PgPool) {
        let result = SaleService::create_sale(&pool, sale_for(Uuid::new_v4())).await;
        assert!(matches!(result, Err(GalleryError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_refund_and_delete_release_artwork(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Frida Kahlo").await;
        let artwork = fixtures::insert_artwork(&pool, artist, "The Two Fridas", 3000.0).await;
        let sale = SaleService::create_sale(&pool, sale_for(artwork)).await.unwrap();

        SaleService::update_sale(&pool, sale.id, set_payment_status(PaymentStatus::Refunded))
            .await
            .unwrap();
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "available");
        assert_eq!(SaleService::stats(&pool).await.unwrap().count, 0);

        SaleService::update_sale(&pool, sale.id, set_payment_status(PaymentStatus::Completed))
            .await
            .unwrap();
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "sold");

        SaleService::delete_sale(&pool, sale.id).await.unwrap();
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "available");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_completing_a_refund_fails_once_resold(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Frida Kahlo").await;
        let artwork = fixtures::insert_artwork(&pool, artist, "Roots", 900.0).await;

        let first = SaleService::create_sale(&pool, sale_for(artwork)).await.unwrap();
        SaleService::update_sale(&pool, first.id, set_payment_status(PaymentStatus::Refunded))
            .await
            .unwrap();
        SaleService::create_sale(&pool, sale_for(artwork)).await.unwrap();

        let reopened =
            SaleService::update_sale(&pool, first.id, set_payment_status(PaymentStatus::Completed))
                .await;
        assert!(matches!(reopened, Err(GalleryError::InvalidInput(_))));
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "sold");
    }
}
