// src/db/fixtures.rs
// DOCUMENTATION: Rows for database-backed tests
// PURPOSE: Insert the minimum an artwork needs without going through services

use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_artist(pool: &PgPool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO artists (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_artwork(pool: &PgPool, artist_id: Uuid, title: &str, price: f64) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO artworks (id, title, artist_id, description, price, category)
        VALUES ($1, $2, $3, 'fixture', $4, 'Painting')
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(artist_id)
    .bind(price)
    .execute(pool)
    .await
    .unwrap();
    id
}

pub async fn artwork_status(pool: &PgPool, id: Uuid) -> String {
    let (status,): (String,) = sqlx::query_as("SELECT status FROM artworks WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap();
    status
}
