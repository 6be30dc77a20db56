use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::{NewPhoto, Owner, Photo, PhotoRow};
use crate::database::store::{PhotoStore, StoreError};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT PRIMARY KEY,
        username VARCHAR(150) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS photos (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(256) NOT NULL CHECK (title <> ''),
        description VARCHAR(512) NOT NULL DEFAULT '',
        count_of_views BIGINT NOT NULL DEFAULT 0 CHECK (count_of_views >= 0),
        date_of_creation DATE NOT NULL DEFAULT CURRENT_DATE,
        image VARCHAR(100) NOT NULL CHECK (image <> ''),
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS photos_user_id_idx ON photos (user_id)",
];

const SELECT_PHOTO: &str = r#"
    SELECT p.id, p.title, p.description, p.count_of_views, p.date_of_creation,
           p.image, p.user_id, u.username
    FROM photos p
    JOIN users u ON u.id = p.user_id
"#;

/// Postgres-backed store
pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Connected photo store ({} max connections)", config.max_connections);
        Ok(Self::new(pool))
    }

    /// Creates the tables on first start. Existing tables are left alone.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch_photo(&self, id: i64) -> Result<Photo, StoreError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PHOTO);
        sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Photo::from)
            .ok_or(StoreError::PhotoNotFound(id))
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let inserted: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO photos (title, description, date_of_creation, image, user_id)
            SELECT $1, $2, $3, $4, u.id FROM users u WHERE u.id = $5
            RETURNING id
            "#,
        )
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(photo.date_of_creation)
        .bind(&photo.image)
        .bind(photo.owner.id)
        .fetch_optional(&self.pool)
        .await?;

        let (id,) = inserted.ok_or(StoreError::UserNotFound(photo.owner.id))?;
        self.fetch_photo(id).await
    }

    async fn get(&self, id: i64) -> Result<Photo, StoreError> {
        self.fetch_photo(id).await
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Photo>, StoreError> {
        let sql = format!("{} WHERE p.user_id = $1 ORDER BY p.id", SELECT_PHOTO);
        let rows = sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn increment_views(&self, id: i64) -> Result<Photo, StoreError> {
        // Single statement so concurrent viewers cannot overwrite each other
        let sql = r#"
            WITH updated AS (
                UPDATE photos SET count_of_views = count_of_views + 1
                WHERE id = $1
                RETURNING *
            )
            SELECT p.id, p.title, p.description, p.count_of_views, p.date_of_creation,
                   p.image, p.user_id, u.username
            FROM updated p
            JOIN users u ON u.id = p.user_id
        "#;
        sqlx::query_as::<_, PhotoRow>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Photo::from)
            .ok_or(StoreError::PhotoNotFound(id))
    }

    async fn update_title(&self, id: i64, title: &str) -> Result<Photo, StoreError> {
        let result = sqlx::query("UPDATE photos SET title = $2 WHERE id = $1")
            .bind(id)
            .bind(title)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PhotoNotFound(id));
        }
        self.fetch_photo(id).await
    }

    async fn upsert_user(&self, owner: &Owner) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
            "#,
        )
        .bind(owner.id)
        .bind(&owner.username)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (photos,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM photos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }

        tx.commit().await?;
        Ok(photos as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
