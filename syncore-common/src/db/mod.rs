//! Database initialization and schema
//!
//! Creates the SQLite database on first run, applies pragmas, creates all
//! content tables idempotently, and seeds default settings. The
//! singleton-active rule is enforced here at the storage layer via partial
//! unique indexes over `is_active`.

use crate::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod content;
pub mod models;
pub mod visitors;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys must be enabled per-connection for ON DELETE CASCADE,
    // so they go in the connect options rather than a one-off pragma.
    // WAL mode allows concurrent readers with one writer.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the full schema applied.
///
/// Used by integration tests across the workspace.
pub async fn init_in_memory() -> Result<SqlitePool> {
    // A single connection keeps the :memory: database alive for the
    // lifetime of the pool.
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent) and seed default settings
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    create_settings_table(pool).await?;
    create_home_banners_table(pool).await?;
    create_metrics_table(pool).await?;
    create_services_table(pool).await?;
    create_proven_results_table(pool).await?;
    create_trusted_logos_table(pool).await?;
    create_contact_info_table(pool).await?;
    create_team_members_table(pool).await?;
    create_about_us_table(pool).await?;
    create_approach_tables(pool).await?;
    create_social_links_table(pool).await?;
    create_transform_blocks_table(pool).await?;
    create_visitor_inquiries_table(pool).await?;

    init_default_settings(pool).await?;

    Ok(())
}

/// Create the settings table
///
/// Stores runtime configuration key-value pairs.
async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_home_banners_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS home_banners (
            guid TEXT PRIMARY KEY,
            video_path TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // At most one active banner
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_home_banners_active
         ON home_banners(is_active) WHERE is_active = 1",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_metrics_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS metrics (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            count REAL NOT NULL CHECK (count >= 0),
            unit TEXT NOT NULL DEFAULT 'none'
                CHECK (unit IN ('cr', 'lakh', 'thousand', 'hundred', 'none')),
            image_path TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_metrics_order ON metrics(display_order)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_services_table(pool: &SqlitePool) -> Result<()> {
    // Exactly one icon source per service (also validated at the app layer)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            link TEXT NOT NULL,
            icon_class TEXT,
            icon_svg TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK ((icon_class IS NOT NULL) + (icon_svg IS NOT NULL) = 1)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_order ON services(display_order)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_proven_results_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS proven_results (
            guid TEXT PRIMARY KEY,
            image_path TEXT NOT NULL,
            title TEXT,
            description TEXT NOT NULL,
            link TEXT,
            link_text TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_proven_results_order ON proven_results(display_order)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_trusted_logos_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trusted_logos (
            guid TEXT PRIMARY KEY,
            logo_path TEXT NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_contact_info_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_info (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            video_path TEXT,
            phone_number INTEGER CHECK (phone_number IS NULL OR phone_number >= 0),
            address TEXT,
            email TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_team_members_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            position TEXT NOT NULL,
            photo_path TEXT,
            is_founder INTEGER NOT NULL DEFAULT 0 CHECK (is_founder IN (0, 1)),
            founder_year INTEGER,
            consulting_engagements INTEGER,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_about_us_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS about_us (
            guid TEXT PRIMARY KEY,
            heading TEXT,
            body TEXT NOT NULL,
            stat_clients_percent INTEGER NOT NULL DEFAULT 0,
            stat_revenue_millions REAL NOT NULL DEFAULT 0,
            stat_businesses INTEGER NOT NULL DEFAULT 0,
            stat_years INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_about_us_active
         ON about_us(is_active) WHERE is_active = 1",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_approach_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS approach_sections (
            guid TEXT PRIMARY KEY,
            heading TEXT NOT NULL,
            image_path TEXT,
            is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_approach_sections_active
         ON approach_sections(is_active) WHERE is_active = 1",
    )
    .execute(pool)
    .await?;

    // Steps are owned by their section; step_order is unique within a
    // section and auto-assigned to (max + 1) when omitted at creation.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS approach_steps (
            guid TEXT PRIMARY KEY,
            section_id TEXT NOT NULL REFERENCES approach_sections(guid) ON DELETE CASCADE,
            step_order INTEGER NOT NULL,
            title TEXT NOT NULL,
            icon_path TEXT,
            icon_class TEXT,
            icon_svg TEXT,
            body TEXT NOT NULL,
            body_secondary TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (section_id, step_order),
            CHECK ((icon_path IS NOT NULL) + (icon_class IS NOT NULL) + (icon_svg IS NOT NULL) = 1)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_approach_steps_section
         ON approach_steps(section_id, step_order)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_social_links_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS social_links (
            guid TEXT PRIMARY KEY,
            platform TEXT NOT NULL,
            icon_class TEXT,
            url TEXT NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_transform_blocks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transform_blocks (
            guid TEXT PRIMARY KEY,
            heading TEXT NOT NULL,
            body TEXT NOT NULL,
            image_path TEXT,
            link TEXT,
            link_text TEXT,
            is_active INTEGER NOT NULL DEFAULT 0 CHECK (is_active IN (0, 1)),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_transform_blocks_active
         ON transform_blocks(is_active) WHERE is_active = 1",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_visitor_inquiries_table(pool: &SqlitePool) -> Result<()> {
    // Append-only from the public side: no public update or delete path
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS visitor_inquiries (
            guid TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            visit_date TEXT,
            company_name TEXT NOT NULL DEFAULT '',
            interest_service TEXT NOT NULL DEFAULT '',
            message TEXT NOT NULL DEFAULT '',
            ip_address TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_visitor_inquiries_created
         ON visitor_inquiries(created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist. NULL values are reset to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // Site identity
    ensure_setting(pool, "site_name", "SynCore").await?;

    // Outbound mail (empty smtp_host disables the mailer)
    ensure_setting(pool, "smtp_host", "").await?;
    ensure_setting(pool, "smtp_port", "587").await?;
    ensure_setting(pool, "smtp_username", "").await?;
    ensure_setting(pool, "smtp_password", "").await?;
    ensure_setting(pool, "default_from_email", "").await?;

    // Admin API (empty token disables auth checking)
    ensure_setting(pool, "admin_token", "").await?;

    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization races
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ?, updated_at = CURRENT_TIMESTAMP WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}

/// Read a setting value, treating a missing row as None
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.flatten())
}

/// Write a setting value (upsert)
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
