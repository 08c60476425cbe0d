//! Integration tests for the database layer
//!
//! Covers schema idempotency, default settings, the singleton-active
//! pattern (partial unique index + activate transaction), step order
//! auto-assignment, cascade deletion, and inquiry persistence.

use syncore_common::db::content::{self, ActiveTable, NewApproachSection, NewApproachStep};
use syncore_common::db::visitors::{self, NewInquiry};
use syncore_common::db::{self, models::MetricUnit};
use syncore_common::Error;

async fn setup() -> sqlx::SqlitePool {
    db::init_in_memory().await.expect("in-memory db")
}

// =============================================================================
// Schema and settings
// =============================================================================

#[tokio::test]
async fn schema_is_idempotent() {
    let pool = setup().await;
    // Re-applying the full schema must not fail or duplicate anything
    db::apply_schema(&pool).await.expect("second apply");
    db::apply_schema(&pool).await.expect("third apply");
}

#[tokio::test]
async fn default_settings_seeded() {
    let pool = setup().await;

    let site_name = db::get_setting(&pool, "site_name").await.unwrap();
    assert_eq!(site_name.as_deref(), Some("SynCore"));

    let smtp_port = db::get_setting(&pool, "smtp_port").await.unwrap();
    assert_eq!(smtp_port.as_deref(), Some("587"));

    // Empty defaults exist but are empty strings, not NULL
    let smtp_host = db::get_setting(&pool, "smtp_host").await.unwrap();
    assert_eq!(smtp_host.as_deref(), Some(""));
}

#[tokio::test]
async fn settings_roundtrip_and_null_reset() {
    let pool = setup().await;

    db::set_setting(&pool, "site_name", "Acme").await.unwrap();
    assert_eq!(
        db::get_setting(&pool, "site_name").await.unwrap().as_deref(),
        Some("Acme")
    );

    // NULL values are reset to the default on the next init pass
    sqlx::query("UPDATE settings SET value = NULL WHERE key = 'site_name'")
        .execute(&pool)
        .await
        .unwrap();
    db::ensure_setting(&pool, "site_name", "SynCore").await.unwrap();
    assert_eq!(
        db::get_setting(&pool, "site_name").await.unwrap().as_deref(),
        Some("SynCore")
    );
}

// =============================================================================
// Singleton-active pattern
// =============================================================================

#[tokio::test]
async fn partial_index_rejects_second_active_row() {
    let pool = setup().await;

    sqlx::query("INSERT INTO home_banners (guid, video_path, is_active) VALUES ('a', 'a.mp4', 1)")
        .execute(&pool)
        .await
        .unwrap();

    // Direct insert of a second active row violates the partial unique index
    let second =
        sqlx::query("INSERT INTO home_banners (guid, video_path, is_active) VALUES ('b', 'b.mp4', 1)")
            .execute(&pool)
            .await;
    assert!(second.is_err());

    // Inactive rows are unconstrained
    sqlx::query("INSERT INTO home_banners (guid, video_path, is_active) VALUES ('c', 'c.mp4', 0)")
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn activate_moves_the_flag() {
    let pool = setup().await;

    let first = content::create_banner(
        &pool,
        &content::NewHomeBanner {
            video_path: "banners/one.mp4".to_string(),
        },
    )
    .await
    .unwrap();
    let second = content::create_banner(
        &pool,
        &content::NewHomeBanner {
            video_path: "banners/two.mp4".to_string(),
        },
    )
    .await
    .unwrap();

    content::activate(&pool, ActiveTable::HomeBanners, &first.guid)
        .await
        .unwrap();
    let active = content::active_banner(&pool).await.unwrap().unwrap();
    assert_eq!(active.guid, first.guid);

    content::activate(&pool, ActiveTable::HomeBanners, &second.guid)
        .await
        .unwrap();
    let active = content::active_banner(&pool).await.unwrap().unwrap();
    assert_eq!(active.guid, second.guid);

    // Exactly one row carries the flag
    let active_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM home_banners WHERE is_active = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(active_count, 1);
}

#[tokio::test]
async fn activate_is_idempotent_for_active_row() {
    let pool = setup().await;

    let banner = content::create_banner(
        &pool,
        &content::NewHomeBanner {
            video_path: "banners/solo.gif".to_string(),
        },
    )
    .await
    .unwrap();

    content::activate(&pool, ActiveTable::HomeBanners, &banner.guid)
        .await
        .unwrap();
    content::activate(&pool, ActiveTable::HomeBanners, &banner.guid)
        .await
        .unwrap();

    let active = content::active_banner(&pool).await.unwrap().unwrap();
    assert_eq!(active.guid, banner.guid);
}

#[tokio::test]
async fn activate_unknown_guid_is_not_found() {
    let pool = setup().await;

    let result = content::activate(&pool, ActiveTable::AboutUs, "missing").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

// =============================================================================
// Content CRUD and validation
// =============================================================================

#[tokio::test]
async fn metric_crud_and_ordering() {
    let pool = setup().await;

    let b = content::create_metric(
        &pool,
        &content::NewMetric {
            title: "Projects".to_string(),
            count: 120.0,
            unit: MetricUnit::Hundred,
            image_path: None,
            display_order: 2,
        },
    )
    .await
    .unwrap();
    let a = content::create_metric(
        &pool,
        &content::NewMetric {
            title: "Revenue".to_string(),
            count: 3.5,
            unit: MetricUnit::Cr,
            image_path: Some("metrics/rev.png".to_string()),
            display_order: 1,
        },
    )
    .await
    .unwrap();

    let listed = content::list_metrics(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].guid, a.guid);
    assert_eq!(listed[1].guid, b.guid);
    assert_eq!(listed[0].unit, MetricUnit::Cr);

    content::update_metric(
        &pool,
        &b.guid,
        &content::NewMetric {
            title: "Projects Delivered".to_string(),
            count: 150.0,
            unit: MetricUnit::Hundred,
            image_path: None,
            display_order: 0,
        },
    )
    .await
    .unwrap();

    let listed = content::list_metrics(&pool).await.unwrap();
    assert_eq!(listed[0].title, "Projects Delivered");

    content::delete_metric(&pool, &a.guid).await.unwrap();
    assert_eq!(content::list_metrics(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn negative_metric_count_rejected() {
    let pool = setup().await;

    let result = content::create_metric(
        &pool,
        &content::NewMetric {
            title: "Bad".to_string(),
            count: -1.0,
            unit: MetricUnit::None,
            image_path: None,
            display_order: 0,
        },
    )
    .await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn service_requires_exactly_one_icon() {
    let pool = setup().await;

    let neither = content::create_service(
        &pool,
        &content::NewService {
            title: "Audit".to_string(),
            link: "https://example.com/audit".to_string(),
            icon_class: None,
            icon_svg: None,
            display_order: 0,
        },
    )
    .await;
    assert!(matches!(neither, Err(Error::InvalidInput(_))));

    let both = content::create_service(
        &pool,
        &content::NewService {
            title: "Audit".to_string(),
            link: "https://example.com/audit".to_string(),
            icon_class: Some("fa-solid fa-gear".to_string()),
            icon_svg: Some("<svg/>".to_string()),
            display_order: 0,
        },
    )
    .await;
    assert!(matches!(both, Err(Error::InvalidInput(_))));

    let ok = content::create_service(
        &pool,
        &content::NewService {
            title: "Audit".to_string(),
            link: "https://example.com/audit".to_string(),
            icon_class: Some("fa-solid fa-gear".to_string()),
            icon_svg: None,
            display_order: 0,
        },
    )
    .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
    let pool = setup().await;

    let result = content::update_logo(
        &pool,
        "missing",
        &content::NewTrustedLogo {
            logo_path: "logos/x.png".to_string(),
            display_order: 0,
        },
    )
    .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

// =============================================================================
// Approach steps: order auto-assignment and cascade
// =============================================================================

fn step(title: &str, order: Option<i64>) -> NewApproachStep {
    NewApproachStep {
        step_order: order,
        title: title.to_string(),
        icon_path: None,
        icon_class: Some("bi-gear".to_string()),
        icon_svg: None,
        body: "Step body".to_string(),
        body_secondary: None,
    }
}

#[tokio::test]
async fn step_order_auto_assigns_max_plus_one() {
    let pool = setup().await;

    let section = content::create_section(
        &pool,
        &NewApproachSection {
            heading: "Our Approach".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();

    let first = content::create_step(&pool, &section.guid, &step("Discover", None))
        .await
        .unwrap();
    assert_eq!(first.step_order, 1);

    let second = content::create_step(&pool, &section.guid, &step("Design", None))
        .await
        .unwrap();
    assert_eq!(second.step_order, 2);

    // Explicit gap is honored, and the next auto value appends after it
    let fifth = content::create_step(&pool, &section.guid, &step("Deploy", Some(5)))
        .await
        .unwrap();
    assert_eq!(fifth.step_order, 5);

    let sixth = content::create_step(&pool, &section.guid, &step("Support", None))
        .await
        .unwrap();
    assert_eq!(sixth.step_order, 6);
}

#[tokio::test]
async fn concurrent_auto_order_creates_both_succeed() {
    let pool = setup().await;

    let section = content::create_section(
        &pool,
        &NewApproachSection {
            heading: "Our Approach".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();

    // Auto-assigned orders resolve collisions by re-reading the maximum,
    // so neither concurrent create surfaces an order-taken error.
    let discover = step("Discover", None);
    let design = step("Design", None);
    let (a, b) = tokio::join!(
        content::create_step(&pool, &section.guid, &discover),
        content::create_step(&pool, &section.guid, &design),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    let mut orders = vec![a.step_order, b.step_order];
    orders.sort_unstable();
    assert_eq!(orders, vec![1, 2]);
}

#[tokio::test]
async fn step_order_is_unique_per_section() {
    let pool = setup().await;

    let section = content::create_section(
        &pool,
        &NewApproachSection {
            heading: "Approach".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();

    content::create_step(&pool, &section.guid, &step("One", Some(1)))
        .await
        .unwrap();
    let duplicate = content::create_step(&pool, &section.guid, &step("Clash", Some(1))).await;
    assert!(matches!(duplicate, Err(Error::InvalidInput(_))));

    // Same order in a different section is fine
    let other = content::create_section(
        &pool,
        &NewApproachSection {
            heading: "Other".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();
    content::create_step(&pool, &other.guid, &step("One", Some(1)))
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_section_cascades_to_steps() {
    let pool = setup().await;

    let section = content::create_section(
        &pool,
        &NewApproachSection {
            heading: "Approach".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();

    content::create_step(&pool, &section.guid, &step("One", None))
        .await
        .unwrap();
    content::create_step(&pool, &section.guid, &step("Two", None))
        .await
        .unwrap();

    content::delete_section(&pool, &section.guid).await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM approach_steps")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn step_creation_in_missing_section_is_not_found() {
    let pool = setup().await;

    let result = content::create_step(&pool, "missing", &step("Orphan", None)).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

// =============================================================================
// Visitor inquiries
// =============================================================================

#[tokio::test]
async fn inquiry_persists_with_ip() {
    let pool = setup().await;

    let stored = visitors::insert_inquiry(
        &pool,
        &NewInquiry {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            visit_date: None,
            company_name: "Framer".to_string(),
            interest_service: "Consulting".to_string(),
            message: "  Hello  ".to_string(),
        },
        Some("203.0.113.7"),
    )
    .await
    .unwrap();

    assert_eq!(stored.full_name, "Jane Smith");
    assert_eq!(stored.message, "Hello");
    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.7"));
    assert!(!stored.created_at.is_empty());
}

#[tokio::test]
async fn inquiry_listing_searches_and_paginates() {
    let pool = setup().await;

    for i in 0..5 {
        visitors::insert_inquiry(
            &pool,
            &NewInquiry {
                full_name: format!("Visitor {}", i),
                email: format!("v{}@example.com", i),
                company_name: if i % 2 == 0 { "Acme" } else { "Globex" }.to_string(),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    }

    let (total, rows) = visitors::list_inquiries(&pool, None, 3, 0).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(rows.len(), 3);
    // Newest first
    assert_eq!(rows[0].full_name, "Visitor 4");

    let (total, rows) = visitors::list_inquiries(&pool, Some("Acme"), 50, 0)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert!(rows.iter().all(|r| r.company_name == "Acme"));

    // Wildcards in search text are literal, not LIKE syntax
    let (total, _) = visitors::list_inquiries(&pool, Some("%"), 50, 0).await.unwrap();
    assert_eq!(total, 0);
}
