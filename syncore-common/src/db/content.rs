//! Query layer for admin-editable content models
//!
//! Explicit SQL per operation. Create payload structs double as the admin
//! API request bodies; updates are full-record (PUT) and reuse the same
//! payload types.

use crate::db::models::{
    none_if_blank, validate_service_icon, validate_step_icon, AboutUs, ApproachSection,
    ApproachStep, ContactInfo, HomeBanner, Metric, MetricUnit, ProvenResult, Service, SocialLink,
    TeamMember, TransformBlock, TrustedLogo,
};
use crate::db::visitors::is_valid_email;
use crate::{Error, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

fn new_guid() -> String {
    Uuid::new_v4().to_string()
}

fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be blank", field)));
    }
    Ok(())
}

// ============================================================================
// Singleton-active pattern
// ============================================================================

/// Tables governed by the at-most-one-active rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTable {
    HomeBanners,
    AboutUs,
    ApproachSections,
    TransformBlocks,
}

impl ActiveTable {
    pub fn table_name(self) -> &'static str {
        match self {
            ActiveTable::HomeBanners => "home_banners",
            ActiveTable::AboutUs => "about_us",
            ActiveTable::ApproachSections => "approach_sections",
            ActiveTable::TransformBlocks => "transform_blocks",
        }
    }
}

/// Make the selected row the single active one.
///
/// Clears `is_active` on every other row and sets it on `guid`, inside one
/// transaction so the partial unique index never observes two active rows.
pub async fn activate(pool: &SqlitePool, table: ActiveTable, guid: &str) -> Result<()> {
    let name = table.table_name();
    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE guid = ?)",
        name
    ))
    .bind(guid)
    .fetch_one(&mut *tx)
    .await?;

    if !exists {
        return Err(Error::NotFound(format!("{} row {}", name, guid)));
    }

    sqlx::query(&format!(
        "UPDATE {} SET is_active = 0, updated_at = CURRENT_TIMESTAMP WHERE is_active = 1",
        name
    ))
    .execute(&mut *tx)
    .await?;

    sqlx::query(&format!(
        "UPDATE {} SET is_active = 1, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
        name
    ))
    .bind(guid)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

// ============================================================================
// Home banners
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewHomeBanner {
    pub video_path: String,
}

pub async fn list_banners(pool: &SqlitePool) -> Result<Vec<HomeBanner>> {
    let rows = sqlx::query_as::<_, HomeBanner>("SELECT * FROM home_banners ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn active_banner(pool: &SqlitePool) -> Result<Option<HomeBanner>> {
    let row = sqlx::query_as::<_, HomeBanner>("SELECT * FROM home_banners WHERE is_active = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create_banner(pool: &SqlitePool, new: &NewHomeBanner) -> Result<HomeBanner> {
    require_text(&new.video_path, "video_path")?;
    let guid = new_guid();

    sqlx::query("INSERT INTO home_banners (guid, video_path) VALUES (?, ?)")
        .bind(&guid)
        .bind(new.video_path.trim())
        .execute(pool)
        .await?;

    Ok(HomeBanner {
        guid,
        video_path: new.video_path.trim().to_string(),
        is_active: false,
    })
}

pub async fn update_banner(pool: &SqlitePool, guid: &str, new: &NewHomeBanner) -> Result<()> {
    require_text(&new.video_path, "video_path")?;

    let result = sqlx::query(
        "UPDATE home_banners SET video_path = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.video_path.trim())
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("home banner {}", guid)));
    }
    Ok(())
}

pub async fn delete_banner(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "home_banners", guid).await
}

// ============================================================================
// Metrics
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewMetric {
    pub title: String,
    pub count: f64,
    #[serde(default = "default_unit")]
    pub unit: MetricUnit,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

fn default_unit() -> MetricUnit {
    MetricUnit::None
}

pub async fn list_metrics(pool: &SqlitePool) -> Result<Vec<Metric>> {
    let rows =
        sqlx::query_as::<_, Metric>("SELECT * FROM metrics ORDER BY display_order, rowid")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn create_metric(pool: &SqlitePool, new: &NewMetric) -> Result<Metric> {
    require_text(&new.title, "title")?;
    if new.count < 0.0 {
        return Err(Error::InvalidInput("count must not be negative".to_string()));
    }

    let guid = new_guid();
    let image_path = none_if_blank(new.image_path.clone());

    sqlx::query(
        "INSERT INTO metrics (guid, title, count, unit, image_path, display_order)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.title.trim())
    .bind(new.count)
    .bind(new.unit)
    .bind(&image_path)
    .bind(new.display_order)
    .execute(pool)
    .await?;

    Ok(Metric {
        guid,
        title: new.title.trim().to_string(),
        count: new.count,
        unit: new.unit,
        image_path,
        display_order: new.display_order,
    })
}

pub async fn update_metric(pool: &SqlitePool, guid: &str, new: &NewMetric) -> Result<()> {
    require_text(&new.title, "title")?;
    if new.count < 0.0 {
        return Err(Error::InvalidInput("count must not be negative".to_string()));
    }

    let result = sqlx::query(
        "UPDATE metrics SET title = ?, count = ?, unit = ?, image_path = ?,
         display_order = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.title.trim())
    .bind(new.count)
    .bind(new.unit)
    .bind(none_if_blank(new.image_path.clone()))
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("metric {}", guid)));
    }
    Ok(())
}

pub async fn delete_metric(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "metrics", guid).await
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub icon_class: Option<String>,
    #[serde(default)]
    pub icon_svg: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl NewService {
    fn normalized(&self) -> Result<(String, String, Option<String>, Option<String>)> {
        require_text(&self.title, "title")?;
        require_text(&self.link, "link")?;
        let icon_class = none_if_blank(self.icon_class.clone());
        let icon_svg = none_if_blank(self.icon_svg.clone());
        validate_service_icon(&icon_class, &icon_svg)?;
        Ok((
            self.title.trim().to_string(),
            self.link.trim().to_string(),
            icon_class,
            icon_svg,
        ))
    }
}

pub async fn list_services(pool: &SqlitePool) -> Result<Vec<Service>> {
    let rows =
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY display_order, rowid")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn create_service(pool: &SqlitePool, new: &NewService) -> Result<Service> {
    let (title, link, icon_class, icon_svg) = new.normalized()?;
    let guid = new_guid();

    sqlx::query(
        "INSERT INTO services (guid, title, link, icon_class, icon_svg, display_order)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(&title)
    .bind(&link)
    .bind(&icon_class)
    .bind(&icon_svg)
    .bind(new.display_order)
    .execute(pool)
    .await?;

    Ok(Service {
        guid,
        title,
        link,
        icon_class,
        icon_svg,
        display_order: new.display_order,
    })
}

pub async fn update_service(pool: &SqlitePool, guid: &str, new: &NewService) -> Result<()> {
    let (title, link, icon_class, icon_svg) = new.normalized()?;

    let result = sqlx::query(
        "UPDATE services SET title = ?, link = ?, icon_class = ?, icon_svg = ?,
         display_order = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(&title)
    .bind(&link)
    .bind(&icon_class)
    .bind(&icon_svg)
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("service {}", guid)));
    }
    Ok(())
}

pub async fn delete_service(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "services", guid).await
}

// ============================================================================
// Proven results
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewProvenResult {
    pub image_path: String,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

pub async fn list_results(pool: &SqlitePool) -> Result<Vec<ProvenResult>> {
    let rows = sqlx::query_as::<_, ProvenResult>(
        "SELECT * FROM proven_results ORDER BY display_order, rowid",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_result(pool: &SqlitePool, new: &NewProvenResult) -> Result<ProvenResult> {
    require_text(&new.image_path, "image_path")?;
    require_text(&new.description, "description")?;

    let guid = new_guid();
    let title = none_if_blank(new.title.clone());
    let link = none_if_blank(new.link.clone());
    let link_text = none_if_blank(new.link_text.clone());

    sqlx::query(
        "INSERT INTO proven_results (guid, image_path, title, description, link, link_text, display_order)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.image_path.trim())
    .bind(&title)
    .bind(new.description.trim())
    .bind(&link)
    .bind(&link_text)
    .bind(new.display_order)
    .execute(pool)
    .await?;

    Ok(ProvenResult {
        guid,
        image_path: new.image_path.trim().to_string(),
        title,
        description: new.description.trim().to_string(),
        link,
        link_text,
        display_order: new.display_order,
    })
}

pub async fn update_result(pool: &SqlitePool, guid: &str, new: &NewProvenResult) -> Result<()> {
    require_text(&new.image_path, "image_path")?;
    require_text(&new.description, "description")?;

    let result = sqlx::query(
        "UPDATE proven_results SET image_path = ?, title = ?, description = ?, link = ?,
         link_text = ?, display_order = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.image_path.trim())
    .bind(none_if_blank(new.title.clone()))
    .bind(new.description.trim())
    .bind(none_if_blank(new.link.clone()))
    .bind(none_if_blank(new.link_text.clone()))
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("proven result {}", guid)));
    }
    Ok(())
}

pub async fn delete_result(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "proven_results", guid).await
}

// ============================================================================
// Trusted-by logos
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewTrustedLogo {
    pub logo_path: String,
    #[serde(default)]
    pub display_order: i64,
}

pub async fn list_logos(pool: &SqlitePool) -> Result<Vec<TrustedLogo>> {
    let rows = sqlx::query_as::<_, TrustedLogo>(
        "SELECT * FROM trusted_logos ORDER BY display_order, rowid",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Logos in creation order, as the home page consumes them
pub async fn list_logos_by_creation(pool: &SqlitePool) -> Result<Vec<TrustedLogo>> {
    let rows = sqlx::query_as::<_, TrustedLogo>("SELECT * FROM trusted_logos ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create_logo(pool: &SqlitePool, new: &NewTrustedLogo) -> Result<TrustedLogo> {
    require_text(&new.logo_path, "logo_path")?;
    let guid = new_guid();

    sqlx::query("INSERT INTO trusted_logos (guid, logo_path, display_order) VALUES (?, ?, ?)")
        .bind(&guid)
        .bind(new.logo_path.trim())
        .bind(new.display_order)
        .execute(pool)
        .await?;

    Ok(TrustedLogo {
        guid,
        logo_path: new.logo_path.trim().to_string(),
        display_order: new.display_order,
    })
}

pub async fn update_logo(pool: &SqlitePool, guid: &str, new: &NewTrustedLogo) -> Result<()> {
    require_text(&new.logo_path, "logo_path")?;

    let result = sqlx::query(
        "UPDATE trusted_logos SET logo_path = ?, display_order = ?,
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.logo_path.trim())
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("trusted logo {}", guid)));
    }
    Ok(())
}

pub async fn delete_logo(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "trusted_logos", guid).await
}

// ============================================================================
// Contact info
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewContactInfo {
    pub name: String,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub phone_number: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    pub email: String,
}

impl NewContactInfo {
    fn validate(&self) -> Result<()> {
        require_text(&self.name, "name")?;
        if !is_valid_email(self.email.trim()) {
            return Err(Error::InvalidInput("email is not valid".to_string()));
        }
        if let Some(phone) = self.phone_number {
            if phone < 0 {
                return Err(Error::InvalidInput(
                    "phone_number must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub async fn list_contact_info(pool: &SqlitePool) -> Result<Vec<ContactInfo>> {
    let rows = sqlx::query_as::<_, ContactInfo>("SELECT * FROM contact_info ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// First contact-info row, as both public pages consume it
pub async fn first_contact_info(pool: &SqlitePool) -> Result<Option<ContactInfo>> {
    let row =
        sqlx::query_as::<_, ContactInfo>("SELECT * FROM contact_info ORDER BY rowid LIMIT 1")
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn create_contact_info(pool: &SqlitePool, new: &NewContactInfo) -> Result<ContactInfo> {
    new.validate()?;
    let guid = new_guid();
    let video_path = none_if_blank(new.video_path.clone());
    let address = none_if_blank(new.address.clone());

    sqlx::query(
        "INSERT INTO contact_info (guid, name, video_path, phone_number, address, email)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.name.trim())
    .bind(&video_path)
    .bind(new.phone_number)
    .bind(&address)
    .bind(new.email.trim())
    .execute(pool)
    .await?;

    Ok(ContactInfo {
        guid,
        name: new.name.trim().to_string(),
        video_path,
        phone_number: new.phone_number,
        address,
        email: new.email.trim().to_string(),
    })
}

pub async fn update_contact_info(pool: &SqlitePool, guid: &str, new: &NewContactInfo) -> Result<()> {
    new.validate()?;

    let result = sqlx::query(
        "UPDATE contact_info SET name = ?, video_path = ?, phone_number = ?, address = ?,
         email = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.name.trim())
    .bind(none_if_blank(new.video_path.clone()))
    .bind(new.phone_number)
    .bind(none_if_blank(new.address.clone()))
    .bind(new.email.trim())
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("contact info {}", guid)));
    }
    Ok(())
}

pub async fn delete_contact_info(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "contact_info", guid).await
}

// ============================================================================
// Team members
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub is_founder: bool,
    #[serde(default)]
    pub founder_year: Option<i64>,
    #[serde(default)]
    pub consulting_engagements: Option<i64>,
    #[serde(default)]
    pub display_order: i64,
}

pub async fn list_team_members(pool: &SqlitePool) -> Result<Vec<TeamMember>> {
    let rows = sqlx::query_as::<_, TeamMember>(
        "SELECT * FROM team_members ORDER BY display_order, rowid",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_team_member(pool: &SqlitePool, new: &NewTeamMember) -> Result<TeamMember> {
    require_text(&new.name, "name")?;
    require_text(&new.position, "position")?;

    let guid = new_guid();
    let photo_path = none_if_blank(new.photo_path.clone());

    sqlx::query(
        "INSERT INTO team_members
         (guid, name, position, photo_path, is_founder, founder_year, consulting_engagements, display_order)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.name.trim())
    .bind(new.position.trim())
    .bind(&photo_path)
    .bind(new.is_founder)
    .bind(new.founder_year)
    .bind(new.consulting_engagements)
    .bind(new.display_order)
    .execute(pool)
    .await?;

    Ok(TeamMember {
        guid,
        name: new.name.trim().to_string(),
        position: new.position.trim().to_string(),
        photo_path,
        is_founder: new.is_founder,
        founder_year: new.founder_year,
        consulting_engagements: new.consulting_engagements,
        display_order: new.display_order,
    })
}

pub async fn update_team_member(pool: &SqlitePool, guid: &str, new: &NewTeamMember) -> Result<()> {
    require_text(&new.name, "name")?;
    require_text(&new.position, "position")?;

    let result = sqlx::query(
        "UPDATE team_members SET name = ?, position = ?, photo_path = ?, is_founder = ?,
         founder_year = ?, consulting_engagements = ?, display_order = ?,
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.name.trim())
    .bind(new.position.trim())
    .bind(none_if_blank(new.photo_path.clone()))
    .bind(new.is_founder)
    .bind(new.founder_year)
    .bind(new.consulting_engagements)
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("team member {}", guid)));
    }
    Ok(())
}

pub async fn delete_team_member(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "team_members", guid).await
}

// ============================================================================
// About us
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewAboutUs {
    #[serde(default)]
    pub heading: Option<String>,
    pub body: String,
    #[serde(default)]
    pub stat_clients_percent: i64,
    #[serde(default)]
    pub stat_revenue_millions: f64,
    #[serde(default)]
    pub stat_businesses: i64,
    #[serde(default)]
    pub stat_years: i64,
}

pub async fn list_about_us(pool: &SqlitePool) -> Result<Vec<AboutUs>> {
    let rows = sqlx::query_as::<_, AboutUs>("SELECT * FROM about_us ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn active_about_us(pool: &SqlitePool) -> Result<Option<AboutUs>> {
    let row = sqlx::query_as::<_, AboutUs>("SELECT * FROM about_us WHERE is_active = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create_about_us(pool: &SqlitePool, new: &NewAboutUs) -> Result<AboutUs> {
    require_text(&new.body, "body")?;
    let guid = new_guid();
    let heading = none_if_blank(new.heading.clone());

    sqlx::query(
        "INSERT INTO about_us
         (guid, heading, body, stat_clients_percent, stat_revenue_millions, stat_businesses, stat_years)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(&heading)
    .bind(new.body.trim())
    .bind(new.stat_clients_percent)
    .bind(new.stat_revenue_millions)
    .bind(new.stat_businesses)
    .bind(new.stat_years)
    .execute(pool)
    .await?;

    Ok(AboutUs {
        guid,
        heading,
        body: new.body.trim().to_string(),
        stat_clients_percent: new.stat_clients_percent,
        stat_revenue_millions: new.stat_revenue_millions,
        stat_businesses: new.stat_businesses,
        stat_years: new.stat_years,
        is_active: false,
    })
}

pub async fn update_about_us(pool: &SqlitePool, guid: &str, new: &NewAboutUs) -> Result<()> {
    require_text(&new.body, "body")?;

    let result = sqlx::query(
        "UPDATE about_us SET heading = ?, body = ?, stat_clients_percent = ?,
         stat_revenue_millions = ?, stat_businesses = ?, stat_years = ?,
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(none_if_blank(new.heading.clone()))
    .bind(new.body.trim())
    .bind(new.stat_clients_percent)
    .bind(new.stat_revenue_millions)
    .bind(new.stat_businesses)
    .bind(new.stat_years)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("about-us record {}", guid)));
    }
    Ok(())
}

pub async fn delete_about_us(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "about_us", guid).await
}

// ============================================================================
// Approach sections and steps
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewApproachSection {
    pub heading: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewApproachStep {
    /// Omitted => auto-assigned to (max existing in section) + 1
    #[serde(default)]
    pub step_order: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub icon_class: Option<String>,
    #[serde(default)]
    pub icon_svg: Option<String>,
    pub body: String,
    #[serde(default)]
    pub body_secondary: Option<String>,
}

pub async fn list_sections(pool: &SqlitePool) -> Result<Vec<ApproachSection>> {
    let rows =
        sqlx::query_as::<_, ApproachSection>("SELECT * FROM approach_sections ORDER BY rowid")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn active_section(pool: &SqlitePool) -> Result<Option<ApproachSection>> {
    let row = sqlx::query_as::<_, ApproachSection>(
        "SELECT * FROM approach_sections WHERE is_active = 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_section(pool: &SqlitePool, new: &NewApproachSection) -> Result<ApproachSection> {
    require_text(&new.heading, "heading")?;
    let guid = new_guid();
    let image_path = none_if_blank(new.image_path.clone());

    sqlx::query("INSERT INTO approach_sections (guid, heading, image_path) VALUES (?, ?, ?)")
        .bind(&guid)
        .bind(new.heading.trim())
        .bind(&image_path)
        .execute(pool)
        .await?;

    Ok(ApproachSection {
        guid,
        heading: new.heading.trim().to_string(),
        image_path,
        is_active: false,
    })
}

pub async fn update_section(pool: &SqlitePool, guid: &str, new: &NewApproachSection) -> Result<()> {
    require_text(&new.heading, "heading")?;

    let result = sqlx::query(
        "UPDATE approach_sections SET heading = ?, image_path = ?,
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.heading.trim())
    .bind(none_if_blank(new.image_path.clone()))
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("approach section {}", guid)));
    }
    Ok(())
}

/// Delete a section; its steps are removed by ON DELETE CASCADE
pub async fn delete_section(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "approach_sections", guid).await
}

pub async fn list_steps(pool: &SqlitePool, section_id: &str) -> Result<Vec<ApproachStep>> {
    let rows = sqlx::query_as::<_, ApproachStep>(
        "SELECT * FROM approach_steps WHERE section_id = ? ORDER BY step_order",
    )
    .bind(section_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Attempts before an auto-assigned order stops retrying
const AUTO_ORDER_RETRIES: u32 = 3;

pub async fn create_step(
    pool: &SqlitePool,
    section_id: &str,
    new: &NewApproachStep,
) -> Result<ApproachStep> {
    require_text(&new.title, "title")?;
    require_text(&new.body, "body")?;

    let icon_path = none_if_blank(new.icon_path.clone());
    let icon_class = none_if_blank(new.icon_class.clone());
    let icon_svg = none_if_blank(new.icon_svg.clone());
    validate_step_icon(&icon_path, &icon_class, &icon_svg)?;

    // With a deferred transaction two concurrent auto-assigning creates can
    // read the same MAX before either commits; the unique index catches the
    // loser, which simply re-reads and tries again.
    let mut attempt = 0;
    loop {
        match insert_step_once(pool, section_id, new, &icon_path, &icon_class, &icon_svg).await? {
            StepInsert::Created(step) => return Ok(step),
            StepInsert::OrderTaken(step_order) => {
                if new.step_order.is_some() {
                    return Err(Error::InvalidInput(format!(
                        "step_order {} is already used in this section",
                        step_order
                    )));
                }
                attempt += 1;
                if attempt >= AUTO_ORDER_RETRIES {
                    return Err(Error::InvalidInput(format!(
                        "step_order {} is already used in this section",
                        step_order
                    )));
                }
            }
        }
    }
}

enum StepInsert {
    Created(ApproachStep),
    OrderTaken(i64),
}

async fn insert_step_once(
    pool: &SqlitePool,
    section_id: &str,
    new: &NewApproachStep,
    icon_path: &Option<String>,
    icon_class: &Option<String>,
    icon_svg: &Option<String>,
) -> Result<StepInsert> {
    let guid = new_guid();
    let body_secondary = none_if_blank(new.body_secondary.clone());

    let mut tx = pool.begin().await?;

    let section_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM approach_sections WHERE guid = ?)",
    )
    .bind(section_id)
    .fetch_one(&mut *tx)
    .await?;

    if !section_exists {
        return Err(Error::NotFound(format!("approach section {}", section_id)));
    }

    // Monotonic append ordering: max existing + 1 when no order requested
    let step_order = match new.step_order {
        Some(order) => order,
        None => {
            let max: Option<i64> =
                sqlx::query_scalar("SELECT MAX(step_order) FROM approach_steps WHERE section_id = ?")
                    .bind(section_id)
                    .fetch_one(&mut *tx)
                    .await?;
            max.unwrap_or(0) + 1
        }
    };

    let insert = sqlx::query(
        "INSERT INTO approach_steps
         (guid, section_id, step_order, title, icon_path, icon_class, icon_svg, body, body_secondary)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(section_id)
    .bind(step_order)
    .bind(new.title.trim())
    .bind(icon_path)
    .bind(icon_class)
    .bind(icon_svg)
    .bind(new.body.trim())
    .bind(&body_secondary)
    .execute(&mut *tx)
    .await;

    match insert {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Ok(StepInsert::OrderTaken(step_order));
        }
        Err(e) => return Err(e.into()),
    }

    tx.commit().await?;

    Ok(StepInsert::Created(ApproachStep {
        guid,
        section_id: section_id.to_string(),
        step_order,
        title: new.title.trim().to_string(),
        icon_path: icon_path.clone(),
        icon_class: icon_class.clone(),
        icon_svg: icon_svg.clone(),
        body: new.body.trim().to_string(),
        body_secondary,
    }))
}

pub async fn update_step(pool: &SqlitePool, guid: &str, new: &NewApproachStep) -> Result<()> {
    require_text(&new.title, "title")?;
    require_text(&new.body, "body")?;

    let icon_path = none_if_blank(new.icon_path.clone());
    let icon_class = none_if_blank(new.icon_class.clone());
    let icon_svg = none_if_blank(new.icon_svg.clone());
    validate_step_icon(&icon_path, &icon_class, &icon_svg)?;

    let step_order = match new.step_order {
        Some(order) => order,
        None => {
            return Err(Error::InvalidInput(
                "step_order is required when updating a step".to_string(),
            ))
        }
    };
    let body_secondary = none_if_blank(new.body_secondary.clone());

    let result = sqlx::query(
        "UPDATE approach_steps SET step_order = ?, title = ?, icon_path = ?, icon_class = ?,
         icon_svg = ?, body = ?, body_secondary = ?, updated_at = CURRENT_TIMESTAMP
         WHERE guid = ?",
    )
    .bind(step_order)
    .bind(new.title.trim())
    .bind(&icon_path)
    .bind(&icon_class)
    .bind(&icon_svg)
    .bind(new.body.trim())
    .bind(&body_secondary)
    .bind(guid)
    .execute(pool)
    .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound(format!("approach step {}", guid))),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(Error::InvalidInput(format!(
            "step_order {} is already used in this section",
            step_order
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_step(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "approach_steps", guid).await
}

// ============================================================================
// Social links
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewSocialLink {
    pub platform: String,
    #[serde(default)]
    pub icon_class: Option<String>,
    pub url: String,
    #[serde(default)]
    pub display_order: i64,
}

pub async fn list_social_links(pool: &SqlitePool) -> Result<Vec<SocialLink>> {
    let rows = sqlx::query_as::<_, SocialLink>(
        "SELECT * FROM social_links ORDER BY display_order, rowid",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_social_link(pool: &SqlitePool, new: &NewSocialLink) -> Result<SocialLink> {
    require_text(&new.platform, "platform")?;
    require_text(&new.url, "url")?;

    let guid = new_guid();
    let icon_class = none_if_blank(new.icon_class.clone());

    sqlx::query(
        "INSERT INTO social_links (guid, platform, icon_class, url, display_order)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.platform.trim())
    .bind(&icon_class)
    .bind(new.url.trim())
    .bind(new.display_order)
    .execute(pool)
    .await?;

    Ok(SocialLink {
        guid,
        platform: new.platform.trim().to_string(),
        icon_class,
        url: new.url.trim().to_string(),
        display_order: new.display_order,
    })
}

pub async fn update_social_link(pool: &SqlitePool, guid: &str, new: &NewSocialLink) -> Result<()> {
    require_text(&new.platform, "platform")?;
    require_text(&new.url, "url")?;

    let result = sqlx::query(
        "UPDATE social_links SET platform = ?, icon_class = ?, url = ?, display_order = ?,
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.platform.trim())
    .bind(none_if_blank(new.icon_class.clone()))
    .bind(new.url.trim())
    .bind(new.display_order)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("social link {}", guid)));
    }
    Ok(())
}

pub async fn delete_social_link(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "social_links", guid).await
}

// ============================================================================
// Transform blocks
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransformBlock {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
}

pub async fn list_transform_blocks(pool: &SqlitePool) -> Result<Vec<TransformBlock>> {
    let rows =
        sqlx::query_as::<_, TransformBlock>("SELECT * FROM transform_blocks ORDER BY rowid")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn active_transform_block(pool: &SqlitePool) -> Result<Option<TransformBlock>> {
    let row =
        sqlx::query_as::<_, TransformBlock>("SELECT * FROM transform_blocks WHERE is_active = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn create_transform_block(
    pool: &SqlitePool,
    new: &NewTransformBlock,
) -> Result<TransformBlock> {
    require_text(&new.heading, "heading")?;
    require_text(&new.body, "body")?;

    let guid = new_guid();
    let image_path = none_if_blank(new.image_path.clone());
    let link = none_if_blank(new.link.clone());
    let link_text = none_if_blank(new.link_text.clone());

    sqlx::query(
        "INSERT INTO transform_blocks (guid, heading, body, image_path, link, link_text)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.heading.trim())
    .bind(new.body.trim())
    .bind(&image_path)
    .bind(&link)
    .bind(&link_text)
    .execute(pool)
    .await?;

    Ok(TransformBlock {
        guid,
        heading: new.heading.trim().to_string(),
        body: new.body.trim().to_string(),
        image_path,
        link,
        link_text,
        is_active: false,
    })
}

pub async fn update_transform_block(
    pool: &SqlitePool,
    guid: &str,
    new: &NewTransformBlock,
) -> Result<()> {
    require_text(&new.heading, "heading")?;
    require_text(&new.body, "body")?;

    let result = sqlx::query(
        "UPDATE transform_blocks SET heading = ?, body = ?, image_path = ?, link = ?,
         link_text = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(new.heading.trim())
    .bind(new.body.trim())
    .bind(none_if_blank(new.image_path.clone()))
    .bind(none_if_blank(new.link.clone()))
    .bind(none_if_blank(new.link_text.clone()))
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("transform block {}", guid)));
    }
    Ok(())
}

pub async fn delete_transform_block(pool: &SqlitePool, guid: &str) -> Result<()> {
    delete_by_guid(pool, "transform_blocks", guid).await
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Delete by guid from a fixed table name, NotFound when nothing matched
async fn delete_by_guid(pool: &SqlitePool, table: &'static str, guid: &str) -> Result<()> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE guid = ?", table))
        .bind(guid)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("{} row {}", table, guid)));
    }
    Ok(())
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
