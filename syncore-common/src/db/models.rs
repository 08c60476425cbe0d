//! Content model types
//!
//! Flat records mirroring the content tables. Media (videos, images,
//! icons) is referenced by stored path strings; this backend does not
//! serve the files themselves.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit suffix displayed next to a metric count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MetricUnit {
    Cr,
    Lakh,
    Thousand,
    Hundred,
    None,
}

impl MetricUnit {
    /// Human-readable suffix ("" for None)
    pub fn label(&self) -> &'static str {
        match self {
            MetricUnit::Cr => "Cr",
            MetricUnit::Lakh => "Lakh",
            MetricUnit::Thousand => "Thousand",
            MetricUnit::Hundred => "Hundred",
            MetricUnit::None => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HomeBanner {
    pub guid: String,
    pub video_path: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Metric {
    pub guid: String,
    pub title: String,
    pub count: f64,
    pub unit: MetricUnit,
    pub image_path: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub guid: String,
    pub title: String,
    pub link: String,
    pub icon_class: Option<String>,
    pub icon_svg: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProvenResult {
    pub guid: String,
    pub image_path: String,
    pub title: Option<String>,
    pub description: String,
    pub link: Option<String>,
    pub link_text: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrustedLogo {
    pub guid: String,
    pub logo_path: String,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactInfo {
    pub guid: String,
    pub name: String,
    pub video_path: Option<String>,
    pub phone_number: Option<i64>,
    pub address: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub guid: String,
    pub name: String,
    pub position: String,
    pub photo_path: Option<String>,
    pub is_founder: bool,
    pub founder_year: Option<i64>,
    pub consulting_engagements: Option<i64>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AboutUs {
    pub guid: String,
    pub heading: Option<String>,
    pub body: String,
    pub stat_clients_percent: i64,
    pub stat_revenue_millions: f64,
    pub stat_businesses: i64,
    pub stat_years: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApproachSection {
    pub guid: String,
    pub heading: String,
    pub image_path: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApproachStep {
    pub guid: String,
    pub section_id: String,
    pub step_order: i64,
    pub title: String,
    pub icon_path: Option<String>,
    pub icon_class: Option<String>,
    pub icon_svg: Option<String>,
    pub body: String,
    pub body_secondary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocialLink {
    pub guid: String,
    pub platform: String,
    pub icon_class: Option<String>,
    pub url: String,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransformBlock {
    pub guid: String,
    pub heading: String,
    pub body: String,
    pub image_path: Option<String>,
    pub link: Option<String>,
    pub link_text: Option<String>,
    pub is_active: bool,
}

/// Visitor contact submission (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VisitorInquiry {
    pub guid: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub visit_date: Option<NaiveDate>,
    pub company_name: String,
    pub interest_service: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub created_at: String,
}

/// Treat blank or whitespace-only optional text as absent
pub fn none_if_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// A service must carry exactly one icon source
pub fn validate_service_icon(
    icon_class: &Option<String>,
    icon_svg: &Option<String>,
) -> Result<()> {
    match (icon_class, icon_svg) {
        (None, None) => Err(Error::InvalidInput(
            "Provide either icon_class or icon_svg".to_string(),
        )),
        (Some(_), Some(_)) => Err(Error::InvalidInput(
            "Use only one: icon_class or icon_svg".to_string(),
        )),
        _ => Ok(()),
    }
}

/// An approach step must carry exactly one of icon_path / icon_class / icon_svg
pub fn validate_step_icon(
    icon_path: &Option<String>,
    icon_class: &Option<String>,
    icon_svg: &Option<String>,
) -> Result<()> {
    let provided =
        icon_path.is_some() as u8 + icon_class.is_some() as u8 + icon_svg.is_some() as u8;
    if provided != 1 {
        return Err(Error::InvalidInput(
            "Provide exactly one of icon_path, icon_class, or icon_svg".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(none_if_blank(None), None);
        assert_eq!(none_if_blank(Some("".to_string())), None);
        assert_eq!(none_if_blank(Some("   ".to_string())), None);
        assert_eq!(
            none_if_blank(Some("  x  ".to_string())),
            Some("x".to_string())
        );
    }

    #[test]
    fn service_icon_exactly_one() {
        let class = Some("fa-gear".to_string());
        let svg = Some("<svg/>".to_string());

        assert!(validate_service_icon(&class, &None).is_ok());
        assert!(validate_service_icon(&None, &svg).is_ok());
        assert!(validate_service_icon(&None, &None).is_err());
        assert!(validate_service_icon(&class, &svg).is_err());
    }

    #[test]
    fn step_icon_exactly_one() {
        let path = Some("icons/a.png".to_string());
        let class = Some("bi-gear".to_string());

        assert!(validate_step_icon(&path, &None, &None).is_ok());
        assert!(validate_step_icon(&None, &class, &None).is_ok());
        assert!(validate_step_icon(&None, &None, &None).is_err());
        assert!(validate_step_icon(&path, &class, &None).is_err());
    }

    #[test]
    fn metric_unit_labels() {
        assert_eq!(MetricUnit::Cr.label(), "Cr");
        assert_eq!(MetricUnit::None.label(), "");
    }
}
