//! Home page aggregate endpoint
//!
//! Gathers everything the home page renders into a single JSON payload:
//! the active banner, metrics, services, proven results, trusted logos
//! (split into two marquee rows), contact info, the active about block,
//! the active approach section with its ordered steps, team members,
//! social links, and the active transform block.

use axum::{extract::State, Json};
use serde::Serialize;

use syncore_common::db::content;
use syncore_common::db::models::{
    AboutUs, ApproachSection, ApproachStep, ContactInfo, Metric, ProvenResult, Service,
    SocialLink, TeamMember, TransformBlock, TrustedLogo,
};

use crate::api::ApiError;
use crate::AppState;

/// Active banner with media-type flags derived from the file extension
#[derive(Debug, Serialize)]
pub struct BannerView {
    pub guid: String,
    pub video_path: String,
    pub is_gif: bool,
    pub is_mp4: bool,
}

impl BannerView {
    fn new(guid: String, video_path: String) -> Self {
        let lower = video_path.to_lowercase();
        Self {
            is_gif: lower.ends_with(".gif"),
            is_mp4: lower.ends_with(".mp4"),
            guid,
            video_path,
        }
    }
}

/// Metric with its human-readable unit label
#[derive(Debug, Serialize)]
pub struct MetricView {
    #[serde(flatten)]
    pub metric: Metric,
    pub unit_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApproachView {
    #[serde(flatten)]
    pub section: ApproachSection,
    pub steps: Vec<ApproachStep>,
}

/// Full home page payload
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub banner: Option<BannerView>,
    pub metrics: Vec<MetricView>,
    pub services: Vec<Service>,
    pub results: Vec<ProvenResult>,
    pub logos: Vec<TrustedLogo>,
    pub logos_top: Vec<TrustedLogo>,
    pub logos_bottom: Vec<TrustedLogo>,
    pub contact: Option<ContactInfo>,
    pub about: Option<AboutUs>,
    pub approach: Option<ApproachView>,
    pub team: Vec<TeamMember>,
    pub social_links: Vec<SocialLink>,
    pub transform: Option<TransformBlock>,
}

/// GET /api/home
pub async fn home_aggregate(
    State(state): State<AppState>,
) -> Result<Json<HomeResponse>, ApiError> {
    let db = &state.db;

    let banner = content::active_banner(db)
        .await?
        .map(|b| BannerView::new(b.guid, b.video_path));

    let metrics = content::list_metrics(db)
        .await?
        .into_iter()
        .map(|m| MetricView {
            unit_label: m.unit.label(),
            metric: m,
        })
        .collect();

    let services = content::list_services(db).await?;
    let results = content::list_results(db).await?;

    // Logos render as two marquee rows; the home page keeps creation
    // order rather than display_order, and splits top-heavy on odd counts.
    let logos = content::list_logos_by_creation(db).await?;
    let (logos_top, logos_bottom) = split_logos(logos.clone());

    let contact = content::first_contact_info(db).await?;
    let about = content::active_about_us(db).await?;

    let approach = match content::active_section(db).await? {
        Some(section) => {
            let steps = content::list_steps(db, &section.guid).await?;
            Some(ApproachView { section, steps })
        }
        None => None,
    };

    let team = content::list_team_members(db).await?;
    let social_links = content::list_social_links(db).await?;
    let transform = content::active_transform_block(db).await?;

    Ok(Json(HomeResponse {
        banner,
        metrics,
        services,
        results,
        logos,
        logos_top,
        logos_bottom,
        contact,
        about,
        approach,
        team,
        social_links,
        transform,
    }))
}

/// Split logos into two rows, top row taking the extra one on odd counts
fn split_logos(mut logos: Vec<TrustedLogo>) -> (Vec<TrustedLogo>, Vec<TrustedLogo>) {
    let half = logos.len().div_ceil(2);
    let bottom = logos.split_off(half);
    (logos, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo(n: u32) -> TrustedLogo {
        TrustedLogo {
            guid: n.to_string(),
            logo_path: format!("logos/{}.png", n),
            display_order: n as i64,
        }
    }

    #[test]
    fn split_even_count() {
        let (top, bottom) = split_logos((1..=6).map(logo).collect());
        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 3);
        assert_eq!(top[0].guid, "1");
        assert_eq!(bottom[0].guid, "4");
    }

    #[test]
    fn split_odd_count_top_heavy() {
        let (top, bottom) = split_logos((1..=5).map(logo).collect());
        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 2);
    }

    #[test]
    fn split_empty() {
        let (top, bottom) = split_logos(Vec::new());
        assert!(top.is_empty());
        assert!(bottom.is_empty());
    }

    #[test]
    fn banner_flags_are_case_insensitive() {
        let b = BannerView::new("g".to_string(), "media/Loop.MP4".to_string());
        assert!(b.is_mp4);
        assert!(!b.is_gif);

        let b = BannerView::new("g".to_string(), "media/anim.GIF".to_string());
        assert!(b.is_gif);
        assert!(!b.is_mp4);
    }
}
