//! Best-effort outbound mail
//!
//! A contact submission triggers two messages: a notification to the site
//! owner (reply-to set to the visitor) and an acknowledgment back to the
//! visitor. Delivery is best-effort by design: failures are logged and
//! swallowed, never retried, and never surfaced to the visitor.

use chrono::NaiveDate;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use syncore_common::db::models::VisitorInquiry;
use syncore_common::{db, Result};

/// Outbound mail sender configured from the settings table
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
    site_name: String,
}

impl Mailer {
    /// Build from settings. An empty `smtp_host` disables sending.
    pub async fn from_settings(pool: &SqlitePool) -> Result<Self> {
        let site_name = db::get_setting(pool, "site_name")
            .await?
            .unwrap_or_else(|| "SynCore".to_string());

        let smtp_host = db::get_setting(pool, "smtp_host").await?.unwrap_or_default();
        if smtp_host.is_empty() {
            return Ok(Self::disabled_with_name(site_name));
        }

        let smtp_port: u16 = db::get_setting(pool, "smtp_port")
            .await?
            .unwrap_or_default()
            .parse()
            .unwrap_or(587);
        let username = db::get_setting(pool, "smtp_username").await?.unwrap_or_default();
        let password = db::get_setting(pool, "smtp_password").await?.unwrap_or_default();
        let default_from = db::get_setting(pool, "default_from_email")
            .await?
            .unwrap_or_default();

        let from: Option<Mailbox> = match default_from.parse() {
            Ok(mailbox) => Some(mailbox),
            Err(_) => {
                warn!(
                    "default_from_email '{}' is not a valid address; outbound mail disabled",
                    default_from
                );
                return Ok(Self::disabled_with_name(site_name));
            }
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_host)
            .map_err(|e| syncore_common::Error::Config(format!("SMTP relay: {}", e)))?
            .port(smtp_port);
        if !username.is_empty() {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from,
            site_name,
        })
    }

    /// A mailer that never sends (used when SMTP is unconfigured and by tests)
    pub fn disabled() -> Self {
        Self::disabled_with_name("SynCore".to_string())
    }

    fn disabled_with_name(site_name: String) -> Self {
        Self {
            transport: None,
            from: None,
            site_name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Fire both contact-flow messages. Never fails; all errors are logged.
    pub async fn send_contact_emails(&self, inquiry: &VisitorInquiry, owner_email: Option<&str>) {
        let (transport, from) = match (&self.transport, &self.from) {
            (Some(t), Some(f)) => (t, f),
            _ => {
                debug!("Mailer disabled; skipping contact notifications");
                return;
            }
        };

        // Owner notification: contact-info address, else the default sender
        let owner: Option<Mailbox> = owner_email
            .and_then(|e| e.parse().ok())
            .or_else(|| Some(from.clone()));

        if let Some(owner) = owner {
            let mut builder = Message::builder()
                .from(from.clone())
                .to(owner)
                .subject(format!("New inquiry from {}", inquiry.full_name));
            if let Ok(reply_to) = inquiry.email.parse::<Mailbox>() {
                builder = builder.reply_to(reply_to);
            }

            match builder.body(owner_body(inquiry)) {
                Ok(message) => {
                    if let Err(e) = transport.send(message).await {
                        warn!("Owner notification failed: {}", e);
                    }
                }
                Err(e) => warn!("Owner notification could not be built: {}", e),
            }
        }

        // Visitor acknowledgment
        if let Ok(visitor) = inquiry.email.parse::<Mailbox>() {
            let message = Message::builder()
                .from(from.clone())
                .to(visitor)
                .subject(format!("Thanks for contacting {}", self.site_name))
                .body(visitor_body(inquiry, &self.site_name));

            match message {
                Ok(message) => {
                    if let Err(e) = transport.send(message).await {
                        warn!("Visitor acknowledgment failed: {}", e);
                    }
                }
                Err(e) => warn!("Visitor acknowledgment could not be built: {}", e),
            }
        }
    }
}

fn format_visit_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d %b %Y").to_string(),
        None => "-".to_string(),
    }
}

fn dash_if_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Plain-text body for the owner notification
fn owner_body(inquiry: &VisitorInquiry) -> String {
    let lines = [
        "You have a new contact inquiry:".to_string(),
        String::new(),
        format!("Name           : {}", inquiry.full_name),
        format!("Email          : {}", inquiry.email),
        format!("Phone          : {}", dash_if_empty(&inquiry.phone)),
        format!("Visit Date     : {}", format_visit_date(inquiry.visit_date)),
        format!("Company        : {}", dash_if_empty(&inquiry.company_name)),
        format!("Service        : {}", dash_if_empty(&inquiry.interest_service)),
        "Message        :".to_string(),
        dash_if_empty(inquiry.message.trim()).to_string(),
        String::new(),
        format!(
            "IP Address     : {}",
            inquiry.ip_address.as_deref().unwrap_or("-")
        ),
    ];
    lines.join("\n")
}

/// Plain-text body for the visitor acknowledgment
fn visitor_body(inquiry: &VisitorInquiry, site_name: &str) -> String {
    let lines = [
        format!("Hi {},", inquiry.full_name),
        String::new(),
        "Thanks for reaching out! We've received your request with the details below.".to_string(),
        String::new(),
        "- Your Request -".to_string(),
        format!(
            "Service Interested : {}",
            dash_if_empty(&inquiry.interest_service)
        ),
        format!(
            "Preferred Date     : {}",
            format_visit_date(inquiry.visit_date)
        ),
        format!("Phone              : {}", dash_if_empty(&inquiry.phone)),
        format!("Company            : {}", dash_if_empty(&inquiry.company_name)),
        "Message            :".to_string(),
        dash_if_empty(inquiry.message.trim()).to_string(),
        String::new(),
        "We'll get back to you shortly.".to_string(),
        String::new(),
        format!("- {} Team", site_name),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> VisitorInquiry {
        VisitorInquiry {
            guid: "g".to_string(),
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            visit_date: NaiveDate::from_ymd_opt(2026, 9, 15),
            company_name: "Framer".to_string(),
            interest_service: String::new(),
            message: "Need a quote".to_string(),
            ip_address: Some("203.0.113.7".to_string()),
            created_at: "2026-08-30 12:00:00".to_string(),
        }
    }

    #[test]
    fn owner_body_includes_all_fields() {
        let body = owner_body(&inquiry());
        assert!(body.contains("Name           : Jane Smith"));
        assert!(body.contains("Email          : jane@example.com"));
        assert!(body.contains("Phone          : -"));
        assert!(body.contains("Visit Date     : 15 Sep 2026"));
        assert!(body.contains("Company        : Framer"));
        assert!(body.contains("Need a quote"));
        assert!(body.contains("IP Address     : 203.0.113.7"));
    }

    #[test]
    fn visitor_body_greets_and_signs() {
        let body = visitor_body(&inquiry(), "SynCore");
        assert!(body.starts_with("Hi Jane Smith,"));
        assert!(body.contains("Preferred Date     : 15 Sep 2026"));
        assert!(body.contains("Service Interested : -"));
        assert!(body.ends_with("- SynCore Team"));
    }

    #[test]
    fn missing_visit_date_renders_dash() {
        assert_eq!(format_visit_date(None), "-");
    }

    #[test]
    fn disabled_mailer_reports_disabled() {
        assert!(!Mailer::disabled().is_enabled());
    }
}
