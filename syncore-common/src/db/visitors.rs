//! Visitor inquiry storage and validation
//!
//! Inquiries are append-only records captured from the public contact
//! form. The public side has no update or delete path; the admin side
//! reads them paginated, newest first, with an optional substring search.

use crate::db::models::VisitorInquiry;
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Maximum field lengths in characters, matching the stored column intent
const MAX_FULL_NAME: usize = 120;
const MAX_EMAIL: usize = 254;
const MAX_PHONE: usize = 40;
const MAX_COMPANY: usize = 150;
const MAX_SERVICE: usize = 150;

/// Contact form submission before persistence
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInquiry {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub interest_service: String,
    #[serde(default)]
    pub message: String,
}

/// HTML date inputs submit "" when left blank
fn empty_date_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A single failed validation rule
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl NewInquiry {
    /// Validate the submission; an empty vec means acceptable
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push(FieldError::new("full_name", "Full name is required"));
        } else if full_name.chars().count() > MAX_FULL_NAME {
            errors.push(FieldError::new(
                "full_name",
                format!("Full name must be at most {} characters", MAX_FULL_NAME),
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if email.chars().count() > MAX_EMAIL || !is_valid_email(email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        if self.phone.trim().chars().count() > MAX_PHONE {
            errors.push(FieldError::new(
                "phone",
                format!("Phone must be at most {} characters", MAX_PHONE),
            ));
        }

        if self.company_name.trim().chars().count() > MAX_COMPANY {
            errors.push(FieldError::new(
                "company_name",
                format!("Company name must be at most {} characters", MAX_COMPANY),
            ));
        }

        if self.interest_service.trim().chars().count() > MAX_SERVICE {
            errors.push(FieldError::new(
                "interest_service",
                format!("Service must be at most {} characters", MAX_SERVICE),
            ));
        }

        errors
    }
}

/// Syntactic email plausibility check: one `@`, non-empty local part,
/// dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs an interior dot
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Persist a validated submission. Returns the stored record.
pub async fn insert_inquiry(
    pool: &SqlitePool,
    new: &NewInquiry,
    ip_address: Option<&str>,
) -> Result<VisitorInquiry> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO visitor_inquiries
         (guid, full_name, email, phone, visit_date, company_name, interest_service, message, ip_address)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(new.full_name.trim())
    .bind(new.email.trim())
    .bind(new.phone.trim())
    .bind(new.visit_date)
    .bind(new.company_name.trim())
    .bind(new.interest_service.trim())
    .bind(new.message.trim())
    .bind(ip_address)
    .execute(pool)
    .await?;

    let stored =
        sqlx::query_as::<_, VisitorInquiry>("SELECT * FROM visitor_inquiries WHERE guid = ?")
            .bind(&guid)
            .fetch_one(pool)
            .await?;

    Ok(stored)
}

/// Paginated admin listing, newest first.
///
/// `search` matches as a substring over name, email, company, and service.
/// Returns (total matching rows, page of rows).
pub async fn list_inquiries(
    pool: &SqlitePool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(i64, Vec<VisitorInquiry>)> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", escape_like(s)));

    let (total, rows) = match &pattern {
        Some(p) => {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM visitor_inquiries
                 WHERE full_name LIKE ?1 ESCAPE '\\' OR email LIKE ?1 ESCAPE '\\'
                    OR company_name LIKE ?1 ESCAPE '\\' OR interest_service LIKE ?1 ESCAPE '\\'",
            )
            .bind(p)
            .fetch_one(pool)
            .await?;

            let rows = sqlx::query_as::<_, VisitorInquiry>(
                "SELECT * FROM visitor_inquiries
                 WHERE full_name LIKE ?1 ESCAPE '\\' OR email LIKE ?1 ESCAPE '\\'
                    OR company_name LIKE ?1 ESCAPE '\\' OR interest_service LIKE ?1 ESCAPE '\\'
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3",
            )
            .bind(p)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            (total, rows)
        }
        None => {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitor_inquiries")
                .fetch_one(pool)
                .await?;

            let rows = sqlx::query_as::<_, VisitorInquiry>(
                "SELECT * FROM visitor_inquiries
                 ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            (total, rows)
        }
    };

    Ok((total, rows))
}

/// Escape LIKE wildcards in user-supplied search text
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inquiry() -> NewInquiry {
        NewInquiry {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+123 476 9789".to_string(),
            visit_date: Some(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()),
            company_name: "Framer".to_string(),
            interest_service: "Consulting".to_string(),
            message: "How can we help?".to_string(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_inquiry().validate().is_empty());
    }

    #[test]
    fn name_and_email_required() {
        let inquiry = NewInquiry::default();
        let errors = inquiry.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"full_name"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn overlong_fields_rejected() {
        let mut inquiry = valid_inquiry();
        inquiry.full_name = "x".repeat(121);
        inquiry.phone = "9".repeat(41);
        inquiry.company_name = "c".repeat(151);
        inquiry.interest_service = "s".repeat(151);

        let errors = inquiry.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"full_name"));
        assert!(fields.contains(&"phone"));
        assert!(fields.contains(&"company_name"));
        assert!(fields.contains(&"interest_service"));
    }

    #[test]
    fn length_caps_count_characters_not_bytes() {
        // 60 Devanagari characters is 180 bytes, well within the 120-char cap
        let mut inquiry = valid_inquiry();
        inquiry.full_name = "\u{092E}".repeat(60);
        inquiry.company_name = "\u{00E9}".repeat(150);
        assert!(inquiry.validate().is_empty());

        inquiry.full_name = "\u{092E}".repeat(121);
        let fields: Vec<&str> = inquiry.validate().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["full_name"]);
    }

    #[test]
    fn email_plausibility() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.com"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b.com."));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn like_escaping() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("plain"), "plain");
    }
}
