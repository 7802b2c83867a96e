//! Vendor-specific document metadata enrichment
//!
//! One vendor+category combination is recognized: payslips issued by the
//! Orange operator. Those get a normalized classification and month-boundary
//! dates computed from the document's creation timestamp.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;

/// Document category the vendor uses for payslips
pub const PAYSLIP_CATEGORY: &str = "Bulletin de paie";

/// Author name of the recognized operator
pub const RECOGNIZED_AUTHOR: &str = "Orange";

/// Normalized metadata attached to recognized documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// Normalized classification, e.g. `payslip`
    pub classification: String,

    /// Normalized author, e.g. `orange`
    pub content_author: String,

    /// First day of the creation month, 00:00:00 UTC
    pub start_date: DateTime<Utc>,

    /// Last day of the creation month, 23:59:59.999 UTC
    pub end_date: DateTime<Utc>,

    /// The raw creation timestamp, as given by the vendor
    pub issue_date: DateTime<Utc>,
}

/// Builds payslip metadata when the vendor+category combination is recognized
///
/// # Arguments
///
/// * `category` - The raw document category
/// * `author` - The raw author name
/// * `creation_date` - The document's creation timestamp
///
/// # Returns
///
/// * `Some(DocumentMetadata)` - Recognized Orange payslip
/// * `None` - Anything else
pub fn payslip_metadata(
    category: Option<&str>,
    author: Option<&str>,
    creation_date: Option<DateTime<Utc>>,
) -> Option<DocumentMetadata> {
    let creation_date = creation_date?;
    if category? != PAYSLIP_CATEGORY || author? != RECOGNIZED_AUTHOR {
        return None;
    }

    let (start_date, end_date) = month_bounds(creation_date);
    Some(DocumentMetadata {
        classification: "payslip".to_string(),
        content_author: "orange".to_string(),
        start_date,
        end_date,
        issue_date: creation_date,
    })
}

/// First and last instant of the UTC month containing `at`
pub fn month_bounds(at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc
        .with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0)
        .unwrap();

    let (next_year, next_month) = if at.month() == 12 {
        (at.year() + 1, 1)
    } else {
        (at.year(), at.month() + 1)
    };
    let next_start = Utc.with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0).unwrap();
    let end = next_start - Duration::milliseconds(1);

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_march_payslip_bounds() {
        let metadata = payslip_metadata(
            Some(PAYSLIP_CATEGORY),
            Some(RECOGNIZED_AUTHOR),
            Some(date("2023-03-15T00:00:00Z")),
        )
        .unwrap();

        assert_eq!(metadata.classification, "payslip");
        assert_eq!(metadata.content_author, "orange");
        assert_eq!(metadata.start_date, date("2023-03-01T00:00:00Z"));
        assert_eq!(metadata.end_date, date("2023-03-31T23:59:59.999Z"));
        assert_eq!(metadata.issue_date, date("2023-03-15T00:00:00Z"));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let (start, end) = month_bounds(date("2022-12-25T10:30:00Z"));
        assert_eq!(start, date("2022-12-01T00:00:00Z"));
        assert_eq!(end, date("2022-12-31T23:59:59.999Z"));
    }

    #[test]
    fn test_february_leap_year() {
        let (start, end) = month_bounds(date("2024-02-10T00:00:00Z"));
        assert_eq!(start, date("2024-02-01T00:00:00Z"));
        assert_eq!(end, date("2024-02-29T23:59:59.999Z"));
    }

    #[test]
    fn test_other_category_is_not_enriched() {
        let metadata = payslip_metadata(
            Some("Facture"),
            Some(RECOGNIZED_AUTHOR),
            Some(date("2023-03-15T00:00:00Z")),
        );
        assert!(metadata.is_none());
    }

    #[test]
    fn test_other_author_is_not_enriched() {
        let metadata = payslip_metadata(
            Some(PAYSLIP_CATEGORY),
            Some("SomeoneElse"),
            Some(date("2023-03-15T00:00:00Z")),
        );
        assert!(metadata.is_none());
    }

    #[test]
    fn test_missing_creation_date_is_not_enriched() {
        let metadata = payslip_metadata(Some(PAYSLIP_CATEGORY), Some(RECOGNIZED_AUTHOR), None);
        assert!(metadata.is_none());
    }
}
