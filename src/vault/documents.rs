//! Document listing and descriptor projection
//!
//! One search call per folder, health-token-authenticated, querying the SAFE
//! and INBOX locations sorted by creation date descending. Only the first
//! page (100 documents) is retrieved; pagination is a documented non-goal.
//!
//! Each raw document is projected into a [`DocumentDescriptor`] carrying
//! everything the persistence collaborator needs: the download URL with the
//! current xsrf token embedded, the POST body for the actual download, a
//! derived display name and the optional vendor metadata.

use crate::session::VaultSession;
use crate::vault::metadata::{payslip_metadata, DocumentMetadata};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Page size of the document search; results beyond it are not retrieved
const SEARCH_PAGE_SIZE: &str = "100";

/// A document as mirrored into the destination
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDescriptor {
    /// Server-side document id
    pub remote_id: String,

    /// Raw vendor category, e.g. `Bulletin de paie`
    pub category: Option<String>,

    /// Content endpoint with the current xsrf token as a query parameter.
    /// Stale after any cookie rotation; never cache across one.
    pub download_url: Url,

    /// Filename the document is persisted under
    pub display_name: String,

    /// Raw sender name from the vendor
    pub vendor_name: Option<String>,

    /// The actual download call: a POST through the shared cookie jar
    /// (bearer auth alone is not sufficient for content retrieval)
    pub download_request: DownloadRequest,

    /// Present only for recognized vendor+category combinations
    pub metadata: Option<DocumentMetadata>,
}

/// Parameters of the content download call
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    /// Content endpoint, xsrf token included
    pub url: Url,

    /// Form-encoded body fields
    pub form: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    folder_id: &'a str,
    locations: [&'a str; 2],
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    filetype: Option<String>,
    #[serde(default)]
    sender_name: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    creation_date: Option<DateTime<Utc>>,
}

/// Lists a folder's documents and projects them into descriptors
///
/// # Arguments
///
/// * `session` - The authenticated session; needs the health token and a
///   current xsrf token
/// * `folder_id` - The folder to search; empty string for the root's own
///   documents
pub async fn fetch_documents(
    session: &VaultSession,
    folder_id: &str,
) -> Result<Vec<DocumentDescriptor>> {
    let response = session
        .client()
        .post(session.endpoints().document_search().clone())
        .query(&[
            ("direction", "DESCENDING"),
            ("max_results", SEARCH_PAGE_SIZE),
            ("sort", "CREATION_DATE"),
        ])
        .bearer_auth(session.tokens().health()?)
        .json(&SearchRequest {
            folder_id,
            locations: ["SAFE", "INBOX"],
        })
        .send()
        .await?
        .error_for_status()?;

    let body: RawSearchResponse = response.json().await?;
    let xsrf = session.tokens().xsrf()?;

    Ok(body
        .documents
        .into_iter()
        .map(|raw| build_descriptor(raw, session, xsrf))
        .collect())
}

/// Projects one raw document into a descriptor
fn build_descriptor(raw: RawDocument, session: &VaultSession, xsrf: &str) -> DocumentDescriptor {
    let mut download_url = session.endpoints().document_content().clone();
    download_url
        .query_pairs_mut()
        .append_pair("_xsrf_token", xsrf);

    let metadata = payslip_metadata(
        raw.category.as_deref(),
        raw.author_name.as_deref(),
        raw.creation_date,
    );

    DocumentDescriptor {
        display_name: display_name(&raw),
        download_request: DownloadRequest {
            url: download_url.clone(),
            form: vec![("document_ids[]".to_string(), raw.id.clone())],
        },
        remote_id: raw.id,
        category: raw.category,
        download_url,
        vendor_name: raw.sender_name,
        metadata,
    }
}

/// Derives the filename a document is persisted under
///
/// `YYYY_MM_DD_<title>.<ext>` from the creation date, the title (path-unsafe
/// characters stripped) and the filetype, defaulting to `pdf`. Documents
/// without a usable title fall back to their id.
fn display_name(raw: &RawDocument) -> String {
    let title = raw
        .title
        .as_deref()
        .map(|t| crate::mirror::sanitize_folder_name(t.trim()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| raw.id.clone());

    let extension = raw
        .filetype
        .as_deref()
        .map(str::to_lowercase)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "pdf".to_string());

    match raw.creation_date {
        Some(date) => format!("{}_{}.{}", date.format("%Y_%m_%d"), title, extension),
        None => format!("{}.{}", title, extension),
    }
}
