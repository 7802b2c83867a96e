//! Folder tree listing
//!
//! The server returns the root's immediate children in one call, with deeper
//! levels nested under each folder's `folders` field. The root itself is not
//! part of the response; a synthetic root node (empty id and name) is placed
//! on top so its own documents can be fetched like any child's.

use crate::session::VaultSession;
use crate::Result;
use serde::Deserialize;

/// One node of the remote folder tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// Server-side folder id; empty for the synthetic root
    pub id: String,

    /// Display name; empty for the synthetic root
    pub name: String,

    /// Immediate sub-folders, as embedded in the listing response
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// The synthesized root node
    pub fn root(children: Vec<FolderNode>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            children,
        }
    }

    /// Whether this is the synthesized root (or a synthetic self entry)
    pub fn is_root(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

/// Raw folder listing response
#[derive(Debug, Deserialize)]
struct RawFolderListing {
    #[serde(default)]
    folders: Vec<RawFolder>,
}

/// Raw folder entry; `folders` nests the next level
#[derive(Debug, Deserialize)]
struct RawFolder {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    folders: Vec<RawFolder>,
}

impl From<RawFolder> for FolderNode {
    fn from(raw: RawFolder) -> Self {
        FolderNode {
            id: raw.id,
            name: raw.name,
            children: raw.folders.into_iter().map(FolderNode::from).collect(),
        }
    }
}

/// Fetches the folder tree skeleton, bearer-authenticated with the access token
///
/// One HTTP call; the response's `folders` field (absent treated as empty)
/// becomes the children of the synthesized root.
pub async fn list_folders(session: &VaultSession) -> Result<FolderNode> {
    tracing::info!("Getting the list of folders");

    let response = session
        .client()
        .get(session.endpoints().folders_safe().clone())
        .bearer_auth(session.tokens().access()?)
        .send()
        .await?
        .error_for_status()?;

    let listing: RawFolderListing = response.json().await?;
    let children = listing.folders.into_iter().map(FolderNode::from).collect();

    Ok(FolderNode::root(children))
}
