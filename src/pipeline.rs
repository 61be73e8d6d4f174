//! Resolution pipeline: workspace -> collection -> collection detail -> URLs
//!
//! Each stage is one round-trip through the [`Transport`]; the first failure
//! ends the run.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::constants::WORKSPACE_QUERY_KEY;
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::lookup::find_first;
use crate::models::{
    ApiErrorEnvelope, CollectionDetail, CollectionEnvelope, CollectionList, CollectionSummary,
    Workspace, WorkspaceList,
};
use crate::network::{RequestData, Transport};

/// States of a resolution run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    WorkspaceResolved,
    CollectionResolved,
    DetailFetched,
    UrlsExtracted,
    Done,
}

/// Result of a complete run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resolution {
    pub workspace_id: String,
    pub collection_uid: String,
    pub collection_name: String,
    pub urls: Vec<String>,
}

/// Decode a response body, preferring the API's own error message when the shape is wrong
fn decode<T: DeserializeOwned>(body: &[u8], what: &'static str) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| {
        match serde_json::from_slice::<ApiErrorEnvelope>(body) {
            Ok(envelope) => Error::Api {
                name: envelope.error.name,
                message: envelope.error.message,
            },
            Err(_) => Error::Decode { what, source },
        }
    })
}

pub struct Pipeline<T: Transport> {
    transport: T,
    config: Config,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Pipeline { transport, config }
    }

    async fn get(&self, path: &str, data: RequestData) -> Result<Vec<u8>> {
        let url = self.config.endpoint(path);
        self.transport.send(&url, Method::GET, data).await
    }

    /// `GET /workspaces`
    pub async fn fetch_workspaces(&self) -> Result<Vec<Workspace>> {
        let body = self.get("workspaces", RequestData::default()).await?;
        let list: WorkspaceList = decode(&body, "workspaces")?;
        Ok(list.workspaces)
    }

    /// `GET /collections?workspace=<id>`
    pub async fn fetch_collections(&self, workspace_id: &str) -> Result<Vec<CollectionSummary>> {
        let data = RequestData::default().with_query(WORKSPACE_QUERY_KEY, workspace_id);
        let body = self.get("collections", data).await?;
        let list: CollectionList = decode(&body, "collections")?;
        Ok(list.collections)
    }

    /// `GET /collections/<uid>`
    pub async fn collection_detail(&self, collection_uid: &str) -> Result<CollectionDetail> {
        let body = self
            .get(&format!("collections/{}", collection_uid), RequestData::default())
            .await?;
        let envelope: CollectionEnvelope = decode(&body, "collection")?;
        Ok(envelope.collection)
    }

    /// Id of the first workspace named like the configured one
    pub async fn workspace_id(&self) -> Result<String> {
        let name = &self.config.workspace_name;
        let workspaces = self.fetch_workspaces().await?;
        let workspace = find_first(workspaces, "workspace", name, |w| &w.name == name)?;
        Ok(workspace.id)
    }

    /// First collection in the workspace whose fork carries the configured label
    pub async fn collection(&self, workspace_id: &str) -> Result<CollectionSummary> {
        let label = &self.config.fork_label;
        let collections = self.fetch_collections(workspace_id).await?;
        find_first(collections, "collection with fork label", label, |c| c.fork_label() == label)
    }

    /// Uid of the labeled fork; this, not the id, addresses the detail endpoint
    pub async fn collection_uid(&self, workspace_id: &str) -> Result<String> {
        Ok(self.collection(workspace_id).await?.uid)
    }

    /// Run every stage in order
    pub async fn resolve(&self) -> Result<Resolution> {
        tracing::info!(stage = ?Stage::Start, workspace = %self.config.workspace_name, "Resolving collection routes");

        let workspace_id = self.workspace_id().await?;
        tracing::info!(stage = ?Stage::WorkspaceResolved, workspace_id = %workspace_id);

        let collection = self.collection(&workspace_id).await?;
        tracing::info!(stage = ?Stage::CollectionResolved, uid = %collection.uid, name = %collection.name);

        let detail = self.collection_detail(&collection.uid).await?;
        tracing::info!(stage = ?Stage::DetailFetched, items = detail.items.len());

        let urls = flatten(&detail.items);
        tracing::info!(stage = ?Stage::UrlsExtracted, urls = urls.len());

        let resolution = Resolution {
            workspace_id,
            collection_uid: collection.uid,
            collection_name: detail.info.name,
            urls,
        };
        tracing::info!(stage = ?Stage::Done);
        Ok(resolution)
    }
}
