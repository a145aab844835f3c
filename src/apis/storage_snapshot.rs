use crate::{
    client::DeltacloudClient,
    error::DeltacloudResult,
    models::StorageSnapshot,
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for StorageSnapshot {
    const REL: &'static str = "storage_snapshots";
    const TAG: &'static str = "storage_snapshot";
    const COLLECTION_TAG: &'static str = "storage_snapshots";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(StorageSnapshot {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            created: xml::child_text(node, "created"),
            state: xml::child_text(node, "state"),
            storage_volume_href: xml::child_element(node, "storage_volume")
                .and_then(|n| xml::attr(n, "href")),
        })
    }
}

/// Storage snapshot API operations
pub struct StorageSnapshotApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> StorageSnapshotApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all storage snapshots
    pub async fn list(&self) -> DeltacloudResult<Vec<StorageSnapshot>> {
        info!("Listing storage snapshots");
        self.client.get_collection().await
    }

    /// Get a storage snapshot by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<StorageSnapshot> {
        info!("Getting storage snapshot: {}", id);
        self.client.get_by_id(id).await
    }
}
