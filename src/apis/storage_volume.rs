use crate::{
    client::DeltacloudClient,
    error::DeltacloudResult,
    models::StorageVolume,
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for StorageVolume {
    const REL: &'static str = "storage_volumes";
    const TAG: &'static str = "storage_volume";
    const COLLECTION_TAG: &'static str = "storage_volumes";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(StorageVolume {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            created: xml::child_text(node, "created"),
            state: xml::child_text(node, "state"),
            capacity: xml::child_text(node, "capacity"),
            device: xml::child_text(node, "device"),
            instance_href: xml::child_element(node, "instance")
                .and_then(|n| xml::attr(n, "href")),
        })
    }
}

/// Storage volume API operations
pub struct StorageVolumeApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> StorageVolumeApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all storage volumes
    pub async fn list(&self) -> DeltacloudResult<Vec<StorageVolume>> {
        info!("Listing storage volumes");
        self.client.get_collection().await
    }

    /// Get a storage volume by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<StorageVolume> {
        info!("Getting storage volume: {}", id);
        self.client.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_storage_volume() {
        let body = r#"<storage_volume href="http://x/api/storage_volumes/vol1" id="vol1">
            <created>2026-08-01T00:00:00Z</created>
            <state>IN-USE</state>
            <capacity>10</capacity>
            <device>/dev/sda1</device>
            <instance href="http://x/api/instances/inst1"/>
        </storage_volume>"#;
        let volume: StorageVolume = xml::decode_single(body).unwrap();
        assert_eq!(volume.id.as_deref(), Some("vol1"));
        assert_eq!(volume.capacity.as_deref(), Some("10"));
        assert_eq!(
            volume.instance_href.as_deref(),
            Some("http://x/api/instances/inst1")
        );
    }
}
