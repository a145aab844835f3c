use crate::{
    client::DeltacloudClient,
    error::DeltacloudResult,
    models::Image,
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for Image {
    const REL: &'static str = "images";
    const TAG: &'static str = "image";
    const COLLECTION_TAG: &'static str = "images";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(Image {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            owner_id: xml::child_text(node, "owner_id"),
            name: xml::child_text(node, "name"),
            description: xml::child_text(node, "description"),
            architecture: xml::child_text(node, "architecture"),
            state: xml::child_text(node, "state"),
        })
    }
}

/// Image API operations
pub struct ImageApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> ImageApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all images
    pub async fn list(&self) -> DeltacloudResult<Vec<Image>> {
        info!("Listing images");
        self.client.get_collection().await
    }

    /// Get an image by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<Image> {
        info!("Getting image: {}", id);
        self.client.get_by_id(id).await
    }
}
