use crate::{
    client::DeltacloudClient,
    error::DeltacloudResult,
    models::{HardwareProfile, Property},
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for HardwareProfile {
    const REL: &'static str = "hardware_profiles";
    const TAG: &'static str = "hardware_profile";
    const COLLECTION_TAG: &'static str = "hardware_profiles";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        let properties = node
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == "property")
            .map(|c| Property {
                kind: xml::attr(c, "kind"),
                name: xml::attr(c, "name"),
                unit: xml::attr(c, "unit"),
                value: xml::attr(c, "value"),
            })
            .collect();

        Ok(HardwareProfile {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            name: xml::child_text(node, "name"),
            properties,
        })
    }
}

/// Hardware profile API operations
pub struct HardwareProfileApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> HardwareProfileApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all hardware profiles
    pub async fn list(&self) -> DeltacloudResult<Vec<HardwareProfile>> {
        info!("Listing hardware profiles");
        self.client.get_collection().await
    }

    /// Get a hardware profile by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<HardwareProfile> {
        info!("Getting hardware profile: {}", id);
        self.client.get_by_id(id).await
    }
}
