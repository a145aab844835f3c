use crate::{
    client::DeltacloudClient,
    error::DeltacloudResult,
    models::Realm,
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for Realm {
    const REL: &'static str = "realms";
    const TAG: &'static str = "realm";
    const COLLECTION_TAG: &'static str = "realms";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(Realm {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            name: xml::child_text(node, "name"),
            state: xml::child_text(node, "state"),
            limit: xml::child_text(node, "limit"),
        })
    }
}

/// Realm API operations
pub struct RealmApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> RealmApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all realms
    pub async fn list(&self) -> DeltacloudResult<Vec<Realm>> {
        info!("Listing realms");
        self.client.get_collection().await
    }

    /// Get a realm by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<Realm> {
        info!("Getting realm: {}", id);
        self.client.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_realm_collection() {
        let body = r#"<realms>
            <realm href="http://x/api/realms/us" id="us">
                <name>United States</name>
                <state>AVAILABLE</state>
                <limit></limit>
            </realm>
            <realm href="http://x/api/realms/eu" id="eu">
                <name>Europe</name>
                <state>AVAILABLE</state>
            </realm>
        </realms>"#;
        let realms: Vec<Realm> = xml::decode_collection(body).unwrap();
        assert_eq!(realms.len(), 2);
        assert_eq!(realms[0].name.as_deref(), Some("United States"));
        // empty <limit/> reads as absent
        assert_eq!(realms[0].limit, None);
        assert_eq!(realms[1].id.as_deref(), Some("eu"));
    }
}
