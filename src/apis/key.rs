use crate::{
    client::{CreateParameter, DeltacloudClient},
    error::{DeltacloudError, DeltacloudResult},
    models::Key,
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

impl Resource for Key {
    const REL: &'static str = "keys";
    const TAG: &'static str = "key";
    const COLLECTION_TAG: &'static str = "keys";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(Key {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            kind: xml::attr(node, "type"),
            state: xml::child_text(node, "state"),
            fingerprint: xml::child_text(node, "fingerprint"),
            pem: xml::child_text(node, "pem"),
        })
    }
}

/// Key API operations
pub struct KeyApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> KeyApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all keys
    pub async fn list(&self) -> DeltacloudResult<Vec<Key>> {
        info!("Listing keys");
        self.client.get_collection().await
    }

    /// Get a key by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<Key> {
        info!("Getting key: {}", id);
        self.client.get_by_id(id).await
    }

    /// Register a new key pair under the given name. The response carries
    /// the private material; it is only ever returned here.
    pub async fn create(&self, name: &str) -> DeltacloudResult<Key> {
        if name.is_empty() {
            return Err(DeltacloudError::invalid_arg("name may not be empty"));
        }
        info!("Creating key: {}", name);

        let params = vec![CreateParameter::new("name", Some(name))?];
        let body = self.client.create(Key::REL, &params, &[]).await?;
        match body {
            Some(body) => xml::decode_single(&body),
            None => Err(DeltacloudError::EmptyResponse(Key::TAG.to_string())),
        }
    }

    /// Destroy a key via a DELETE on its own href
    pub async fn destroy(&self, key: &Key) -> DeltacloudResult<()> {
        let href = key
            .href
            .as_deref()
            .ok_or_else(|| DeltacloudError::invalid_arg("key has no href"))?;
        info!("Destroying key at {}", href);
        self.client.destroy(href).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_key_document() {
        let body = r#"<key href="http://x/api/keys/mykey" id="mykey" type="key">
            <state>AVAILABLE</state>
            <fingerprint>aa:bb:cc</fingerprint>
            <pem>PRIVATE MATERIAL</pem>
        </key>"#;
        let key: Key = xml::decode_single(body).unwrap();
        assert_eq!(key.id.as_deref(), Some("mykey"));
        assert_eq!(key.kind.as_deref(), Some("key"));
        assert_eq!(key.fingerprint.as_deref(), Some("aa:bb:cc"));
        assert_eq!(key.pem.as_deref(), Some("PRIVATE MATERIAL"));
    }
}
