use crate::{
    client::{CreateParameter, DeltacloudClient},
    error::{DeltacloudError, DeltacloudResult},
    models::{Action, Instance},
    xml::{self, Resource},
};
use log::{debug, info};
use roxmltree::Node;

impl Resource for Instance {
    const REL: &'static str = "instances";
    const TAG: &'static str = "instance";
    const COLLECTION_TAG: &'static str = "instances";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        Ok(Instance {
            href: xml::attr(node, "href"),
            id: xml::attr(node, "id"),
            name: xml::child_text(node, "name"),
            owner_id: xml::child_text(node, "owner_id"),
            image_href: xml::child_element(node, "image").and_then(|n| xml::attr(n, "href")),
            realm_href: xml::child_element(node, "realm").and_then(|n| xml::attr(n, "href")),
            state: xml::child_text(node, "state"),
            public_addresses: decode_addresses(node, "public_addresses"),
            private_addresses: decode_addresses(node, "private_addresses"),
            actions: decode_actions(node),
        })
    }
}

fn decode_addresses(node: Node<'_, '_>, wrapper: &str) -> Vec<String> {
    xml::child_element(node, wrapper)
        .map(|w| {
            w.children()
                .filter(|c| c.is_element() && c.tag_name().name() == "address")
                .filter_map(|c| c.text())
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn decode_actions(node: Node<'_, '_>) -> Vec<Action> {
    xml::child_element(node, "actions")
        .map(|w| {
            w.children()
                .filter(|c| c.is_element() && c.tag_name().name() == "link")
                .filter_map(|c| {
                    let rel = xml::attr(c, "rel")?;
                    let href = xml::attr(c, "href")?;
                    Some(Action {
                        rel,
                        href,
                        method: xml::attr(c, "method"),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Optional parameters for creating an instance
#[derive(Debug, Clone, Default)]
pub struct InstanceCreateOpts {
    pub name: Option<String>,
    pub realm_id: Option<String>,
    pub hardware_profile: Option<String>,
    pub keyname: Option<String>,
    pub user_data: Option<String>,
}

/// Instance API operations
pub struct InstanceApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> InstanceApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List all instances
    pub async fn list(&self) -> DeltacloudResult<Vec<Instance>> {
        info!("Listing instances");
        self.client.get_collection().await
    }

    /// Get an instance by id
    pub async fn get(&self, id: &str) -> DeltacloudResult<Instance> {
        info!("Getting instance: {}", id);
        self.client.get_by_id(id).await
    }

    /// Get an instance by its name. The protocol has no name index, so
    /// this lists the collection and matches locally.
    pub async fn get_by_name(&self, name: &str) -> DeltacloudResult<Instance> {
        if name.is_empty() {
            return Err(DeltacloudError::invalid_arg("name may not be empty"));
        }
        info!("Getting instance by name: {}", name);

        let instances = self.list().await?;
        instances
            .into_iter()
            .find(|i| i.name.as_deref() == Some(name))
            .ok_or_else(|| DeltacloudError::NameNotFound(name.to_string()))
    }

    /// Launch a new instance from an image
    pub async fn create(
        &self,
        image_id: &str,
        opts: InstanceCreateOpts,
    ) -> DeltacloudResult<Instance> {
        if image_id.is_empty() {
            return Err(DeltacloudError::invalid_arg("image_id may not be empty"));
        }
        info!("Creating instance from image {}", image_id);
        debug!("Create options: {:?}", opts);

        let params = vec![
            CreateParameter::new("image_id", Some(image_id))?,
            CreateParameter::new("name", opts.name)?,
            CreateParameter::new("realm_id", opts.realm_id)?,
            CreateParameter::new("hwp_id", opts.hardware_profile)?,
            CreateParameter::new("keyname", opts.keyname)?,
            CreateParameter::new("user_data", opts.user_data)?,
        ];

        let body = self.client.create(Instance::REL, &params, &[]).await?;
        match body {
            Some(body) => xml::decode_single(&body),
            None => Err(DeltacloudError::EmptyResponse(Instance::TAG.to_string())),
        }
    }

    /// Start a stopped instance
    pub async fn start(&self, instance: &Instance) -> DeltacloudResult<()> {
        self.perform(instance, "start").await
    }

    /// Stop a running instance
    pub async fn stop(&self, instance: &Instance) -> DeltacloudResult<()> {
        self.perform(instance, "stop").await
    }

    /// Reboot a running instance
    pub async fn reboot(&self, instance: &Instance) -> DeltacloudResult<()> {
        self.perform(instance, "reboot").await
    }

    /// Destroy an instance. Deltacloud models destroy as a DELETE on the
    /// instance's own href rather than an advertised action.
    pub async fn destroy(&self, instance: &Instance) -> DeltacloudResult<()> {
        let href = instance
            .href
            .as_deref()
            .ok_or_else(|| DeltacloudError::invalid_arg("instance has no href"))?;
        info!("Destroying instance at {}", href);
        self.client.destroy(href).await
    }

    /// POST to the action href the instance advertises for `action`
    async fn perform(&self, instance: &Instance, action: &str) -> DeltacloudResult<()> {
        let found = instance
            .action(action)
            .ok_or_else(|| DeltacloudError::LinkNotFound(action.to_string()))?;
        info!("Performing '{}' on instance at {}", action, found.href);

        self.client.post_action(&found.href).await?;
        Ok(())
    }
}
