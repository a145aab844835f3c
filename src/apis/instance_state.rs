use crate::{
    client::DeltacloudClient,
    error::{DeltacloudError, DeltacloudResult},
    models::{InstanceState, Transition},
    xml::{self, Resource},
};
use log::info;
use roxmltree::Node;

// Relation name and root tag differ for this resource: the relation is
// "instance_states" but the documents use <states>/<state>.
impl Resource for InstanceState {
    const REL: &'static str = "instance_states";
    const TAG: &'static str = "state";
    const COLLECTION_TAG: &'static str = "states";

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self> {
        let transitions = node
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == "transition")
            .map(|c| Transition {
                action: xml::attr(c, "action"),
                to: xml::attr(c, "to"),
                auto: xml::attr(c, "auto").is_some(),
            })
            .collect();

        Ok(InstanceState {
            name: xml::attr(node, "name"),
            transitions,
        })
    }
}

/// Instance state machine API operations
pub struct InstanceStateApi<'a> {
    client: &'a DeltacloudClient,
}

impl<'a> InstanceStateApi<'a> {
    pub fn new(client: &'a DeltacloudClient) -> Self {
        Self { client }
    }

    /// List the provider's instance state machine
    pub async fn list(&self) -> DeltacloudResult<Vec<InstanceState>> {
        info!("Listing instance states");
        self.client.get_collection().await
    }

    /// Get a single state by its name
    pub async fn get_by_name(&self, name: &str) -> DeltacloudResult<InstanceState> {
        if name.is_empty() {
            return Err(DeltacloudError::invalid_arg("name may not be empty"));
        }
        info!("Getting instance state: {}", name);

        let states = self.list().await?;
        states
            .into_iter()
            .find(|s| s.name.as_deref() == Some(name))
            .ok_or_else(|| DeltacloudError::NameNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_states_with_transitions() {
        let body = r#"<states>
            <state name="start">
                <transition to="pending" auto="true"/>
            </state>
            <state name="running">
                <transition action="stop" to="stopped"/>
                <transition action="reboot" to="running"/>
            </state>
        </states>"#;
        let states: Vec<InstanceState> = xml::decode_collection(body).unwrap();
        assert_eq!(states.len(), 2);
        assert!(states[0].transitions[0].auto);
        assert_eq!(states[0].transitions[0].action, None);
        assert_eq!(states[1].transitions[0].action.as_deref(), Some("stop"));
        assert!(!states[1].transitions[0].auto);
    }
}
