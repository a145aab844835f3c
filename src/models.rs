/// A capability advertised under a link in the entry-point document
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
}

/// One row of the link table: a relation name mapped to an endpoint URL,
/// plus the features the server supports for it
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub features: Vec<Feature>,
}

/// An action a resource advertises about itself (start, stop, reboot, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub rel: String,
    pub href: String,
    pub method: Option<String>,
}

/// A running (or stopped) compute instance
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub owner_id: Option<String>,
    pub image_href: Option<String>,
    pub realm_href: Option<String>,
    pub state: Option<String>,
    pub public_addresses: Vec<String>,
    pub private_addresses: Vec<String>,
    pub actions: Vec<Action>,
}

impl Instance {
    /// The advertised action with the given relation name, if any
    pub fn action(&self, rel: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.rel == rel)
    }
}

/// A realm: a named partition of the provider's infrastructure
#[derive(Debug, Clone, PartialEq)]
pub struct Realm {
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub limit: Option<String>,
}

/// A machine image instances can be launched from
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub href: Option<String>,
    pub id: Option<String>,
    pub owner_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub architecture: Option<String>,
    pub state: Option<String>,
}

/// A transition out of an instance state
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub action: Option<String>,
    pub to: Option<String>,
    pub auto: bool,
}

/// One node of the provider's instance-state machine
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceState {
    pub name: Option<String>,
    pub transitions: Vec<Transition>,
}

/// A block storage volume
#[derive(Debug, Clone, PartialEq)]
pub struct StorageVolume {
    pub href: Option<String>,
    pub id: Option<String>,
    pub created: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<String>,
    pub device: Option<String>,
    pub instance_href: Option<String>,
}

/// A point-in-time snapshot of a storage volume
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSnapshot {
    pub href: Option<String>,
    pub id: Option<String>,
    pub created: Option<String>,
    pub state: Option<String>,
    pub storage_volume_href: Option<String>,
}

/// A credential key pair registered with the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub href: Option<String>,
    pub id: Option<String>,
    pub kind: Option<String>,
    pub state: Option<String>,
    pub fingerprint: Option<String>,
    pub pem: Option<String>,
}

/// One dimension of a hardware profile (memory, storage, cpu, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub value: Option<String>,
}

/// A hardware profile instances can be sized by
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareProfile {
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub properties: Vec<Property>,
}
