/*
 * Deltacloud Client - Rust client for the Deltacloud cloud-infrastructure REST API
 */

// Internal modules
mod client;
pub mod models; // Make models public
mod apis;
mod auth;
mod error;
pub mod xml;

// Re-export public types and interfaces
pub use apis::*;
pub use auth::{Authentication, BasicAuth, NoAuth};
pub use client::{CreateParameter, DeltacloudClient};
pub use error::{DeltacloudError, DeltacloudResult};
pub use models::*;
pub use xml::Resource;

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BasicAuth, DeltacloudClient, DeltacloudError, DeltacloudResult, NoAuth,
        // Common model types
        HardwareProfile, Image, Instance, InstanceCreateOpts, InstanceState, Key, Link, Realm,
        StorageSnapshot, StorageVolume,
    };
}
