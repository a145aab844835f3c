pub mod hardware_profile;
pub mod image;
pub mod instance;
pub mod instance_state;
pub mod key;
pub mod realm;
pub mod storage_snapshot;
pub mod storage_volume;

// Re-export all APIs
pub use hardware_profile::HardwareProfileApi;
pub use image::ImageApi;
pub use instance::{InstanceApi, InstanceCreateOpts};
pub use instance_state::InstanceStateApi;
pub use key::KeyApi;
pub use realm::RealmApi;
pub use storage_snapshot::StorageSnapshotApi;
pub use storage_volume::StorageVolumeApi;
