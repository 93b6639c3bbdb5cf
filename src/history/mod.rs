mod store;

pub use store::{Snapshot, VersionStore};
