pub mod error;
pub mod kv;
pub mod model;
pub mod notifier;
pub mod session;
pub mod store;

mod seed;

pub use error::StoreError;
pub use kv::Kv;
pub use notifier::{ChangeKind, StoreEvent};
pub use session::Sessions;
pub use store::{Store, StorageReport};
