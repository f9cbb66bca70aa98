//! Core Salesforce types.
//!
//! These types enforce invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod access_level;
mod domain;
mod instance_url;
mod object_id;
mod session_id;

pub use access_level::AccessLevel;
pub use domain::Domain;
pub use instance_url::InstanceUrl;
pub use object_id::ObjectId;
pub use session_id::SessionId;
