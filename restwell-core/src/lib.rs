pub mod credential;
pub mod policy;

pub use credential::{Credential, CredentialError, CredentialRepository};
pub use policy::{require_owner, PolicyError, ResourceKind};
