pub mod auth_state;
pub mod credential_store;
pub mod errors;
pub mod types;

pub use auth_state::AuthStateManager;
pub use credential_store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use errors::AuthError;
pub use types::{AuthSnapshot, Credentials};
