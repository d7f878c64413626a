//! Fitware Shared Library
//!
//! Wire models, normalization helpers and form validation shared by the
//! console and the browser bindings.

pub mod datetime;
pub mod errors;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod status;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use normalize::{normalize_client, normalize_clients};
pub use status::{code_to_label, label_to_status, SessionStatus};
pub use types::*;
