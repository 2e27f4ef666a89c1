//! Provider domain types (transport-free).
//!
//! These types describe *which* backends exist and how they should be
//! addressed, without performing any I/O:
//!
//! - [`spec::ProviderSpec`] - name, endpoint, credential, model, request family
//! - [`params::GenerationParams`] - sampling parameters for one completion
//! - [`reliability`] - fixed per-provider reliability table
//! - [`selection::SelectionPolicy`] - which provider synthesizes / answers alone

pub mod params;
pub mod reliability;
pub mod selection;
pub mod spec;

pub use params::GenerationParams;
pub use reliability::provider_reliability;
pub use selection::SelectionPolicy;
pub use spec::{Credential, ProviderFamily, ProviderSpec};
