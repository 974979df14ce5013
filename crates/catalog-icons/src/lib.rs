//! Catalog Icons
//!
//! Maps model-provider endpoint metadata to static icon asset paths.
//!
//! # Overview
//!
//! - [`EndpointDescriptor`]: the fields an endpoint exposes (name, models, base URL)
//! - [`ICON_RULES`]: ordered provider keyword table, evaluated top to bottom
//! - [`resolve_icon`]: first matching rule wins, `None` means "use the default icon"
//! - [`IconResolver`]: the same table with caller-supplied rules evaluated first
//!
//! # Example
//!
//! ```rust
//! use catalog_icons::{resolve_icon, EndpointDescriptor};
//!
//! let endpoint = EndpointDescriptor::new().with_name("gpt-4-turbo");
//! assert_eq!(resolve_icon(&endpoint), Some("/assets/openai.svg"));
//!
//! assert_eq!(resolve_icon(&EndpointDescriptor::new()), None);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod endpoint;
pub mod resolver;
pub mod rules;

// Re-exports
pub use endpoint::{EndpointDescriptor, EndpointModels, ModelList};
pub use resolver::{icon_for_endpoint, resolve_icon, IconResolver};
pub use rules::{CustomIconRule, IconRule, ASSET_PREFIX, ICON_RULES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
