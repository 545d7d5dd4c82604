//! URL handling module
//!
//! This module provides URL canonicalization, host extraction, and the scope
//! predicate that keeps an export inside one site and path prefix.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::host_key;
pub use normalize::{canonicalize, canonicalize_against, CanonicalUrl};
pub use scope::{is_in_scope, ScopeConfig};
