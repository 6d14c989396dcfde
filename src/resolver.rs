//! Capability to resolve names to addresses and back.

use std::sync::Arc;

use crate::error::ResolveError;

/// Resolves names to addresses and addresses to names.
///
/// Implemented by [`MappingStore`][`crate::store::MappingStore`],
/// but the [http handler][`crate::http`] depends only on this trait,
/// so it can be served by any other source of records.
pub trait Resolver: Send + Sync {
    /// Returns address registered for the name.
    fn resolve_name(&self, name: &str) -> Result<String, ResolveError>;

    /// Returns name registered for the address.
    fn resolve_addr(&self, addr: &str) -> Result<String, ResolveError>;
}

/// Resolver shared between connections.
pub type SharedResolver = Arc<dyn Resolver>;
