//! Name server which resolves human-readable names
//! to opaque addresses and back over HTTP.
//!
//! The mapping is loaded once from a JSON object of names to addresses
//! and stays immutable for the lifetime of the [server][`server::Server`].

// Add warnings for missing public and private documentation.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod name;
pub mod resolver;
pub mod server;
pub mod store;

pub use error::{LoadError, ResolveError, ServerError, TlsError};
pub use name::is_valid_name;
pub use resolver::{Resolver, SharedResolver};
pub use server::Server;
pub use store::{MappingStore, NamePolicy};
