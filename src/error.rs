//! Error types of the name server.

use std::io;

use thiserror::Error;

/// Fixed message sent to clients when a key has no entry.
pub const NOT_REGISTERED: &str = "not registered";

/// Error returned by a [`Resolver`][`crate::resolver::Resolver`] lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Queried name or address is not registered.
    #[error("not registered")]
    NotRegistered,
}

/// Error which can occur while loading the name mapping.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Mapping file can not be opened or read.
    #[error("read: {0}")]
    Io(#[from] io::Error),

    /// Mapping is not a JSON object of strings to strings.
    #[error("unmarshal: {0}")]
    Json(#[from] serde_json::Error),

    /// Mapping contains malformed name and strict policy is used.
    #[error("invalid name: {0:?}")]
    InvalidName(String),
}

/// Error which can occur while building TLS configuration.
#[derive(Debug, Error)]
pub enum TlsError {
    /// Certificate file can not be read or parsed.
    #[error("certificate: {0}")]
    Certificate(String),

    /// Certificate file contains no certificates.
    #[error("certificate: no certificates found")]
    NoCertificates,

    /// Private key file can not be read or parsed.
    #[error("private key: {0}")]
    PrivateKey(String),

    /// Rustls rejected the certificate and key pair.
    #[error("server config: {0}")]
    Config(#[from] rustls::Error),
}

/// Fatal error of the server lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Name mapping can not be loaded.
    #[error("load names: {0}")]
    Load(#[from] LoadError),

    /// TLS can not be configured.
    #[error("tls: {0}")]
    Tls(#[from] TlsError),

    /// Listener can not be bound or queried.
    #[error("listen: {0}")]
    Listen(#[source] io::Error),
}
