//! Loading of the TLS certificate and key.

use std::{path::Path, sync::Arc};

use rustls::{
    pki_types::{pem::PemObject, CertificateDer, PrivateKeyDer},
    ServerConfig,
};
use tokio_rustls::TlsAcceptor;

use crate::error::TlsError;

/// Parse PEM-encoded certificate chain.
fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let certs = CertificateDer::pem_file_iter(path)
        .and_then(|iter| iter.collect::<Result<Vec<_>, _>>())
        .map_err(|e| TlsError::Certificate(format!("{}: {}", path.display(), e)))?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificates);
    }
    Ok(certs)
}

/// Parse PEM-encoded private key.
fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    PrivateKeyDer::from_pem_file(path)
        .map_err(|e| TlsError::PrivateKey(format!("{}: {}", path.display(), e)))
}

/// Build TLS acceptor from certificate chain and private key PEM files.
pub fn load_acceptor(cert_path: &Path, key_path: &Path) -> Result<TlsAcceptor, TlsError> {
    let certs = load_certificates(cert_path)?;
    let key = load_private_key(key_path)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(TlsAcceptor::from(Arc::new(config)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::error::TlsError;

    use super::load_acceptor;

    fn pem_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn self_signed() -> (NamedTempFile, NamedTempFile) {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_owned()]).unwrap();
        (
            pem_file(&certified.cert.pem()),
            pem_file(&certified.key_pair.serialize_pem()),
        )
    }

    #[test]
    fn loads_self_signed() {
        let (cert, key) = self_signed();
        assert!(load_acceptor(cert.path(), key.path()).is_ok());
    }

    #[test]
    fn missing_certificate() {
        let (_, key) = self_signed();
        let dir = tempfile::tempdir().unwrap();
        let result = load_acceptor(&dir.path().join("absent.pem"), key.path());
        assert!(matches!(result, Err(TlsError::Certificate(_))));
    }

    #[test]
    fn empty_certificate() {
        let (_, key) = self_signed();
        let cert = pem_file("");
        let result = load_acceptor(cert.path(), key.path());
        assert!(matches!(result, Err(TlsError::NoCertificates)));
    }

    #[test]
    fn certificate_instead_of_key() {
        let (cert, _key) = self_signed();
        let result = load_acceptor(cert.path(), cert.path());
        assert!(matches!(result, Err(TlsError::PrivateKey(_))));
    }
}
