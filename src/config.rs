//! Command line configuration of the name server.

use std::{
    net::{AddrParseError, Ipv6Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use log::{warn, LevelFilter};

use crate::store::NamePolicy;

/// Name server which resolves names to addresses and back over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "nameserv")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to listen on, `:PORT` listens on every interface
    #[arg(long, default_value = ":8080", value_parser = parse_listen_addr)]
    pub addr: SocketAddr,

    /// TLS certificate
    #[arg(long = "tls.cert", value_name = "PATH")]
    pub tls_cert: Option<PathBuf>,

    /// TLS key
    #[arg(long = "tls.key", value_name = "PATH")]
    pub tls_key: Option<PathBuf>,

    /// Path to JSON name-to-address mapping
    #[arg(long, value_name = "PATH")]
    pub names: PathBuf,

    /// Refuse to start if the mapping contains malformed names
    #[arg(long)]
    pub strict_names: bool,

    /// Seconds given to in-flight requests on shutdown
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub shutdown_timeout: u64,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

/// Parse listen address, accepting `:PORT` shorthand for all interfaces.
fn parse_listen_addr(s: &str) -> Result<SocketAddr, String> {
    if let Some(port) = s.strip_prefix(':') {
        let port: u16 = port
            .parse()
            .map_err(|_| format!("invalid port {:?}", port))?;
        Ok(SocketAddr::new(Ipv6Addr::UNSPECIFIED.into(), port))
    } else {
        s.parse()
            .map_err(|e: AddrParseError| format!("invalid address {:?}: {}", s, e))
    }
}

impl Config {
    /// Returns certificate and key paths if both of them are specified.
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            (None, None) => None,
            _ => {
                warn!("both --tls.cert and --tls.key are required for TLS, serving plain HTTP");
                None
            }
        }
    }

    /// Returns policy for names in the mapping.
    pub fn name_policy(&self) -> NamePolicy {
        if self.strict_names {
            NamePolicy::Strict
        } else {
            NamePolicy::Lenient
        }
    }

    /// Returns shutdown grace period.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use clap::Parser;
    use log::LevelFilter;

    use crate::store::NamePolicy;

    use super::Config;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["nameserv", "--names", "names.json"]).unwrap();

        assert_eq!(config.addr, "[::]:8080".parse().unwrap());
        assert_eq!(config.names, Path::new("names.json"));
        assert!(config.tls_paths().is_none());
        assert_eq!(config.name_policy(), NamePolicy::Lenient);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(60));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn all_flags() {
        let config = Config::try_parse_from([
            "nameserv",
            "--addr",
            "127.0.0.1:9090",
            "--tls.cert",
            "cert.pem",
            "--tls.key",
            "key.pem",
            "--names",
            "names.json",
            "--strict-names",
            "--shutdown-timeout",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(
            config.tls_paths(),
            Some((Path::new("cert.pem"), Path::new("key.pem")))
        );
        assert_eq!(config.name_policy(), NamePolicy::Strict);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn tls_needs_both_paths() {
        let config =
            Config::try_parse_from(["nameserv", "--names", "n.json", "--tls.cert", "cert.pem"])
                .unwrap();
        assert!(config.tls_paths().is_none());
    }

    #[test]
    fn names_required() {
        assert!(Config::try_parse_from(["nameserv"]).is_err());
    }

    #[test]
    fn port_shorthand() {
        let config =
            Config::try_parse_from(["nameserv", "--names", "n.json", "--addr", ":9090"]).unwrap();
        assert_eq!(config.addr, "[::]:9090".parse().unwrap());
        assert!(config.addr.ip().is_unspecified());
    }

    #[test]
    fn bad_addr() {
        for addr in [":http", ":70000", "localhost", "8080"] {
            assert!(
                Config::try_parse_from(["nameserv", "--names", "n.json", "--addr", addr]).is_err(),
                "accepted {:?}",
                addr
            );
        }
    }
}
