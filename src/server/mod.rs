//! Lifecycle of the name server: listening, TLS and graceful shutdown.

pub mod tls;

use std::{future::Future, net::SocketAddr, time::Duration};

use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{TcpListener, TcpStream},
    sync::watch,
};
use tokio_rustls::TlsAcceptor;

use crate::{error::ServerError, http::serve_request, resolver::SharedResolver};

/// Default time given to in-flight requests on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause after failed accept.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Time given to the peer to complete TLS handshake.
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

//////////////////////////////////////////////////////////////////////////////////////////

/// Http server which resolves names with the [resolver][`crate::resolver::Resolver`].
pub struct Server {
    /// Listener of incoming connections.
    listener: TcpListener,
    /// Resolver shared between connections.
    resolver: SharedResolver,
    /// TLS acceptor, if connections are served over TLS.
    tls: Option<TlsAcceptor>,
    /// Time given to in-flight requests on shutdown.
    shutdown_timeout: Duration,
}

impl Server {
    /// Bind server to the address.
    pub async fn bind(addr: SocketAddr, resolver: SharedResolver) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(ServerError::Listen)?;

        Ok(Self {
            listener,
            resolver,
            tls: None,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        })
    }

    /// Serve connections over TLS.
    pub fn with_tls(mut self, acceptor: TlsAcceptor) -> Self {
        self.tls = Some(acceptor);
        self
    }

    /// Set time given to in-flight requests on shutdown.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Returns address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::Listen)
    }

    /// Accept connections until `shutdown` completes,
    /// then wait for open connections to finish.
    pub async fn serve(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        let Server {
            listener,
            resolver,
            tls,
            shutdown_timeout,
        } = self;

        // every connection holds a receiver, so the sender sees
        // when all of them are closed
        let (signal_sender, signal_receiver) = watch::channel(());

        tokio::pin!(shutdown);

        // run accept cycle
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(err) => {
                            warn!("Error: accept connection: {}", err);
                            tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                            continue;
                        }
                    };

                    tokio::task::spawn(accept_connection(
                        stream,
                        peer,
                        tls.clone(),
                        resolver.clone(),
                        signal_receiver.clone(),
                    ));
                }
                _ = &mut shutdown => {
                    info!("Shutting down...");
                    break;
                }
            }
        }

        // stop accepting and ask open connections to finish
        drop(listener);
        drop(signal_receiver);
        let _ = signal_sender.send(());

        let drained = tokio::time::timeout(shutdown_timeout, signal_sender.closed()).await;
        if drained.is_err() {
            warn!(
                "Error: shutdown server: {} connections still open after {:?}",
                signal_sender.receiver_count(),
                shutdown_timeout
            );
        }

        Ok(())
    }
}

//////////////////////////////////////////////////////////////////////////////////////////

/// Make TLS handshake if needed and serve connection.
async fn accept_connection(
    stream: TcpStream,
    peer: SocketAddr,
    tls: Option<TlsAcceptor>,
    resolver: SharedResolver,
    mut signal: watch::Receiver<()>,
) {
    debug!("accepted connection from {}", peer);

    let Some(acceptor) = tls else {
        serve_connection(stream, peer, resolver, signal).await;
        return;
    };

    // silent peer must not hold shutdown
    let handshake = tokio::select! {
        result = tokio::time::timeout(TLS_HANDSHAKE_TIMEOUT, acceptor.accept(stream)) => result,
        _ = signal.changed() => {
            debug!("dropping connection from {} during TLS handshake", peer);
            return;
        }
    };

    match handshake {
        Ok(Ok(stream)) => serve_connection(stream, peer, resolver, signal).await,
        Ok(Err(err)) => warn!("Error: TLS handshake with {}: {}", peer, err),
        Err(_) => warn!(
            "Error: TLS handshake with {}: timed out after {:?}",
            peer, TLS_HANDSHAKE_TIMEOUT
        ),
    }
}

/// Serve http connection until it closes or shutdown is signaled.
async fn serve_connection<S>(
    stream: S,
    peer: SocketAddr,
    resolver: SharedResolver,
    mut signal: watch::Receiver<()>,
) where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let io = TokioIo::new(stream);

    let conn = http1::Builder::new().serve_connection(
        io,
        service_fn(move |request| serve_request(request, resolver.clone())),
    );
    tokio::pin!(conn);

    let serve_result = tokio::select! {
        result = conn.as_mut() => result,
        _ = signal.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.as_mut().await
        }
    };

    if let Err(err) = serve_result {
        debug!("Error serving connection from {}: {:?}", peer, err);
    }
}
