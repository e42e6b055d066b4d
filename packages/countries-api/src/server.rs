//! Hyper server setup and request handling.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming as IncomingBody};
use hyper::{Request, Response};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use tokio::net::TcpListener;

use crate::router::Router;

/// HTTP server for the countries API.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Arc<Router>,
}

impl Server {
    /// Binds a new server instance.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to; port 0 picks a free port
    /// * `router` - Request router
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
            router: Arc::new(router),
        })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until the listener fails.
    ///
    /// Each connection is served on its own task.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        tracing::info!("Server listening on http://{}", self.local_addr);

        loop {
            let (stream, peer_addr) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = Arc::clone(&self.router);

            tokio::task::spawn(async move {
                let builder = ConnectionBuilder::new(TokioExecutor::new());
                if let Err(err) = builder
                    .serve_connection(
                        io,
                        hyper::service::service_fn(move |req| handle_request(req, router.clone())),
                    )
                    .await
                {
                    tracing::error!("Error serving connection from {}: {}", peer_addr, err);
                }
            });
        }
    }
}

/// Handles an incoming HTTP request.
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(router.handle(req).await.map(Full::new))
}
