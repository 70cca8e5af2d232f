use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};

use super::routes::gate_routes;
use crate::controller::dispatcher::Dispatcher;
use crate::error_handling::types::WebError;

/// HTTP front of the gate.
pub struct WebServer {
    dispatcher: Arc<Dispatcher>,
}

impl WebServer {
    /// Create a new WebServer instance
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Serve the gate on `addr` until the process is stopped.
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        // warp panics on bind failure, so probe the address first and surface a proper error.
        let probe = std::net::TcpListener::bind(addr).map_err(|e| {
            error!("Unable to bind {}: {}", addr, e);
            WebError::BindFailed(e)
        })?;
        drop(probe);

        let routes = gate_routes(self.dispatcher.clone());

        info!("Session gate listening on http://{}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
