use crate::configuration::config::Config;
use crate::controller::dispatcher::Dispatcher;
use crate::error_handling::types::*;
use crate::session_management::session_manager::SessionManager;
use crate::web_interface::web_server::WebServer;
use log::info;
use std::sync::Arc;

/// Owns the validated configuration and the one session slot for the life of the process.
pub struct Controller {
    pub config: Config,
    dispatcher: Arc<Dispatcher>,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        info!("Creating controller for {}", config.server.socket_addr());
        let sessions = Arc::new(SessionManager::new());
        let dispatcher = Arc::new(Dispatcher::new(config.credentials.clone(), sessions));
        Self { config, dispatcher }
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Serves the gate until the process is stopped.
    pub async fn run(&self) -> Result<(), ControllerError> {
        info!("Starting web interface");
        let server = WebServer::new(self.dispatcher());
        server.start(self.config.server.socket_addr()).await?;
        Ok(())
    }
}
