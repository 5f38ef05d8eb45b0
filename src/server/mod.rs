// Dev server module
// Hosts a plugin behind a hyper HTTP/1.1 server

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

use std::rc::Rc;
use std::time::Duration;

use crate::config::Config;
use crate::logger;
use crate::plugin::Plugin;

/// State shared by every connection of one dev server
pub struct DevState<P> {
    pub plugin: P,
    pub access_log: bool,
    pub read_timeout: Duration,
}

impl<P> DevState<P> {
    pub fn new(plugin: P, config: &Config) -> Self {
        Self {
            plugin,
            access_log: config.logging.access_log,
            read_timeout: Duration::from_secs(config.server.read_timeout),
        }
    }
}

/// Run the dev server until Ctrl+C
///
/// Binds the configured address, runs the plugin's `configure_server` hook
/// once, then serves requests. Must run inside a `tokio::task::LocalSet`.
pub async fn serve<P: Plugin + 'static>(
    config: &Config,
    plugin: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, config);
    logger::log_info(&format!("Plugin: {}", plugin.name()));
    plugin.configure_server();

    let state = Rc::new(DevState::new(plugin, config));
    start_server_loop(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}
