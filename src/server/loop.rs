// Server loop module
// Accepts dev server connections until the shutdown future resolves

use std::future::Future;
use std::rc::Rc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::DevState;
use crate::logger;
use crate::plugin::Plugin;

/// Accept connections on `listener` until `shutdown` completes
///
/// Must run inside a `tokio::task::LocalSet`. Connections still in flight
/// when shutdown fires finish on their own tasks.
pub async fn start_server_loop<P, F>(
    listener: TcpListener,
    state: Rc<DevState<P>>,
    shutdown: F,
) -> std::io::Result<()>
where
    P: Plugin + 'static,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Rc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_info("Shutting down dev server");
                return Ok(());
            }
        }
    }
}
