// Connection handling module
// Serves a single TCP connection on the current LocalSet

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::rc::Rc;

use super::DevState;
use crate::handler;
use crate::logger;
use crate::plugin::Plugin;

/// Handle a single connection in a spawned local task.
///
/// Wraps the stream in `TokioIo`, serves HTTP/1.1 with keep-alive, and drops
/// the connection once `read_timeout` elapses.
///
/// Must be called from inside a `tokio::task::LocalSet`.
pub fn handle_connection<P: Plugin + 'static>(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Rc<DevState<P>>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let timeout_duration = state.read_timeout;

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Rc::clone(&state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
