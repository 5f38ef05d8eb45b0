//! Plugin contract between the hosts and the llms routing plugin
//!
//! A host owns the lifecycle (dev server or build) and calls into a plugin
//! through three optional hooks. Every hook has a no-op default, so a plugin
//! only implements the ones it cares about.

pub mod llms;

pub use llms::{LlmsOptions, LlmsRouting, MANIFEST_FILE, MANIFEST_ROUTE};

use crate::bundle::AssetSink;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

/// The parts of an incoming dev server request a plugin may inspect
#[derive(Debug, Clone, Copy)]
pub struct DevRequest<'a> {
    pub method: &'a Method,
    /// URI path, without query string
    pub path: &'a str,
}

impl<'a> DevRequest<'a> {
    pub const fn new(method: &'a Method, path: &'a str) -> Self {
        Self { method, path }
    }

    pub fn is_head(&self) -> bool {
        *self.method == Method::HEAD
    }
}

/// Outcome of the `handle_request` hook
#[derive(Debug)]
pub enum Handled {
    /// The plugin answered; the chain stops here
    Respond(Response<Full<Bytes>>),
    /// Pass the request on to the next handler
    Next,
}

/// Lifecycle hooks a host invokes on its plugin
#[allow(async_fn_in_trait)]
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// Called once when the dev server starts listening
    fn configure_server(&self) {}

    /// Called for every dev server request, before the host's own handler
    async fn handle_request(&self, _req: &DevRequest<'_>) -> Handled {
        Handled::Next
    }

    /// Called once after a production build has written its output
    fn write_bundle<S: AssetSink>(&self, _bundle: &mut S) {}
}
