//! Request routing dispatch module
//!
//! Entry point for dev server request processing: the plugin gets the first
//! look at every request, anything it passes on gets the host's 404.

use crate::http;
use crate::logger;
use crate::plugin::{DevRequest, Handled, Plugin};
use crate::server::DevState;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::rc::Rc;

/// Main entry point for HTTP request handling
pub async fn handle_request<P: Plugin, B>(
    req: Request<B>,
    state: Rc<DevState<P>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();

    let dev_req = DevRequest::new(method, path);
    let response = match state.plugin.handle_request(&dev_req).await {
        Handled::Respond(resp) => resp,
        Handled::Next => http::build_404_response(),
    };

    if state.access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_request(method, path, response.status().as_u16(), body_bytes);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{LlmsOptions, LlmsRouting};
    use std::time::Duration;

    fn state_for(root: &std::path::Path) -> Rc<DevState<LlmsRouting>> {
        Rc::new(DevState {
            plugin: LlmsRouting::new(LlmsOptions {
                llms_dir: root.to_path_buf(),
            }),
            access_log: true,
            read_timeout: Duration::from_secs(5),
        })
    }

    fn get(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_plugin_answers_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("llms.txt"), "# Index").unwrap();

        let resp = handle_request(get("/llms.txt"), state_for(dir.path()))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/markdown");
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();

        let resp = handle_request(get("/a.md?raw=1"), state_for(dir.path()))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_pass_through_falls_back_to_404() {
        let dir = tempfile::tempdir().unwrap();

        for uri in ["/llms.txt", "/missing.md", "/style.css"] {
            let resp = handle_request(get(uri), state_for(dir.path())).await.unwrap();
            assert_eq!(resp.status(), 404, "{uri}");
        }
    }
}
