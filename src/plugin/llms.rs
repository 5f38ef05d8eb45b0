//! llms.txt routing plugin
//!
//! Serves `llms.txt` and every `*.md` file of the llms directory from the dev
//! server, and copies the same files into the build output.

use super::{DevRequest, Handled, Plugin};
use crate::bundle::AssetSink;
use crate::config::{LlmsConfig, DEFAULT_LLMS_DIR};
use crate::discovery::{self, MARKDOWN_EXTENSION};
use crate::error::LlmsError;
use crate::http;
use crate::logger;
use std::path::{Component, Path, PathBuf};

/// File name of the manifest inside the llms directory and the build output
pub const MANIFEST_FILE: &str = "llms.txt";

/// Dev server route of the manifest
pub const MANIFEST_ROUTE: &str = "/llms.txt";

/// Plugin options
#[derive(Debug, Clone)]
pub struct LlmsOptions {
    /// Directory holding `llms.txt` and markdown files, relative to the working directory
    pub llms_dir: PathBuf,
}

impl Default for LlmsOptions {
    fn default() -> Self {
        Self {
            llms_dir: PathBuf::from(DEFAULT_LLMS_DIR),
        }
    }
}

impl From<&LlmsConfig> for LlmsOptions {
    fn from(config: &LlmsConfig) -> Self {
        Self {
            llms_dir: PathBuf::from(&config.dir),
        }
    }
}

/// Serves and emits an llms.txt documentation tree
#[derive(Debug, Clone, Default)]
pub struct LlmsRouting {
    options: LlmsOptions,
}

impl LlmsRouting {
    pub const fn new(options: LlmsOptions) -> Self {
        Self { options }
    }

    /// Absolute llms directory, resolved against the current working directory
    pub fn root(&self) -> Result<PathBuf, LlmsError> {
        let cwd = std::env::current_dir().map_err(LlmsError::WorkingDir)?;
        Ok(cwd.join(&self.options.llms_dir))
    }

    /// Routes of every markdown file currently under the llms directory
    pub fn markdown_routes(&self) -> Result<Vec<String>, LlmsError> {
        Ok(discovery::markdown_routes(&self.root()?))
    }

    pub async fn read_manifest(&self) -> Result<Vec<u8>, LlmsError> {
        read_file(&self.root()?.join(MANIFEST_FILE)).await
    }

    /// Read the markdown file a request path points at
    ///
    /// The path loses its leading `/` and is joined onto the llms directory.
    /// Paths that would leave the directory are refused.
    pub async fn read_markdown(&self, request_path: &str) -> Result<Vec<u8>, LlmsError> {
        let relative = request_path.strip_prefix('/').unwrap_or(request_path);
        let stays_inside = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || !stays_inside {
            return Err(LlmsError::OutsideRoot(request_path.to_string()));
        }

        read_file(&self.root()?.join(relative)).await
    }

    /// Register the manifest and every markdown file with `sink`
    ///
    /// The manifest goes first; if it cannot be read nothing is emitted.
    /// Returns the emitted markdown routes.
    pub fn emit_assets<S: AssetSink>(&self, sink: &mut S) -> Result<Vec<String>, LlmsError> {
        let root = self.root()?;
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = std::fs::read(&manifest_path).map_err(|source| LlmsError::ReadFile {
            path: manifest_path,
            source,
        })?;
        sink.emit_file(MANIFEST_FILE, manifest)?;

        let mut routes = Vec::new();
        for file in discovery::find_markdown_files(&root) {
            let route = match discovery::route_for(&root, &file) {
                Ok(route) => route,
                Err(e) => {
                    logger::log_warning(&format!("[llms] Not copied: {e}"));
                    continue;
                }
            };
            let content = std::fs::read(&file).map_err(|source| LlmsError::ReadFile {
                path: file.clone(),
                source,
            })?;
            sink.emit_file(route.trim_start_matches('/'), content)?;
            routes.push(route);
        }

        Ok(routes)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LlmsError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| LlmsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

fn with_manifest(routes: Vec<String>) -> Vec<String> {
    std::iter::once(MANIFEST_ROUTE.to_string())
        .chain(routes)
        .collect()
}

impl Plugin for LlmsRouting {
    fn name(&self) -> &'static str {
        "llms-routing"
    }

    fn configure_server(&self) {
        // Listed once; files added later are still served, just not listed
        match self.markdown_routes() {
            Ok(routes) => {
                logger::log_routes("[llms] Available markdown routes:", &with_manifest(routes));
            }
            Err(e) => logger::log_error(&format!("[llms] Cannot list routes: {e}")),
        }
    }

    async fn handle_request(&self, req: &DevRequest<'_>) -> Handled {
        let content = if req.path == MANIFEST_ROUTE {
            self.read_manifest().await
        } else if req.path.ends_with(MARKDOWN_EXTENSION) {
            self.read_markdown(req.path).await
        } else {
            return Handled::Next;
        };

        match content {
            Ok(bytes) => Handled::Respond(http::build_markdown_response(bytes, req.is_head())),
            Err(LlmsError::OutsideRoot(path)) => {
                logger::log_warning(&format!("[llms] Refusing path outside llms directory: {path}"));
                Handled::Next
            }
            Err(_) => Handled::Next,
        }
    }

    fn write_bundle<S: AssetSink>(&self, bundle: &mut S) {
        match self.emit_assets(bundle) {
            Ok(routes) => {
                logger::log_routes("[llms] Build complete. Copied files:", &with_manifest(routes));
            }
            Err(e) => logger::log_error(&format!("[llms] Error during build: {e}")),
        }
    }
}
