//! Build output module
//!
//! An [`AssetSink`] is what the build host hands to a plugin's
//! `write_bundle` hook: the plugin registers named assets, the sink decides
//! where they end up.

use crate::error::LlmsError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Receiver of emitted build assets
pub trait AssetSink {
    /// Register `source` as an output asset at the relative path `file_name`
    fn emit_file(&mut self, file_name: &str, source: Vec<u8>) -> Result<(), LlmsError>;
}

/// Reject asset names that are empty or would land outside the output root
pub fn validate_asset_name(file_name: &str) -> Result<(), LlmsError> {
    let path = Path::new(file_name);
    let only_normal = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if file_name.is_empty() || !only_normal {
        return Err(LlmsError::InvalidAssetPath(file_name.to_string()));
    }
    Ok(())
}

/// Writes assets beneath an output directory on disk
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    written: Vec<String>,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Asset names written so far, in emission order
    pub fn written(&self) -> &[String] {
        &self.written
    }
}

impl AssetSink for OutputDir {
    fn emit_file(&mut self, file_name: &str, source: Vec<u8>) -> Result<(), LlmsError> {
        validate_asset_name(file_name)?;
        let target = self.root.join(file_name);
        let write_err = |source| LlmsError::WriteAsset {
            file_name: file_name.to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&target, source).map_err(write_err)?;
        self.written.push(file_name.to_string());
        Ok(())
    }
}

/// Collects assets in memory, keyed by asset name
#[derive(Debug, Default)]
pub struct MemoryBundle {
    assets: BTreeMap<String, Vec<u8>>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.assets.get(file_name).map(Vec::as_slice)
    }

    pub fn names(&self) -> Vec<&str> {
        self.assets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSink for MemoryBundle {
    fn emit_file(&mut self, file_name: &str, source: Vec<u8>) -> Result<(), LlmsError> {
        validate_asset_name(file_name)?;
        self.assets.insert(file_name.to_string(), source);
        Ok(())
    }
}
