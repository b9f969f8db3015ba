//! Resolve the instance config from a YAML file and/or inline JSON content.
//!
//! The file is applied first, then the inline content, so content values
//! override file values field by field. At least one source must be present:
//! an existing file or non-empty content.

mod decode;
mod merge;


use crate::{ConfigError, ConfigSource, InstanceConfig};
use log::{debug, error, info};
use std::fs;
use std::path::Path;

/// Facts about the sources gathered for a single resolution call.
#[derive(Debug, Clone, Copy)]
struct SourceState<'a> {
    path: &'a str,
    content: &'a str,
    file_exists: bool,
}

impl<'a> SourceState<'a> {
    fn inspect(source: &'a ConfigSource) -> Self {
        Self {
            path: &source.path,
            content: &source.content,
            file_exists: file_exists(&source.path),
        }
    }
}

impl ConfigSource {
    /// Resolve into a fresh, default-initialized record.
    pub fn resolve(&self) -> Result<InstanceConfig, ConfigError> {
        let mut config = InstanceConfig::default();
        self.resolve_into(&mut config)?;
        Ok(config)
    }

    /// Resolve into a caller-owned record.
    ///
    /// Every failure is logged before it is returned. On failure the record
    /// keeps whatever the steps before the failing one applied.
    pub fn resolve_into(&self, config: &mut InstanceConfig) -> Result<(), ConfigError> {
        if self.help {
            eprintln!("{}", Self::usage());
        }
        apply_sources(SourceState::inspect(self), config)
            .inspect_err(|err| error!("instance config resolution failed: {err}"))
    }
}

fn apply_sources(state: SourceState<'_>, config: &mut InstanceConfig) -> Result<(), ConfigError> {
    debug!(
        "resolving instance config (path={}, file_exists={}, content_len={})",
        state.path,
        state.file_exists,
        state.content.len()
    );

    if state.content.is_empty() && (state.path.is_empty() || !state.file_exists) {
        return Err(ConfigError::MissingSource);
    }

    if state.file_exists {
        let path = Path::new(state.path);
        info!("loading instance config file: {}", path.display());
        let contents = fs::read(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        decode::decode_file(&contents)
            .and_then(|layer| merge::overlay_record(config, layer))
            .map_err(|source| ConfigError::FileDecode {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("applied instance config file (bytes={})", contents.len());
    }

    if !state.content.is_empty() {
        info!(
            "applying inline instance config content (len={})",
            state.content.len()
        );
        decode::decode_content(state.content)
            .and_then(|layer| merge::overlay_record(config, layer))
            .map_err(ConfigError::ContentDecode)?;
    }

    Ok(())
}

/// Whether `path` names something `stat` succeeds on. Empty paths never do.
fn file_exists(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    fs::metadata(path).is_ok()
}
