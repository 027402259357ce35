use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::render::RenderedConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "NordVPN-WireGuard";

/// Write each config to `<dir>/<name>.conf`, creating `dir` if needed.
///
/// Files are written one after another; a failure leaves the earlier ones in
/// place. Two configs with the same name overwrite each other (last wins).
pub fn write_configs(dir: &Path, configs: &[RenderedConfig<'_>]) -> Result<Vec<PathBuf>, OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(configs.len());
    let mut writers = HashMap::new();

    for cfg in configs {
        let path = dir.join(cfg.file_name());
        if let Some(previous) = record_writer(&mut writers, &path, &cfg.server.hostname) {
            tracing::warn!(
                path = %path.display(),
                hostname = %cfg.server.hostname,
                previous = %previous,
                "config name collides with an earlier server, overwriting"
            );
        }

        std::fs::write(&path, &cfg.text).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote config");

        if !written.contains(&path) {
            written.push(path);
        }
    }

    Ok(written)
}

/// Remember `hostname` as the writer of `path`. Returns the earlier writer if
/// it was a different server; selecting one server twice is not a collision.
fn record_writer<'a>(
    writers: &mut HashMap<PathBuf, &'a str>,
    path: &Path,
    hostname: &'a str,
) -> Option<&'a str> {
    match writers.insert(path.to_path_buf(), hostname) {
        Some(previous) if previous != hostname => Some(previous),
        _ => None,
    }
}
