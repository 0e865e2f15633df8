//! Output artifacts for the graph viewer: `nodes.json` and `edges.json`.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::graph::{AggregatedEdge, OutletNode};
use crate::TARGET_OUTPUT;

pub const NODES_FILE: &str = "nodes.json";
pub const EDGES_FILE: &str = "edges.json";

#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
}

fn to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value).map_err(|err| PipelineError::Write {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> PipelineError + '_ {
    move |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Removes a staged or rolled-back file; a file that is already gone is fine.
fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!(
                target: TARGET_OUTPUT,
                "Failed to remove {}: {}",
                path.display(),
                err
            );
        }
    }
}

/// Puts the previous `nodes.json` back, or removes the new one when there was
/// none before this run.
fn restore_nodes(nodes_path: &Path, backup: Option<&Path>) {
    match backup {
        Some(backup) => {
            if let Err(err) = fs::rename(backup, nodes_path) {
                warn!(
                    target: TARGET_OUTPUT,
                    "Failed to restore {} from {}: {}",
                    nodes_path.display(),
                    backup.display(),
                    err
                );
            }
        }
        None => discard(nodes_path),
    }
}

/// Writes both artifacts into `output_dir`, creating it when missing.
///
/// Each file is staged next to its destination and only renamed into place
/// once both staged files are on disk. An existing `nodes.json` is set aside
/// until `edges.json` is in place too, and put back if that last rename
/// fails, so a failed run never leaves a new `nodes.json` next to a stale
/// `edges.json`.
pub fn write_artifacts(
    output_dir: &Path,
    nodes: &[OutletNode],
    edges: &[AggregatedEdge],
) -> Result<WrittenArtifacts, PipelineError> {
    fs::create_dir_all(output_dir).map_err(write_error(output_dir))?;

    let nodes_path = output_dir.join(NODES_FILE);
    let edges_path = output_dir.join(EDGES_FILE);
    let nodes_tmp = output_dir.join(format!(".{}.tmp", NODES_FILE));
    let edges_tmp = output_dir.join(format!(".{}.tmp", EDGES_FILE));
    let nodes_backup = output_dir.join(format!(".{}.bak", NODES_FILE));

    let nodes_json = to_json(nodes, &nodes_path)?;
    let edges_json = to_json(edges, &edges_path)?;

    let staged = fs::write(&nodes_tmp, nodes_json)
        .map_err(write_error(&nodes_tmp))
        .and_then(|_| fs::write(&edges_tmp, edges_json).map_err(write_error(&edges_tmp)));
    if let Err(err) = staged {
        discard(&nodes_tmp);
        discard(&edges_tmp);
        return Err(err);
    }

    let backup = if nodes_path.exists() {
        if let Err(err) = fs::rename(&nodes_path, &nodes_backup) {
            discard(&nodes_tmp);
            discard(&edges_tmp);
            return Err(write_error(&nodes_path)(err));
        }
        Some(nodes_backup.as_path())
    } else {
        None
    };

    if let Err(err) = fs::rename(&nodes_tmp, &nodes_path) {
        if let Some(backup) = backup {
            restore_nodes(&nodes_path, Some(backup));
        }
        discard(&nodes_tmp);
        discard(&edges_tmp);
        return Err(write_error(&nodes_path)(err));
    }

    if let Err(err) = fs::rename(&edges_tmp, &edges_path) {
        restore_nodes(&nodes_path, backup);
        discard(&edges_tmp);
        return Err(write_error(&edges_path)(err));
    }

    if let Some(backup) = backup {
        discard(backup);
    }

    info!(
        target: TARGET_OUTPUT,
        "Wrote {} nodes to {} and {} edges to {}",
        nodes.len(),
        nodes_path.display(),
        edges.len(),
        edges_path.display()
    );

    Ok(WrittenArtifacts {
        nodes_path,
        edges_path,
    })
}
