//! Errors surfaced at the configuration/IO boundary.
//!
//! Contract violations inside the integrator (a hit with no material, a
//! shadow ray that doesn't reach its target) are not modeled here: they
//! are programmer errors, not recoverable conditions, and the hot
//! recursive path has no `Result` to propagate through (see `integrator`).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("usage: <output_path> <x_res> <y_res> <scene_id> <effort> <fast_diffuse> <threads>")]
    BadArgCount,

    #[error("invalid numeric argument: {0}")]
    BadArgValue(String),

    #[error("failed to open mesh file {path}: {source}")]
    MeshOpenFailed { path: PathBuf, source: std::io::Error },

    #[error("malformed mesh data: {0}")]
    MeshParseFailed(String),

    #[error("failed to save image")]
    ImageSaveFailed,
}
