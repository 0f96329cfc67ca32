//! CLI argument parsing into a validated, immutable `RenderConfig`.
//!
//! Matches the original renderer's 7-positional-argument surface
//! (`<output_path> <x_res> <y_res> <scene_id> <effort> <fast_diffuse>
//! <threads>`), including its zero-argument defaults and thread-count
//! resolution rule.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::RenderError;

pub const USAGE: &str =
    "usage: mc-tracer <output_path> <x_res> <y_res> <scene_id> <effort> <fast_diffuse> <threads>";

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub output_path: PathBuf,
    pub x_res: u32,
    pub y_res: u32,
    pub scene_id: u32,
    pub effort: u32,
    pub fast_diffuse: bool,
    pub threads: usize,
    pub mesh_path: PathBuf,
    pub base_seed: u64,
}

impl RenderConfig {
    /// Parses `args` (excluding argv[0]). Zero arguments selects the
    /// documented defaults; any other count but 7 is a usage error.
    pub fn from_args(args: &[String]) -> Result<Self, RenderError> {
        let cores = available_cores();

        if args.is_empty() {
            return Ok(Self {
                output_path: PathBuf::from("default.png"),
                x_res: 300,
                y_res: 300,
                scene_id: 1,
                effort: 100,
                fast_diffuse: false,
                threads: cores,
                mesh_path: default_mesh_path(),
                base_seed: 0,
            });
        }

        if args.len() != 7 {
            return Err(RenderError::BadArgCount);
        }

        let parse_u32 = |s: &str| s.parse::<u32>().map_err(|_| RenderError::BadArgValue(s.to_string()));
        let parse_i64 = |s: &str| s.parse::<i64>().map_err(|_| RenderError::BadArgValue(s.to_string()));

        let output_path = PathBuf::from(&args[0]);
        let x_res = parse_u32(&args[1])?;
        let y_res = parse_u32(&args[2])?;
        let scene_id = parse_u32(&args[3])?;
        let effort = parse_u32(&args[4])?;
        let fast_diffuse = parse_u32(&args[5])? == 1;
        let requested_threads = parse_i64(&args[6])?;

        let threads = resolve_thread_count(requested_threads, cores);

        Ok(Self {
            output_path,
            x_res,
            y_res,
            scene_id,
            effort,
            fast_diffuse,
            threads,
            mesh_path: default_mesh_path(),
            base_seed: 0,
        })
    }
}

fn default_mesh_path() -> PathBuf {
    PathBuf::from("meshes/mesh.obj")
}

fn available_cores() -> usize {
    std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

/// `0` resolves to 1 thread; negative values subtract from the detected
/// core count; the result is clamped to `[1, cores]`.
fn resolve_thread_count(requested: i64, cores: usize) -> usize {
    let resolved = if requested < 0 {
        cores as i64 + requested
    } else {
        requested
    };
    resolved.clamp(1, cores as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_args_uses_documented_defaults() {
        let cfg = RenderConfig::from_args(&[]).unwrap();
        assert_eq!(cfg.x_res, 300);
        assert_eq!(cfg.y_res, 300);
        assert_eq!(cfg.scene_id, 1);
        assert_eq!(cfg.effort, 100);
        assert!(!cfg.fast_diffuse);
    }

    #[test]
    fn wrong_arg_count_is_bad_arg_count() {
        let args = vec!["one".to_string(), "two".to_string()];
        assert!(matches!(RenderConfig::from_args(&args), Err(RenderError::BadArgCount)));
    }

    #[test]
    fn zero_threads_resolves_to_one() {
        assert_eq!(resolve_thread_count(0, 8), 1);
    }

    #[test]
    fn negative_threads_subtracts_from_cores() {
        assert_eq!(resolve_thread_count(-2, 8), 6);
    }

    #[test]
    fn thread_count_clamps_to_core_count() {
        assert_eq!(resolve_thread_count(1000, 8), 8);
        assert_eq!(resolve_thread_count(-1000, 8), 1);
    }

    #[test]
    fn full_args_parse_correctly() {
        let args = vec![
            "out.png".to_string(),
            "64".to_string(),
            "48".to_string(),
            "2".to_string(),
            "10".to_string(),
            "1".to_string(),
            "4".to_string(),
        ];
        let cfg = RenderConfig::from_args(&args).unwrap();
        assert_eq!(cfg.x_res, 64);
        assert_eq!(cfg.y_res, 48);
        assert_eq!(cfg.scene_id, 2);
        assert_eq!(cfg.effort, 10);
        assert!(cfg.fast_diffuse);
    }
}
