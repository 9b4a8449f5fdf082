//! Batch blanket generation.
//!
//! Usage:
//! ```text
//! blanket_gen <torus-dir> [output-dir]
//! ```
//!
//! `<torus-dir>` must hold the boundary, normal and toroidal
//! coordinate files; meshes land in `[output-dir]`, defaulting to
//! `<torus-dir>/Mesh`.

use std::path::PathBuf;
use std::process::ExitCode;

use poloidal::pipeline::{run, BlanketConfig};

fn main() -> ExitCode {
    // Default: INFO for poloidal, WARN for everything else.
    // Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("poloidal=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args_os().skip(1);
    let Some(torus_dir) = args.next().map(PathBuf::from) else {
        eprintln!("usage: blanket_gen <torus-dir> [output-dir]");
        return ExitCode::from(2);
    };

    let mut config = BlanketConfig::from_torus_dir(&torus_dir);
    if let Some(output_dir) = args.next() {
        config.output_dir = PathBuf::from(output_dir);
    }

    match run(&config) {
        Ok(assembly) => {
            tracing::info!(
                segments = assembly.segments.len(),
                output_dir = %config.output_dir.display(),
                "blanket generation finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("blanket_gen: {err}");
            ExitCode::FAILURE
        }
    }
}
