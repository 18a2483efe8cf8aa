//! Workspace tasks: `cargo xtask <command>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use depthscroll::Options;

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(about = "Build tasks for depthscroll")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the wasm module and its JS bindings.
    Web {
        /// Build without optimizations.
        #[arg(long)]
        dev: bool,
        /// Directory receiving the `.wasm` and JS glue.
        #[arg(long, default_value = "pkg")]
        out_dir: PathBuf,
    },
    /// Write the JSON Schema of the options document.
    Schema {
        #[arg(long, default_value = "options.schema.json")]
        out: PathBuf,
    },
    /// Write the default options as TOML.
    Defaults {
        #[arg(long, default_value = "depthscroll.toml")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Web { dev, out_dir } => web(dev, &out_dir),
        Task::Schema { out } => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())?;
            std::fs::write(&out, schema)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
            Ok(())
        }
        Task::Defaults { out } => {
            Options::default()
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
            Ok(())
        }
    }
}

fn web(dev: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root();
    let profile = if dev { "debug" } else { "release" };

    let mut build = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".into()));
    let _ = build
        .current_dir(&root)
        .args(["rustc", "--lib", "--crate-type=cdylib", "--target", WASM_TARGET])
        .args(["--no-default-features", "--features", "web"]);
    if !dev {
        let _ = build.arg("--release");
    }
    run(&mut build)?;

    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("depthscroll.wasm");
    let mut bindgen = Command::new("wasm-bindgen");
    let _ = bindgen
        .current_dir(&root)
        .arg(&wasm)
        .args(["--target", "web", "--out-dir"])
        .arg(out_dir);
    run(&mut bindgen).context("is wasm-bindgen-cli installed?")?;

    println!("wrote {}", root.join(out_dir).display());
    Ok(())
}

fn run(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("spawning {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
