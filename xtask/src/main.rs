use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemars::schema::RootSchema;
use schemars::schema_for;

use a11ylens_types::{CardsViewModel, ConfigFile, ScanResults, UnifiedScanResult};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repo automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the "CI local" suite: fmt, clippy, test, schema drift.
    Ci,

    /// Generate JSON Schemas for the config and output artifacts into `schemas/`.
    Schema {
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,

        /// Fail instead of writing when the files on disk are out of date.
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::Schema { out_dir, check } => {
            if check {
                check_schemas(&out_dir)
            } else {
                write_schemas(&out_dir)
            }
        }
    }
}

fn ci() -> Result<()> {
    run("cargo", &["fmt", "--check"])?;
    run(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run("cargo", &["test", "--workspace"])?;
    let schemas = Path::new("schemas");
    if schemas.exists() {
        check_schemas(schemas)?;
    }
    Ok(())
}

/// Every emitted schema, keyed by file name.
fn schemas() -> Vec<(&'static str, RootSchema)> {
    vec![
        ("a11ylens.config.schema.json", schema_for!(ConfigFile)),
        ("a11ylens.scan-results.schema.json", schema_for!(ScanResults)),
        ("a11ylens.unified.v1.schema.json", schema_for!(UnifiedScanResult)),
        ("a11ylens.cards.schema.json", schema_for!(CardsViewModel)),
    ]
}

fn write_schemas(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("create schema output dir")?;

    for (name, schema) in schemas() {
        let path = out_dir.join(name);
        write_pretty_json(&path, &schema)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn check_schemas(out_dir: &Path) -> Result<()> {
    let mut stale = Vec::new();

    for (name, schema) in schemas() {
        let path = out_dir.join(name);
        let expected = render_pretty_json(&schema)?;
        match std::fs::read(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", path.display())),
            Err(_) => stale.push(format!("{} (missing)", path.display())),
        }
    }

    if !stale.is_empty() {
        bail!(
            "schemas need regenerating with `cargo xtask schema`:\n  {}",
            stale.join("\n  ")
        );
    }
    Ok(())
}

fn render_pretty_json(value: &impl serde::Serialize) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).context("serialize json")
}

fn write_pretty_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    let bytes = render_pretty_json(value)?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn run(bin: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(bin)
        .args(args)
        .status()
        .with_context(|| format!("run {bin} {args:?}"))?;
    if !status.success() {
        bail!("command failed: {bin} {args:?}");
    }
    Ok(())
}
