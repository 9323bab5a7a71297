//! Development automation for build-overrides
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the library and the CLI
//! - test: Run unit and/or integration tests
//! - fmt: Format code
//! - clippy: Lint with warnings denied
//! - ci: Run fmt check, clippy and the full test suite

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development automation for build-overrides")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only the integration tests under tests/
        #[arg(long, conflicts_with = "unit")]
        integration: bool,

        /// Run only the unit tests inside the library
        #[arg(long)]
        unit: bool,
    },
    /// Format code
    Fmt {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
    /// Run CI checks (format, clippy, test)
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { integration, unit } => test(&sh, integration, unit),
        Commands::Fmt { check } => fmt(&sh, check),
        Commands::Clippy => clippy(&sh),
        Commands::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let profile = if release { &["--release"][..] } else { &[] };
    cmd!(sh, "cargo build -p build-overrides {profile...}")
        .run()
        .context("cargo build failed")?;
    println!("✅ Build completed");
    Ok(())
}

fn test(sh: &Shell, integration: bool, unit: bool) -> Result<()> {
    if integration {
        cmd!(sh, "cargo test -p build-overrides --test '*'").run()?;
    } else if unit {
        cmd!(sh, "cargo test -p build-overrides --lib --bins").run()?;
    } else {
        cmd!(sh, "cargo test --workspace").run()?;
    }
    println!("✅ All tests passed");
    Ok(())
}

fn fmt(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("code is not formatted, run `cargo xtask fmt`")?;
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    fmt(sh, true)?;
    clippy(sh)?;
    test(sh, false, false)?;
    println!("✅ All CI checks passed!");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}
