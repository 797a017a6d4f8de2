use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "rspgfx workspace tasks")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Format check, clippy and the full test suite
    Ci,
    /// Run library tests, optionally for selected pipeline stages
    Test(Stages),
    /// Render one frame from an RDRAM image through the rspgfx binary
    Frame {
        /// Raw RDRAM image
        image: String,
        /// Frame configuration (TOML)
        #[arg(short, long)]
        config: Option<String>,
        /// Print the JSON frame report
        #[arg(long)]
        json: bool,
        #[arg(long)]
        release: bool,
    },
}

/// Stage filters; none selected runs everything
#[derive(Args)]
struct Stages {
    /// Display-list translators
    #[arg(long)]
    translate: bool,
    /// Microcode encoder
    #[arg(long)]
    ucode: bool,
    /// RSPDL interpreter and rasterizer
    #[arg(long)]
    interp: bool,
    /// RDRAM
    #[arg(long)]
    memory: bool,
    /// Frame driver
    #[arg(long)]
    system: bool,
}

impl Stages {
    fn filters(&self) -> Vec<&'static str> {
        [
            (self.translate, "core::gfx::translate"),
            (self.ucode, "core::gfx::ucode"),
            (self.interp, "core::gfx::interp"),
            (self.memory, "core::memory"),
            (self.system, "core::system"),
        ]
        .into_iter()
        .filter_map(|(on, path)| on.then_some(path))
        .collect()
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Ci => ci(),
        Task::Test(stages) => test(&stages),
        Task::Frame {
            image,
            config,
            json,
            release,
        } => frame(&image, config.as_deref(), json, release),
    }
}

fn ci() -> Result<()> {
    let start = Instant::now();
    step("fmt", cargo(&["fmt", "--all", "--", "--check"]))?;
    step(
        "clippy",
        cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]),
    )?;
    step("test", cargo(&["test", "--workspace"]))?;
    println!(
        "{} in {:.1}s",
        "ci ok".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn test(stages: &Stages) -> Result<()> {
    let filters = stages.filters();
    if filters.is_empty() {
        return step("test", cargo(&["test"]));
    }
    // Stages run one after another so a failure names its stage
    for filter in filters {
        step(filter, cargo(&["test", "--lib", filter]))?;
    }
    Ok(())
}

fn frame(image: &str, config: Option<&str>, json: bool, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "--quiet", "--bin", "rspgfx"]);
    if release {
        cmd.arg("--release");
    }
    cmd.args(["--", image]);
    if let Some(config) = config {
        cmd.args(["--config", config]);
    }
    if json {
        cmd.arg("--json");
    }
    step(&format!("frame {}", image), cmd)
}

fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

fn step(name: &str, mut cmd: Command) -> Result<()> {
    println!("{} {}", "==>".blue().bold(), name.bold());
    let status = cmd.status()?;
    if !status.success() {
        println!("{} {}", "failed:".red().bold(), name);
        bail!("{} exited with {}", name, status);
    }
    Ok(())
}
