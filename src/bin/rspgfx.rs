// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, ValueEnum};
use log::{error, info};
use rspgfx::core::config::{Config, Frontend};
use rspgfx::core::error::{EmulatorError, Result};
use rspgfx::core::system::{FrameStats, System};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Render one N64 frame from a raw RDRAM image
#[derive(Parser)]
#[command(name = "rspgfx")]
#[command(about = "N64 display-list renderer", long_about = None)]
struct Args {
    /// Raw big-endian RDRAM image, loaded at physical address 0
    ram_image: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Front-end that consumes the data at the start address
    #[arg(short = 'f', long, value_enum)]
    frontend: Option<FrontendArg>,

    /// Address of the display list or stream (decimal or 0x-prefixed hex)
    #[arg(short = 's', long, value_parser = parse_u32)]
    start: Option<u32>,

    /// Instruction budget (bytecode) or word budget (rspdl)
    #[arg(short = 'n', long)]
    budget: Option<usize>,

    /// Write the RGBA8888 scanout to this file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print a JSON frame report instead of the bare CRC
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrontendArg {
    Bytecode,
    Rspdl,
}

impl From<FrontendArg> for Frontend {
    fn from(arg: FrontendArg) -> Self {
        match arg {
            FrontendArg::Bytecode => Frontend::Bytecode,
            FrontendArg::Rspdl => Frontend::Rspdl,
        }
    }
}

/// Frame report printed with `--json`
#[derive(Serialize)]
struct Report {
    frontend: Frontend,
    width: u32,
    height: u32,
    #[serde(flatten)]
    stats: FrameStats,
    crc32: String,
}

fn parse_u32(text: &str) -> std::result::Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", text, e))
}

fn main() -> Result<()> {
    // .env may set RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("rspgfx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(frontend) = args.frontend {
        config.pipeline.frontend = frontend.into();
    }
    if let Some(start) = args.start {
        config.pipeline.start = start;
    }
    if let Some(budget) = args.budget {
        config.pipeline.budget = budget;
    }

    let mut system = System::from_config(&config);
    info!("Loading RDRAM image from: {}", args.ram_image.display());
    if let Err(e) = system.load_image(&args.ram_image) {
        error!("Failed to load RDRAM image: {}", e);
        return Err(e);
    }

    let stats = system.run_frame(&config)?;
    let crc = system.frame_crc32();
    info!(
        "Frame done: {} UC commands, {} stream words, CRC32 {:08x}",
        stats.commands, stats.words, crc
    );

    if let Some(path) = &args.dump {
        fs::write(path, system.scanout())?;
        info!("Scanout written to {}", path.display());
    }

    if args.json {
        let report = Report {
            frontend: config.pipeline.frontend,
            width: config.framebuffer.width,
            height: config.framebuffer.height,
            stats,
            crc32: format!("{:08x}", crc),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| EmulatorError::Parse(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("{:08x}", crc);
    }

    Ok(())
}
