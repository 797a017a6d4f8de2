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

//! Frame configuration
//!
//! Loaded from a TOML file; every field has a default so a partial file (or
//! none at all) is valid.
//!
//! ```toml
//! [framebuffer]
//! origin = 0x100000
//! width = 320
//! height = 240
//! stride = 320
//!
//! [pipeline]
//! frontend = "bytecode"
//! start = 0x200000
//! budget = 4096
//! slot_addr = 0x300000
//! slot_words = 16384
//! ```

use super::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which front-end consumes the display list at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    /// Raw 8-byte display-list instructions
    #[default]
    Bytecode,
    /// An RSPDL stream already in RDRAM
    Rspdl,
}

/// Framebuffer placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramebufferConfig {
    /// Base address in RDRAM
    pub origin: u32,
    pub width: u32,
    pub height: u32,
    /// Row stride in pixels
    pub stride: u32,
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            origin: 0x0010_0000,
            width: 320,
            height: 240,
            stride: 320,
        }
    }
}

/// Display-list and stream placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub frontend: Frontend,
    /// Address of the display list (or stream, for `rspdl`)
    pub start: u32,
    /// Instruction budget for bytecode, word budget for RSPDL
    pub budget: usize,
    /// Where the translated stream is written
    pub slot_addr: u32,
    /// Size of the stream slot in words
    pub slot_words: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frontend: Frontend::Bytecode,
            start: 0x0020_0000,
            budget: 4096,
            slot_addr: 0x0030_0000,
            slot_words: 0x4000,
        }
    }
}

/// Full frame configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub framebuffer: FramebufferConfig,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML or has mistyped fields.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `Config` if it does not parse
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EmulatorError;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = Config::from_toml(
            r#"
            [framebuffer]
            width = 192
            height = 120

            [pipeline]
            frontend = "rspdl"
            "#,
        )
        .unwrap();

        assert_eq!(config.framebuffer.width, 192);
        assert_eq!(config.framebuffer.height, 120);
        assert_eq!(config.framebuffer.stride, 320);
        assert_eq!(config.pipeline.frontend, Frontend::Rspdl);
        assert_eq!(config.pipeline.budget, 4096);
    }

    #[test]
    fn test_bad_field_is_config_error() {
        let err = Config::from_toml("[pipeline]\nfrontend = \"gl\"").unwrap_err();
        assert!(matches!(err, EmulatorError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nstart = 4096\nbudget = 12").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.pipeline.start, 0x1000);
        assert_eq!(config.pipeline.budget, 12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, EmulatorError::Io(_)));
    }
}
