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

//! Memory interface for the graphics pipeline
//!
//! The translators and the RSPDL interpreter never own memory. They talk to a
//! [`Memory`] implementation that exposes byte, halfword and word access over
//! a flat big-endian address space. [`Rdram`] is the concrete flat RAM used by
//! the [`System`](crate::core::system::System) driver and by tests.
//!
//! # Address Translation
//!
//! The N64 CPU reaches RDRAM through MIPS segments that mirror physical memory:
//! - KUSEG (0x00000000-0x7FFFFFFF): Direct mapping (TLB-less here)
//! - KSEG0 (0x80000000-0x9FFFFFFF): Cached mirror of physical memory
//! - KSEG1 (0xA0000000-0xBFFFFFFF): Uncached mirror of physical memory
//!
//! # Example
//!
//! ```
//! use rspgfx::core::memory::{Memory, Rdram};
//!
//! let mut rdram = Rdram::new(0x0040_0000);
//!
//! // Write through KSEG0
//! rdram.write32(0x8000_0100, 0x12345678).unwrap();
//!
//! // Big-endian byte order, mirrored through KSEG1
//! assert_eq!(rdram.read8(0xA000_0100).unwrap(), 0x12);
//! assert_eq!(rdram.read16(0x0000_0102).unwrap(), 0x5678);
//! ```

use crate::core::error::{EmulatorError, Result};
use std::fs;
use std::path::Path;


/// Flat big-endian memory as seen by the graphics pipeline
///
/// Only `read8`/`write8` are required. The wider accessors default to
/// big-endian compositions of byte accesses; implementations may override
/// them to add alignment checks or faster paths.
pub trait Memory {
    /// Read one byte
    fn read8(&self, addr: u32) -> Result<u8>;

    /// Write one byte
    fn write8(&mut self, addr: u32, value: u8) -> Result<()>;

    /// Read a big-endian halfword
    fn read16(&self, addr: u32) -> Result<u16> {
        let hi = self.read8(addr)? as u16;
        let lo = self.read8(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Write a big-endian halfword
    fn write16(&mut self, addr: u32, value: u16) -> Result<()> {
        self.write8(addr, (value >> 8) as u8)?;
        self.write8(addr.wrapping_add(1), value as u8)
    }

    /// Read a big-endian word
    fn read32(&self, addr: u32) -> Result<u32> {
        let hi = self.read16(addr)? as u32;
        let lo = self.read16(addr.wrapping_add(2))? as u32;
        Ok((hi << 16) | lo)
    }

    /// Write a big-endian word
    fn write32(&mut self, addr: u32, value: u32) -> Result<()> {
        self.write16(addr, (value >> 16) as u16)?;
        self.write16(addr.wrapping_add(2), value as u16)
    }
}

/// Flat RDRAM
///
/// A single contiguous byte array starting at physical address 0. Halfword and
/// word accesses must be naturally aligned, as on the real bus.
pub struct Rdram {
    /// Backing bytes, big-endian order
    data: Vec<u8>,
}

impl Rdram {
    /// Standard RDRAM size (4MB, no expansion pak)
    pub const DEFAULT_SIZE: usize = 4 * 1024 * 1024;

    /// Create RDRAM of `size` bytes, zero-filled
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if RDRAM has no backing bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear all bytes to zero
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Raw view of the backing bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy `bytes` into RDRAM starting at `addr`
    ///
    /// Used to stage textures, TLUTs, vertex data and display lists before a
    /// frame runs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMemoryAccess` if any byte would land outside RDRAM.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        let start = self.offset(addr)?;
        let end = start
            .checked_add(bytes.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(EmulatorError::InvalidMemoryAccess {
                address: addr.wrapping_add(bytes.len() as u32),
            })?;
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Load a raw RDRAM image from disk at physical address 0
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `ImageTooLarge` if the file does not fit in RDRAM
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = fs::read(path.as_ref())?;
        if bytes.len() > self.data.len() {
            return Err(EmulatorError::ImageTooLarge {
                got: bytes.len(),
                capacity: self.data.len(),
            });
        }

        log::info!(
            "Loaded {} byte RDRAM image from {}",
            bytes.len(),
            path.as_ref().display()
        );
        self.data[..bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    /// Translate a virtual address to an index into `data`
    #[inline(always)]
    fn offset(&self, vaddr: u32) -> Result<usize> {
        // Mask upper 3 bits: KUSEG, KSEG0 and KSEG1 all mirror physical memory
        let paddr = (vaddr & 0x1FFF_FFFF) as usize;
        if paddr < self.data.len() {
            Ok(paddr)
        } else {
            Err(EmulatorError::InvalidMemoryAccess { address: vaddr })
        }
    }

    #[inline(always)]
    fn check_alignment(vaddr: u32, size: u8) -> Result<()> {
        if vaddr & (size as u32 - 1) != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size,
            });
        }
        Ok(())
    }

    #[inline(always)]
    fn span(&self, vaddr: u32, size: u8) -> Result<usize> {
        Self::check_alignment(vaddr, size)?;
        let offset = self.offset(vaddr)?;
        if offset + size as usize > self.data.len() {
            return Err(EmulatorError::InvalidMemoryAccess { address: vaddr });
        }
        Ok(offset)
    }
}

impl Default for Rdram {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl Memory for Rdram {
    fn read8(&self, addr: u32) -> Result<u8> {
        let offset = self.offset(addr)?;
        Ok(self.data[offset])
    }

    fn write8(&mut self, addr: u32, value: u8) -> Result<()> {
        let offset = self.offset(addr)?;
        self.data[offset] = value;
        Ok(())
    }

    fn read16(&self, addr: u32) -> Result<u16> {
        let offset = self.span(addr, 2)?;
        Ok(u16::from_be_bytes([self.data[offset], self.data[offset + 1]]))
    }

    fn write16(&mut self, addr: u32, value: u16) -> Result<()> {
        let offset = self.span(addr, 2)?;
        self.data[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    fn read32(&self, addr: u32) -> Result<u32> {
        let offset = self.span(addr, 4)?;
        let bytes = [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ];
        Ok(u32::from_be_bytes(bytes))
    }

    fn write32(&mut self, addr: u32, value: u32) -> Result<()> {
        let offset = self.span(addr, 4)?;
        self.data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}
