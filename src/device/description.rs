//! Device description data model.
//!
//! A description declares one or more devices, each carrying the tiles,
//! buffers and cores of a compiled design. Descriptions are plain data:
//! built once, consulted read-only, discarded after translation.
//!
//! # Description File Format
//!
//! ```toml
//! [[device]]
//! arch = "aie2"
//!
//! [[device.tile]]
//! col = 1
//! row = 4
//!
//! [[device.buffer]]
//! tile = { col = 1, row = 4 }
//! name = "a"
//! address = 0x2000
//! size = 0x1000
//!
//! [[device.core]]
//! tile = { col = 1, row = 4 }
//! stack_size = 0x400
//! link_with = "kernel.o"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{AieArch, TileId};

/// Default core stack size when the declaration carries none.
pub const DEFAULT_STACK_SIZE: u32 = 0x400;

/// A whole description: one or more devices.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Description {
    /// Declared devices. Translation consumes the first one.
    #[serde(rename = "device", default)]
    pub devices: Vec<Device>,
}

/// One device: an architecture plus its declared tiles, buffers and cores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Architecture variant of the array
    pub arch: AieArch,

    /// Declared tiles
    #[serde(rename = "tile", default)]
    pub tiles: Vec<TileDecl>,

    /// Declared buffers, each owned by one tile
    #[serde(rename = "buffer", default)]
    pub buffers: Vec<BufferDecl>,

    /// Declared cores, at most one per tile
    #[serde(rename = "core", default)]
    pub cores: Vec<CoreDecl>,
}

/// A declared tile coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TileDecl {
    /// Column index
    pub col: u32,
    /// Row index
    pub row: u32,
}

impl TileDecl {
    /// The tile's identity.
    #[inline]
    pub fn id(&self) -> TileId {
        TileId::new(self.col, self.row)
    }
}

/// A named allocation inside one tile's local bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferDecl {
    /// Owning tile
    pub tile: TileId,
    /// Symbol name, unique within the owning tile
    pub name: String,
    /// Base offset inside the owning tile's local bank
    pub address: u32,
    /// Size in bytes
    pub size: u32,
}

/// Program configuration of one tile's core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreDecl {
    /// Tile running this core
    pub tile: TileId,

    /// Stack size in bytes
    #[serde(default = "default_stack_size")]
    pub stack_size: u32,

    /// External object file whose symbols the core links against
    #[serde(default)]
    pub link_with: Option<String>,
}

fn default_stack_size() -> u32 {
    DEFAULT_STACK_SIZE
}

impl Description {
    /// Parse a description from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DescriptionError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a description from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DescriptionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let desc = Self::from_toml_str(&text)?;
        log::debug!(
            "loaded description from {}: {} device(s)",
            path.display(),
            desc.devices.len()
        );
        Ok(desc)
    }
}

/// Error loading a description file.
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid description: {0}")]
    Parse(#[from] toml::de::Error),
}
