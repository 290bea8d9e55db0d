//! Device description indexing.
//!
//! One pass over the first declared device builds two read-only maps: tile
//! coordinate to tile record, and tile coordinate to its buffers in
//! declaration order. The translator then works from indexed lookups
//! instead of re-walking the description.

use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::device::{AieArch, CoreDecl, Description, TileId};

use super::BcfError;

/// Buffers per tile, inline up to the common small count.
pub type BufferList = SmallVec<[BufferRecord; 4]>;

/// One declared tile, with its core configuration if any.
#[derive(Debug, Clone)]
pub struct TileRecord {
    /// The tile's identity
    pub id: TileId,
    /// Core configuration, when the tile runs a program
    pub core: Option<CoreDecl>,
}

/// A buffer owned by one tile.
#[derive(Debug, Clone)]
pub struct BufferRecord {
    /// Symbol name
    pub name: String,
    /// Base offset inside the owning tile's local bank
    pub address: u32,
    /// Size in bytes
    pub size: u32,
}

/// Indexed view of one device description.
#[derive(Debug)]
pub struct DeviceIndex {
    arch: AieArch,
    tiles: BTreeMap<TileId, TileRecord>,
    buffers: BTreeMap<TileId, BufferList>,
}

impl DeviceIndex {
    /// Index the first device of a description.
    ///
    /// Fails when the description declares no device at all, or when two
    /// tiles share a coordinate (which would otherwise produce a
    /// conflicting memory map downstream).
    pub fn build(description: &Description) -> Result<Self, BcfError> {
        let device = description.devices.first().ok_or(BcfError::MissingDevice)?;
        if description.devices.len() > 1 {
            log::warn!(
                "description declares {} devices; only the first is translated",
                description.devices.len()
            );
        }

        let mut tiles = BTreeMap::new();
        for tile in &device.tiles {
            let id = tile.id();
            if tiles.insert(id, TileRecord { id, core: None }).is_some() {
                return Err(BcfError::DuplicateTile(id));
            }
        }

        for core in &device.cores {
            match tiles.get_mut(&core.tile) {
                Some(record) => record.core = Some(core.clone()),
                None => log::warn!("core declared for undeclared {}; ignored", core.tile),
            }
        }

        let mut buffers: BTreeMap<TileId, BufferList> = BTreeMap::new();
        for buffer in &device.buffers {
            if !tiles.contains_key(&buffer.tile) {
                log::warn!(
                    "buffer {} declared for undeclared {}; ignored",
                    buffer.name,
                    buffer.tile
                );
                continue;
            }
            buffers.entry(buffer.tile).or_default().push(BufferRecord {
                name: buffer.name.clone(),
                address: buffer.address,
                size: buffer.size,
            });
        }

        Ok(Self {
            arch: device.arch,
            tiles,
            buffers,
        })
    }

    /// Architecture variant of the indexed device.
    #[inline]
    pub fn arch(&self) -> AieArch {
        self.arch
    }

    /// Look up a tile record by coordinate.
    #[inline]
    pub fn tile(&self, id: TileId) -> Option<&TileRecord> {
        self.tiles.get(&id)
    }

    /// Buffers owned by a tile, in declaration order. Empty for tiles
    /// with no buffers (or coordinates not in the index).
    #[inline]
    pub fn buffers(&self, id: TileId) -> &[BufferRecord] {
        self.buffers.get(&id).map(|list| &list[..]).unwrap_or(&[])
    }
}
