//! BCF translation: device description to linker-control text.
//!
//! The pipeline is index -> map -> emit:
//!
//! - [`index`] builds read-only tile/buffer lookups from the description
//! - [`mapper`] computes the ordered directive list for one target tile
//! - [`emit`] renders each directive as one BCF line
//!
//! Translation is deterministic and single-pass; the only observable
//! effect is the byte sequence written to the output sink.

pub mod emit;
pub mod index;
pub mod mapper;

pub use emit::{write_directives, Directive};
pub use index::{BufferRecord, DeviceIndex, TileRecord};
pub use mapper::{core_symbol, map_tile};

use std::io::Write;

use crate::device::{Description, TileId};

/// Error translating a description.
#[derive(Debug, thiserror::Error)]
pub enum BcfError {
    /// The description declares no device at all.
    #[error("description contains no device")]
    MissingDevice,

    /// Two tiles share one coordinate; their memory maps would conflict.
    #[error("duplicate declaration for {0}")]
    DuplicateTile(TileId),

    /// The output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a translation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// The target tile was found; its memory map was written.
    Emitted {
        /// Number of directive lines written
        lines: usize,
    },
    /// No tile matched the requested coordinates; nothing was written.
    NoMatch,
}

/// Translate the first device of `description` to BCF for `target`.
///
/// Nothing is written unless the target tile exists: precondition checks
/// run before emission, so the sink never receives partial output
/// followed by an error from this crate.
pub fn translate_bcf<W: Write>(
    description: &Description,
    target: TileId,
    out: &mut W,
) -> Result<Translation, BcfError> {
    let index = DeviceIndex::build(description)?;
    match mapper::map_tile(&index, target) {
        Some(directives) => {
            emit::write_directives(out, &directives)?;
            Ok(Translation::Emitted {
                lines: directives.len(),
            })
        }
        None => {
            log::debug!("no tile matches {}; emitting nothing", target);
            Ok(Translation::NoMatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{AieArch, BufferDecl, Description, Device, TileDecl};

    fn south_buffer_description() -> Description {
        Description {
            devices: vec![Device {
                arch: AieArch::Aie2,
                tiles: vec![TileDecl { col: 2, row: 4 }, TileDecl { col: 2, row: 3 }],
                buffers: vec![BufferDecl {
                    tile: TileId::new(2, 3),
                    name: "a".into(),
                    address: 0x2000,
                    size: 0x1000,
                }],
                cores: vec![],
            }],
        }
    }

    fn translate_to_string(desc: &Description, target: TileId) -> (Translation, String) {
        let mut out = Vec::new();
        let outcome = translate_bcf(desc, target, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_end_to_end_south_neighbor() {
        let (outcome, text) = translate_to_string(&south_buffer_description(), TileId::new(2, 4));
        assert!(matches!(outcome, Translation::Emitted { .. }));

        // AIE2 south base 0x40000 + local offset 0x2000.
        let sym = text.find("_symbol a 0x42000 0x1000").unwrap();
        let ext = text.find("_extern a").unwrap();
        let res = text.find("_reserved DMb 0x42000 0x1000").unwrap();
        assert!(sym < ext && ext < res);
    }

    #[test]
    fn test_no_match_emits_nothing() {
        let (outcome, text) = translate_to_string(&south_buffer_description(), TileId::new(9, 9));
        assert_eq!(outcome, Translation::NoMatch);
        assert!(text.is_empty());
    }

    #[test]
    fn test_determinism() {
        let desc = south_buffer_description();
        let (_, first) = translate_to_string(&desc, TileId::new(2, 4));
        let (_, second) = translate_to_string(&desc, TileId::new(2, 4));
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_missing_device_writes_nothing() {
        let mut out = Vec::new();
        let err = translate_bcf(&Description::default(), TileId::new(0, 0), &mut out).unwrap_err();
        assert!(matches!(err, BcfError::MissingDevice));
        assert!(out.is_empty());
    }

    #[test]
    fn test_duplicate_tile_writes_nothing() {
        let mut desc = south_buffer_description();
        desc.devices[0].tiles.push(TileDecl { col: 2, row: 4 });
        let mut out = Vec::new();
        let err = translate_bcf(&desc, TileId::new(2, 4), &mut out).unwrap_err();
        assert!(matches!(err, BcfError::DuplicateTile(id) if id == TileId::new(2, 4)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fully_isolated_tile_line_census() {
        // A tile declared on the shim row has no bank in any direction,
        // not even its own: four unreachable-window reservations and no
        // symbol/extern lines at all.
        let desc = Description {
            devices: vec![Device {
                arch: AieArch::Aie2,
                tiles: vec![TileDecl { col: 1, row: 0 }],
                buffers: vec![],
                cores: vec![],
            }],
        };
        let (_, text) = translate_to_string(&desc, TileId::new(1, 0));
        let lines: Vec<&str> = text.lines().collect();

        let edge = lines
            .iter()
            .filter(|l| l.contains("No tile with memory exists to the"))
            .count();
        assert_eq!(edge, 4);

        assert_eq!(
            lines
                .iter()
                .filter(|l| l.contains("Don't put data in code memory"))
                .count(),
            1
        );
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("_stack ")).count(),
            1
        );
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.contains("And everything else the core can't see"))
                .count(),
            1
        );
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("_resolve ")).count(),
            1
        );
        assert!(!lines
            .iter()
            .any(|l| l.starts_with("_extern ") || *l == "_symbol a 0x42000 0x1000"));
        // The only _symbol lines are the entry scaffolding.
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.starts_with("_symbol "))
                .count(),
            2
        );
    }

    #[test]
    fn test_toml_description_end_to_end() {
        let desc = Description::from_toml_str(
            r#"
            [[device]]
            arch = "aie2"

            [[device.tile]]
            col = 2
            row = 4

            [[device.tile]]
            col = 2
            row = 3

            [[device.buffer]]
            tile = { col = 2, row = 3 }
            name = "a"
            address = 0x2000
            size = 0x1000

            [[device.core]]
            tile = { col = 2, row = 4 }
            stack_size = 0x400
            link_with = "kernel.o"
            "#,
        )
        .unwrap();

        let (_, text) = translate_to_string(&desc, TileId::new(2, 4));
        assert!(text.contains("_symbol a 0x42000 0x1000\n"));
        assert!(text.contains("_stack DM_stack 0x70000 0x400 // stack for core\n"));
        assert!(text.contains("_include _file kernel.o\n"));
        assert!(text.ends_with("_resolve _main core_2_4\n"));
    }
}
