//! Directional memory mapping for one target tile.
//!
//! This is where the memory map is actually decided. For the matched tile
//! the mapper walks the four compass windows, resolves each one to a
//! neighbor bank (or absence), and turns the answers into an ordered list
//! of directives: map entries for every visible buffer, reservations for
//! foreign and unreachable windows, the stack, the architecture's fixed
//! reserved regions, and the entry/resolve scaffolding around them.

use crate::device::{Direction, TargetModel, TileId};

use super::emit::Directive;
use super::index::DeviceIndex;

/// Symbol the linker starts execution at.
pub const INIT_SYMBOL: &str = "_main_init";

/// External entry symbol resolved to the tile's core function.
pub const ENTRY_SYMBOL: &str = "_main";

/// Name of the stack region.
pub const STACK_NAME: &str = "DM_stack";

/// The core function symbol for a tile, `core_<col>_<row>`.
pub fn core_symbol(tile: TileId) -> String {
    format!("core_{}_{}", tile.col, tile.row)
}

/// Compute the ordered directive list for `target`.
///
/// Returns `None` when no tile in the index matches the requested
/// coordinates; callers decide whether that is an error.
pub fn map_tile(index: &DeviceIndex, target: TileId) -> Option<Vec<Directive>> {
    let record = index.tile(target)?;
    let model = index.arch().model();
    let layout = model.layout();
    let corefunc = core_symbol(target);

    log::debug!("mapping {} on {}", target, model.arch());

    let mut directives = vec![
        Directive::EntryPoint {
            symbol: INIT_SYMBOL.into(),
        },
        Directive::SymbolAfter {
            name: corefunc.clone(),
            after: INIT_SYMBOL.into(),
        },
        Directive::SymbolAt {
            name: INIT_SYMBOL.into(),
            addr: 0,
        },
        Directive::Reserved {
            addr: 0,
            size: layout.init_reserved_size,
            comment: Some("Don't put data in code memory".into()),
        },
    ];

    for dir in Direction::ALL {
        map_window(index, model, target, dir, &mut directives);
    }

    // Stack goes into the tile's own bank; without a core there is no
    // stack to size, but the region line is still emitted.
    let stack_size = record.core.as_ref().map(|core| core.stack_size).unwrap_or(0);
    directives.push(Directive::Stack {
        name: STACK_NAME.into(),
        addr: model.internal_base(target),
        size: stack_size,
        comment: Some("stack for core".into()),
    });

    directives.push(Directive::Reserved {
        addr: layout.tail_reserved_base,
        size: layout.tail_reserved_size,
        comment: Some("And everything else the core can't see".into()),
    });

    if let Some(object) = record.core.as_ref().and_then(|core| core.link_with.as_ref()) {
        directives.push(Directive::Include {
            path: object.clone(),
        });
    }

    directives.push(Directive::Resolve {
        symbol: ENTRY_SYMBOL.into(),
        target: corefunc,
    });

    Some(directives)
}

/// Map one directional window.
///
/// A window resolves to exactly one of three outcomes:
/// - a visible neighbor bank: per-buffer symbol/extern/reserved triples,
///   plus a whole-window reservation when the bank belongs to another tile
/// - the tile's own bank: buffer triples only, nothing extra reserved
/// - no neighbor (array edge): a single whole-window reservation
fn map_window(
    index: &DeviceIndex,
    model: &dyn TargetModel,
    target: TileId,
    dir: Direction,
    directives: &mut Vec<Directive>,
) {
    let base = model.window_base(dir);
    match model.neighbor(target, dir) {
        Some(neighbor) => {
            for buffer in index.buffers(neighbor) {
                // Local offset relocated through this window; the range is
                // reserved so the linker treats it as externally provided.
                directives.push(Directive::Symbol {
                    name: buffer.name.clone(),
                    addr: base + buffer.address,
                    size: buffer.size,
                });
                directives.push(Directive::Extern {
                    name: buffer.name.clone(),
                });
                directives.push(Directive::Reserved {
                    addr: base + buffer.address,
                    size: buffer.size,
                    comment: None,
                });
            }
            if neighbor != target {
                directives.push(Directive::Reserved {
                    addr: base,
                    size: model.local_memory_size(),
                    comment: Some("Don't allocate variables outside of local memory.".into()),
                });
            }
        }
        None => {
            directives.push(Directive::Reserved {
                addr: base,
                size: model.local_memory_size(),
                comment: Some(format!("No tile with memory exists to the {dir}.")),
            });
        }
    }
}
