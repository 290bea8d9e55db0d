//! BCF directive rendering.
//!
//! Emission is pure formatting: each computed fact becomes exactly one
//! text line, in the order the mapper produced it. The downstream linker
//! processes directives sequentially, so line order is part of the
//! contract. Addresses and sizes render as lowercase hex with a leading
//! `0x` and no zero padding.

use std::io::{self, Write};

/// One BCF directive, as computed by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `_entry_point <symbol>`
    EntryPoint { symbol: String },

    /// `_symbol <name> <addr> <size>` - a sized symbol at an absolute address
    Symbol { name: String, addr: u32, size: u32 },

    /// `_symbol <name> _after <other>` - a symbol placed after another
    SymbolAfter { name: String, after: String },

    /// `_symbol <name> <addr>` - an unsized symbol pinned to an address
    SymbolAt { name: String, addr: u32 },

    /// `_extern <name>` - symbol is provided externally
    Extern { name: String },

    /// `_reserved DMb <addr> <size>` - range the linker must not allocate
    Reserved {
        addr: u32,
        size: u32,
        comment: Option<String>,
    },

    /// `_stack <name> <addr> <size>` - the core's stack region
    Stack {
        name: String,
        addr: u32,
        size: u32,
        comment: Option<String>,
    },

    /// `_include _file <path>` - pull in symbols from an object file
    Include { path: String },

    /// `_resolve <symbol> <target>` - bind one symbol to another
    Resolve { symbol: String, target: String },
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::EntryPoint { symbol } => write!(f, "_entry_point {symbol}"),
            Directive::Symbol { name, addr, size } => {
                write!(f, "_symbol {name} 0x{addr:x} 0x{size:x}")
            }
            Directive::SymbolAfter { name, after } => write!(f, "_symbol {name} _after {after}"),
            Directive::SymbolAt { name, addr } => write!(f, "_symbol {name} 0x{addr:x}"),
            Directive::Extern { name } => write!(f, "_extern {name}"),
            Directive::Reserved {
                addr,
                size,
                comment,
            } => {
                write!(f, "_reserved DMb 0x{addr:x} 0x{size:x}")?;
                write_comment(f, comment)
            }
            Directive::Stack {
                name,
                addr,
                size,
                comment,
            } => {
                write!(f, "_stack {name} 0x{addr:x} 0x{size:x}")?;
                write_comment(f, comment)
            }
            Directive::Include { path } => write!(f, "_include _file {path}"),
            Directive::Resolve { symbol, target } => write!(f, "_resolve {symbol} {target}"),
        }
    }
}

fn write_comment(
    f: &mut std::fmt::Formatter<'_>,
    comment: &Option<String>,
) -> std::fmt::Result {
    match comment {
        Some(text) => write!(f, " // {text}"),
        None => Ok(()),
    }
}

/// Write directives to the output sink, one line each, in order.
pub fn write_directives<W: Write>(out: &mut W, directives: &[Directive]) -> io::Result<()> {
    for directive in directives {
        writeln!(out, "{directive}")?;
    }
    Ok(())
}
