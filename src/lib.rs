//! aie-bcf library
//!
//! Translates AIE tile-array device descriptions into the BCF
//! linker-control format for a single core.

pub mod bcf;
pub mod device;
