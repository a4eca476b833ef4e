//! Relocation and patching engine for SID-WIZARD tune binaries: given a
//! loaded 6502 image and a descriptor of where it's moving, disassembles the
//! reachable code, finds its pointer tables, and rewrites every address that
//! needs to change.

pub mod address;
pub mod config;
pub mod detect_hi;
pub mod detect_interleaved;
pub mod disasm;
pub mod engine;
pub mod error;
pub mod image;
pub mod opcode;
pub mod patch_code;
pub mod patch_data;

pub use address::{Addr, AddrRange};
pub use config::{TuneConfig, TuneDescriptor};
pub use engine::{run, EngineOutput};
pub use error::{Diagnostic, EngineError};
pub use image::Image;
