//! Purpose: Define the stable public API boundary for Lantern envelope decoding.
//! Exports: `Envelope`, `Payload`, `ErrorInfo`, `OptionsBag`, `Error`, `ErrorKind`.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only supported import path for consumers.
//! Invariants: Internal modules remain private and are not directly exposed.

pub use crate::core::envelope::{Envelope, ErrorInfo, Payload};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::options::OptionsBag;
