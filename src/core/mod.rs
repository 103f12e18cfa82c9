// Core modules implementing envelope decoding, options passthrough, and error modeling.
pub mod envelope;
pub mod error;
pub mod options;
