//! Purpose: Client-side decoding library for Lantern API response envelopes.
//! Exports: `api` (stable surface over envelope, options, and error types).
//! Role: Turns one parsed JSON response into a typed `Envelope<T>`; no transport.
//! Invariants: Decoding is pure and deterministic; no I/O, no shared state.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
