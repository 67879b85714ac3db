//! FFI bridge crate for the DesktopAI shell host.
//!
//! Every exported function lives in [`api`] and is marked `frb(sync)`.

pub mod api;
