#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Action surface for workflow-automation hosts.
//!
//! A host hands over an operation identifier and a JSON parameter object;
//! this crate decodes them into a closed [`Action`] enum and dispatches
//! exhaustively into client calls, so unsupported identifiers fail at the
//! decoding boundary rather than deep inside a handler.
//!
//! Layout:
//! - `action.rs`: the operation enum, parameter decoding, and dispatch
//! - `registry.rs`: identity-keyed single-slot client cache
//! - `error.rs`: action error taxonomy

pub mod action;
pub mod error;
pub mod registry;

pub use action::{Action, ListParam};
pub use error::{ActionError, ActionResult};
pub use registry::{ClientRegistry, ConnectionProfile};
