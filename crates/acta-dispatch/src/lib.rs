//! Acta Dispatch System
//!
//! The glue between namespaces and logs at the dispatch boundary.
//!
//! # Overview
//!
//! The dispatch system provides:
//! - **ReducerProbe**: wraps one state slice's reduction so every dispatch
//!   emits exactly one probe, classified by whether the state actually
//!   changed (`INSPECT`), a handler supplied a note (`DEBUG`), or neither
//!   (`TRACE`)
//! - **action_log**: resolve any identifier form to the Log owning its
//!   leading namespace segment
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use acta_dispatch::{HandlerOutcome, ReducerProbe};
//! use acta_log::LogRegistry;
//!
//! #[derive(Debug)]
//! struct Session { user: Option<String> }
//!
//! let registry = LogRegistry::new();
//! let probe = ReducerProbe::new(registry.log("session").unwrap()).handle(
//!     "session.login",
//!     |_prev: &Arc<Session>, action| {
//!         HandlerOutcome::next(Arc::new(Session {
//!             user: Some(action.kind().to_string()),
//!         }))
//!     },
//! );
//! # let _ = probe;
//! ```

#![warn(missing_docs)]

pub mod probe;
pub mod resolver;

// Re-exports
pub use probe::{Handler, HandlerOutcome, NoteProducer, ReducerProbe};
pub use resolver::{action_log, LookupError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for dispatch wiring
    pub use crate::{action_log, HandlerOutcome, LookupError, ReducerProbe};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
