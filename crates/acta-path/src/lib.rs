//! Acta Path System
//!
//! Dotted hierarchical action identifiers.
//!
//! # Overview
//!
//! The path system provides:
//! - **ActionPath**: validated, immutable dotted identifier (`userMsg.display`)
//! - **ActionKey**: normalization of any accepted identifier form to canonical text
//!
//! Every identifier in the action namespace is addressable both as a nested
//! traversal and as one flat dotted key; `ActionPath` is the canonical form
//! both renderings share.
//!
//! # Example
//!
//! ```rust
//! use acta_path::ActionPath;
//! use std::str::FromStr;
//!
//! let path = ActionPath::from_str("userMsg.display").unwrap();
//! assert_eq!(path.first(), Some("userMsg"));
//! assert_eq!(path.to_string(), "userMsg.display");
//! ```

#![warn(missing_docs)]

pub mod key;
pub mod path;

// Re-exports
pub use key::ActionKey;
pub use path::{ActionPath, PathError};

/// Separator between path segments in canonical form
pub const SEPARATOR: char = '.';

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
