//! Acta Namespace System
//!
//! Federated action namespaces: identifier trees whose nodes behave
//! simultaneously as opaque dotted-path values and as navigable containers.
//!
//! # Overview
//!
//! The namespace system provides:
//! - **NamespaceSpec**: declarative nested description, written once
//! - **NamespaceTree / NamespaceNode**: materialized dual-usage trees with a
//!   root-level flat index (nested traversal and flat dotted keys resolve to
//!   the identical node)
//! - **ActionCreator**: leaf factory functions with strict, data-rich
//!   parameter validation
//! - **Action / ActionValue**: the structured records creators produce
//!
//! # Example
//!
//! ```rust
//! use acta_namespace::{build, CreatorDef, NamespaceSpec, SubField};
//!
//! let spec = NamespaceSpec::new().group(
//!     "userMsg",
//!     NamespaceSpec::new().creator(
//!         "display",
//!         CreatorDef::text("msg").with_record(
//!             "userAction",
//!             [SubField::text("txt"), SubField::callback("callback")],
//!         ),
//!     ),
//! );
//!
//! let ns = build(&spec).unwrap();
//! let creator = ns.creator("userMsg.display").unwrap();
//! let action = creator.invoke("hello", None).unwrap();
//! assert_eq!(action.kind(), "userMsg.display");
//! ```

#![warn(missing_docs)]

pub mod creator;
pub mod spec;
pub mod tree;
pub mod value;

// Re-exports
pub use creator::{ActionCreator, CreatorDef, SubField, SubFieldKind, ValidationError};
pub use spec::{NamespaceSpec, SpecEntry};
pub use tree::{build, ActionNamespace, NamespaceError, NamespaceNode, NamespaceTree};
pub use value::{Action, ActionCallback, ActionValue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for namespace operations
    pub use crate::{
        build, Action, ActionCreator, ActionNamespace, ActionValue, CreatorDef, NamespaceSpec,
        NamespaceTree, SubField, ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
