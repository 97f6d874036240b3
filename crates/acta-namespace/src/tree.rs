//! Materialized namespace trees
//!
//! Provides [`NamespaceNode`] and [`NamespaceTree`]: the dual-usage
//! identifier trees built once from a [`NamespaceSpec`]. Every node behaves
//! as its canonical dotted-path value in display, comparison, and
//! serialization contexts, while exposing indexed child lookup; the tree
//! additionally carries a flat index from every dotted path (leaf and
//! intermediate) to the identical node reachable by nested traversal.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Index;
use std::sync::Arc;

use acta_path::{ActionKey, ActionPath, PathError};

use crate::creator::{ActionCreator, CreatorDef};
use crate::spec::{NamespaceSpec, SpecEntry};

/// One materialized namespace node
///
/// Reading the node (display, equality against text, serialization) yields
/// its canonical dotted path; indexing it by a child segment yields the
/// child node.
#[derive(Debug)]
pub struct NamespaceNode<T> {
    path: ActionPath,
    canonical: String,
    payload: Option<T>,
    children: IndexMap<String, Arc<NamespaceNode<T>>>,
}

impl<T> NamespaceNode<T> {
    /// Full path of this node
    #[inline]
    #[must_use]
    pub fn path(&self) -> &ActionPath {
        &self.path
    }

    /// Canonical dotted-path value of this node
    ///
    /// Equals the joined dotted path for leaves and intermediates alike.
    #[inline]
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Leaf payload, if any
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Child node by segment
    #[inline]
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Arc<NamespaceNode<T>>> {
        self.children.get(segment)
    }

    /// Children in declaration order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &IndexMap<String, Arc<NamespaceNode<T>>> {
        &self.children
    }

    /// True when this node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T> Display for NamespaceNode<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl<T> PartialEq<str> for NamespaceNode<T> {
    fn eq(&self, other: &str) -> bool {
        self.canonical == other
    }
}

impl<T> PartialEq<&str> for NamespaceNode<T> {
    fn eq(&self, other: &&str) -> bool {
        self.canonical == *other
    }
}

impl<T> Serialize for NamespaceNode<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<T> ActionKey for NamespaceNode<T> {
    fn canonical_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.canonical)
    }
}

impl<T> Index<&str> for NamespaceNode<T> {
    type Output = NamespaceNode<T>;

    /// Nested child lookup
    ///
    /// # Panics
    /// Panics if `segment` is not a child of this node.
    fn index(&self, segment: &str) -> &Self::Output {
        match self.children.get(segment) {
            Some(child) => child,
            None => panic!("no child '{segment}' under '{}'", self.canonical),
        }
    }
}

/// One materialized identifier tree with its flat index
///
/// Both the nested form (`tree["top"]["child"]`) and the flat dotted form
/// (`tree.at("top.child")`) are equally valid, permanent means of indexing
/// any node, and resolve to the identical object.
#[derive(Debug)]
pub struct NamespaceTree<T> {
    roots: IndexMap<String, Arc<NamespaceNode<T>>>,
    index: IndexMap<String, Arc<NamespaceNode<T>>>,
}

impl<T> NamespaceTree<T> {
    /// Node by full dotted path, via the flat index
    #[must_use]
    pub fn at(&self, key: impl ActionKey) -> Option<&Arc<NamespaceNode<T>>> {
        self.index.get(key.canonical_key().as_ref())
    }

    /// Top-level node by leading segment
    #[inline]
    #[must_use]
    pub fn root(&self, segment: &str) -> Option<&Arc<NamespaceNode<T>>> {
        self.roots.get(segment)
    }

    /// Top-level nodes in declaration order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &IndexMap<String, Arc<NamespaceNode<T>>> {
        &self.roots
    }

    /// Every dotted path in the tree, leaves and intermediates
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|k| k.as_str())
    }

    /// Total node count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the tree holds no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<T> Index<&str> for NamespaceTree<T> {
    type Output = NamespaceNode<T>;

    /// Flat lookup by full dotted path
    ///
    /// # Panics
    /// Panics if no node exists at `path`.
    fn index(&self, path: &str) -> &Self::Output {
        match self.index.get(path) {
            Some(node) => node,
            None => panic!("no namespace node at '{path}'"),
        }
    }
}

/// The pair of structurally identical trees built from one spec
#[derive(Debug)]
pub struct ActionNamespace {
    /// Type tree: every node's value is its dotted path
    pub types: NamespaceTree<()>,
    /// Creator tree: leaves carry validated action creators
    pub creators: NamespaceTree<ActionCreator>,
}

impl ActionNamespace {
    /// Leaf creator by full dotted path
    #[must_use]
    pub fn creator(&self, key: impl ActionKey) -> Option<&ActionCreator> {
        self.creators.at(key).and_then(|node| node.payload())
    }
}

/// Materialize both trees from one declarative spec
///
/// Construction is deterministic and the result immutable. Any malformation
/// (duplicate dotted path, invalid segment) fails immediately — this is a
/// startup-time defect, never a runtime condition surfaced to callers.
///
/// # Errors
/// [`NamespaceError`] on the first malformation encountered.
pub fn build(spec: &NamespaceSpec) -> Result<ActionNamespace, NamespaceError> {
    Ok(ActionNamespace {
        types: build_tree(spec, &|_, _| ())?,
        creators: build_tree(spec, &|path, def| ActionCreator::new(path.clone(), def.clone()))?,
    })
}

fn build_tree<T>(
    spec: &NamespaceSpec,
    make_leaf: &impl Fn(&ActionPath, &CreatorDef) -> T,
) -> Result<NamespaceTree<T>, NamespaceError> {
    let mut index = IndexMap::new();
    let mut roots = IndexMap::new();
    for (name, entry) in spec.entries() {
        let node = build_node(None, name, entry, make_leaf, &mut index)?;
        roots.insert(name.clone(), node);
    }
    Ok(NamespaceTree { roots, index })
}

fn build_node<T>(
    parent: Option<&ActionPath>,
    name: &str,
    entry: &SpecEntry,
    make_leaf: &impl Fn(&ActionPath, &CreatorDef) -> T,
    index: &mut IndexMap<String, Arc<NamespaceNode<T>>>,
) -> Result<Arc<NamespaceNode<T>>, NamespaceError> {
    let path = match parent {
        Some(p) => p.child(name)?,
        None => ActionPath::single(name)?,
    };

    let mut children = IndexMap::new();
    let payload = match entry {
        SpecEntry::Creator(def) => Some(make_leaf(&path, def)),
        SpecEntry::Group(sub) => {
            for (child_name, child_entry) in sub.entries() {
                let child = build_node(Some(&path), child_name, child_entry, make_leaf, index)?;
                children.insert(child_name.clone(), child);
            }
            None
        }
    };

    let node = Arc::new(NamespaceNode {
        canonical: path.canonical(),
        path,
        payload,
        children,
    });
    if index
        .insert(node.canonical.clone(), Arc::clone(&node))
        .is_some()
    {
        return Err(NamespaceError::DuplicatePath {
            path: node.canonical.clone(),
        });
    }
    Ok(node)
}

/// Namespace construction failures
///
/// Fatal startup-time defects: the process should fail to initialize.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// Same dotted path declared twice
    #[error("duplicate dotted path: {path}")]
    DuplicatePath {
        /// The colliding path
        path: String,
    },

    /// Segment rejected by path validation
    #[error("invalid namespace segment: {0}")]
    Path(#[from] PathError),
}
