//! Arena-backed segment trie for HTTP route matching
//!
//! Route lookup is O(k) in the number of path segments, independent of how
//! many routes are registered. Shared prefixes (`/api/v1/...`) are stored once.
//!
//! ## Layout
//!
//! Nodes live in a single `Vec` and refer to each other by index. Nodes are
//! only ever appended during registration and never freed individually, so
//! the whole tree is dropped at once with the router. Cloning the tree for a
//! copy-on-write snapshot is a flat vector copy; route metadata is shared
//! through `Arc`.
//!
//! Each node has:
//! - literal children keyed by exact segment text
//! - at most one dynamic child (any `{param}` at this depth, whatever its name)
//! - the routes that terminate here, keyed by method
//!
//! ## Matching
//!
//! At each depth the literal child wins. The dynamic child is tried only when
//! no literal child has the component's text, and only for non-empty
//! components. There is no backtracking: once a literal edge is taken the
//! walk is committed to it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use smallvec::SmallVec;

use super::pattern::{path_components, Segment};
use super::route::Route;
use crate::method::HttpMethod;

pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;

/// Dynamic components captured while walking, in path order
pub(crate) type Captures<'p> = SmallVec<[&'p str; super::core::MAX_INLINE_PARAMS]>;

/// Routes terminating at one node, keyed by method
pub(crate) type MethodMap = BTreeMap<HttpMethod, Arc<Route>>;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    literal_children: HashMap<Box<str>, NodeId>,
    /// Parameter name of the first route that created this edge, and the child.
    /// The name is informational; values are bound to the names declared by
    /// whichever route is finally matched.
    dynamic_child: Option<(Arc<str>, NodeId)>,
    routes: MethodMap,
}

/// Result of inserting a route into a (node, method) slot
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    /// The slot was empty
    Inserted,
    /// The slot held this route, which has been replaced
    Replaced(Arc<Route>),
    /// The slot holds this route, which was kept; the new route was dropped
    Rejected(Arc<Route>),
}

#[derive(Debug, Clone)]
pub(crate) struct RadixTree {
    nodes: Vec<TrieNode>,
}

impl Default for RadixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(TrieNode::default());
        self.nodes.len() - 1
    }

    /// Insert a route, creating nodes along its pattern as needed
    pub(crate) fn insert(&mut self, route: Arc<Route>, overwrite: bool) -> InsertOutcome {
        let mut node = ROOT;

        for segment in route.pattern.segments() {
            node = match segment {
                Segment::Literal(text) => match self.nodes[node].literal_children.get(text) {
                    Some(&child) => child,
                    None => {
                        let child = self.push_node();
                        self.nodes[node]
                            .literal_children
                            .insert(text.clone(), child);
                        child
                    }
                },
                Segment::Parameter(name) => match &self.nodes[node].dynamic_child {
                    Some((_, child)) => *child,
                    None => {
                        let child = self.push_node();
                        self.nodes[node].dynamic_child = Some((Arc::clone(name), child));
                        child
                    }
                },
            };
        }

        let slot = &mut self.nodes[node].routes;
        if let Some(existing) = slot.get(&route.method) {
            if !overwrite {
                return InsertOutcome::Rejected(Arc::clone(existing));
            }
        }
        match slot.insert(route.method.clone(), route) {
            Some(previous) => InsertOutcome::Replaced(previous),
            None => InsertOutcome::Inserted,
        }
    }

    /// Walk the tree for a request path.
    ///
    /// Returns the routes attached to the node the path ends on, plus the
    /// components consumed by dynamic edges. `None` means the path leaves the
    /// tree at some depth.
    pub(crate) fn search<'t, 'p>(&'t self, path: &'p str) -> Option<(&'t MethodMap, Captures<'p>)> {
        let mut node = &self.nodes[ROOT];
        let mut captures = Captures::new();

        for component in path_components(path) {
            let next = if let Some(&child) = node.literal_children.get(component) {
                child
            } else {
                match &node.dynamic_child {
                    Some((_, child)) if !component.is_empty() => {
                        captures.push(component);
                        *child
                    }
                    _ => return None,
                }
            };
            node = &self.nodes[next];
        }

        Some((&node.routes, captures))
    }
}
