//! Node and graph storage.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{JabejaError, Result};

/// Node identifier.
pub type NodeId = u32;

/// Partition label.
pub type Color = u32;

/// Neighbor lists keyed by node id, as produced by a graph loader.
pub type Adjacency = BTreeMap<NodeId, Vec<NodeId>>;

/// A graph vertex with its current and initial partition label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    color: Color,
    init_color: Color,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node whose initial color is `color`.
    pub fn new(id: NodeId, color: Color, neighbors: Vec<NodeId>) -> Self {
        Self {
            id,
            color,
            init_color: color,
            neighbors,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current partition label.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Label held when the graph was built. Used for migration accounting.
    pub fn init_color(&self) -> Color {
        self.init_color
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether the node has moved away from its initial partition.
    pub fn has_migrated(&self) -> bool {
        self.color != self.init_color
    }
}

/// An undirected graph whose topology is fixed and whose colors mutate.
///
/// Nodes are kept in ascending id order; every round of the algorithm
/// visits them in that order.
///
/// # Invariants
///
/// - every neighbor id refers to a node of the graph,
/// - adjacency is symmetric,
/// - no node is its own neighbor.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    ids: Vec<NodeId>,
}

impl Graph {
    /// Builds a graph from nodes, checking the structural invariants.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for node in nodes {
            match map.entry(node.id) {
                Entry::Occupied(_) => return Err(JabejaError::DuplicateNode(node.id)),
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }

        for node in map.values() {
            for &neighbor in &node.neighbors {
                if neighbor == node.id {
                    return Err(JabejaError::SelfLoop(node.id));
                }
                let other = map
                    .get(&neighbor)
                    .ok_or(JabejaError::UnknownNode(neighbor))?;
                if !other.neighbors.contains(&node.id) {
                    return Err(JabejaError::AsymmetricEdge {
                        from: node.id,
                        to: neighbor,
                    });
                }
            }
        }

        let ids = map.keys().copied().collect();
        Ok(Self { nodes: map, ids })
    }

    /// Builds a graph from `(id, color)` pairs and an undirected edge list.
    ///
    /// Each edge is added to both endpoints; neighbor lists end up sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_jabeja::graph::Graph;
    ///
    /// let g = Graph::from_edges(&[(0, 0), (1, 1), (2, 0)], &[(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(g.len(), 3);
    /// assert_eq!(g.edge_count(), 2);
    /// assert_eq!(g.node(1).unwrap().neighbors(), &[0, 2]);
    /// ```
    pub fn from_edges(colors: &[(NodeId, Color)], edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut adjacency: Adjacency = colors.iter().map(|&(id, _)| (id, Vec::new())).collect();
        for &(a, b) in edges {
            if a == b {
                return Err(JabejaError::SelfLoop(a));
            }
            adjacency
                .get_mut(&a)
                .ok_or(JabejaError::UnknownNode(a))?
                .push(b);
            adjacency
                .get_mut(&b)
                .ok_or(JabejaError::UnknownNode(b))?
                .push(a);
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Self::new(colors.iter().map(|&(id, color)| {
            let neighbors = adjacency.remove(&id).unwrap_or_default();
            Node::new(id, color, neighbors)
        }))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Snapshot of the current color of every node.
    pub fn coloring(&self) -> BTreeMap<NodeId, Color> {
        self.nodes.values().map(|n| (n.id, n.color)).collect()
    }

    /// Current color of a node known to be in the graph.
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.nodes[&id].color
    }

    pub(crate) fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[&id].neighbors
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn node_map(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    /// Exchanges the colors of two nodes known to be in the graph.
    pub(crate) fn swap_colors(&mut self, a: NodeId, b: NodeId) {
        let color_a = self.color(a);
        let color_b = self.color(b);
        if let Some(node) = self.nodes.get_mut(&a) {
            node.color = color_b;
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.color = color_a;
        }
    }
}
