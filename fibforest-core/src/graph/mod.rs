//! Dynamic undirected weighted graph backed by an adjacency matrix.
//!
//! Vertices are addressed by stable [`VertexId`]s. Internally each live vertex
//! occupies a matrix slot; removing a vertex drops its row and column and
//! shifts every higher slot down by one, so slots always form a dense range
//! in insertion order while ids never change.
//!
//! The matrix is symmetric: both cells of a vertex pair reference the same
//! [`Edge`]. Adjacency tests and edge insertion/removal are O(1); vertex
//! insertion/removal and neighbour enumeration scan a row or rebuild the
//! matrix and are O(n).

use std::collections::HashMap;
use std::fmt;
use std::iter::Enumerate;
use std::slice;

use tracing::{debug, trace};

use crate::error::GraphError;

/// Stable identifier of a vertex in a [`DynamicGraph`].
///
/// Ids are allocated per graph and never reused by that graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Stable identifier of an edge in a [`DynamicGraph`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Undirected weighted edge between two distinct vertices.
///
/// `from` and `to` keep the order the edge was inserted with.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<W> {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    weight: W,
}

impl<W> Edge<W> {
    /// Returns the edge identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> EdgeId { self.id }

    /// Returns the first endpoint as given at insertion.
    #[must_use]
    #[rustfmt::skip]
    pub fn from(&self) -> VertexId { self.from }

    /// Returns the second endpoint as given at insertion.
    #[must_use]
    #[rustfmt::skip]
    pub fn to(&self) -> VertexId { self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> &W { &self.weight }

    /// Returns the endpoint opposite `vertex`, or `None` when `vertex` is not
    /// an endpoint of this edge.
    #[must_use]
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.from {
            Some(self.to)
        } else if vertex == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// Consumes the edge and returns its weight.
    #[must_use]
    pub fn into_weight(self) -> W {
        self.weight
    }
}

/// Undirected graph with labelled vertices and weighted edges.
///
/// # Examples
/// ```
/// use fibforest_core::DynamicGraph;
///
/// let mut graph = DynamicGraph::new();
/// let a = graph.insert_vertex("a");
/// let b = graph.insert_vertex("b");
/// graph.insert_edge(a, b, 3_u32)?;
/// assert!(graph.are_adjacent(a, b)?);
/// assert_eq!(graph.neighbors(a)?.collect::<Vec<_>>(), vec![b]);
/// # Ok::<(), fibforest_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DynamicGraph<L, W> {
    // Live vertices in slot order, with their labels in the parallel vector.
    order: Vec<VertexId>,
    labels: Vec<L>,
    slots: HashMap<VertexId, usize>,
    adjacency: Vec<Vec<Option<EdgeId>>>,
    edges: HashMap<EdgeId, Edge<W>>,
    next_vertex: u64,
    next_edge: u64,
}

impl<L, W> Default for DynamicGraph<L, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, W> DynamicGraph<L, W> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            labels: Vec::new(),
            slots: HashMap::new(),
            adjacency: Vec::new(),
            edges: HashMap::new(),
            next_vertex: 0,
            next_edge: 0,
        }
    }

    /// Returns the number of live vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.order.len() }

    /// Returns the number of live edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns `true` when `vertex` is live in this graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.slots.contains_key(&vertex)
    }

    /// Returns `true` when `edge` is live in this graph.
    #[must_use]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Iterates over live vertices and their labels in slot order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &L)> + '_ {
        self.order.iter().copied().zip(&self.labels)
    }

    /// Iterates over live edges in no particular order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge<W>> + '_ {
        self.edges.values()
    }

    /// Adds an isolated vertex carrying `label` and returns its id.
    pub fn insert_vertex(&mut self, label: L) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;

        let slot = self.order.len();
        for row in &mut self.adjacency {
            row.push(None);
        }
        self.adjacency.push(vec![None; slot + 1]);
        self.order.push(id);
        self.labels.push(label);
        self.slots.insert(id, slot);

        debug!(vertex = %id, slot, "inserted vertex");
        id
    }

    /// Connects `from` and `to` with an undirected edge of the given weight.
    ///
    /// An existing edge between the same pair is replaced and its id retired.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either endpoint is not live
    /// and [`GraphError::SelfLoop`] when both endpoints are the same vertex.
    pub fn insert_edge(&mut self, from: VertexId, to: VertexId, weight: W) -> Result<EdgeId, GraphError> {
        let a = self.slot_of(from)?;
        let b = self.slot_of(to)?;
        if a == b {
            return Err(GraphError::SelfLoop { vertex: from });
        }

        if let Some(replaced) = self.adjacency[a][b] {
            self.edges.remove(&replaced);
            trace!(edge = %replaced, "replaced existing edge");
        }

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.adjacency[a][b] = Some(id);
        self.adjacency[b][a] = Some(id);
        self.edges.insert(
            id,
            Edge {
                id,
                from,
                to,
                weight,
            },
        );

        debug!(edge = %id, from = %from, to = %to, "inserted edge");
        Ok(id)
    }

    /// Removes `vertex` with all incident edges and returns its label.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `vertex` is not live.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Result<L, GraphError> {
        let slot = self.slot_of(vertex)?;
        let row = self.adjacency.remove(slot);
        let mut dropped = 0_usize;
        for edge in row.into_iter().flatten() {
            self.edges.remove(&edge);
            dropped += 1;
        }
        for row in &mut self.adjacency {
            row.remove(slot);
        }

        self.slots.remove(&vertex);
        self.order.remove(slot);
        for shifted in &self.order[slot..] {
            if let Some(index) = self.slots.get_mut(shifted) {
                *index -= 1;
            }
        }

        debug!(vertex = %vertex, slot, dropped_edges = dropped, "removed vertex");
        Ok(self.labels.remove(slot))
    }

    /// Removes `edge` and returns it.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownEdge`] when `edge` is not live.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<Edge<W>, GraphError> {
        let removed = self
            .edges
            .remove(&edge)
            .ok_or(GraphError::UnknownEdge { edge })?;
        let a = self.slot_of(removed.from)?;
        let b = self.slot_of(removed.to)?;
        self.adjacency[a][b] = None;
        self.adjacency[b][a] = None;

        debug!(edge = %edge, "removed edge");
        Ok(removed)
    }

    /// Returns `true` when an edge joins `a` and `b`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either vertex is not live.
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> Result<bool, GraphError> {
        Ok(self.cell(a, b)?.is_some())
    }

    /// Returns the edge joining `a` and `b`, if any.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either vertex is not live.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Result<Option<&Edge<W>>, GraphError> {
        Ok(self.cell(a, b)?.map(|id| self.resolve_edge(id)))
    }

    /// Returns the number of edges incident to `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `vertex` is not live.
    pub fn degree(&self, vertex: VertexId) -> Result<usize, GraphError> {
        let slot = self.slot_of(vertex)?;
        Ok(self.adjacency[slot].iter().flatten().count())
    }

    /// Iterates lazily over the vertices adjacent to `vertex` in slot order.
    ///
    /// The iterator is [`Clone`], so a copy taken before iteration restarts
    /// the enumeration.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `vertex` is not live.
    pub fn neighbors(&self, vertex: VertexId) -> Result<Neighbors<'_>, GraphError> {
        let slot = self.slot_of(vertex)?;
        Ok(Neighbors {
            row: self.adjacency[slot].iter().enumerate(),
            order: &self.order,
        })
    }

    /// Iterates lazily over `(neighbour, edge)` pairs of `vertex` in slot
    /// order.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `vertex` is not live.
    pub fn incident_edges(&self, vertex: VertexId) -> Result<IncidentEdges<'_, W>, GraphError> {
        let slot = self.slot_of(vertex)?;
        Ok(IncidentEdges {
            row: self.adjacency[slot].iter().enumerate(),
            order: &self.order,
            edges: &self.edges,
        })
    }

    /// Returns the label of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when `vertex` is not live.
    pub fn label(&self, vertex: VertexId) -> Result<&L, GraphError> {
        let slot = self.slot_of(vertex)?;
        Ok(&self.labels[slot])
    }

    /// Returns the live edge with the given id.
    #[must_use]
    pub fn edge(&self, edge: EdgeId) -> Option<&Edge<W>> {
        self.edges.get(&edge)
    }

    fn slot_of(&self, vertex: VertexId) -> Result<usize, GraphError> {
        self.slots
            .get(&vertex)
            .copied()
            .ok_or(GraphError::UnknownVertex { vertex })
    }

    fn cell(&self, a: VertexId, b: VertexId) -> Result<Option<EdgeId>, GraphError> {
        let a = self.slot_of(a)?;
        let b = self.slot_of(b)?;
        Ok(self.adjacency[a][b])
    }

    fn resolve_edge(&self, id: EdgeId) -> &Edge<W> {
        lookup_edge(&self.edges, id)
    }
}

fn lookup_edge<W>(edges: &HashMap<EdgeId, Edge<W>>, id: EdgeId) -> &Edge<W> {
    match edges.get(&id) {
        Some(edge) => edge,
        None => panic!("adjacency matrix references missing edge {id}"),
    }
}

/// Lazy iterator over the neighbours of a vertex.
///
/// Returned by [`DynamicGraph::neighbors`].
#[derive(Clone, Debug)]
pub struct Neighbors<'a> {
    row: Enumerate<slice::Iter<'a, Option<EdgeId>>>,
    order: &'a [VertexId],
}

impl Iterator for Neighbors<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let order = self.order;
        self.row
            .find_map(|(slot, cell)| cell.map(|_| order[slot]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.row.size_hint().1)
    }
}

/// Lazy iterator over `(neighbour, edge)` pairs of a vertex.
///
/// Returned by [`DynamicGraph::incident_edges`].
#[derive(Debug)]
pub struct IncidentEdges<'a, W> {
    row: Enumerate<slice::Iter<'a, Option<EdgeId>>>,
    order: &'a [VertexId],
    edges: &'a HashMap<EdgeId, Edge<W>>,
}

impl<W> Clone for IncidentEdges<'_, W> {
    fn clone(&self) -> Self {
        Self {
            row: self.row.clone(),
            order: self.order,
            edges: self.edges,
        }
    }
}

impl<'a, W> Iterator for IncidentEdges<'a, W> {
    type Item = (VertexId, &'a Edge<W>);

    fn next(&mut self) -> Option<Self::Item> {
        let (order, edges) = (self.order, self.edges);
        self.row
            .find_map(|(slot, cell)| cell.map(|id| (order[slot], lookup_edge(edges, id))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.row.size_hint().1)
    }
}
