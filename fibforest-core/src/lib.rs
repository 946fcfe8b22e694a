//! Fibforest core library.
//!
//! Provides a Fibonacci heap priority queue, a dynamic adjacency-matrix graph
//! store, and a Prim-style minimum spanning forest builder that uses the heap
//! as its frontier.

mod error;
mod graph;
mod heap;
mod msf;
#[cfg(test)]
mod test_utils;
mod weight;

pub use crate::{
    error::{
        GraphError, GraphErrorCode, HeapError, HeapErrorCode, MsfError, MsfErrorCode,
    },
    graph::{DynamicGraph, Edge, EdgeId, IncidentEdges, Neighbors, VertexId},
    heap::{FibonacciHeap, HeapHandle},
    msf::{MinimumSpanningForest, minimum_spanning_forest},
    weight::Weight,
};
