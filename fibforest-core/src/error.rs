//! Error types for the fibforest core library.
//!
//! Each error enum exposes a stable machine-readable code so the CLI can log
//! failures without matching on display strings.

use std::fmt;

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::FibonacciHeap`] handle operations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum HeapError {
    /// `decrease_key` was asked to raise the key of an element.
    #[error("new key is greater than the current key")]
    KeyIncrease,
    /// The handle does not refer to an element currently held by this heap.
    #[error("handle does not refer to an element of this heap")]
    StaleHandle,
}

define_error_codes! {
    /// Stable codes describing [`HeapError`] variants.
    enum HeapErrorCode for HeapError {
        /// `decrease_key` was asked to raise the key of an element.
        KeyIncrease => KeyIncrease => "HEAP_KEY_INCREASE",
        /// The handle does not refer to an element currently held by this heap.
        StaleHandle => StaleHandle => "HEAP_STALE_HANDLE",
    }
}

/// An error produced by [`crate::DynamicGraph`] operations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The vertex was never inserted or has been removed.
    #[error("vertex {vertex} is not present in the graph")]
    UnknownVertex {
        /// The missing vertex.
        vertex: VertexId,
    },
    /// The edge was never inserted or has been removed.
    #[error("edge {edge} is not present in the graph")]
    UnknownEdge {
        /// The missing edge.
        edge: EdgeId,
    },
    /// Both endpoints of a requested edge are the same vertex.
    #[error("edge endpoints must differ, got {vertex} twice")]
    SelfLoop {
        /// The repeated endpoint.
        vertex: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The vertex was never inserted or has been removed.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// The edge was never inserted or has been removed.
        UnknownEdge => UnknownEdge { .. } => "GRAPH_UNKNOWN_EDGE",
        /// Both endpoints of a requested edge are the same vertex.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
    }
}

/// Errors returned while computing a minimum spanning forest.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum MsfError {
    /// The supplied "zero" sentinel compares greater than "infinity".
    #[error("zero sentinel must not exceed the infinity sentinel")]
    InvalidSentinels,
    /// The frontier queue rejected an operation, indicating a logic error.
    #[error("frontier queue failed: {0}")]
    Heap(#[from] HeapError),
    /// The graph rejected a query for one of its own vertices.
    #[error("graph query failed: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`MsfError`] variants.
    enum MsfErrorCode for MsfError {
        /// The supplied "zero" sentinel compares greater than "infinity".
        InvalidSentinels => InvalidSentinels => "MSF_INVALID_SENTINELS",
        /// The frontier queue rejected an operation.
        Heap => Heap(..) => "MSF_HEAP_FAILURE",
        /// The graph rejected a query for one of its own vertices.
        Graph => Graph(..) => "MSF_GRAPH_FAILURE",
    }
}

impl MsfError {
    /// Retrieve the inner [`HeapErrorCode`] when the error originated in the frontier queue.
    #[must_use]
    pub const fn heap_code(&self) -> Option<HeapErrorCode> {
        match self {
            Self::Heap(error) => Some(error.code()),
            Self::InvalidSentinels | Self::Graph(_) => None,
        }
    }

    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the graph store.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            Self::InvalidSentinels | Self::Heap(_) => None,
        }
    }
}
