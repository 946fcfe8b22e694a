//! Property-based tests for the minimum spanning forest builder.
//!
//! Checks the Prim forest against a sequential Kruskal oracle and validates
//! structural invariants (acyclicity, edge membership, `n - c` edge count)
//! across generated graphs, including graphs whose vertex slots have been
//! shifted by removals.

mod equivalence;
mod helpers;
mod oracle;
mod strategies;
mod structural;
mod types;
