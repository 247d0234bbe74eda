//! In-memory declaration graph built once per compilation snapshot.
//!
//! Nodes are type identities; edges are "extends" (class to base class) and
//! "implements" (type to interface, interface to super-interface). Capability
//! and ancestry questions are answered by reachability over these edges.

pub mod declaration_graph;
pub mod resolver;

pub use declaration_graph::{DeclarationGraph, TypeNode};
