//! Connectivity, breadth-first traversal and bipartiteness for small undirected
//! graphs given as adjacency matrices.
//!
//! Matrices are loaded from plain or gzipped text files (see [io]), turned into
//! [Graph](graph::Graph)s and analysed with the methods of
//! [GraphAlgorithms](algorithms::GraphAlgorithms):
//!
//! ```rust
//! use std::io::Cursor;
//! use adjgraph::algorithms::*;
//! use adjgraph::io::*;
//!
//! let input = "0 1 1\n1 0 1\n1 1 0\n\n0 1 0\n1 0 0\n0 0 0\n";
//! let matrices = MatrixSet::from_buf(Box::new(Cursor::new(input))).unwrap();
//! let graphs = matrices.graphs().unwrap();
//!
//! // A triangle is connected but not bipartite
//! assert!(graphs[0].is_connected());
//! assert!(!graphs[0].is_bipartite());
//!
//! // A single edge plus an isolated vertex
//! assert!(!graphs[1].is_connected());
//! assert_eq!(graphs[1].bfs_order(1).unwrap(), vec![1,0]);
//! ```
//!
//! Front-ends that let a user pick a matrix and an action can keep their state in
//! a [Session](session::Session).
#![allow(non_snake_case)]

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod io;
pub mod iterators;
pub mod session;

pub use error::{GraphError, Result};
