//! Undirected graphs stored as a dense adjacency matrix.
//!
//! A [Graph] has a fixed number of vertices `0..n` which is decided at construction.
//! Edges are inserted symmetrically, so the matrix is always symmetric, and the
//! diagonal is never set. Graphs are usually built from a [RawMatrix] as produced by
//! the loader in [crate::io]:
//!
//! ```rust
//! use adjgraph::graph::*;
//!
//! let raw:RawMatrix = vec![vec![0,1,0],
//!                          vec![1,0,1],
//!                          vec![0,1,0]];
//! let graph = Graph::from_matrix(&raw).unwrap();
//! assert_eq!(graph.num_vertices(), 3);
//! assert_eq!(graph.num_edges(), 2);
//! assert_eq!(graph.neighbours(1).collect::<Vec<Vertex>>(), vec![0,2]);
//! ```

use std::ops::Range;

use fxhash::{FxHashMap, FxHashSet};

use crate::error::*;
use crate::iterators::*;

pub type Vertex = usize;
pub type Edge = (Vertex, Vertex);
pub type VertexSet = FxHashSet<Vertex>;
pub type VertexMap<T> = FxHashMap<Vertex, T>;
pub type EdgeSet = FxHashSet<Edge>;

/// A matrix exactly as it was read from input, before any validation.
pub type RawMatrix = Vec<Vec<i64>>;

/// Undirected graph on the vertices `0..n` backed by an `n × n` adjacency matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<bool>,
    n: usize,
    m: usize
}

impl Graph {
    /// Creates a graph with `n` vertices and no edges.
    ///
    /// Panics if an `n × n` matrix cannot be addressed, use [Graph::try_new]
    /// for counts that are not known to be small.
    pub fn new(n:usize) -> Graph {
        match Graph::num_cells(n) {
            Some(cells) => Graph { adj: vec![false; cells], n, m: 0 },
            None => panic!("Cannot create an adjacency matrix for {} vertices", n)
        }
    }

    /// Like [Graph::new] but for vertex counts coming from untrusted input.
    /// Negative counts and counts whose matrix cannot be allocated are rejected
    /// with [GraphError::InvalidSize].
    pub fn try_new(n:i64) -> Result<Graph> {
        let (size, cells) = usize::try_from(n).ok()
            .and_then(|size| Graph::num_cells(size).map(|cells| (size, cells)))
            .ok_or(GraphError::InvalidSize(n))?;

        let mut adj = Vec::new();
        adj.try_reserve_exact(cells).map_err(|_| GraphError::InvalidSize(n))?;
        adj.resize(cells, false);

        Ok(Graph { adj, n: size, m: 0 })
    }

    /// Builds a graph from a raw 0/1 matrix by inserting an edge for every entry
    /// that is `1`. The matrix is validated with [validate_matrix] before anything
    /// is indexed. Asymmetric entries are symmetrised and the diagonal is ignored.
    pub fn from_matrix(raw:&[Vec<i64>]) -> Result<Graph> {
        validate_matrix(raw)?;

        let mut G = Graph::new(raw.len());
        for (i, row) in raw.iter().enumerate() {
            for (j, _) in row.iter().enumerate().filter(|(_, x)| **x == 1) {
                G.add_edge(i, j)?;
            }
        }

        Ok(G)
    }

    /*
        Basic properties and queries
    */
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.m
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn contains(&self, u:Vertex) -> bool {
        u < self.n
    }

    /// Returns whether `u` and `v` are joined by an edge. Vertices outside
    /// the graph are not adjacent to anything.
    pub fn adjacent(&self, u:Vertex, v:Vertex) -> bool {
        self.contains(u) && self.contains(v) && self.adj[self.to_linear_pos(u, v)]
    }

    pub fn degree(&self, u:Vertex) -> usize {
        self.neighbours(u).count()
    }

    /*
        Iteration and access
    */
    pub fn vertices(&self) -> Range<Vertex> {
        0..self.n
    }

    /// Iterates over the neighbours of `u` in increasing order. Yields nothing
    /// if `u` is not a vertex of the graph.
    pub fn neighbours(&self, u:Vertex) -> NeighbourIterator<'_> {
        NeighbourIterator::new(self.row(u).unwrap_or(&[]))
    }

    /// Iterates over every edge once as a pair `(u,v)` with `u < v`.
    pub fn edges(&self) -> EdgeIterator<'_> {
        EdgeIterator::new(self)
    }

    /// The row of the adjacency matrix belonging to `u`.
    pub fn row(&self, u:Vertex) -> Option<&[bool]> {
        if !self.contains(u) {
            return None
        }
        let start = self.to_linear_pos(u, 0);
        Some(&self.adj[start..start+self.n])
    }

    /// Copies the adjacency matrix out as rows of zeros and ones, e.g. for rendering.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.adj.chunks(self.n.max(1))
            .take(self.n)
            .map(|row| row.iter().map(|&b| b as u8).collect())
            .collect()
    }

    /*
        Modification
    */

    /// Inserts the undirected edge `uv` and returns whether it was new.
    /// Loops are not part of the model, so `add_edge(u,u)` only checks the range.
    pub fn add_edge(&mut self, u:Vertex, v:Vertex) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v || self.adjacent(u, v) {
            return Ok(false)
        }

        let (uv, vu) = (self.to_linear_pos(u, v), self.to_linear_pos(v, u));
        self.adj[uv] = true;
        self.adj[vu] = true;
        self.m += 1;
        Ok(true)
    }

    /// Inserts all edges from `it`, stopping at the first invalid one.
    pub fn add_edges<I>(&mut self, it:I) -> Result<usize> where I: IntoIterator<Item=Edge> {
        let mut added = 0;
        for (u,v) in it {
            if self.add_edge(u, v)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub(crate) fn check_vertex(&self, u:Vertex) -> Result<()> {
        if self.contains(u) {
            Ok(())
        } else {
            Err(GraphError::OutOfRange { vertex: u, vertex_count: self.n })
        }
    }

    /// Number of matrix entries for `n` vertices, if that many fit into one allocation.
    fn num_cells(n:usize) -> Option<usize> {
        n.checked_mul(n).filter(|cells| *cells <= isize::MAX as usize)
    }

    fn to_linear_pos(&self, row:usize, col:usize) -> usize {
        row * self.n + col
    }
}

/// Checks that `raw` is square and only contains zeros and ones.
pub fn validate_matrix(raw:&[Vec<i64>]) -> Result<()> {
    let n = raw.len();
    for (i, row) in raw.iter().enumerate() {
        if row.len() != n {
            return Err(GraphError::malformed(
                format!("row {} has {} entries but the matrix has {} rows", i, row.len(), n)))
        }
        if let Some((j, x)) = row.iter().enumerate().find(|(_, x)| **x != 0 && **x != 1) {
            return Err(GraphError::malformed(
                format!("entry ({},{}) is {}, expected 0 or 1", i, j, x)))
        }
    }
    Ok(())
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
