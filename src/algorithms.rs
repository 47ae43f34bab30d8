//! Connectivity, breadth-first traversal and bipartiteness.
//!
//! All algorithms only read the graph and allocate their working state
//! (visited flags, colours, queues) per call, so repeated calls on the same
//! graph return the same results.
//!
//! ```rust
//! use adjgraph::graph::*;
//! use adjgraph::algorithms::*;
//!
//! let mut graph = Graph::new(4);
//! graph.add_edges(vec![(0,1),(1,2),(2,3),(3,0)]).unwrap();
//!
//! assert!(graph.is_connected());
//! assert_eq!(graph.bfs_order(0).unwrap(), vec![0,1,3,2]);
//!
//! let bip = graph.bipartition().unwrap();
//! assert_eq!(bip.group(Side::A), vec![0,2]);
//! assert_eq!(bip.group(Side::B), vec![1,3]);
//! ```
use std::collections::VecDeque;
use std::fmt;
use std::io::Write;

use fxhash::FxHashMap;
use tracing::{debug, trace};
use union_find_rs::prelude::{DisjointSets, UnionFind};

use crate::error::*;
use crate::graph::*;
use crate::iterators::Bfs;

/// One of the two sides of a bipartition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    A,
    B
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B")
        }
    }
}

/// A proper 2-colouring of a graph: every vertex is assigned to exactly one [Side].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    sides: Vec<Side>
}

impl Bipartition {
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    pub fn side_of(&self, u:Vertex) -> Option<Side> {
        self.sides.get(u).copied()
    }

    /// The vertices on `side` in increasing order.
    pub fn group(&self, side:Side) -> Vec<Vertex> {
        self.sides.iter().enumerate()
            .filter(|(_, s)| **s == side)
            .map(|(u, _)| u)
            .collect()
    }

    /// Maps each side that received at least one vertex to its vertices
    /// in increasing order.
    pub fn groups(&self) -> FxHashMap<Side, Vec<Vertex>> {
        let mut res:FxHashMap<Side, Vec<Vertex>> = FxHashMap::default();
        for (u, side) in self.sides.iter().enumerate() {
            res.entry(*side).or_default().push(u);
        }
        res
    }

    /// Tests whether every edge of `graph` crosses between the two sides.
    pub fn is_proper_for(&self, graph:&Graph) -> bool {
        self.len() == graph.num_vertices()
            && graph.edges().all(|(u,v)| self.sides[u] != self.sides[v])
    }
}

pub trait GraphAlgorithms {
    fn components(&self) -> Vec<VertexSet>;
    fn is_connected(&self) -> bool;

    fn bfs(&self, start:Vertex) -> Result<Bfs<'_>>;
    fn bfs_order(&self, start:Vertex) -> Result<Vec<Vertex>>;
    fn bfs_report<W: Write>(&self, start:Vertex, sink:W) -> Result<Vec<Vertex>>;

    fn bipartition(&self) -> Option<Bipartition>;
    fn is_bipartite(&self) -> bool {
        self.bipartition().is_some()
    }
}

impl GraphAlgorithms for Graph {
    /// Computes the vertex sets of all connected components.
    fn components(&self) -> Vec<VertexSet> {
        let mut dsets:DisjointSets<Vertex> = DisjointSets::with_capacity(self.num_vertices());

        for v in self.vertices() {
            // Vertices are distinct, so this cannot fail
            let _ = dsets.make_set(v);
        }

        for (u,v) in self.edges() {
            // Joining two members of the same set is not allowed
            match (dsets.find_set(&u), dsets.find_set(&v)) {
                (Ok(ru), Ok(rv)) if ru != rv => { let _ = dsets.union(&ru, &rv); }
                _ => {}
            }
        }

        let mut res = Vec::new();
        for comp in dsets {
            res.push(comp.iter().cloned().collect())
        }
        res
    }

    /// Tests whether every vertex can be reached from vertex `0`. Uses a depth-first
    /// search with an explicit stack, so memory stays within $O(n)$ regardless of the
    /// shape of the graph. The graph without vertices counts as connected.
    fn is_connected(&self) -> bool {
        let n = self.num_vertices();
        if n == 0 {
            return true
        }

        let mut visited = vec![false; n];
        let mut stack = vec![0];
        visited[0] = true;
        let mut seen = 1;

        while let Some(v) = stack.pop() {
            for u in self.neighbours(v) {
                if !visited[u] {
                    visited[u] = true;
                    seen += 1;
                    stack.push(u);
                }
            }
        }

        trace!(seen, n, "dfs from vertex 0 finished");
        seen == n
    }

    /// Breadth-first traversal from `start`, see [Bfs].
    fn bfs(&self, start:Vertex) -> Result<Bfs<'_>> {
        Bfs::new(self, start)
    }

    fn bfs_order(&self, start:Vertex) -> Result<Vec<Vertex>> {
        Ok(self.bfs(start)?.collect())
    }

    /// Runs a breadth-first traversal from `start` and writes every vertex to `sink`
    /// the moment it is visited, separated by spaces and terminated by a newline.
    /// Returns the visited vertices in the same order.
    fn bfs_report<W: Write>(&self, start:Vertex, mut sink:W) -> Result<Vec<Vertex>> {
        let mut order = Vec::new();
        for v in self.bfs(start)? {
            if order.is_empty() {
                write!(sink, "{v}")?;
            } else {
                write!(sink, " {v}")?;
            }
            order.push(v);
        }
        writeln!(sink)?;
        sink.flush()?;

        debug!(start, visited = order.len(), "bfs reported");
        Ok(order)
    }

    /// Computes a 2-colouring by a breadth-first colouring of each component,
    /// taken in order of their smallest vertex. The smallest vertex of every
    /// component lands on [Side::A], in particular every isolated vertex does.
    ///
    /// Returns `None` as soon as an edge with both endpoints on the same side is
    /// found anywhere, even if other components could be coloured.
    fn bipartition(&self) -> Option<Bipartition> {
        let mut colors:Vec<Option<Side>> = vec![None; self.num_vertices()];
        let mut queue = VecDeque::new();

        for root in self.vertices() {
            if colors[root].is_some() {
                continue;
            }

            colors[root] = Some(Side::A);
            queue.push_back(root);

            while let Some(v) = queue.pop_front() {
                let side = colors[v]?;
                for u in self.neighbours(v) {
                    match colors[u] {
                        None => {
                            colors[u] = Some(side.opposite());
                            queue.push_back(u);
                        }
                        Some(other) if other == side => {
                            debug!(u, v, "edge within one side, graph is not bipartite");
                            return None
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        // Every vertex was the root of a colouring or reached from one
        let sides = colors.into_iter().collect::<Option<Vec<Side>>>()?;
        Some(Bipartition { sides })
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn graph(n:usize, edges:&[Edge]) -> Graph {
        let mut G = Graph::new(n);
        G.add_edges(edges.iter().copied()).unwrap();
        G
    }

    fn cycle(n:usize) -> Graph {
        let mut G = Graph::new(n);
        for u in 0..n {
            G.add_edge(u, (u+1) % n).unwrap();
        }
        G
    }

    fn gnp(n:usize, p:f64, rng:&mut impl Rng) -> Graph {
        let mut G = Graph::new(n);
        for u in 0..n {
            for v in u+1..n {
                if rng.gen_bool(p) {
                    G.add_edge(u, v).unwrap();
                }
            }
        }
        G
    }

    /// An edge inside one BFS layer closes an odd cycle. Tries every root.
    fn has_odd_cycle(G:&Graph) -> bool {
        for root in G.vertices() {
            let mut dist = vec![usize::MAX; G.num_vertices()];
            dist[root] = 0;
            let mut queue = VecDeque::from(vec![root]);
            while let Some(v) = queue.pop_front() {
                for u in G.neighbours(v) {
                    if dist[u] == usize::MAX {
                        dist[u] = dist[v] + 1;
                        queue.push_back(u);
                    } else if dist[u] == dist[v] {
                        return true
                    }
                }
            }
        }
        false
    }

    #[test]
    fn four_cycle() {
        let G = graph(4, &[(0,1),(1,2),(2,3),(3,0)]);
        assert!(G.is_connected());
        assert_eq!(G.bfs_order(0).unwrap(), vec![0,1,3,2]);

        let bip = G.bipartition().unwrap();
        let groups = bip.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Side::A], vec![0,2]);
        assert_eq!(groups[&Side::B], vec![1,3]);
        assert!(bip.is_proper_for(&G));
    }

    #[test]
    fn triangle() {
        let G = graph(3, &[(0,1),(1,2),(2,0)]);
        assert!(G.is_connected());
        assert!(!G.is_bipartite());
        assert!(G.bipartition().is_none());
    }

    #[test]
    fn disjoint_edges() {
        let G = graph(4, &[(0,1),(2,3)]);
        assert!(!G.is_connected());
        assert_eq!(G.components().len(), 2);

        let bip = G.bipartition().unwrap();
        assert_eq!(bip.group(Side::A), vec![0,2]);
        assert_eq!(bip.group(Side::B), vec![1,3]);

        assert_eq!(G.bfs_order(2).unwrap(), vec![2,3]);
    }

    #[test]
    fn components_with_cycles() {
        let G = graph(4, &[(0,1),(1,2),(2,3),(3,0)]);
        assert_eq!(G.components(), vec![(0..4).collect::<VertexSet>()]);

        let G = graph(3, &[(0,1),(1,2),(2,0)]);
        assert_eq!(G.components().len(), 1);

        for n in 3..12 {
            assert_eq!(cycle(n).components().len(), 1);
        }

        // Triangle plus a 4-cycle with a chord, and an isolated vertex
        let G = graph(8, &[(0,1),(1,2),(2,0),(3,4),(4,5),(5,6),(6,3),(3,5)]);
        let mut sizes = G.components().iter().map(|comp| comp.len()).collect_vec();
        sizes.sort();
        assert_eq!(sizes, vec![1,3,4]);
    }

    #[test]
    fn empty_graph() {
        let G = Graph::new(0);
        assert!(G.is_connected());
        assert!(G.components().is_empty());
        assert!(matches!(G.bfs(0),
            Err(GraphError::OutOfRange { vertex: 0, vertex_count: 0 })));
        assert!(G.bipartition().unwrap().is_empty());
    }

    #[test]
    fn single_vertex() {
        let G = Graph::new(1);
        assert!(G.is_connected());
        assert_eq!(G.bfs_order(0).unwrap(), vec![0]);

        let groups = G.bipartition().unwrap().groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&Side::A], vec![0]);
    }

    #[test]
    fn isolated_vertices() {
        let G = graph(5, &[(1,3)]);
        let bip = G.bipartition().unwrap();
        assert_eq!(bip.group(Side::A), vec![0,1,2,4]);
        assert_eq!(bip.group(Side::B), vec![3]);
        assert_eq!(bip.side_of(3), Some(Side::B));
        assert_eq!(bip.side_of(5), None);
    }

    #[test]
    fn conflict_in_later_component() {
        // A path that colours fine, followed by a triangle
        let G = graph(6, &[(0,1),(1,2),(3,4),(4,5),(5,3)]);
        assert!(!G.is_bipartite());

        let G = graph(6, &[(0,1),(1,2),(3,4),(4,5)]);
        assert!(G.is_bipartite());
    }

    #[test]
    fn cycles() {
        for n in 3..12 {
            let G = cycle(n);
            assert!(G.is_connected());
            assert_eq!(G.is_bipartite(), n % 2 == 0);
            assert_eq!(G.bfs_order(0).unwrap().len(), n);
        }
    }

    #[test]
    fn bfs_levels() {
        // Star around 0 with a tail hanging off vertex 4
        let G = graph(7, &[(0,4),(0,2),(0,1),(4,5),(5,6),(1,3)]);
        assert_eq!(G.bfs_order(0).unwrap(), vec![0,1,2,4,3,5,6]);
        assert_eq!(G.bfs_order(6).unwrap(), vec![6,5,4,0,1,2,3]);
    }

    #[test]
    fn bfs_report() {
        let G = graph(4, &[(0,1),(1,2),(2,3),(3,0)]);
        let mut out:Vec<u8> = Vec::new();
        let order = G.bfs_report(0, &mut out).unwrap();
        assert_eq!(order, vec![0,1,3,2]);
        assert_eq!(String::from_utf8(out).unwrap(), "0 1 3 2\n");

        let mut out:Vec<u8> = Vec::new();
        assert!(G.bfs_report(4, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn random_graphs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let n = rng.gen_range(1..16);
            let p = rng.gen_range(0.0..0.5);
            let G = gnp(n, p, &mut rng);

            // Traversals cover exactly the component of their start
            let components = G.components();
            for comp in &components {
                let start = *comp.iter().min().unwrap();
                let order = G.bfs_order(start).unwrap();
                assert_eq!(order.len(), comp.len());
                assert_eq!(order.iter().copied().collect::<VertexSet>(), *comp);
                assert_eq!(order[0], start);
            }

            // Connectivity agrees with both traversal and union-find
            let reached = G.bfs_order(0).unwrap().into_iter().unique().count();
            assert_eq!(G.is_connected(), reached == n);
            assert_eq!(G.is_connected(), components.len() == 1);

            // Bipartite exactly when there is no odd cycle
            let bip = G.bipartition();
            assert_eq!(bip.is_some(), !has_odd_cycle(&G));
            if let Some(bip) = &bip {
                assert!(bip.is_proper_for(&G));
                for group in bip.groups().values() {
                    assert!(group.windows(2).all(|w| w[0] < w[1]));
                }
            }

            // Nothing depends on previous calls
            assert_eq!(G.is_connected(), G.is_connected());
            assert_eq!(G.bipartition(), bip);
            assert_eq!(G.bfs_order(n-1).unwrap(), G.bfs_order(n-1).unwrap());
        }
    }
}
