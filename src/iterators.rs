use std::collections::VecDeque;
use std::iter::Enumerate;
use std::ops::Range;
use std::slice::Iter;

use tracing::trace;

use crate::error::*;
use crate::graph::{Edge, Graph, Vertex};

/*
    Neighbourhood iterator over one row of the adjacency matrix.
    Neighbours come out in increasing order.
*/
pub struct NeighbourIterator<'a> {
    row: Enumerate<Iter<'a, bool>>,
}

impl<'a> NeighbourIterator<'a> {
    pub fn new(row: &'a [bool]) -> NeighbourIterator<'a> {
        NeighbourIterator { row: row.iter().enumerate() }
    }
}

impl<'a> Iterator for NeighbourIterator<'a> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.row.find(|(_, adjacent)| **adjacent).map(|(v, _)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.row.size_hint().1)
    }
}

/*
    Edge iterator. Walks the vertices in order and, for each, the
    neighbours to its right.
*/
pub struct EdgeIterator<'a> {
    G: &'a Graph,
    v_it: Range<Vertex>,
    curr_v: Vertex,
    curr_it: Option<NeighbourIterator<'a>>,
}

impl<'a> EdgeIterator<'a> {
    pub fn new(G: &'a Graph) -> EdgeIterator<'a> {
        let mut res = EdgeIterator {
            G,
            v_it: G.vertices(),
            curr_v: Vertex::MAX,
            curr_it: None,
        };
        res.advance();
        res
    }

    fn advance(&mut self) {
        if let Some(v) = self.v_it.next() {
            self.curr_v = v;
            self.curr_it = Some(self.G.neighbours(v));
        } else {
            self.curr_it = None;
        }
    }
}

impl<'a> Iterator for EdgeIterator<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(it) = self.curr_it.as_mut() {
            let u = match it.next() {
                Some(u) => u,
                None => {
                    self.advance();
                    continue;
                }
            };

            // Tie-breaking so we only return every edge once
            if self.curr_v > u {
                continue;
            }
            return Some((self.curr_v, u));
        }

        None
    }
}

/// Lazy breadth-first traversal from a fixed start vertex.
///
/// Vertices are yielded in the order in which they leave the queue. Neighbours are
/// discovered in increasing order and marked as soon as they are enqueued, hence every
/// vertex of the start's component is yielded exactly once and no other vertex is
/// yielded at all. The iterator cannot be restarted; create a new one instead.
pub struct Bfs<'a> {
    G: &'a Graph,
    visited: Vec<bool>,
    queue: VecDeque<Vertex>,
}

impl<'a> Bfs<'a> {
    pub fn new(G: &'a Graph, start: Vertex) -> Result<Bfs<'a>> {
        G.check_vertex(start)?;

        let mut visited = vec![false; G.num_vertices()];
        visited[start] = true;

        Ok(Bfs { G, visited, queue: VecDeque::from(vec![start]) })
    }

    /// Whether `u` has been discovered so far.
    pub fn did_visit(&self, u: Vertex) -> bool {
        self.visited.get(u).copied().unwrap_or(false)
    }
}

impl<'a> Iterator for Bfs<'a> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.queue.pop_front()?;
        for u in self.G.neighbours(v) {
            if !self.visited[u] {
                self.visited[u] = true;
                self.queue.push_back(u);
            }
        }

        trace!(vertex = v, queued = self.queue.len(), "bfs visit");
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Everything still queued will be yielded, plus at most every undiscovered vertex
        let undiscovered = self.visited.iter().filter(|x| !**x).count();
        (self.queue.len(), Some(self.queue.len() + undiscovered))
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
