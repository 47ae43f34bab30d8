//! Explicit state for front-ends that let a user pick one of the loaded
//! matrices and run analyses on it.
//!
//! ```rust
//! use adjgraph::io::MatrixSet;
//! use adjgraph::session::Session;
//!
//! let matrices:MatrixSet = vec![vec![vec![0i64,1],vec![1,0]]].into_iter().collect();
//! let mut session = Session::new(matrices);
//! assert_eq!(session.labels(), vec!["Matrix 1"]);
//!
//! session.select(0).unwrap();
//! assert!(session.check_connectivity().unwrap());
//! assert_eq!(session.traverse(1).unwrap(), vec![1,0]);
//! ```
use tracing::debug;

use crate::algorithms::*;
use crate::error::*;
use crate::graph::*;
use crate::io::*;

#[derive(Debug, Clone, Default)]
pub struct Session {
    matrices: MatrixSet,
    selected: Option<usize>
}

impl Session {
    pub fn new(matrices:MatrixSet) -> Self {
        Session { matrices, selected: None }
    }

    /// Loads all matrices from `filename`, see [LoadFromFile::from_file].
    pub fn load(filename:&str) -> Result<Self> {
        let matrices = MatrixSet::from_file(filename)?;
        debug!(filename, matrices = matrices.len(), "session loaded");
        Ok(Session::new(matrices))
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn matrices(&self) -> &MatrixSet {
        &self.matrices
    }

    /// Display names of the loaded matrices, numbered from one.
    pub fn labels(&self) -> Vec<String> {
        (1..=self.len()).map(|i| format!("Matrix {i}")).collect()
    }

    pub fn select(&mut self, index:usize) -> Result<()> {
        if index >= self.len() {
            return Err(GraphError::InvalidSelection { index, count: self.len() })
        }
        debug!(index, "matrix selected");
        self.selected = Some(index);
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Builds a fresh graph from the selected matrix.
    pub fn graph(&self) -> Result<Graph> {
        let index = self.selected.ok_or(GraphError::NoSelection)?;
        self.matrices.graph(index)
            .unwrap_or(Err(GraphError::InvalidSelection { index, count: self.len() }))
    }

    pub fn check_connectivity(&self) -> Result<bool> {
        Ok(self.graph()?.is_connected())
    }

    /// Breadth-first order from `start` in the selected graph.
    pub fn traverse(&self, start:Vertex) -> Result<Vec<Vertex>> {
        self.graph()?.bfs_order(start)
    }

    pub fn bipartition(&self) -> Result<Option<Bipartition>> {
        Ok(self.graph()?.bipartition())
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

    #[test]
    fn selection() {
        let mut session = Session::load("resources/matrices.txt").unwrap();
        assert_eq!(session.len(), 5);
        assert_eq!(session.labels()[4], "Matrix 5");
        assert_eq!(session.selected(), None);
        assert!(matches!(session.graph(), Err(GraphError::NoSelection)));
        assert!(matches!(session.check_connectivity(), Err(GraphError::NoSelection)));

        assert!(matches!(session.select(5),
            Err(GraphError::InvalidSelection { index: 5, count: 5 })));
        assert_eq!(session.selected(), None);

        session.select(2).unwrap();
        assert_eq!(session.selected(), Some(2));
        assert!(!session.check_connectivity().unwrap());
        assert_eq!(session.traverse(3).unwrap(), vec![3,2]);

        let bip = session.bipartition().unwrap().unwrap();
        assert_eq!(bip.group(Side::A), vec![0,2]);
        assert_eq!(bip.group(Side::B), vec![1,3]);
    }

    #[test]
    fn actions() {
        let mut session = Session::load("resources/matrices.txt").unwrap();

        session.select(0).unwrap();
        assert!(session.check_connectivity().unwrap());
        assert_eq!(session.traverse(0).unwrap(), vec![0,1,3,2]);
        assert!(matches!(session.traverse(4),
            Err(GraphError::OutOfRange { vertex: 4, vertex_count: 4 })));

        session.select(1).unwrap();
        assert!(session.bipartition().unwrap().is_none());

        // Selecting again gives the same results
        session.select(0).unwrap();
        assert_eq!(session.traverse(0).unwrap(), vec![0,1,3,2]);
    }

    #[test]
    fn malformed_selection() {
        let matrices:MatrixSet = vec![vec![vec![0i64,1,0], vec![1,0,1]]].into_iter().collect();
        let mut session = Session::new(matrices);
        session.select(0).unwrap();
        assert!(matches!(session.check_connectivity(),
            Err(GraphError::MalformedMatrix { index: Some(0), .. })));
    }

    #[test]
    fn empty_session() {
        let mut session = Session::default();
        assert!(session.is_empty());
        assert!(session.labels().is_empty());
        assert!(matches!(session.select(0),
            Err(GraphError::InvalidSelection { index: 0, count: 0 })));
    }
}
