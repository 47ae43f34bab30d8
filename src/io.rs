//! Reading and writing sets of adjacency matrices.
//!
//! A matrix file contains any number of matrices. Each row sits on its own line as
//! whitespace-separated integers and matrices are separated by one or more blank lines:
//! ```text
//! 0 1 1
//! 1 0 0
//! 1 0 0
//!
//! 0 1
//! 1 0
//! ```
//! Files ending in `.gz` are read and written gzip-compressed. The loader only checks
//! that every token is an integer; whether a matrix is a valid adjacency matrix is
//! decided when a [Graph] is built from it.
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::slice::Iter;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use itertools::Itertools;
use tracing::debug;

use crate::error::*;
use crate::graph::*;

pub trait WriteToFile {
    fn write_txt(&self, filename:&str) -> Result<()> {
        let file = File::create(filename)?;
        let buf = BufWriter::new(file);
        self.write_buf(Box::new(buf))
    }

    /// Writes gzip-compressed output. The stream is finished explicitly so that
    /// a failure to write the gzip trailer is reported.
    fn write_gzipped(&self, filename:&str) -> Result<()> {
        let file = File::create(filename)?;
        let mut gz = GzEncoder::new(file, Compression::default());
        self.write_buf(Box::new(BufWriter::new(&mut gz)))?;
        gz.finish()?;
        Ok(())
    }

    fn write_buf(&self, buf:Box<dyn Write + '_>) -> Result<()>;
}

pub trait LoadFromFile {
    fn from_txt(filename:&str) -> Result<Self> where Self: Sized {
        let buf = open_reader_txt(filename)?;
        Self::from_buf(buf)
    }

    fn from_gzipped(filename:&str) -> Result<Self> where Self: Sized {
        let buf = open_reader_gzip(filename)?;
        Self::from_buf(buf)
    }

    /// Picks plain text or gzip by the extension of `filename`.
    fn from_file(filename:&str) -> Result<Self> where Self: Sized {
        let buf = open_reader(filename)?;
        Self::from_buf(buf)
    }

    fn from_buf(buf:Box<dyn BufRead>) -> Result<Self> where Self: Sized;
}

/// The matrices of one input file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixSet {
    matrices: Vec<RawMatrix>
}

impl MatrixSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn get(&self, i:usize) -> Option<&RawMatrix> {
        self.matrices.get(i)
    }

    pub fn push(&mut self, matrix:RawMatrix) {
        self.matrices.push(matrix)
    }

    pub fn iter(&self) -> Iter<'_, RawMatrix> {
        self.matrices.iter()
    }

    /// Builds the graph for the `i`-th matrix, or `None` if there is no such matrix.
    pub fn graph(&self, i:usize) -> Option<Result<Graph>> {
        self.get(i).map(|raw| Graph::from_matrix(raw).map_err(|e| e.at_matrix(i)))
    }

    /// Builds a graph for every matrix. Fails on the first malformed matrix.
    pub fn graphs(&self) -> Result<Vec<Graph>> {
        self.iter().enumerate()
            .map(|(i, raw)| Graph::from_matrix(raw).map_err(|e| e.at_matrix(i)))
            .collect()
    }
}

impl FromIterator<RawMatrix> for MatrixSet {
    fn from_iter<I: IntoIterator<Item=RawMatrix>>(iter: I) -> Self {
        MatrixSet { matrices: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a MatrixSet {
    type Item = &'a RawMatrix;
    type IntoIter = Iter<'a, RawMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl LoadFromFile for MatrixSet {
    fn from_buf(buf:Box<dyn BufRead>) -> Result<Self> where Self: Sized {
        let mut res = MatrixSet::new();
        let mut current = RawMatrix::new();

        for (i, line) in buf.lines().enumerate() {
            let l = line?;
            let tokens:Vec<&str> = l.split_whitespace().collect();
            if tokens.is_empty() {
                if !current.is_empty() {
                    res.push(std::mem::take(&mut current));
                }
                continue;
            }

            let row = tokens.into_iter()
                .map(|t| parse_entry(t, i+1))
                .collect::<Result<Vec<_>>>()?;
            current.push(row);
        }

        if !current.is_empty() {
            res.push(current);
        }

        debug!(matrices = res.len(), "loaded adjacency matrices");
        Ok(res)
    }
}

impl WriteToFile for MatrixSet {
    fn write_buf(&self, mut buf:Box<dyn Write + '_>) -> Result<()> {
        for (i, matrix) in self.iter().enumerate() {
            if i > 0 {
                buf.write_all(b"\n")?;
            }
            write_matrix(&mut buf, matrix.iter().map(|row| row.iter().join(" ")))?;
        }
        buf.flush()?;
        Ok(())
    }
}

/// Writes the adjacency matrix of the graph, so that it loads back as a
/// [MatrixSet] with a single matrix.
impl WriteToFile for Graph {
    fn write_buf(&self, mut buf:Box<dyn Write + '_>) -> Result<()> {
        write_matrix(&mut buf, self.to_matrix().iter().map(|row| row.iter().join(" ")))?;
        buf.flush()?;
        Ok(())
    }
}

fn write_matrix<W, I>(buf:&mut W, rows:I) -> Result<()>
        where W: Write + ?Sized, I: Iterator<Item=String> {
    for row in rows {
        buf.write_all(row.as_bytes())?;
        buf.write_all(b"\n")?;
    }
    Ok(())
}

fn open_reader(filename:&str) -> Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let extension = path.extension().and_then(OsStr::to_str);
    let reader:Box<dyn BufRead> = match extension {
        Some("txt") => {
            let file = File::open(path)?;
            Box::new(BufReader::new(file))
        }
        Some("gz") => {
            let file = File::open(path)?;
            let gz = GzDecoder::new(file);
            Box::new(BufReader::new(gz))
        }
        _ => return Err(GraphError::UnsupportedFormat(filename.to_string()))
    };
    Ok(reader)
}

fn open_reader_txt(filename:&str) -> Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_reader_gzip(filename:&str) -> Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    let gz = GzDecoder::new(file);
    Ok(Box::new(BufReader::new(gz)))
}

fn parse_entry(s:&str, lineno:usize) -> Result<i64> {
    s.parse::<i64>().map_err(|_| GraphError::Parse { line: lineno, token: s.to_string() })
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
