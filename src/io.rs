use crate::graph::{DirectedGraph, HashMapDiGraph, MutableDiGraph};
use fxhash::FxHashMap;
use std::convert::TryFrom;
use std::fmt::Debug;
use std::io;
use std::io::{BufRead, Write};

fn invalid_input(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

fn parse_pair(line: &str, skip: usize) -> Result<(usize, usize), io::Error> {
    let nums: Vec<Result<usize, std::num::ParseIntError>> = line
        .split_whitespace()
        .skip(skip)
        .map(|s| s.parse())
        .collect();
    match nums.as_slice() {
        [Ok(a), Ok(b)] => Ok((*a, *b)),
        _ => Err(invalid_input(format!("Invalid line: {}", line))),
    }
}

/// `p dg <n> <m>`
pub fn header(line: &str) -> Result<(usize, usize), io::Error> {
    if line.split_whitespace().nth(1) != Some("dg") {
        return Err(invalid_input(format!("Invalid header: {}", line)));
    }
    parse_pair(line, 2)
}

/// `<u> <v>`, 1-based. Returns 0-based vertex numbers.
pub fn edge(line: &str) -> Result<(usize, usize), io::Error> {
    let (u, v) = parse_pair(line, 0)?;
    if u == 0 || v == 0 {
        return Err(invalid_input(format!("Vertex numbers start at 1: {}", line)));
    }
    Ok((u - 1, v - 1))
}

/// Reads the line-oriented edge list format.
///
/// ```text
/// c comment
/// p dg <vertices> <edges>
/// 1 2
/// 2 3
/// ```
pub struct DigraphReader<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<DigraphReader<T>> for HashMapDiGraph {
    type Error = io::Error;

    fn try_from(reader: DigraphReader<T>) -> Result<Self, Self::Error> {
        let reader = reader.0;
        let mut graph: Option<HashMapDiGraph> = None;
        let mut expected_edges = 0;
        let mut order = 0;
        let mut edges_read = 0;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            match line.chars().next() {
                None | Some('c') => {}
                Some('p') => {
                    if graph.is_some() {
                        return Err(invalid_input("Duplicate header".to_string()));
                    }
                    let (n, m) = header(line)?;
                    let mut g = HashMapDiGraph::with_capacity(n);
                    for u in 0..n {
                        g.add_vertex(u);
                    }
                    order = n;
                    expected_edges = m;
                    graph = Some(g);
                }
                _ => {
                    let g = graph
                        .as_mut()
                        .ok_or_else(|| invalid_input("Edge before header".to_string()))?;
                    let (u, v) = edge(line)?;
                    if u >= order || v >= order {
                        return Err(invalid_input(format!("Vertex out of range: {}", line)));
                    }
                    let inserted = g
                        .add_edge(u, v)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    if !inserted {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("Duplicate edge: {}", line),
                        ));
                    }
                    edges_read += 1;
                }
            }
        }

        let graph = graph.ok_or_else(|| invalid_input("Missing header".to_string()))?;
        if edges_read != expected_edges {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Expected {} edges, read {}", expected_edges, edges_read),
            ));
        }
        Ok(graph)
    }
}

/// Writes a graph in the format read by [`DigraphReader`]. Vertices are
/// numbered by their position in the graph's vertex order, and each label is
/// kept as a comment line.
pub struct DigraphWriter<'a, G: DirectedGraph, W: Write> {
    graph: &'a G,
    writer: W,
}

impl<'a, G: DirectedGraph, W: Write> DigraphWriter<'a, G, W> {
    pub fn new(graph: &'a G, writer: W) -> Self {
        Self { graph, writer }
    }

    pub fn output(mut self) -> io::Result<()> {
        let numbers: FxHashMap<G::Vertex, usize> = self
            .graph
            .vertices()
            .enumerate()
            .map(|(i, v)| (v, i + 1))
            .collect();

        for (v, i) in self.graph.vertices().map(|v| (v, numbers[&v])) {
            writeln!(self.writer, "c v {} {}", i, label(&v))?;
        }
        writeln!(
            self.writer,
            "p dg {} {}",
            self.graph.order(),
            self.graph.edge_count()
        )?;
        for u in self.graph.vertices() {
            let mut successors: Vec<usize> =
                self.graph.successors(u).map(|v| numbers[&v]).collect();
            successors.sort_unstable();
            for v in successors {
                writeln!(self.writer, "{} {}", numbers[&u], v)?;
            }
        }
        self.writer.flush()
    }
}

fn label<V: Debug>(v: &V) -> String {
    format!("{:?}", v)
}
