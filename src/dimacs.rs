use std::fs;

use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, terminated, tuple};
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::{BitGraph, GraphBuilder};

/** errors that prevent reading a DIMACS instance */
#[derive(Debug, Error)]
pub enum DimacsError {
    /// the file cannot be read
    #[error("unable to read {filename}: {source}")]
    Io {
        /// file name
        filename: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },
    /// no valid `p <type> <n> <m>` line
    #[error("no problem line (p edge <n> <m>) found")]
    MissingHeader,
}

/** graph read from a DIMACS instance, along with what was declared and skipped */
#[derive(Debug, Clone)]
pub struct DimacsGraph {
    /// the graph
    pub graph: BitGraph,
    /// number of edges declared in the header
    pub declared_edges: usize,
    /// number of lines ignored because they were malformed or invalid
    pub nb_skipped_lines: usize,
}

/// reads an instance from file
pub fn read_from_file(filename:&str) -> Result<DimacsGraph, DimacsError> {
    let content = fs::read_to_string(filename)
        .map_err(|source| DimacsError::Io { filename: filename.to_string(), source })?;
    read_from_str(&content)
}

/** reads an instance from its textual description.
Comments and unknown lines are ignored. Malformed edge lines, out-of-range
endpoints and self-loops are skipped (and counted).
*/
pub fn read_from_str(s:&str) -> Result<DimacsGraph, DimacsError> {
    let mut builder:Option<GraphBuilder> = None;
    let mut declared_edges = 0;
    let mut nb_skipped_lines = 0;
    for (i,raw_line) in s.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r').trim();
        let line_number = i+1;
        match line.chars().next() {
            None | Some('c') => {},
            Some('p') => {
                match read_header(line) {
                    Ok(_) if builder.is_some() => {
                        warn!("line {}: duplicate problem line skipped", line_number);
                        nb_skipped_lines += 1;
                    },
                    Ok((_,(n,m))) => {
                        builder = Some(GraphBuilder::new(n));
                        declared_edges = m;
                    },
                    Err(_) => {
                        warn!("line {}: malformed problem line skipped: {}", line_number, line);
                        nb_skipped_lines += 1;
                    }
                }
            },
            Some('e') => {
                match (read_edge(line), builder.as_mut()) {
                    (Ok((_,(a,b))), Some(b_graph)) => {
                        if !b_graph.add_dimacs_edge(a, b) {
                            warn!("line {}: invalid edge ({},{}) skipped", line_number, a, b);
                            nb_skipped_lines += 1;
                        }
                    },
                    (Ok(_), None) => {
                        warn!("line {}: edge before the problem line skipped", line_number);
                        nb_skipped_lines += 1;
                    },
                    (Err(_), _) => {
                        warn!("line {}: malformed edge line skipped: {}", line_number, line);
                        nb_skipped_lines += 1;
                    }
                }
            },
            Some(_) => { debug!("line {}: ignored", line_number); }
        }
    }
    let builder = builder.ok_or(DimacsError::MissingHeader)?;
    // some generators declare each edge twice
    if builder.nb_edges() != declared_edges && 2*builder.nb_edges() != declared_edges {
        warn!("expected {} edges, but read {} distinct edges", declared_edges, builder.nb_edges());
    }
    Ok(DimacsGraph { graph: builder.build(), declared_edges, nb_skipped_lines })
}

/** writes the graph in the DIMACS format (1-indexed) */
pub fn to_dimacs_string(inst:&BitGraph) -> String {
    let mut res = format!("p edge {} {}\n", inst.nb_vertices(), inst.nb_edges());
    for u in inst.vertices() {
        for v in inst.neighbors(u).filter(|v| *v > u) {
            res += format!("e {} {}\n", u+1, v+1).as_str();
        }
    }
    res
}

/// reads a non-negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two integers separated (and followed) by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining, (n1, _, n2)) = all_consuming(terminated(
        tuple((read_integer, space1, read_integer)),
        space0
    ))(s)?;
    Ok((remaining, (n1, n2)))
}

/// reads header containing (n,m): `p <type> <n> <m>`
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alpha1, space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}
