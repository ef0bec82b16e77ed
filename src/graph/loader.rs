//! METIS adjacency reader.
//!
//! Format: the first non-comment line is `<nodes> <edges> [fmt]`, then line
//! `i` (1-based) lists the neighbors of node `i`. Lines starting with `%`
//! are comments. An empty node line is an isolated node.
//!
//! Real-world files are not always clean, so the reader repairs what it can:
//! edges listed from only one endpoint are mirrored, duplicates and self
//! loops are dropped. Each repair is logged at `warn` level once per file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use super::types::{Adjacency, NodeId};
use crate::error::{JabejaError, Result};

/// Reads a METIS graph file from disk.
pub fn load_metis(path: impl AsRef<Path>) -> Result<Adjacency> {
    let path = path.as_ref();
    debug!("reading graph from {}", path.display());
    let file = File::open(path)?;
    parse_metis(BufReader::new(file))
}

/// Parses METIS adjacency text into symmetric, sorted neighbor lists.
///
/// # Examples
///
/// ```
/// use u_jabeja::graph::parse_metis;
///
/// let text = "3 2\n2\n1 3\n2\n";
/// let adj = parse_metis(text.as_bytes()).unwrap();
/// assert_eq!(adj[&2], vec![1, 3]);
/// ```
pub fn parse_metis<R: BufRead>(reader: R) -> Result<Adjacency> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|res| !matches!(res, Ok((_, l)) if l.trim_start().starts_with('%')));

    let (header_line, header) = loop {
        match lines.next() {
            Some(res) => {
                let (no, line) = res?;
                if !line.trim().is_empty() {
                    break (no, line);
                }
            }
            None => return Err(JabejaError::format(0, "missing header line")),
        }
    };
    let (num_nodes, num_edges) = parse_header(header_line, &header)?;

    let mut adjacency = Adjacency::new();
    let mut last_line = header_line;
    for res in lines {
        let (no, line) = res?;
        last_line = no;
        let current = adjacency.len() as NodeId;
        if current == num_nodes {
            if line.trim().is_empty() {
                continue;
            }
            return Err(JabejaError::format(
                no,
                format!("more node lines than the {num_nodes} declared"),
            ));
        }
        let neighbors = line
            .split_whitespace()
            .map(|token| {
                let neighbor: NodeId = token
                    .parse()
                    .map_err(|_| JabejaError::format(no, format!("invalid node id {token:?}")))?;
                if neighbor == 0 || neighbor > num_nodes {
                    return Err(JabejaError::format(
                        no,
                        format!("node id {neighbor} outside 1..={num_nodes}"),
                    ));
                }
                Ok(neighbor)
            })
            .collect::<Result<Vec<_>>>()?;
        adjacency.insert(current + 1, neighbors);
    }
    if (adjacency.len() as NodeId) < num_nodes {
        return Err(JabejaError::format(
            last_line,
            format!(
                "expected {num_nodes} node lines, found {} before end of input",
                adjacency.len()
            ),
        ));
    }

    symmetrize(&mut adjacency);

    let edges = adjacency.values().map(Vec::len).sum::<usize>() / 2;
    if edges != num_edges {
        warn!("header declares {num_edges} edges, graph has {edges}");
    }
    Ok(adjacency)
}

fn parse_header(line_no: usize, header: &str) -> Result<(NodeId, usize)> {
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(JabejaError::format(line_no, "header needs node and edge counts"));
    }
    let num_nodes = fields[0]
        .parse::<NodeId>()
        .map_err(|_| JabejaError::format(line_no, format!("invalid node count {:?}", fields[0])))?;
    let num_edges = fields[1]
        .parse::<usize>()
        .map_err(|_| JabejaError::format(line_no, format!("invalid edge count {:?}", fields[1])))?;
    if let Some(fmt) = fields.get(2) {
        if fmt.chars().any(|c| c != '0') {
            return Err(JabejaError::format(
                line_no,
                format!("weighted graphs (fmt {fmt}) are not supported"),
            ));
        }
    }
    Ok((num_nodes, num_edges))
}

/// Mirrors one-sided edges, drops self loops and duplicates, sorts lists.
fn symmetrize(adjacency: &mut Adjacency) {
    let mut self_loops = 0usize;
    let mut mirrored = 0usize;

    let mut missing = Vec::new();
    for (&id, neighbors) in adjacency.iter_mut() {
        let before = neighbors.len();
        neighbors.retain(|&n| n != id);
        self_loops += before - neighbors.len();
        neighbors.sort_unstable();
        neighbors.dedup();
    }
    for (&id, neighbors) in adjacency.iter() {
        for &n in neighbors {
            if adjacency.get(&n).is_some_and(|back| back.binary_search(&id).is_err()) {
                missing.push((n, id));
            }
        }
    }
    for (at, add) in missing {
        if let Some(list) = adjacency.get_mut(&at) {
            list.push(add);
            mirrored += 1;
        }
    }
    if mirrored > 0 {
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
        }
        warn!("mirrored {mirrored} one-sided edges");
    }
    if self_loops > 0 {
        warn!("dropped {self_loops} self loops");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_graph() {
        let adj = parse_metis("% comment\n3 2\n2\n1 3\n2\n".as_bytes()).unwrap();
        assert_eq!(adj.len(), 3);
        assert_eq!(adj[&1], vec![2]);
        assert_eq!(adj[&2], vec![1, 3]);
        assert_eq!(adj[&3], vec![2]);
    }

    #[test]
    fn test_isolated_node_line() {
        let adj = parse_metis("3 1\n2\n1\n\n".as_bytes()).unwrap();
        assert!(adj[&3].is_empty());
    }

    #[test]
    fn test_one_sided_edges_mirrored() {
        let adj = parse_metis("3 2\n2 3\n\n\n".as_bytes()).unwrap();
        assert_eq!(adj[&1], vec![2, 3]);
        assert_eq!(adj[&2], vec![1]);
        assert_eq!(adj[&3], vec![1]);
    }

    #[test]
    fn test_self_loops_and_duplicates_dropped() {
        let adj = parse_metis("2 1\n1 2 2\n1\n".as_bytes()).unwrap();
        assert_eq!(adj[&1], vec![2]);
        assert_eq!(adj[&2], vec![1]);
    }

    #[test]
    fn test_huge_header_with_no_body_fails_fast() {
        let err = parse_metis("4294967295 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::GraphFormat { line: 1, .. }));
    }

    #[test]
    fn test_missing_node_lines_report_last_line() {
        let err = parse_metis("% c\n3 2\n2\n1 3\n".as_bytes()).unwrap_err();
        match err {
            JabejaError::GraphFormat { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("found 2"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_trailing_blank_lines_ok() {
        assert!(parse_metis("2 1\n2\n1\n\n\n".as_bytes()).is_ok());
    }

    #[test]
    fn test_out_of_range_id() {
        let err = parse_metis("2 1\n3\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::GraphFormat { line: 2, .. }));
    }

    #[test]
    fn test_bad_token() {
        let err = parse_metis("2 1\nx\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, JabejaError::GraphFormat { line: 2, .. }));
    }

    #[test]
    fn test_too_few_lines() {
        assert!(matches!(
            parse_metis("3 1\n2\n1\n".as_bytes()),
            Err(JabejaError::GraphFormat { .. })
        ));
    }

    #[test]
    fn test_too_many_lines() {
        assert!(matches!(
            parse_metis("1 0\n\n1\n".as_bytes()),
            Err(JabejaError::GraphFormat { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_or_bad_header() {
        assert!(parse_metis("".as_bytes()).is_err());
        assert!(parse_metis("7\n".as_bytes()).is_err());
        assert!(parse_metis("2 1 011\n2\n1\n".as_bytes()).is_err());
        assert!(parse_metis("2 1 000\n2\n1\n".as_bytes()).is_ok());
    }
}
