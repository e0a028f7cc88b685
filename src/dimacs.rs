use std::fs;

use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_until};
use nom::error::Error;
use nom::IResult;

use crate::graph::{ColorMap, Graph, VertexId};

/** reads a graph from a DIMACS edge-list file. Vertex ids are kept 1-based
as in the format; duplicate `e` lines and both orientations of the same edge
collapse into one undirected edge. */
pub fn read_from_file(filename: &str) -> Graph {
    let raw = fs::read_to_string(filename)
        .unwrap_or_else(|_| panic!("dimacs: unable to read file {}", filename))
        .replace('\r', "");
    read_from_str(raw.as_str())
}

/// reads a graph from DIMACS text
pub fn read_from_str(s: &str) -> Graph {
    let body = skip_comments(s).expect("dimacs: malformed comment block").0;
    let (mut rest, (n, m)) = read_header(body).expect("dimacs: missing header");
    let mut graph = Graph::with_vertices(n);
    let mut check_nb_edges = 0;
    while match read_edge(rest) {
        Ok((tmp, (a, b))) => {
            rest = tmp;
            graph.add_edge(a, b);
            check_nb_edges += 1;
            true
        }
        Err(_) => false,
    } {}
    assert!(
        check_nb_edges == m || 2 * check_nb_edges == m,
        "check: {}\t m: {}", check_nb_edges, m
    );
    graph
}

/** writes a graph as DIMACS text (header plus one `e` line per edge) */
pub fn graph_to_string(graph: &Graph) -> String {
    let edges = graph.edges();
    let mut res = format!("p edge {} {}\n", graph.nb_vertices(), edges.len());
    for (a, b) in edges {
        res += format!("e {} {}\n", a, b).as_str();
    }
    res
}

/// writes a graph into a DIMACS file
pub fn write_to_file(graph: &Graph, filename: &str) {
    fs::write(filename, graph_to_string(graph))
        .unwrap_or_else(|_| panic!("dimacs: unable to write the graph in {}", filename));
}

/** writes a string encoding a coloring, one line of vertex ids per color
class, classes ordered by color */
pub fn solution_to_string(colors: &ColorMap) -> String {
    let mut classes: Vec<(usize, Vec<VertexId>)> = Vec::new();
    for (&v, &c) in colors {
        match classes.iter_mut().find(|(cls, _)| *cls == c) {
            Some((_, members)) => members.push(v),
            None => classes.push((c, vec![v])),
        }
    }
    classes.sort_by_key(|(c, _)| *c);
    let mut res = String::default();
    for (_, members) in classes {
        for v in members {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    res
}

/// writes a coloring into a file, one color class per line
pub fn write_solution(filename: &str, colors: &ColorMap) {
    fs::write(filename, solution_to_string(colors))
        .unwrap_or_else(|_| panic!("write_solution: unable to write the solution in {}", filename));
}

/// skips a single comment
fn skip_comment(s: &str) -> IResult<&str, &str> {
    let (remaining, _) = tag("c")(s)?;
    let (remaining2, _) = take_until("\n")(remaining)?;
    let n: usize = 1;
    take(n)(remaining2)
}

/// skips all comments
pub fn skip_comments(s: &str) -> IResult<&str, Vec<&str>> {
    nom::multi::many0(skip_comment)(s)
}

/// reads two numbers separated by a space
fn read_two_integers(s: &str) -> IResult<&str, (usize, usize)> {
    let (remaining1, s1) = nom::character::complete::digit1(s)?;
    let n1 = s1.parse::<usize>().unwrap();
    let usize_1: usize = 1;
    let (remaining2, _) = take(usize_1)(remaining1)?;
    let (remaining3, s2) = nom::character::complete::digit1(remaining2)?;
    let n2 = s2.parse::<usize>().unwrap();
    match remaining3.as_bytes().first() {
        Some(b) if nom::character::is_newline(*b) => {
            match take::<usize, &str, Error<&str>>(usize_1)(remaining3) {
                Ok((remaining4, _)) => Ok((remaining4, (n1, n2))),
                Err(_) => Ok((remaining3, (n1, n2))),
            }
        }
        _ => Ok((remaining3, (n1, n2))),
    }
}

/// reads header containing (n,m)
pub fn read_header(s: &str) -> IResult<&str, (usize, usize)> {
    let (remaining, _) = alt((tag("p edge "), tag("p col ")))(s)?;
    read_two_integers(remaining)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s: &str) -> IResult<&str, (usize, usize)> {
    let (remaining, _) = tag("e ")(s)?;
    read_two_integers(remaining)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let s = "c 2x2 grid\np edge 4 4\ne 1 2\ne 2 4\ne 4 3\ne 3 1\n";
        let g = read_from_str(s);
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
        assert_eq!(g.live_neighbors(1), vec![2, 3]);
    }

    #[test]
    fn test_read_comments() {
        let s = "c this is a test comment\np edge 2 1\ne 1 2";
        assert_eq!(
            skip_comments(s),
            Ok(("p edge 2 1\ne 1 2", vec!["\n"]))
        );
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2, 1));
    }

    #[test]
    fn test_read_header_col() {
        let s = "p col 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2, 1));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2\n";
        assert_eq!(read_edge(s).unwrap().1, (1, 2));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let s = "p edge 3 4\ne 1 2\ne 2 1\ne 2 3\ne 2 3\n";
        let g = read_from_str(s);
        assert_eq!(g.nb_edges(), 2);
    }

    #[test]
    fn test_write_round_trip() {
        let s = "p edge 5 4\ne 1 2\ne 2 3\ne 3 4\ne 4 5\n";
        let g = read_from_str(s);
        let out = graph_to_string(&g);
        let back = read_from_str(out.as_str());
        assert_eq!(back.nb_vertices(), g.nb_vertices());
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn test_solution_to_string() {
        let colors: ColorMap = vec![(1, 1), (2, 2), (3, 1), (4, 3)].into_iter().collect();
        assert_eq!(solution_to_string(&colors), "1 3 \n2 \n4 \n");
    }
}
