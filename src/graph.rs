use crate::{book::Book, point::Point};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
};
use std::{collections::HashMap, fmt};

/// Guide can help finding the node of a particular point
pub type Guide<'a> = HashMap<&'a str, NodeIndex>;

/// A story map: nodes are point names, edges are the ways between them.
/// Edges leaving a decision carry the keyword that takes them.
pub type StoryGraph<'a> = DiGraph<&'a str, Option<&'a str>>;

struct Way<'a> {
    from: NodeIndex,
    keyword: Option<&'a str>,
    to: &'a str,
}

fn node_pass<'a>(
    graph: &mut StoryGraph<'a>,
    guide: &mut Guide<'a>,
    ways: &mut Vec<Way<'a>>,
    book: &'a Book,
) {
    let mut points: Vec<_> = book.points().collect();
    points.sort_unstable_by_key(|(name, _)| *name);
    for (name, point) in points {
        let from = graph.add_node(name);
        guide.insert(name, from);
        ways.extend(
            point
                .successors()
                .into_iter()
                .map(|(keyword, to)| Way { from, keyword, to }),
        );
    }
}

fn edge_pass<'a>(graph: &mut StoryGraph<'a>, guide: &Guide<'a>, ways: &[Way<'a>]) {
    for way in ways {
        if let Some(to) = guide.get(way.to) {
            graph.add_edge(way.from, *to, way.keyword);
        }
    }
}

/// Something in a book that will go wrong, or likely surprise, when it's told
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Issue<'a> {
    NoStartPoint,
    UnknownStartPoint(&'a str),
    /// `from` leads to a point that doesn't exist
    DanglingReference { from: &'a str, to: &'a str },
    Unreachable(&'a str),
    /// Keywords of `point` where one is a prefix of the other
    KeywordCollision {
        point: &'a str,
        first: &'a str,
        second: &'a str,
    },
}

impl fmt::Display for Issue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStartPoint => write!(f, "no start point set"),
            Self::UnknownStartPoint(name) => write!(f, "start point `{name}` doesn't exist"),
            Self::DanglingReference { from, to } => {
                write!(f, "`{from}` leads to `{to}`, which doesn't exist")
            }
            Self::Unreachable(name) => write!(f, "`{name}` can't be reached from the start"),
            Self::KeywordCollision {
                point,
                first,
                second,
            } => write!(
                f,
                "`{point}` has keywords `{first}` and `{second}` where one is a prefix of the other"
            ),
        }
    }
}

impl Book {
    /// Story map of the points currently in the book. Ways to missing points are left out.
    #[must_use]
    pub fn graph(&self) -> (Guide<'_>, StoryGraph<'_>) {
        let mut graph = DiGraph::new();
        let mut guide = HashMap::new();
        let mut ways = Vec::new();
        node_pass(&mut graph, &mut guide, &mut ways, self);
        edge_pass(&mut graph, &guide, &ways);
        (guide, graph)
    }

    /// Looks for missing and unreachable points and ambiguous keywords.
    /// Telling the story is never affected.
    #[must_use]
    pub fn check(&self) -> Vec<Issue<'_>> {
        let (guide, graph) = self.graph();
        let mut issues = Vec::new();
        let start = match self.start() {
            None => {
                issues.push(Issue::NoStartPoint);
                None
            }
            Some(name) => {
                let start = guide.get(name).copied();
                if start.is_none() {
                    issues.push(Issue::UnknownStartPoint(name));
                }
                start
            }
        };
        for index in graph.node_indices() {
            let from = graph[index];
            let Some(point) = self.point(from) else {
                continue;
            };
            for (_, to) in point.successors() {
                if !guide.contains_key(to) {
                    issues.push(Issue::DanglingReference { from, to });
                }
            }
            if let Point::Decision { options, .. } = point {
                issues.extend(
                    options
                        .collisions()
                        .into_iter()
                        .map(|(first, second)| Issue::KeywordCollision {
                            point: from,
                            first,
                            second,
                        }),
                );
            }
        }
        if let Some(start) = start {
            let mut reached = vec![false; graph.node_count()];
            let mut dfs = Dfs::new(&graph, start);
            while let Some(index) = dfs.next(&graph) {
                reached[index.index()] = true;
            }
            issues.extend(
                graph
                    .node_indices()
                    .filter(|index| !reached[index.index()])
                    .map(|index| Issue::Unreachable(graph[index])),
            );
        }
        issues
    }
}
