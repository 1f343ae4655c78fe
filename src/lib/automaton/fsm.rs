use std::fmt::Debug;

use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use serde::{Deserialize, Serialize};

use super::{AutomatonError, Symbol};

/// A vertex of an [Fsm]. Only carries the accepting flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsmNode {
    pub accepting: bool,
}

/// A finite automaton over an ordered alphabet of `alphabet_size` letters.
///
/// Vertices are the dense range `0..vertex_count`, fixed at construction.
/// Edges are unordered per vertex, may carry [Symbol::Epsilon], and are not
/// deduplicated. By convention vertex 0 is the start vertex.
#[derive(Clone)]
pub struct Fsm {
    alphabet_size: u32,
    graph: DiGraph<FsmNode, Symbol>,
}

impl Fsm {
    /// Creates an automaton with `vertex_count` vertices, no edges and no
    /// terminals.
    pub fn new(alphabet_size: u32, vertex_count: usize) -> Self {
        let mut graph = DiGraph::new();
        for _ in 0..vertex_count {
            graph.add_node(FsmNode { accepting: false });
        }

        Fsm {
            alphabet_size,
            graph,
        }
    }

    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn check_vertex(&self, vertex: usize) -> Result<NodeIndex, AutomatonError> {
        if vertex < self.graph.node_count() {
            Ok(NodeIndex::new(vertex))
        } else {
            Err(AutomatonError::VertexOutOfRange {
                vertex,
                vertex_count: self.graph.node_count(),
            })
        }
    }

    /// Appends an edge to `start`'s outgoing edges. Letter codes must lie in
    /// `1..=alphabet_size`; duplicates are allowed and kept.
    pub fn add_edge(
        &mut self,
        start: usize,
        finish: usize,
        symbol: Symbol,
    ) -> Result<(), AutomatonError> {
        let start = self.check_vertex(start)?;
        let finish = self.check_vertex(finish)?;

        if symbol.code() > self.alphabet_size {
            return Err(AutomatonError::SymbolOutOfRange {
                code: symbol.code(),
                alphabet_size: self.alphabet_size,
            });
        }

        self.graph.add_edge(start, finish, symbol);

        Ok(())
    }

    /// Marks `vertex` as accepting. Idempotent.
    pub fn add_terminal(&mut self, vertex: usize) -> Result<(), AutomatonError> {
        let vertex = self.check_vertex(vertex)?;
        self.graph[vertex].accepting = true;

        Ok(())
    }

    /// Removes the first edge matching the exact `(start, finish, symbol)`
    /// triple. Returns whether an edge was removed.
    ///
    /// Panics if `start` is out of range.
    pub fn remove_edge(&mut self, start: usize, finish: usize, symbol: Symbol) -> bool {
        let edge = self
            .graph
            .edges_directed(NodeIndex::new(start), Direction::Outgoing)
            .find(|edge| edge.target().index() == finish && *edge.weight() == symbol)
            .map(|edge| edge.id());

        match edge {
            Some(edge) => {
                self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Panics if `vertex` is out of range.
    pub fn is_terminal(&self, vertex: usize) -> bool {
        self.graph[NodeIndex::new(vertex)].accepting
    }

    /// The accepting vertices in ascending order.
    pub fn terminals(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .filter(|&node| self.graph[node].accepting)
            .map(|node| node.index())
            .collect()
    }

    /// Iterates the outgoing edges of `vertex` as `(finish, symbol)` pairs.
    ///
    /// Panics if `vertex` is out of range.
    pub fn outgoing(&self, vertex: usize) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(vertex), Direction::Outgoing)
            .map(|edge| (edge.target().index(), *edge.weight()))
    }

    /// Iterates all edges as `(start, finish, symbol)` triples in insertion
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Symbol)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), *edge.weight()))
    }

    pub fn has_epsilon(&self) -> bool {
        self.graph
            .edge_references()
            .any(|edge| edge.weight().is_epsilon())
    }

    /// Extends `states` to its epsilon closure. The set stays duplicate
    /// free.
    fn epsilon_closure(&self, states: &mut Vec<NodeIndex>) {
        let mut stack = states.clone();

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if edge.weight().is_epsilon() {
                    let target = edge.target();

                    if !states.contains(&target) {
                        states.push(target);
                        stack.push(target);
                    }
                }
            }
        }
    }

    /// Runs the automaton on a word of letter codes, starting from vertex 0
    /// and following epsilon edges freely.
    pub fn accepts(&self, word: &[u32]) -> bool {
        if self.graph.node_count() == 0 {
            return false;
        }

        let mut current = vec![NodeIndex::new(0)];
        self.epsilon_closure(&mut current);

        for &code in word {
            assert!(
                code >= 1 && code <= self.alphabet_size,
                "letter code {code} not in alphabet 1..={}",
                self.alphabet_size
            );

            let mut next = vec![];

            for &state in &current {
                for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                    if *edge.weight() == Symbol::Letter(code) {
                        next.push(edge.target());
                    }
                }
            }

            if next.is_empty() {
                return false;
            }

            self.epsilon_closure(&mut next);
            current = next;
        }

        current.iter().any(|&state| self.graph[state].accepting)
    }

    /// Textual description: vertex count, one `start finish letter` line per
    /// edge, then the terminal list.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("Number of vertices:\n");
        out.push_str(&format!("{}\n", self.vertex_count()));
        out.push_str("Edges:\n");
        for (start, finish, symbol) in self.edges() {
            out.push_str(&format!("{start} {finish} {symbol}\n"));
        }
        out.push_str("Terminal vertices:\n");
        out.push_str(&format!("{}\n", self.terminals().iter().join(" ")));

        out
    }

    pub fn to_description(&self) -> FsmDescription {
        FsmDescription {
            alphabet_size: self.alphabet_size,
            vertex_count: self.vertex_count(),
            edges: self
                .edges()
                .map(|(start, finish, symbol)| (start, finish, symbol.code()))
                .collect(),
            terminals: self.terminals(),
        }
    }

    /// Builds an automaton from a description, rejecting out-of-range
    /// vertices and symbol codes.
    pub fn from_description(description: &FsmDescription) -> Result<Self, AutomatonError> {
        let mut fsm = Fsm::new(description.alphabet_size, description.vertex_count);

        for &(start, finish, code) in &description.edges {
            fsm.add_edge(start, finish, Symbol::from_code(code))?;
        }

        for &vertex in &description.terminals {
            fsm.add_terminal(vertex)?;
        }

        Ok(fsm)
    }
}

impl Debug for Fsm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("alphabet_size", &self.alphabet_size)
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .field(
                "edges",
                &self
                    .edges()
                    .map(|(start, finish, symbol)| format!("{start} --- {symbol} --> {finish}"))
                    .collect_vec(),
            )
            .field("terminals", &self.terminals())
            .finish()
    }
}

/// A plain-data mirror of an [Fsm], used for structured import and export.
/// Edges are `(start, finish, symbol_code)` triples with code 0 meaning
/// epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsmDescription {
    pub alphabet_size: u32,
    pub vertex_count: usize,
    pub edges: Vec<(usize, usize, u32)>,
    pub terminals: Vec<usize>,
}
