use std::collections::{BTreeSet, VecDeque};

use hashbrown::{HashMap, HashSet};

use crate::logger::{LogLevel, Logger};

use super::{eliminate::eliminate_epsilon, fsm::Fsm, AutomatonError, Symbol};

/// A composite state: a bit-per-vertex mask over the original automaton's
/// vertex ids. Two composite states are equal iff their masks are equal.
pub type StateMask = u64;

/// Ceiling on original vertices for the mask encoding. Checked at pipeline
/// entry; see [AutomatonError::StateSpaceOverflow].
pub const MAX_ENCODABLE_VERTICES: usize = 63;

/// Encodes a collection of vertex ids into a composite-state mask.
/// Duplicates collapse, the result only depends on the id set.
pub fn encode_state(vertices: &[usize]) -> StateMask {
    vertices.iter().fold(0, |mask, &vertex| mask | (1u64 << vertex))
}

/// Decodes a mask into its member vertex ids in ascending order. Exact
/// inverse of [encode_state] for in-range vertex sets.
pub fn decode_state(mask: StateMask) -> Vec<usize> {
    (0..u64::BITS as usize)
        .filter(|&bit| mask & (1u64 << bit) != 0)
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct MaskTransition {
    from: StateMask,
    to: StateMask,
    letter: u32,
}

/// Explores the reachable composite states of an epsilon-free automaton.
///
/// Exploration works on raw mask values; the vertex numbering of the result
/// is only fixed by [SubsetConstruction::into_canonical_fsm] afterwards.
#[derive(Debug)]
pub struct SubsetConstruction<'a> {
    fsm: &'a Fsm,
    discovered: BTreeSet<StateMask>,
    accepting: HashSet<StateMask>,
    transitions: Vec<MaskTransition>,
}

impl<'a> SubsetConstruction<'a> {
    pub fn new(fsm: &'a Fsm) -> Self {
        SubsetConstruction {
            fsm,
            discovered: BTreeSet::new(),
            accepting: HashSet::new(),
            transitions: Vec::new(),
        }
    }

    pub fn state_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    fn mark_accepting(&mut self, members: &[usize], mask: StateMask) {
        if members.iter().any(|&vertex| self.fsm.is_terminal(vertex)) {
            self.accepting.insert(mask);
        }
    }

    /// FIFO worklist exploration from the composite state `{start_vertex}`.
    /// For every discovered state and every letter, the union of the
    /// members' destinations forms the successor state; empty unions emit no
    /// transition. Terminates because at most `2^vertex_count` masks exist.
    pub fn explore(&mut self, start_vertex: usize) {
        let alphabet_size = self.fsm.alphabet_size() as usize;

        let start_mask = encode_state(&[start_vertex]);
        self.discovered.insert(start_mask);
        self.mark_accepting(&[start_vertex], start_mask);

        let mut queue = VecDeque::new();
        queue.push_back(start_mask);

        while let Some(mask) = queue.pop_front() {
            let members = decode_state(mask);

            // Destination buckets indexed by letter code. Bucket 0 belongs
            // to epsilon and stays empty on epsilon-free input.
            let mut buckets: Vec<Vec<usize>> = vec![vec![]; alphabet_size + 1];

            for &vertex in &members {
                for (dest, symbol) in self.fsm.outgoing(vertex) {
                    buckets[symbol.code() as usize].push(dest);
                }
            }

            for letter in 1..=alphabet_size as u32 {
                let bucket = &buckets[letter as usize];

                if bucket.is_empty() {
                    continue;
                }

                let next = encode_state(bucket);

                if self.discovered.insert(next) {
                    queue.push_back(next);
                    self.mark_accepting(&buckets[letter as usize], next);
                }

                self.transitions.push(MaskTransition {
                    from: mask,
                    to: next,
                    letter,
                });
            }
        }
    }

    /// Renames the discovered masks to dense ids assigned in ascending mask
    /// order and builds the final automaton.
    ///
    /// The ascending order makes the numbering a pure function of the
    /// reachable-state set, so equal explorations produce identical output
    /// regardless of discovery order.
    pub fn into_canonical_fsm(self) -> Fsm {
        let mut rename: HashMap<StateMask, usize> = HashMap::with_capacity(self.discovered.len());

        for (id, &mask) in self.discovered.iter().enumerate() {
            rename.insert(mask, id);
        }

        let mut fsm = Fsm::new(self.fsm.alphabet_size(), rename.len());

        for transition in &self.transitions {
            fsm.add_edge(
                rename[&transition.from],
                rename[&transition.to],
                Symbol::Letter(transition.letter),
            )
            .expect("renamed ids are dense and letters are in range");
        }

        for mask in &self.accepting {
            fsm.add_terminal(rename[mask])
                .expect("accepting masks were discovered");
        }

        fsm
    }
}

/// Options for the conversion pipeline, in builder style.
///
/// The start vertex defaults to 0, the fixed convention of the construction
/// interface; override it with [DeterminizeOptions::with_start_vertex].
#[derive(Debug, Clone)]
pub struct DeterminizeOptions {
    log_level: LogLevel,
    start_vertex: usize,
}

impl DeterminizeOptions {
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_start_vertex(mut self, vertex: usize) -> Self {
        self.start_vertex = vertex;
        self
    }

    pub fn to_determinizer(self, fsm: Fsm) -> Determinizer {
        Determinizer::new(self, fsm)
    }
}

impl Default for DeterminizeOptions {
    fn default() -> Self {
        DeterminizeOptions {
            log_level: LogLevel::Error,
            start_vertex: 0,
        }
    }
}

/// Owns one conversion run: epsilon elimination, subset construction and
/// canonical renaming, in that order, on an automaton it takes by value.
#[derive(Debug)]
pub struct Determinizer {
    options: DeterminizeOptions,
    logger: Logger,
    fsm: Fsm,
}

impl Determinizer {
    pub fn new(options: DeterminizeOptions, fsm: Fsm) -> Self {
        let logger = Logger::new(options.log_level.clone(), "Determinizer".to_string());

        Determinizer {
            options,
            logger,
            fsm,
        }
    }

    pub fn run(mut self) -> Result<Fsm, AutomatonError> {
        let vertex_count = self.fsm.vertex_count();

        if vertex_count > MAX_ENCODABLE_VERTICES {
            return Err(AutomatonError::StateSpaceOverflow {
                vertex_count,
                max: MAX_ENCODABLE_VERTICES,
            });
        }

        if self.options.start_vertex >= vertex_count {
            return Err(AutomatonError::VertexOutOfRange {
                vertex: self.options.start_vertex,
                vertex_count,
            });
        }

        self.logger.info(&format!(
            "Converting an automaton with {} vertices and {} edges",
            vertex_count,
            self.fsm.edge_count()
        ));

        let links = eliminate_epsilon(&mut self.fsm);
        self.logger
            .debug(&format!("Processed {links} epsilon links"));

        let mut subset = SubsetConstruction::new(&self.fsm);
        subset.explore(self.options.start_vertex);

        let result = subset.into_canonical_fsm();

        self.logger
            .object("Result")
            .add_field("states", &result.vertex_count().to_string())
            .add_field("transitions", &result.edge_count().to_string())
            .add_field("terminals", &result.terminals().len().to_string())
            .log(LogLevel::Info);

        Ok(result)
    }
}

/// Converts an automaton with epsilon edges into an equivalent deterministic
/// one with canonical vertex numbering, using default options.
pub fn determinize(fsm: Fsm) -> Result<Fsm, AutomatonError> {
    DeterminizeOptions::default().to_determinizer(fsm).run()
}
