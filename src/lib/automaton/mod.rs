use std::fmt;

use thiserror::Error;

pub mod determinize;
pub mod eliminate;
pub mod fsm;

/// The label on an automaton edge: either a letter of the alphabet or the
/// empty word.
///
/// Letters carry a 1-based code, so an automaton with `alphabet_size` 2 uses
/// `Letter(1)` and `Letter(2)`. Code 0 is reserved for [Symbol::Epsilon],
/// which matches the wire format used by [fsm::FsmDescription].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Letter(u32),
}

impl Symbol {
    /// Maps a raw symbol code to a symbol. Code 0 is epsilon, everything
    /// else is a letter. Range checking against the alphabet happens in
    /// [fsm::Fsm::add_edge], not here.
    pub fn from_code(code: u32) -> Self {
        if code == 0 {
            Symbol::Epsilon
        } else {
            Symbol::Letter(code)
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Symbol::Epsilon => 0,
            Symbol::Letter(code) => *code,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "_"),
            Symbol::Letter(code @ 1..=26) => {
                write!(f, "{}", char::from(b'a' + (*code as u8) - 1))
            }
            Symbol::Letter(code) => write!(f, "#{code}"),
        }
    }
}

/// Errors reported at the construction and pipeline-entry boundaries.
/// Once an automaton is well formed, the passes themselves cannot fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("vertex {vertex} is out of range for an automaton with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    #[error("symbol code {code} is outside the alphabet range 0..={alphabet_size}")]
    SymbolOutOfRange { code: u32, alphabet_size: u32 },
    #[error("{vertex_count} vertices exceed the {max} supported by the composite-state encoding")]
    StateSpaceOverflow { vertex_count: usize, max: usize },
}
