use nfa_determinization::automaton::{fsm::Fsm, AutomatonError, Symbol};

#[test]
fn test_add_edge_rejects_out_of_range_vertices() {
    let mut fsm = Fsm::new(2, 3);

    assert_eq!(
        fsm.add_edge(0, 3, Symbol::Letter(1)),
        Err(AutomatonError::VertexOutOfRange {
            vertex: 3,
            vertex_count: 3
        })
    );

    assert_eq!(
        fsm.add_edge(5, 0, Symbol::Letter(1)),
        Err(AutomatonError::VertexOutOfRange {
            vertex: 5,
            vertex_count: 3
        })
    );

    assert_eq!(fsm.edge_count(), 0);
}

#[test]
fn test_add_edge_rejects_symbols_outside_the_alphabet() {
    let mut fsm = Fsm::new(2, 3);

    assert_eq!(
        fsm.add_edge(0, 1, Symbol::Letter(3)),
        Err(AutomatonError::SymbolOutOfRange {
            code: 3,
            alphabet_size: 2
        })
    );

    // Epsilon is always in range.
    assert!(fsm.add_edge(0, 1, Symbol::Epsilon).is_ok());
}

#[test]
fn test_add_terminal_is_idempotent() {
    let mut fsm = Fsm::new(1, 2);

    fsm.add_terminal(1).unwrap();
    fsm.add_terminal(1).unwrap();

    assert_eq!(fsm.terminals(), vec![1]);
    assert!(fsm.is_terminal(1));
    assert!(!fsm.is_terminal(0));

    assert_eq!(
        fsm.add_terminal(2),
        Err(AutomatonError::VertexOutOfRange {
            vertex: 2,
            vertex_count: 2
        })
    );
}

#[test]
fn test_duplicate_edges_are_kept() {
    let mut fsm = Fsm::new(1, 2);

    fsm.add_edge(0, 1, Symbol::Letter(1)).unwrap();
    fsm.add_edge(0, 1, Symbol::Letter(1)).unwrap();

    assert_eq!(fsm.edge_count(), 2);
}

#[test]
fn test_remove_edge_removes_the_first_match_only() {
    let mut fsm = Fsm::new(1, 2);

    fsm.add_edge(0, 1, Symbol::Epsilon).unwrap();
    fsm.add_edge(0, 1, Symbol::Epsilon).unwrap();
    fsm.add_edge(0, 1, Symbol::Letter(1)).unwrap();

    assert!(fsm.remove_edge(0, 1, Symbol::Epsilon));
    assert_eq!(fsm.edge_count(), 2);

    assert!(fsm.remove_edge(0, 1, Symbol::Epsilon));
    assert!(!fsm.remove_edge(0, 1, Symbol::Epsilon));
    assert_eq!(fsm.edge_count(), 1);
}

#[test]
fn test_accepts_follows_epsilon_edges() {
    let mut fsm = Fsm::new(1, 3);

    fsm.add_edge(0, 1, Symbol::Epsilon).unwrap();
    fsm.add_edge(1, 2, Symbol::Letter(1)).unwrap();
    fsm.add_terminal(2).unwrap();

    assert!(fsm.accepts(&[1]));
    assert!(!fsm.accepts(&[]));
    assert!(!fsm.accepts(&[1, 1]));
}

#[test]
fn test_accepts_empty_word_through_epsilon_closure() {
    let mut fsm = Fsm::new(1, 3);

    fsm.add_edge(0, 1, Symbol::Epsilon).unwrap();
    fsm.add_edge(1, 2, Symbol::Epsilon).unwrap();
    fsm.add_terminal(2).unwrap();

    assert!(fsm.accepts(&[]));
}

#[test]
fn test_render_format() {
    let mut fsm = Fsm::new(2, 2);

    fsm.add_edge(0, 1, Symbol::Letter(1)).unwrap();
    fsm.add_edge(1, 0, Symbol::Letter(2)).unwrap();
    fsm.add_terminal(1).unwrap();

    assert_eq!(
        fsm.render(),
        "Number of vertices:\n2\nEdges:\n0 1 a\n1 0 b\nTerminal vertices:\n1\n"
    );
}

#[test]
fn test_render_shows_epsilon_edges() {
    let mut fsm = Fsm::new(1, 2);

    fsm.add_edge(0, 1, Symbol::Epsilon).unwrap();

    assert!(fsm.render().contains("0 1 _\n"));
}

#[test]
fn test_description_round_trip() {
    let mut fsm = Fsm::new(2, 3);

    fsm.add_edge(0, 1, Symbol::Letter(1)).unwrap();
    fsm.add_edge(1, 2, Symbol::Epsilon).unwrap();
    fsm.add_terminal(2).unwrap();

    let json = serde_json::to_string(&fsm.to_description()).unwrap();
    let description = serde_json::from_str(&json).unwrap();
    let rebuilt = Fsm::from_description(&description).unwrap();

    assert_eq!(fsm.render(), rebuilt.render());
}

#[test]
fn test_from_description_rejects_bad_references() {
    let description = nfa_determinization::automaton::fsm::FsmDescription {
        alphabet_size: 1,
        vertex_count: 2,
        edges: vec![(0, 4, 1)],
        terminals: vec![],
    };

    assert_eq!(
        Fsm::from_description(&description).unwrap_err(),
        AutomatonError::VertexOutOfRange {
            vertex: 4,
            vertex_count: 2
        }
    );
}
