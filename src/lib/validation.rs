use itertools::{repeat_n, Itertools};

use crate::automaton::fsm::Fsm;

/// Checks whether two automata accept exactly the same words up to
/// `max_word_length` letters. Automata over different alphabet sizes never
/// compare equal.
pub fn same_language(a: &Fsm, b: &Fsm, max_word_length: usize) -> bool {
    if a.alphabet_size() != b.alphabet_size() {
        return false;
    }

    if a.accepts(&[]) != b.accepts(&[]) {
        return false;
    }

    for length in 1..=max_word_length {
        let words = repeat_n(1..=a.alphabet_size(), length).multi_cartesian_product();

        for word in words {
            if a.accepts(&word) != b.accepts(&word) {
                return false;
            }
        }
    }

    true
}

/// Like [same_language], but panics with the first separating word.
pub fn assert_same_language(a: &Fsm, b: &Fsm, max_word_length: usize) {
    assert_eq!(
        a.alphabet_size(),
        b.alphabet_size(),
        "Alphabet sizes must be the same to compare languages"
    );

    assert_eq!(
        a.accepts(&[]),
        b.accepts(&[]),
        "The automata disagree on the empty word"
    );

    for length in 1..=max_word_length {
        let words = repeat_n(1..=a.alphabet_size(), length).multi_cartesian_product();

        for word in words {
            match (a.accepts(&word), b.accepts(&word)) {
                (true, false) => {
                    panic!("{word:?} is accepted by automaton `a` but not by automaton `b`");
                }
                (false, true) => {
                    panic!("{word:?} is accepted by automaton `b` but not by automaton `a`");
                }
                _ => {}
            }
        }
    }
}
