//! Property-based tests for the chart engine and forest extractor
//!
//! These cross-check recognition against reference predicates and against
//! the grammar-driven generators in `charta::testing`.

use charta::testing::{
    EnumeratorConfig, LanguageEnumerator, SamplerConfig, SentenceSampler,
};
use charta::{engine, Forest, Grammar, GrammarBuilder, NonTerminal, Symbol, Token};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tok {
    A,
    Plus,
    LParen,
    RParen,
}

impl Token for Tok {
    type Kind = Tok;

    fn kind(&self) -> Tok {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Nt {
    Sum,
    Paren,
}

impl NonTerminal for Nt {
    fn name(&self) -> &str {
        match self {
            Self::Sum => "Sum",
            Self::Paren => "Paren",
        }
    }
}

/// `Sum -> Sum '+' 'a' | 'a'`: unambiguous and left recursive.
fn sum_grammar() -> Grammar<Tok, Nt> {
    GrammarBuilder::<Tok, Nt>::new()
        .entry_point(Nt::Sum)
        .rule(
            Nt::Sum,
            [
                Symbol::rule(Nt::Sum),
                Symbol::terminal(Tok::Plus),
                Symbol::terminal(Tok::A),
            ],
        )
        .rule(Nt::Sum, [Symbol::terminal(Tok::A)])
        .build()
        .unwrap()
}

/// `Paren -> '(' Paren ')' Paren | ε`: balanced parentheses.
fn paren_grammar() -> Grammar<Tok, Nt> {
    GrammarBuilder::<Tok, Nt>::new()
        .entry_point(Nt::Paren)
        .rule(
            Nt::Paren,
            [
                Symbol::terminal(Tok::LParen),
                Symbol::rule(Nt::Paren),
                Symbol::terminal(Tok::RParen),
                Symbol::rule(Nt::Paren),
            ],
        )
        .rule(Nt::Paren, vec![])
        .build()
        .unwrap()
}

/// Reference predicate for the sum language: `a (+ a)*`.
fn is_sum_sentence(tokens: &[Tok]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    tokens
        .iter()
        .enumerate()
        .all(|(i, t)| *t == if i % 2 == 0 { Tok::A } else { Tok::Plus })
        && tokens.len() % 2 == 1
}

/// Reference predicate for balanced parentheses.
fn is_balanced(tokens: &[Tok]) -> bool {
    let mut depth: i32 = 0;
    for token in tokens {
        match token {
            Tok::LParen => depth += 1,
            Tok::RParen => depth -= 1,
            _ => return false,
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

fn sum_token() -> impl Strategy<Value = Tok> {
    prop_oneof![Just(Tok::A), Just(Tok::Plus)]
}

fn paren_token() -> impl Strategy<Value = Tok> {
    prop_oneof![Just(Tok::LParen), Just(Tok::RParen)]
}

proptest! {
    #[test]
    fn sum_recognition_matches_reference(tokens in proptest::collection::vec(sum_token(), 0..12)) {
        let grammar = sum_grammar();
        let chart = engine::parse(&grammar, &tokens);
        prop_assert_eq!(chart.accepts(), is_sum_sentence(&tokens));
    }

    #[test]
    fn paren_recognition_matches_reference(tokens in proptest::collection::vec(paren_token(), 0..10)) {
        let grammar = paren_grammar();
        let chart = engine::parse(&grammar, &tokens);
        prop_assert_eq!(chart.accepts(), is_balanced(&tokens));
    }

    #[test]
    fn accepted_inputs_extract_sound_trees(n in 1usize..8) {
        let grammar = sum_grammar();
        let mut tokens = vec![Tok::A];
        for _ in 1..n {
            tokens.push(Tok::Plus);
            tokens.push(Tok::A);
        }

        let chart = engine::parse(&grammar, &tokens);
        prop_assert!(chart.accepts());

        let forest = Forest::build(&grammar, &chart, &tokens).unwrap();
        // Left-recursive sums are unambiguous.
        prop_assert_eq!(forest.tree_count(), 1);
        let tree = forest.first_tree().unwrap();
        let leaves: Vec<Tok> = tree.leaves().into_iter().copied().collect();
        prop_assert_eq!(leaves, tokens);
    }

    #[test]
    fn rejected_inputs_stall_within_bounds(tokens in proptest::collection::vec(sum_token(), 1..12)) {
        let grammar = sum_grammar();
        let chart = engine::parse(&grammar, &tokens);
        prop_assert!(chart.furthest_position() <= tokens.len());
        if !chart.accepts() {
            prop_assert!(Forest::build(&grammar, &chart, &tokens).is_err());
        }
    }
}

#[test]
fn every_enumerated_sentence_is_accepted() {
    let grammar = paren_grammar();
    let enumerator = LanguageEnumerator::new(
        &grammar,
        EnumeratorConfig {
            max_length: 6,
            ..EnumeratorConfig::default()
        },
    );

    let sentences = enumerator.sentences();
    assert!(!sentences.is_empty());
    for sentence in &sentences {
        assert!(is_balanced(sentence), "enumerator emitted {sentence:?}");
        let chart = engine::parse(&grammar, sentence);
        assert!(chart.accepts(), "rejected enumerated sentence {sentence:?}");
    }
}

#[test]
fn enumeration_is_complete_for_short_sentences() {
    // Acceptance over all paren strings of length <= 4 must coincide with
    // membership in the enumerated language.
    let grammar = paren_grammar();
    let enumerator = LanguageEnumerator::new(
        &grammar,
        EnumeratorConfig {
            max_length: 4,
            ..EnumeratorConfig::default()
        },
    );
    let language = enumerator.sentences();

    let alphabet = [Tok::LParen, Tok::RParen];
    let mut inputs: Vec<Vec<Tok>> = vec![vec![]];
    for _ in 0..4 {
        let mut next = inputs.clone();
        for input in &inputs {
            for &t in &alphabet {
                let mut extended = input.clone();
                extended.push(t);
                next.push(extended);
            }
        }
        inputs = next;
    }

    for input in inputs.iter().filter(|i| i.len() <= 4) {
        let accepted = engine::parse(&grammar, input).accepts();
        let enumerated = language.contains(input);
        assert_eq!(accepted, enumerated, "disagreement on {input:?}");
    }
}

#[test]
fn sampled_sentences_are_accepted() {
    let grammar = sum_grammar();
    let mut sampler = SentenceSampler::new(
        &grammar,
        SamplerConfig {
            max_depth: 12,
            seed: 42,
        },
    );

    let mut checked = 0;
    for _ in 0..50 {
        let Some(sentence) = sampler.sample() else {
            continue;
        };
        let chart = engine::parse(&grammar, &sentence);
        assert!(chart.accepts(), "rejected sampled sentence {sentence:?}");
        checked += 1;
    }
    assert!(checked > 0, "sampler never produced a sentence");
}
