//! The classic chart-parsing demo: a part-of-speech grammar over the
//! sentence "they can fish in rivers in december", which is ambiguous both
//! lexically ("can" and "fish" are nouns or verbs) and structurally (PP
//! attachment).
//!
//! Run with `cargo run --example natural_language`.

use charta::{engine, Forest, GrammarBuilder, NonTerminal, Symbol, Token};
use compact_str::CompactString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WordKind {
    They,
    Can,
    Fish,
    In,
    Rivers,
    December,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Word {
    kind: WordKind,
    text: CompactString,
}

impl Word {
    fn new(kind: WordKind, text: &str) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl Token for Word {
    type Kind = WordKind;

    fn kind(&self) -> WordKind {
        self.kind
    }

    fn text(&self) -> CompactString {
        self.text.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cat {
    S,
    NP,
    VP,
    PP,
    N,
    P,
    V,
}

impl NonTerminal for Cat {
    fn name(&self) -> &str {
        match self {
            Self::S => "S",
            Self::NP => "NP",
            Self::VP => "VP",
            Self::PP => "PP",
            Self::N => "N",
            Self::P => "P",
            Self::V => "V",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Lexical ambiguity lives in the grammar: "can" and "fish" have both a
    // noun and a verb reading.
    let grammar = GrammarBuilder::<Word, Cat>::new()
        .entry_point(Cat::S)
        .rule(Cat::S, [Symbol::rule(Cat::NP), Symbol::rule(Cat::VP)])
        .rule(Cat::NP, [Symbol::rule(Cat::N), Symbol::rule(Cat::PP)])
        .rule(Cat::NP, [Symbol::rule(Cat::N)])
        .rule(Cat::PP, [Symbol::rule(Cat::P), Symbol::rule(Cat::NP)])
        .rule(Cat::VP, [Symbol::rule(Cat::VP), Symbol::rule(Cat::PP)])
        .rule(Cat::VP, [Symbol::rule(Cat::V), Symbol::rule(Cat::VP)])
        .rule(Cat::VP, [Symbol::rule(Cat::V), Symbol::rule(Cat::NP)])
        .rule(Cat::VP, [Symbol::rule(Cat::V)])
        .rule(Cat::N, [Symbol::terminal(WordKind::They)])
        .rule(Cat::N, [Symbol::terminal(WordKind::Can)])
        .rule(Cat::N, [Symbol::terminal(WordKind::Fish)])
        .rule(Cat::N, [Symbol::terminal(WordKind::Rivers)])
        .rule(Cat::N, [Symbol::terminal(WordKind::December)])
        .rule(Cat::P, [Symbol::terminal(WordKind::In)])
        .rule(Cat::V, [Symbol::terminal(WordKind::Can)])
        .rule(Cat::V, [Symbol::terminal(WordKind::Fish)])
        .build()?;

    let sentence = [
        Word::new(WordKind::They, "they"),
        Word::new(WordKind::Can, "can"),
        Word::new(WordKind::Fish, "fish"),
        Word::new(WordKind::In, "in"),
        Word::new(WordKind::Rivers, "rivers"),
        Word::new(WordKind::In, "in"),
        Word::new(WordKind::December, "december"),
    ];

    let chart = engine::parse(&grammar, &sentence);

    println!("Chart ({} positions):", chart.positions());
    println!("{:>4} {:>5}  {}", "pos", "span", "rule");
    for position in 0..chart.positions() {
        for item in chart.items_at(position) {
            println!(
                "{:>4} {:>2}..{:<2}  {}",
                position,
                item.origin(),
                position,
                grammar.dotted_rule(item.production(), item.dot()),
            );
        }
    }

    println!();
    println!("Accepted: {}", chart.accepts());

    let forest = Forest::build(&grammar, &chart, &sentence)?;
    println!("Parse count: {}", forest.tree_count());
    println!();
    for (i, tree) in forest.trees().enumerate() {
        println!("#{i}: {tree}");
    }

    Ok(())
}
