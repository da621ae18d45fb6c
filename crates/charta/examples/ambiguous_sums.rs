//! Structural ambiguity in the smallest possible setting: `E -> E '+' E`
//! gives "a + a + a" a left-leaning and a right-leaning reading.
//!
//! Run with `cargo run --example ambiguous_sums`.

use charta::{engine, Forest, GrammarBuilder, NonTerminal, Symbol, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tok {
    A,
    Plus,
}

impl Token for Tok {
    type Kind = Tok;

    fn kind(&self) -> Tok {
        *self
    }

    fn text(&self) -> compact_str::CompactString {
        match self {
            Self::A => "a".into(),
            Self::Plus => "+".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Nt {
    E,
}

impl NonTerminal for Nt {
    fn name(&self) -> &str {
        "E"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = GrammarBuilder::<Tok, Nt>::new()
        .entry_point(Nt::E)
        .rule(
            Nt::E,
            [
                Symbol::rule(Nt::E),
                Symbol::terminal(Tok::Plus),
                Symbol::rule(Nt::E),
            ],
        )
        .rule(Nt::E, [Symbol::terminal(Tok::A)])
        .build()?;

    let input = [Tok::A, Tok::Plus, Tok::A, Tok::Plus, Tok::A];
    let chart = engine::parse(&grammar, &input);
    let forest = Forest::build(&grammar, &chart, &input)?;

    println!("input: a + a + a");
    println!("ambiguous: {}", forest.is_ambiguous());
    println!("derivations: {}", forest.tree_count());
    for tree in forest.trees() {
        println!("  {tree}");
    }

    Ok(())
}
