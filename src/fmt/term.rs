//! Printer for terms in CBS notation.
//!
//! ```text
//! integer-add(1,2)    a node; a sequence parameter prints inline
//! (1,true)            a sequence, () when empty
//! "abc"               a list of characters
//! [1,2]               any other list
//! tuple(1,2)          tuples, vectors, other datatype values
//! {1|->"a"}           a map, map( ) when empty
//! {1,2}               a set, { } when empty
//! ```

use std::fmt::{self, Display};

use crate::catalog::Param;
use crate::term::{Datatype, LIST, Node, Sequence, Term};

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_list<'a>(&mut self, terms: impl IntoIterator<Item = &'a Term>) {
        for (index, term) in terms.into_iter().enumerate() {
            if index > 0 {
                self.write_str(",");
            }
            self.write_term(term);
        }
    }

    fn write_term(&mut self, term: &Term) {
        match term {
            Term::Null => self.write_str("null-value"),
            Term::Bool(b) => self.write_str(if *b { "true" } else { "false" }),
            Term::Int(n) => self.write_str(&n.to_string()),
            Term::Char(c) => self.write_str(&format!("'{}'", c.escape_default())),
            Term::Atom(name) => self.write_str(&format!("atom({:?})", &**name)),
            Term::Data(data) => self.write_datatype(term, data),
            Term::Map(map) if map.is_empty() => self.write_str("map( )"),
            Term::Map(map) => {
                self.write_str("{");
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        self.write_str(",");
                    }
                    self.write_term(key);
                    self.write_str("|->");
                    self.write_sequence(value);
                }
                self.write_str("}");
            }
            Term::Set(set) if set.is_empty() => self.write_str("{ }"),
            Term::Set(set) => {
                self.write_str("{");
                self.write_list(set.iter());
                self.write_str("}");
            }
            Term::Type(ty) => self.write_str(&ty.pretty()),
            Term::Seq(items) | Term::Spread(items) => {
                self.write_str("(");
                self.write_list(items);
                self.write_str(")");
            }
            Term::Node(node) => self.write_node(node),
        }
    }

    /// A single element prints bare, anything else in parentheses.
    fn write_sequence(&mut self, items: &Sequence) {
        match items.as_slice() {
            [single] => self.write_term(single),
            _ => self.write_term(&Term::Seq(items.clone())),
        }
    }

    fn write_datatype(&mut self, term: &Term, data: &Datatype) {
        if &*data.name == LIST {
            match term.as_string() {
                Some(text) if !text.is_empty() => {
                    self.write_str(&format!("{text:?}"));
                }
                _ => {
                    self.write_str("[");
                    self.write_list(&data.args);
                    self.write_str("]");
                }
            }
            return;
        }
        self.write_str(&data.name);
        self.write_str("(");
        self.write_list(&data.args);
        self.write_str(")");
    }

    fn write_node(&mut self, node: &Node) {
        self.write_str(node.op.name());
        if node.params.is_empty() {
            return;
        }

        self.write_str("(");
        let shape = node.op.params();
        let mut first = true;
        for (index, param) in node.params.iter().enumerate() {
            let inline = shape.get(index).is_some_and(|p| p.is_sequence());
            let parts: Vec<&Term> = match param {
                Term::Seq(items) if inline => items.iter().collect(),
                other => vec![other],
            };
            for part in parts {
                if !first {
                    self.write_str(",");
                }
                first = false;
                self.write_term(part);
            }
        }
        self.write_str(")");
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Render `term` on one line.
pub fn format_term(term: &Term) -> String {
    let mut formatter = Formatter::new();
    formatter.write_term(term);
    formatter.finish()
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_term(self))
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_term(&Term::Seq(self.clone())))
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Param::Eager => "=>",
            Param::Lazy => "=>>",
            Param::EagerSeq => "=>*",
            Param::LazySeq => "=>>*",
        })
    }
}
