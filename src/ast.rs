//! Parse trees for initial terms, before they are resolved against the
//! operator catalog.

use lachs::Span;

#[derive(Debug, Clone)]
pub enum ParseTree {
    Integer(Literal),
    String(Literal),
    Char(Literal),
    /// A bare name: a nullary operator, value or type.
    Name(Literal),
    Call(Call),
    /// `(a, b)`, also `()` for the empty sequence.
    Sequence(Group),
    List(Group),
    Set(Group),
    Map(MapLiteral),
    Union(Group),
    Intersection(Group),
    Complement(Box<ParseTree>, Span),
}

/// A token's raw text, quotes and escapes included.
#[derive(Debug, Clone)]
pub struct Literal {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub name: Literal,
    pub args: Vec<ParseTree>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub items: Vec<ParseTree>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct MapLiteral {
    pub entries: Vec<(ParseTree, ParseTree)>,
    pub position: Span,
}

impl ParseTree {
    pub fn position(&self) -> Span {
        match self {
            ParseTree::Integer(lit)
            | ParseTree::String(lit)
            | ParseTree::Char(lit)
            | ParseTree::Name(lit) => lit.position.clone(),
            ParseTree::Call(call) => call.position.clone(),
            ParseTree::Sequence(group)
            | ParseTree::List(group)
            | ParseTree::Set(group)
            | ParseTree::Union(group)
            | ParseTree::Intersection(group) => group.position.clone(),
            ParseTree::Map(map) => map.position.clone(),
            ParseTree::Complement(_, position) => position.clone(),
        }
    }
}
