mod combinators;
mod grammar;
mod state;

pub use combinators::*;
pub use grammar::term;
pub use state::*;

use crate::ast::ParseTree;

/// Parse one complete term from the token stream.
///
/// Trailing tokens are an error. On failure the error reported is the one
/// that got furthest into the input.
pub fn parse_term(state: &mut ParseState) -> ParseResult<ParseTree> {
    let result = term().parse(state);

    match result {
        Ok(_) if state.has_next() => {
            if let Some(tok) = state.peek() {
                let err = ParseError::new("unexpected trailing input")
                    .found(tok.describe())
                    .at(tok.pos());
                state.record_error(err);
            }
            Err(state
                .furthest_error()
                .cloned()
                .unwrap_or_else(|| ParseError::new("unexpected trailing input")))
        }
        Ok(tree) => Ok(tree),
        Err(err) => Err(state.furthest_error().cloned().unwrap_or(err)),
    }
}
