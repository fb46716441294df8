use crate::ast::Expression;
use crate::canonical::canonicalize;
use crate::error::GeneratorError;
use crate::lexer::Lexer;

/// Parses a generator expression, shorthand or canonical, into an [`Expression`].
///
/// Shorthand is rewritten exactly once before tokenizing, so both forms share
/// a single parsing path.
///
/// # Errors
/// Returns a `GeneratorError` if the parentheses in the expression do not balance.
pub fn parse(expression: &str) -> Result<Expression, GeneratorError> {
    let canonical = canonicalize(expression);
    Lexer::new(&canonical).split()
}
