use crate::ast::Expression;
use crate::error::GeneratorError;
use miette::NamedSource;

/// Name used for expression sources in diagnostics.
pub const SOURCE_NAME: &str = "expression";

/// Splits a canonical expression into its type name and raw arguments.
///
/// Arguments are separated by `:` at nesting depth zero. Parentheses and any
/// colons inside them are kept verbatim, so `repeat:3:(char:a-z)` splits into
/// `repeat`, `3` and `(char:a-z)`. Text between double quotes is opaque:
/// `literal:"smile :)"` has the single argument `"smile :)"`.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::str::CharIndices<'a>,
    // Byte offsets of the currently open `(`.
    open_groups: Vec<usize>,
    in_quotes: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
            open_groups: Vec::new(),
            in_quotes: false,
        }
    }

    /// An unterminated quote runs to the end of the input.
    ///
    /// # Errors
    /// Returns `UnbalancedParen` for a `)` without a matching `(`, and
    /// `UnclosedGroup` when input ends inside a group.
    pub fn split(mut self) -> Result<Expression, GeneratorError> {
        let mut parts = vec![String::new()];
        let mut type_end = None;

        while let Some((pos, c)) = self.chars.next() {
            match c {
                '"' => self.in_quotes = !self.in_quotes,
                _ if self.in_quotes => {}
                '(' => self.open_groups.push(pos),
                ')' => {
                    if self.open_groups.pop().is_none() {
                        return Err(GeneratorError::UnbalancedParen {
                            src: self.named_source(),
                            span: (pos, 1).into(),
                        });
                    }
                }
                ':' if self.open_groups.is_empty() => {
                    type_end.get_or_insert(pos);
                    parts.push(String::new());
                    continue;
                }
                _ => {}
            }
            if let Some(current) = parts.last_mut() {
                current.push(c);
            }
        }

        if let Some(&open) = self.open_groups.last() {
            return Err(GeneratorError::UnclosedGroup {
                src: self.named_source(),
                span: (open, self.input.len() - open).into(),
            });
        }

        let mut parts = parts.into_iter();
        let type_name = parts.next().unwrap_or_default();
        let type_span = (0, type_end.unwrap_or(self.input.len()));

        Ok(Expression {
            source: self.input.to_string(),
            type_name,
            args: parts.collect(),
            type_span,
        })
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(SOURCE_NAME, self.input.to_string())
    }
}

/// Removes one pair of parentheses when that pair wraps the whole argument.
///
/// `(char:a-z)` becomes `char:a-z`; `(a)(b)` and `a-z` are returned unchanged.
/// Parentheses inside double quotes do not count.
pub fn strip_group(arg: &str) -> &str {
    let Some(inner) = arg.strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
        return arg;
    };
    let mut depth = 0usize;
    let mut in_quotes = false;
    for c in inner.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                // The leading `(` closes before the end.
                None => return arg,
            },
            _ => {}
        }
    }
    if depth == 0 {
        inner
    } else {
        arg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Expression {
        Lexer::new(input).split().unwrap()
    }

    #[test]
    fn test_type_and_args() {
        let expr = split("number:1:10");
        assert_eq!(expr.type_name, "number");
        assert_eq!(expr.args, vec!["1", "10"]);
        assert_eq!(expr.type_span, (0, 6));
    }

    #[test]
    fn test_no_args() {
        let expr = split("uuid");
        assert_eq!(expr.type_name, "uuid");
        assert!(expr.args.is_empty());
        assert_eq!(expr.type_span, (0, 4));
    }

    #[test]
    fn test_nested_colons_are_kept() {
        let expr = split("repeat:3:(char:a-z)");
        assert_eq!(expr.type_name, "repeat");
        assert_eq!(expr.args, vec!["3", "(char:a-z)"]);
    }

    #[test]
    fn test_deep_nesting() {
        let expr = split("repeat:2:(repeat:3:(char:a-z)):tail");
        assert_eq!(expr.args, vec!["2", "(repeat:3:(char:a-z))", "tail"]);
    }

    #[test]
    fn test_empty_segments() {
        let expr = split(":a::");
        assert_eq!(expr.type_name, "");
        assert_eq!(expr.args, vec!["a", "", ""]);
    }

    #[test]
    fn test_stray_close_paren() {
        let err = Lexer::new("a:b)").split().unwrap_err();
        match err {
            GeneratorError::UnbalancedParen { span, .. } => assert_eq!(span.offset(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_group() {
        let err = Lexer::new("repeat:3:(char:a-z").split().unwrap_err();
        match err {
            GeneratorError::UnclosedGroup { span, .. } => assert_eq!(span.offset(), 9),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_strip_group() {
        assert_eq!(strip_group("(char:a-z)"), "char:a-z");
        assert_eq!(strip_group("((a-z))"), "(a-z)");
        assert_eq!(strip_group("(a)(b)"), "(a)(b)");
        assert_eq!(strip_group("a-z"), "a-z");
        assert_eq!(strip_group("()"), "");
        assert_eq!(strip_group(r#"("x)")"#), r#""x)""#);
    }

    #[test]
    fn test_quoted_text_is_opaque() {
        let expr = split(r#"literal:"smile :)""#);
        assert_eq!(expr.type_name, "literal");
        assert_eq!(expr.args, vec![r#""smile :)""#]);

        let expr = split(r#"repeat:2:("(:"):x"#);
        assert_eq!(expr.args, vec!["2", r#"("(:")"#, "x"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let expr = split(r#"literal:"a:(b"#);
        assert_eq!(expr.args, vec![r#""a:(b"#]);
    }
}
