use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum GeneratorError {
    #[error("Generator \"{type_name}\" not found")]
    #[diagnostic(
        code(genex::unknown_type),
        help("Register a factory under this name, or check the expression for typos.")
    )]
    UnknownType {
        type_name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("no factory is registered for this type")]
        span: SourceSpan,
    },

    #[error("Unbalanced parenthesis")]
    #[diagnostic(
        code(genex::unbalanced_paren),
        help("This `)` has no matching `(` before it.")
    )]
    UnbalancedParen {
        #[source_code]
        src: NamedSource<String>,
        #[label("closes nothing")]
        span: SourceSpan,
    },

    #[error("Unclosed group")]
    #[diagnostic(
        code(genex::unclosed_group),
        help("Every `(` opening a nested expression needs a matching `)`.")
    )]
    UnclosedGroup {
        #[source_code]
        src: NamedSource<String>,
        #[label("this group is never closed")]
        span: SourceSpan,
    },

    #[error("Generator nesting is {depth} levels deep, the limit is {limit}")]
    #[diagnostic(code(genex::nesting_too_deep))]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("Invalid argument for \"{type_name}\": {message}")]
    #[diagnostic(code(genex::invalid_argument))]
    InvalidArgument { type_name: String, message: String },

    #[error("Producer failed: {message}")]
    #[diagnostic(code(genex::producer))]
    Producer { message: String },

    #[error("Invalid options: {message}")]
    #[diagnostic(code(genex::invalid_options))]
    InvalidOptions { message: String },

    #[error("Generator \"{expression}\" produced a deferred value where an immediate one was required")]
    #[diagnostic(
        code(genex::deferred),
        help("Use `sample_async` or await the value returned by `resolve`.")
    )]
    Deferred { expression: String },
}

impl GeneratorError {
    pub fn invalid_argument(type_name: &str, message: impl Into<String>) -> Self {
        GeneratorError::InvalidArgument {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    pub fn producer(message: impl Into<String>) -> Self {
        GeneratorError::Producer {
            message: message.into(),
        }
    }
}
