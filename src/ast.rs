/// A canonical generator expression split into its dispatch key and raw arguments.
///
/// `source` is the canonical text the expression was split from; `type_span`
/// locates `type_name` inside it as `(offset, length)` for diagnostics.
#[derive(Debug, PartialEq, Clone)]
pub struct Expression {
    pub source: String,
    pub type_name: String,
    pub args: Vec<String>,
    pub type_span: (usize, usize),
}

impl Expression {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
