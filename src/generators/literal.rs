//! Literal value generator.

use crate::error::GeneratorError;
use crate::producer::{Produced, Producer};
use crate::registry::Context;
use crate::value::Value;

pub struct LiteralProducer {
    text: String,
}

impl Producer for LiteralProducer {
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        Ok(Value::String(self.text.clone()).into())
    }
}

/// Top-level colons split the text into several arguments, so they are
/// joined back before the surrounding quotes are removed.
pub fn factory(_ctx: &Context<'_>, args: &[String]) -> Result<Box<dyn Producer>, GeneratorError> {
    let joined = args.join(":");
    let text = joined
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&joined);

    Ok(Box::new(LiteralProducer {
        text: text.to_string(),
    }))
}
