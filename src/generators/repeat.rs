//! Repetition of a nested generator.
//!
//! `repeat:3:(char:a-z)` resolves `char:a-z` three times per pull and joins the
//! results into one string. When any part is deferred the joined value is
//! deferred too, settling once every part has.

use crate::error::GeneratorError;
use crate::lexer::strip_group;
use crate::producer::{Produced, Producer};
use crate::registry::Context;
use crate::resolver::Generator;
use crate::value::Value;
use futures::future::try_join_all;

/// Upper bound on the repeat count.
pub const MAX_REPEAT_COUNT: usize = 100_000;

pub struct RepeatProducer {
    count: usize,
    inner: Generator,
}

impl Producer for RepeatProducer {
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        let parts = (0..self.count)
            .map(|_| self.inner.resolve())
            .collect::<Result<Vec<_>, _>>()?;

        if parts.iter().any(Produced::is_deferred) {
            return Ok(Produced::deferred(async move {
                let values = try_join_all(parts.into_iter().map(Produced::settle)).await?;
                Ok(join(&values))
            }));
        }

        let values: Vec<Value> = parts
            .into_iter()
            .filter_map(Produced::into_immediate)
            .collect();
        Ok(join(&values).into())
    }
}

fn join(values: &[Value]) -> Value {
    Value::String(values.iter().map(ToString::to_string).collect())
}

pub fn factory(ctx: &Context<'_>, args: &[String]) -> Result<Box<dyn Producer>, GeneratorError> {
    let count_arg = ctx.arg(args, 0, "count")?;
    let count = count_arg.trim().parse::<usize>().map_err(|_| {
        GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("{count_arg:?} is not a repeat count"),
        )
    })?;
    if count > MAX_REPEAT_COUNT {
        return Err(GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("count {count} exceeds the limit of {MAX_REPEAT_COUNT}"),
        ));
    }
    let payload = strip_group(ctx.arg(args, 1, "expression")?);
    let inner = ctx.generator(payload)?;

    Ok(Box::new(RepeatProducer { count, inner }))
}
