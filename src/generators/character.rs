//! Character range generator.

use crate::error::GeneratorError;
use crate::producer::{Produced, Producer};
use crate::registry::Context;
use crate::value::Value;
use rand::rngs::StdRng;
use rand::Rng;

pub struct CharProducer {
    low: char,
    high: char,
    rng: StdRng,
}

impl Producer for CharProducer {
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        let c = self.rng.gen_range(self.low..=self.high);
        Ok(Value::String(c.to_string()).into())
    }
}

pub fn factory(ctx: &Context<'_>, args: &[String]) -> Result<Box<dyn Producer>, GeneratorError> {
    let range = ctx.arg(args, 0, "range")?;
    let mut chars = range.chars();
    let (Some(low), Some('-'), Some(high), None) =
        (chars.next(), chars.next(), chars.next(), chars.next())
    else {
        return Err(GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("{range:?} is not a character range"),
        ));
    };
    if low > high {
        return Err(GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("range {range:?} is empty"),
        ));
    }

    Ok(Box::new(CharProducer {
        low,
        high,
        rng: super::rng_for(ctx.options()),
    }))
}
