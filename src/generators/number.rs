//! Numeric range generator.

use crate::error::GeneratorError;
use crate::producer::{Produced, Producer};
use crate::registry::Context;
use crate::value::Value;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::Rng;
use regex::Regex;

static RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?[0-9.]+)-(-?[0-9.]+)$").unwrap());

/// Past this many decimal places the rounding scale no longer fits an `f64`.
pub const MAX_DECIMALS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64, decimals: u32 },
}

pub struct NumberProducer {
    bounds: Bounds,
    rng: StdRng,
}

impl Producer for NumberProducer {
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        let value = match self.bounds {
            Bounds::Int { min, max } => Value::Integer(self.rng.gen_range(min..=max)),
            Bounds::Float { min, max, decimals } => {
                let raw = self.rng.gen_range(min..=max);
                let scale = 10f64.powi(decimals as i32);
                Value::Number(((raw * scale).round() / scale).clamp(min, max))
            }
        };
        Ok(value.into())
    }
}

pub fn factory(ctx: &Context<'_>, args: &[String]) -> Result<Box<dyn Producer>, GeneratorError> {
    let range = ctx.arg(args, 0, "range")?;
    let bounds = parse_bounds(range).ok_or_else(|| {
        GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("{range:?} is not a numeric range"),
        )
    })?;

    let empty = match bounds {
        Bounds::Int { min, max } => min > max,
        Bounds::Float { min, max, .. } => min > max,
    };
    if empty {
        return Err(GeneratorError::invalid_argument(
            ctx.type_name(),
            format!("range {range:?} is empty"),
        ));
    }
    if let Bounds::Float { min, max, decimals } = bounds {
        if !(max - min).is_finite() {
            return Err(GeneratorError::invalid_argument(
                ctx.type_name(),
                format!("range {range:?} is too wide"),
            ));
        }
        if decimals > MAX_DECIMALS {
            return Err(GeneratorError::invalid_argument(
                ctx.type_name(),
                format!("range {range:?} has more than {MAX_DECIMALS} decimal places"),
            ));
        }
    }

    Ok(Box::new(NumberProducer {
        bounds,
        rng: super::rng_for(ctx.options()),
    }))
}

fn parse_bounds(range: &str) -> Option<Bounds> {
    let caps = RANGE.captures(range)?;
    let (lo, hi) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());

    if !lo.contains('.') && !hi.contains('.') {
        return Some(Bounds::Int {
            min: lo.parse().ok()?,
            max: hi.parse().ok()?,
        });
    }

    let decimals = decimal_places(lo).max(decimal_places(hi));
    Some(Bounds::Float {
        min: lo.parse().ok()?,
        max: hi.parse().ok()?,
        decimals,
    })
}

fn decimal_places(n: &str) -> u32 {
    n.split_once('.').map_or(0, |(_, frac)| frac.len() as u32)
}
