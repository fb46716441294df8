//! Built-in generator factories.
//!
//! - `number:<min>-<max>` - uniform integer or decimal in an inclusive range
//! - `char:<a>-<b>` - uniform character in an inclusive range
//! - `literal:<text>` - the same text every time
//! - `repeat:<count>:<expr>` - `count` values of a nested expression, concatenated

pub mod character;
pub mod literal;
pub mod number;
pub mod repeat;

use crate::options::Options;
use crate::registry::Registry;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn register_builtins(registry: &mut Registry) {
    registry
        .register("number", number::factory)
        .register("char", character::factory)
        .register("literal", literal::factory)
        .register("repeat", repeat::factory);
}

/// A seeded RNG when `seed` is configured, so runs can be reproduced.
pub(crate) fn rng_for(options: &Options) -> StdRng {
    match options.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
