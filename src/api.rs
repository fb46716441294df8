use crate::error::GeneratorError;
use crate::options::Options;
use crate::registry::Registry;
use crate::resolver::Generator;
use crate::value::Value;
use futures::executor::block_on;

/// Builds a generator from the built-in registry.
///
/// This is the shortest path from an expression to values. Use
/// [`Generator::new`] directly to supply your own registry.
///
/// # Errors
/// Returns a `GeneratorError` if the expression cannot be parsed or built.
pub fn generator(expression: &str, options: &Options) -> Result<Generator, GeneratorError> {
    Generator::new(expression, &Registry::builtin(), options)
}

/// Generates `count` values from a synchronous expression.
///
/// # Errors
/// Returns `GeneratorError::Deferred` if the expression produces deferred
/// values, and any construction or producer error.
pub fn sample(
    expression: &str,
    count: usize,
    registry: &Registry,
    options: &Options,
) -> Result<Vec<Value>, GeneratorError> {
    let mut generator = Generator::new(expression, registry, options)?;
    (0..count)
        .map(|_| {
            generator
                .resolve()?
                .into_immediate()
                .ok_or_else(|| GeneratorError::Deferred {
                    expression: expression.to_string(),
                })
        })
        .collect()
}

/// Generates `count` values, waiting for each deferred one in turn.
///
/// Values are pulled in order and each is settled before the next pull.
///
/// # Errors
/// Any construction or producer error, including errors deferred values settle with.
pub async fn sample_async(
    expression: &str,
    count: usize,
    registry: &Registry,
    options: &Options,
) -> Result<Vec<Value>, GeneratorError> {
    let mut generator = Generator::new(expression, registry, options)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(generator.resolve()?.settle().await?);
    }
    Ok(values)
}

/// Blocking form of [`sample_async`].
///
/// # Errors
/// Same as [`sample_async`].
pub fn sample_blocking(
    expression: &str,
    count: usize,
    registry: &Registry,
    options: &Options,
) -> Result<Vec<Value>, GeneratorError> {
    block_on(sample_async(expression, count, registry, options))
}
