use crate::error::GeneratorError;
use crate::lexer::SOURCE_NAME;
use crate::options::Options;
use crate::parser::parse;
use crate::producer::{Produced, Producer};
use crate::registry::{Context, Registry};
use crate::value::Value;
use miette::NamedSource;
use std::fmt;

/// How many generators may enclose one another before construction is refused.
pub const MAX_NESTING_DEPTH: usize = 32;

/// A parsed expression bound to the producer its factory built.
///
/// Construction pulls one value from the producer to learn whether it is
/// synchronous or deferred. That value is handed back by the first call to
/// [`Generator::resolve`]; later calls pull fresh values.
pub struct Generator {
    type_name: String,
    args: Vec<String>,
    is_async: bool,
    probe: Option<Produced>,
    producer: Box<dyn Producer>,
}

impl Generator {
    /// Parses `expression` and builds its producer from `registry`.
    ///
    /// `options` is passed unchanged to the factory, and to the factories of
    /// any nested expressions.
    ///
    /// # Errors
    /// Returns `UnknownType` if the registry has no factory for the expression's
    /// type, a parse error for unbalanced parentheses, and otherwise whatever the
    /// factory or the first pull fails with.
    pub fn new(
        expression: &str,
        registry: &Registry,
        options: &Options,
    ) -> Result<Self, GeneratorError> {
        Self::with_depth(expression, registry, options, 0)
    }

    pub(crate) fn with_depth(
        expression: &str,
        registry: &Registry,
        options: &Options,
        depth: usize,
    ) -> Result<Self, GeneratorError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(GeneratorError::NestingTooDeep {
                depth,
                limit: MAX_NESTING_DEPTH,
            });
        }

        let parsed = parse(expression)?;
        let Some(factory) = registry.get(&parsed.type_name) else {
            return Err(GeneratorError::UnknownType {
                type_name: parsed.type_name,
                src: NamedSource::new(SOURCE_NAME, parsed.source),
                span: parsed.type_span.into(),
            });
        };

        let ctx = Context::new(&parsed.type_name, options, registry, depth);
        let mut producer = factory(&ctx, parsed.args.as_slice())?;

        let probe = producer.pull()?;
        let is_async = probe.is_deferred();
        log::debug!(
            "built {:?} generator with {} arg(s) at depth {depth}, async: {is_async}",
            parsed.type_name,
            parsed.args.len(),
        );

        Ok(Self {
            type_name: parsed.type_name,
            args: parsed.args,
            is_async,
            probe: Some(probe),
            producer,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the first value this generator produced was deferred.
    ///
    /// Fixed at construction; later values are not reclassified.
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Returns the next value, immediate or deferred.
    ///
    /// # Errors
    /// Whatever the producer fails with.
    pub fn resolve(&mut self) -> Result<Produced, GeneratorError> {
        self.next_produced()
    }

    /// Returns the next value and hands it to `callback` as well.
    ///
    /// An immediate value reaches the callback before this returns. A deferred
    /// value is returned still deferred, and the callback runs with the settled
    /// value when that future completes. If it settles with an error the
    /// callback is skipped and the error goes to whoever awaits the future.
    ///
    /// # Errors
    /// Whatever the producer fails with.
    pub fn resolve_with<F>(&mut self, callback: F) -> Result<Produced, GeneratorError>
    where
        F: FnOnce(Value) + Send + 'static,
    {
        match self.next_produced()? {
            Produced::Immediate(value) => {
                callback(value.clone());
                Ok(Produced::Immediate(value))
            }
            Produced::Deferred(future) => Ok(Produced::deferred(async move {
                let value = future.await?;
                callback(value.clone());
                Ok(value)
            })),
        }
    }

    fn next_produced(&mut self) -> Result<Produced, GeneratorError> {
        if let Some(probe) = self.probe.take() {
            return Ok(probe);
        }
        let produced = self.producer.pull()?;
        log::trace!("pulled from {:?} generator", self.type_name);
        if produced.is_deferred() != self.is_async {
            log::warn!(
                "{:?} generator produced a {} value after classifying as {}",
                self.type_name,
                if produced.is_deferred() { "deferred" } else { "immediate" },
                if self.is_async { "async" } else { "sync" },
            );
        }
        Ok(produced)
    }
}

impl Producer for Generator {
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        self.resolve()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("type_name", &self.type_name)
            .field("args", &self.args)
            .field("is_async", &self.is_async)
            .field("probe_pending", &self.probe.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Yields 0, 1, 2, ... and counts how often it was pulled.
    fn counting_registry(pulls: Arc<AtomicUsize>) -> Registry {
        Registry::new().with("count", move |_: &Context<'_>, _: &[String]| {
            let pulls = Arc::clone(&pulls);
            let producer = move || {
                let n = pulls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, GeneratorError>(Produced::from(Value::Integer(n as i64)))
            };
            Ok(Box::new(producer) as Box<dyn Producer>)
        })
    }

    #[test]
    fn test_probe_happens_at_construction() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let registry = counting_registry(Arc::clone(&pulls));
        let generator = Generator::new("count", &registry, &Options::new()).unwrap();
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
        assert!(!generator.is_async());
    }

    #[test]
    fn test_probe_is_replayed_once_even_when_zero() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let registry = counting_registry(Arc::clone(&pulls));
        let mut generator = Generator::new("count", &registry, &Options::new()).unwrap();

        let first = generator.resolve().unwrap().into_immediate();
        assert_eq!(first, Some(Value::Integer(0)));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);

        let second = generator.resolve().unwrap().into_immediate();
        assert_eq!(second, Some(Value::Integer(1)));
        assert_eq!(pulls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_with_calls_back_synchronously() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let registry = counting_registry(pulls);
        let mut generator = Generator::new("count", &registry, &Options::new()).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let returned = generator
            .resolve_with(move |v| sink.lock().unwrap().push(v))
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Value::Integer(0)]);
        assert_eq!(returned.into_immediate(), Some(Value::Integer(0)));
    }

    #[test]
    fn test_deferred_callback_runs_on_settlement() {
        let registry = Registry::new().with("later", |_: &Context<'_>, _: &[String]| {
            let producer = || {
                Ok::<_, GeneratorError>(Produced::deferred(async { Ok(Value::from("done")) }))
            };
            Ok(Box::new(producer) as Box<dyn Producer>)
        });
        let mut generator = Generator::new("later", &registry, &Options::new()).unwrap();
        assert!(generator.is_async());

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let returned = generator
            .resolve_with(move |v| *sink.lock().unwrap() = Some(v))
            .unwrap();
        assert!(returned.is_deferred());
        assert!(seen.lock().unwrap().is_none());

        let settled = block_on(returned.settle()).unwrap();
        assert_eq!(settled, Value::from("done"));
        assert_eq!(*seen.lock().unwrap(), Some(Value::from("done")));
    }

    #[test]
    fn test_nesting_limit() {
        let registry = Registry::new();
        let err = Generator::with_depth("x", &registry, &Options::new(), MAX_NESTING_DEPTH + 1)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_debug_output() {
        let registry = counting_registry(Arc::new(AtomicUsize::new(0)));
        let generator = Generator::new("count:a:b", &registry, &Options::new()).unwrap();
        let debug = format!("{generator:?}");
        assert!(debug.contains("\"count\""));
        assert!(debug.contains("probe_pending: true"));
    }
}
