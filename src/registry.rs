//! Mapping from generator type names to the factories that build their producers.

use crate::error::GeneratorError;
use crate::generators;
use crate::options::Options;
use crate::producer::Producer;
use crate::resolver::Generator;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a producer from the options and the raw argument strings of an expression.
pub type Factory = Arc<
    dyn Fn(&Context<'_>, &[String]) -> Result<Box<dyn Producer>, GeneratorError> + Send + Sync,
>;

#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `number`, `char`, `literal` and `repeat` generators.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        generators::register_builtins(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&Context<'_>, &[String]) -> Result<Box<dyn Producer>, GeneratorError>
            + Send
            + Sync
            + 'static,
    {
        if self
            .factories
            .insert(name.to_string(), Arc::new(factory))
            .is_some()
        {
            log::debug!("replaced factory for generator type {name:?}");
        }
        self
    }

    #[must_use]
    pub fn with<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> Result<Box<dyn Producer>, GeneratorError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Factory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.names())
            .finish()
    }
}

/// What a factory sees while it builds a producer.
pub struct Context<'a> {
    type_name: &'a str,
    options: &'a Options,
    registry: &'a Registry,
    depth: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        type_name: &'a str,
        options: &'a Options,
        registry: &'a Registry,
        depth: usize,
    ) -> Self {
        Self {
            type_name,
            options,
            registry,
            depth,
        }
    }

    /// The type name the factory was dispatched under.
    pub fn type_name(&self) -> &str {
        self.type_name
    }

    pub fn options(&self) -> &Options {
        self.options
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// How many generators enclose the one being built; zero at the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Fetches a required argument, failing with `InvalidArgument` when it is absent.
    ///
    /// # Errors
    /// Returns `GeneratorError::InvalidArgument` naming the missing argument.
    pub fn arg<'s>(
        &self,
        args: &'s [String],
        index: usize,
        what: &str,
    ) -> Result<&'s str, GeneratorError> {
        args.get(index).map(String::as_str).ok_or_else(|| {
            GeneratorError::invalid_argument(self.type_name, format!("missing {what}"))
        })
    }

    /// Builds a nested generator with the same registry and options, one level deeper.
    ///
    /// # Errors
    /// Any construction error of the nested expression.
    pub fn generator(&self, expression: &str) -> Result<Generator, GeneratorError> {
        Generator::with_depth(expression, self.registry, self.options, self.depth + 1)
    }
}
