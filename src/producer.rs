//! The value-producing side of a generator.
//!
//! A [`Producer`] hands out one [`Produced`] per pull. A produced value is
//! either available now or deferred behind a future; the resolver classifies
//! a producer by the shape of its first value.

use crate::error::GeneratorError;
use crate::value::Value;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;

pub type DeferredValue = BoxFuture<'static, Result<Value, GeneratorError>>;

pub enum Produced {
    Immediate(Value),
    Deferred(DeferredValue),
}

impl Produced {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, GeneratorError>> + Send + 'static,
    {
        Produced::Deferred(future.boxed())
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Produced::Deferred(_))
    }

    /// The value, if it is available without waiting.
    pub fn into_immediate(self) -> Option<Value> {
        match self {
            Produced::Immediate(value) => Some(value),
            Produced::Deferred(_) => None,
        }
    }

    /// Waits for the value, returning immediately when there is nothing to wait for.
    ///
    /// # Errors
    /// Returns the error a deferred value settled with.
    pub async fn settle(self) -> Result<Value, GeneratorError> {
        match self {
            Produced::Immediate(value) => Ok(value),
            Produced::Deferred(future) => future.await,
        }
    }
}

impl fmt::Debug for Produced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produced::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Produced::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for Produced {
    fn from(value: Value) -> Self {
        Produced::Immediate(value)
    }
}

/// An endless source of values. Each pull returns a fresh value; producers
/// are never rewound.
pub trait Producer: Send {
    /// # Errors
    /// Whatever the producer fails with; callers propagate it unchanged.
    fn pull(&mut self) -> Result<Produced, GeneratorError>;
}

impl<F> Producer for F
where
    F: FnMut() -> Result<Produced, GeneratorError> + Send,
{
    fn pull(&mut self) -> Result<Produced, GeneratorError> {
        self()
    }
}
