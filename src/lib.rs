pub mod api;
pub mod ast;
pub mod canonical;
pub mod error;
pub mod generators;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod producer;
pub mod registry;
pub mod resolver;
pub mod value;

pub use api::{generator, sample, sample_async, sample_blocking};
pub use error::GeneratorError;
pub use options::Options;
pub use producer::{Produced, Producer};
pub use registry::{Context, Factory, Registry};
pub use resolver::Generator;
pub use value::Value;
