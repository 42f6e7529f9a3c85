//! Core of `argbind`: the signature compiler, the argument binding engine, and the runner around them.
//! See [documentation root](https://docs.rs/argbind/latest/argbind/index.html) for full details.
#![warn(missing_docs)]
mod api;
mod binder;
mod constant;
mod error;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod signature;

pub use api::*;
pub use binder::Binding;
pub use error::*;
pub use model::*;
pub use parser::{GeneralParser, Invocation};
pub use signature::{CliSignature, Parameter};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
