mod converter;
mod core;
mod decorator;
mod parameter;

pub use self::core::*;
pub(crate) use converter::Coerced;
pub use converter::{Converter, Mapping};
pub use decorator::{ArgumentDecorator, InsertContext, Inserter};
pub use parameter::AbstractParameter;
