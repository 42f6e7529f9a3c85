mod interface;
mod middleware;
mod printer;

pub(crate) use interface::*;
pub use middleware::{GeneralParser, Invocation};
pub(crate) use middleware::{Dispatch, ParseUnit};
pub(crate) use printer::{Printer, Projection};
