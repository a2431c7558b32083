//! Collection functions for FHIRPath expressions

mod count;
mod empty;
mod exists;
mod first;
mod last;
mod tail;

pub use count::CountFunction;
pub use empty::EmptyFunction;
pub use exists::ExistsFunction;
pub use first::FirstFunction;
pub use last::LastFunction;
pub use tail::TailFunction;
