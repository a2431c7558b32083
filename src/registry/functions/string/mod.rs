//! String manipulation functions for FHIRPath expressions

mod contains;
mod ends_with;
mod length;
mod lower;
mod replace;
mod starts_with;
mod substring;
mod upper;

pub use contains::ContainsFunction;
pub use ends_with::EndsWithFunction;
pub use length::LengthFunction;
pub use lower::LowerFunction;
pub use replace::ReplaceFunction;
pub use starts_with::StartsWithFunction;
pub use substring::SubstringFunction;
pub use upper::UpperFunction;
