//! Individual transformation stages
//!
//! Each stage implements `Runnable<String, String>` and can be chained into a
//! [`Transform`](crate::weave::transforms::Transform).

pub mod interleave;
pub mod reverse;
pub mod whitespace;

pub use interleave::Interleave;
pub use reverse::Reverse;
pub use whitespace::StripWhitespace;
