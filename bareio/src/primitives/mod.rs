//! Builtin implementations, grouped by the object variant that owns them.
//!
//! Every builtin has the [`BuiltinFunction`](crate::BuiltinFunction)
//! signature and is registered in exactly one table in `lookup`.

pub mod globals;
pub mod integer;
pub mod string;
