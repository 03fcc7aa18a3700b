//! # BareIO runtime
//!
//! A message-passing object runtime small enough to run on bare metal: no
//! operating system, no heap allocator, no standard library.
//!
//! A [`Script`] is a terminated sequence of [`Message`]s. It is evaluated
//! against a context [`Object`], usually [`Object::Globals`]. Literals replace
//! the current receiver, sends are dispatched through the receiver's builtin
//! table, and a context reset rebinds the receiver to the original context.
//!
//! ```text
//!  Script ──▶ Interpreter ──▶ builtin table (per Object variant)
//!                 ▲                    │
//!                 └── argument Scripts ┘   (lazy, evaluated in the caller's scope)
//! ```
//!
//! All effects go through an injected [`Machine`]: bytes to a [`Console`] and
//! a shutdown request to [`Firmware`].
//!
//! ```rust
//! use bareio::{Builtin, Console, Firmware, Message, Object, Outcome, Script};
//!
//! #[derive(Default)]
//! struct Capture(Vec<u8>);
//!
//! impl Console for Capture {
//!     fn write_byte(&mut self, byte: u8) {
//!         self.0.push(byte);
//!     }
//! }
//!
//! impl Firmware for Capture {
//!     fn request_shutdown(&mut self) {}
//! }
//!
//! static MESSAGES: [Message<'static>; 3] = [
//!     Message::Literal(Object::Integer(-7)),
//!     Message::send(Builtin::Print),
//!     Message::End,
//! ];
//! static SCRIPT: Script<'static> = Script::new(&MESSAGES);
//!
//! let mut machine = Capture::default();
//! let outcome = bareio::run(&mut machine, &SCRIPT).unwrap();
//! assert_eq!(outcome, Outcome::Completed(Object::Integer(-7)));
//! assert_eq!(machine.0, b"-7\n");
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod format;
mod interpreter;
mod lookup;
mod message;
mod object;
mod primitives;
mod system;

#[cfg(any(test, feature = "std"))]
pub mod testing;

pub use error::{ExecutionResult, Fault, Unwind};
pub use format::{DECIMAL_BUFFER_LEN, format_decimal};
pub use interpreter::{
    BuiltinCall, Interpreter, InterpreterSettings, Outcome, run, run_with,
};
pub use lookup::{
    BuiltinFunction, BuiltinMessage, BuiltinTable, builtin_table, lookup,
};
pub use message::{
    Arguments, Builtin, END_OF_SCRIPT_ID, Message, RESET_CONTEXT_ID, Script,
    Selector,
};
pub use object::{BareString, Object, ObjectKind};
pub use system::{Console, Firmware, Machine};
