//! Turn an [`Image`] into live `bareio` scripts for host runs.
//!
//! Scripts borrow their messages, so the materialized tree is leaked to get
//! `'static` data. `stage0 run` materializes once per process.

use bareio::{Arguments, Message, Object, Script, Selector};

use crate::image::{Image, MessageDef};

static EMPTY: [Message<'static>; 1] = [Message::End];

fn leak<T>(items: Vec<T>) -> &'static [T] {
    Box::leak(items.into_boxed_slice())
}

/// Build the runtime form of `image` and return its root script.
pub fn materialize(image: &Image) -> Script<'static> {
    let mut built: Vec<Option<Script<'static>>> = vec![None; image.scripts.len()];

    // arguments always have larger indices than the script using them
    for (index, script) in image.scripts.iter().enumerate().rev() {
        let mut messages: Vec<Message<'static>> = script
            .messages
            .iter()
            .map(|message| match message {
                MessageDef::String(bytes) => {
                    Message::Literal(Object::string(leak(bytes.clone())))
                }
                MessageDef::Integer(value) => Message::Literal(Object::Integer(*value)),
                MessageDef::Send { builtin, arguments } => {
                    let scripts: Vec<Script<'static>> = arguments
                        .iter()
                        .filter_map(|&argument| built[argument])
                        .collect();
                    Message::Send {
                        selector: Selector::Builtin(*builtin),
                        arguments: Arguments::new(leak(scripts)),
                    }
                }
                MessageDef::ResetContext => Message::ResetContext,
                MessageDef::End => Message::End,
            })
            .collect();
        if !matches!(messages.last(), Some(Message::End)) {
            messages.push(Message::End);
        }
        built[index] = Some(Script::new(leak(messages)));
    }

    built
        .first()
        .copied()
        .flatten()
        .unwrap_or(Script::new(&EMPTY))
}
