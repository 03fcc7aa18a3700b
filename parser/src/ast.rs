/// Syntax tree for BareIO scripts.
///
/// A [`Script`] is a flat list of [`Message`]s. Argument lists nest whole
/// scripts, so the tree is only as deep as the `( … )` nesting in the source.
/// Every node carries a [`Span`] for diagnostics.
use std::fmt;

use crate::span::Span;

/// A sequence of messages, either a whole file or one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub messages: Vec<Message>,
    pub span: Span,
}

impl Script {
    pub fn new(messages: Vec<Message>, span: Span) -> Self {
        Self { messages, span }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of `Send` nodes in this script and all argument scripts.
    pub fn send_count(&self) -> usize {
        self.messages
            .iter()
            .map(|message| match &message.kind {
                MessageKind::Send { arguments, .. } => {
                    1 + arguments.iter().map(Script::send_count).sum::<usize>()
                }
                _ => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub span: Span,
}

impl Message {
    pub fn new(kind: MessageKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// String literal, raw bytes.
    String(Vec<u8>),
    Integer(i64),
    /// A named message with zero or more argument scripts.
    Send {
        name: String,
        name_span: Span,
        arguments: Vec<Script>,
    },
    /// A line break.
    ResetContext,
}

/// Renders the script back to source form.
///
/// When every string literal is valid UTF-8 the output parses to the same
/// tree, spans aside. Literals have no escapes, so other bytes are shown
/// as U+FFFD.
impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separate = false;
        for message in &self.messages {
            if matches!(message.kind, MessageKind::ResetContext) {
                writeln!(f)?;
                separate = false;
                continue;
            }
            if separate {
                write!(f, " ")?;
            }
            write!(f, "{message}")?;
            separate = true;
        }
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MessageKind::String(bytes) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(bytes))
            }
            MessageKind::Integer(value) => write!(f, "{value}"),
            MessageKind::Send { name, arguments, .. } => {
                write!(f, "{name}")?;
                if !arguments.is_empty() {
                    write!(f, "(")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            MessageKind::ResetContext => writeln!(f),
        }
    }
}
