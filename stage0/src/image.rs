//! Flattened, name-resolved form of a parsed script tree.
//!
//! The root script is stored at index 0. Argument scripts are appended in
//! breadth-first order, so a send only ever refers to scripts with a larger
//! index than its own.

use std::collections::VecDeque;

use bareio::{Builtin, END_OF_SCRIPT_ID, RESET_CONTEXT_ID, Selector};
use log::debug;
use parser::ast::{self, MessageKind};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDef {
    String(Vec<u8>),
    Integer(i64),
    Send {
        builtin: Builtin,
        /// Indices into [`Image::scripts`], in argument order.
        arguments: Vec<usize>,
    },
    ResetContext,
    End,
}

impl MessageDef {
    /// Raw identifier in the image encoding; literals encode as `0`.
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::String(_) | Self::Integer(_) => 0,
            Self::Send { builtin, .. } => Selector::Builtin(*builtin).raw(),
            Self::ResetContext => RESET_CONTEXT_ID,
            Self::End => END_OF_SCRIPT_ID,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptDef {
    /// Always ends with [`MessageDef::End`].
    pub messages: Vec<MessageDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub scripts: Vec<ScriptDef>,
}

impl Image {
    pub const ROOT: usize = 0;

    /// Flatten `root` and resolve every message name to a builtin.
    pub fn build(root: &ast::Script) -> Result<Self> {
        let mut pending = VecDeque::from([root]);
        let mut scripts = Vec::new();
        // index the next enqueued argument script will get
        let mut next_index = 1;

        while let Some(script) = pending.pop_front() {
            let mut messages = Vec::with_capacity(script.messages.len() + 1);
            for message in &script.messages {
                let def = match &message.kind {
                    MessageKind::String(bytes) => MessageDef::String(bytes.clone()),
                    MessageKind::Integer(value) => MessageDef::Integer(*value),
                    MessageKind::ResetContext => MessageDef::ResetContext,
                    MessageKind::Send {
                        name,
                        name_span,
                        arguments,
                    } => {
                        let builtin = Builtin::from_name(name).ok_or_else(|| {
                            Error::UnknownMessage {
                                name: name.clone(),
                                span: *name_span,
                            }
                        })?;
                        let indices = (next_index..next_index + arguments.len()).collect();
                        next_index += arguments.len();
                        pending.extend(arguments.iter());
                        MessageDef::Send {
                            builtin,
                            arguments: indices,
                        }
                    }
                };
                messages.push(def);
            }
            messages.push(MessageDef::End);
            scripts.push(ScriptDef { messages });
        }

        debug!("image: {} script(s)", scripts.len());
        Ok(Self { scripts })
    }

    pub fn root(&self) -> &ScriptDef {
        &self.scripts[Self::ROOT]
    }

    pub fn message_count(&self) -> usize {
        self.scripts.iter().map(|script| script.messages.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(src: &str) -> Result<Image> {
        Image::build(&parser::parse(src)?)
    }

    #[test]
    fn root_script_is_terminated() {
        let image = build("\"hi\" print\nhalt").unwrap();
        assert_eq!(
            image.scripts,
            vec![ScriptDef {
                messages: vec![
                    MessageDef::String(b"hi".to_vec()),
                    MessageDef::Send {
                        builtin: Builtin::Print,
                        arguments: vec![],
                    },
                    MessageDef::ResetContext,
                    MessageDef::Send {
                        builtin: Builtin::Halt,
                        arguments: vec![],
                    },
                    MessageDef::End,
                ],
            }]
        );
    }

    #[test]
    fn empty_source_is_a_lone_end() {
        let image = build("").unwrap();
        assert_eq!(image.root().messages, vec![MessageDef::End]);
    }

    #[test]
    fn arguments_are_flattened_breadth_first() {
        let image = build("\"abc\" printRange(0 print, \"x\" printRange(1, 2)) printRange(3, 4)").unwrap();
        let sends: Vec<_> = image
            .root()
            .messages
            .iter()
            .filter_map(|m| match m {
                MessageDef::Send { arguments, .. } => Some(arguments.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(sends, vec![vec![1, 2], vec![3, 4]]);

        // the nested printRange lives in script 2 and its arguments follow
        // every argument of the root
        match &image.scripts[2].messages[1] {
            MessageDef::Send { arguments, .. } => assert_eq!(arguments, &vec![5, 6]),
            other => panic!("expected send, got {other:?}"),
        }
        assert_eq!(image.scripts.len(), 7);
        assert_eq!(image.scripts[5].messages[0], MessageDef::Integer(1));
        assert_eq!(image.scripts[4].messages[0], MessageDef::Integer(4));
    }

    #[test]
    fn every_argument_index_points_forward() {
        let image = build("\"a\" printRange(\"b\" printRange(0, 1), 1)\nhalt").unwrap();
        for (index, script) in image.scripts.iter().enumerate() {
            assert_eq!(script.messages.last(), Some(&MessageDef::End));
            for message in &script.messages {
                if let MessageDef::Send { arguments, .. } = message {
                    assert!(arguments.iter().all(|&arg| arg > index));
                }
            }
        }
    }

    #[test]
    fn unknown_message_is_rejected_with_span() {
        let err = build("1 print\n2 frobnicate").unwrap_err();
        match err {
            Error::UnknownMessage { name, span } => {
                assert_eq!(name, "frobnicate");
                assert_eq!((span.start.line, span.start.column), (2, 3));
            }
            other => panic!("expected unknown message, got {other:?}"),
        }
    }

    #[test]
    fn raw_ids_follow_the_image_encoding() {
        assert_eq!(MessageDef::End.raw_id(), -1);
        assert_eq!(MessageDef::ResetContext.raw_id(), -2);
        assert_eq!(MessageDef::Integer(5).raw_id(), 0);
        let halt = MessageDef::Send {
            builtin: Builtin::Halt,
            arguments: vec![],
        };
        assert_eq!(halt.raw_id(), i64::MIN);
    }
}
