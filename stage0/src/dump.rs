use std::fmt::Write;

use crate::image::{Image, MessageDef};

/// Human-readable listing of `image`, one line per message with its raw
/// identifier.
pub fn dump(image: &Image) -> String {
    let mut out = String::new();
    for (index, script) in image.scripts.iter().enumerate() {
        let label = if index == Image::ROOT { " (root)" } else { "" };
        let _ = writeln!(out, "== script {index}{label} ==");
        for (offset, message) in script.messages.iter().enumerate() {
            let _ = writeln!(
                out,
                "{offset:04}  {id:>20}  {text}",
                id = message.raw_id(),
                text = describe(message)
            );
        }
    }
    out
}

fn describe(message: &MessageDef) -> String {
    match message {
        MessageDef::String(bytes) => {
            format!("literal \"{}\"", bytes.escape_ascii())
        }
        MessageDef::Integer(value) => format!("literal {value}"),
        MessageDef::Send { builtin, arguments } if arguments.is_empty() => {
            format!("send {builtin}")
        }
        MessageDef::Send { builtin, arguments } => {
            let scripts: Vec<String> =
                arguments.iter().map(|index| format!("@{index}")).collect();
            format!("send {builtin}({})", scripts.join(", "))
        }
        MessageDef::ResetContext => "reset".to_string(),
        MessageDef::End => "end".to_string(),
    }
}
