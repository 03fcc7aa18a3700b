//! Rust source generation for firmware images.
//!
//! Every script becomes a `static` message array and every argument list a
//! `static` array of `Script`s, so the whole image lives in read-only data
//! and needs no allocator at run time. Names are prefixed with the root name
//! so several images can be included into one crate.

use std::fmt::Write;

use log::debug;

use crate::error::{Error, Result};
use crate::image::{Image, MessageDef};

/// Strict and reserved keywords of the 2024 edition.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
    "enum", "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self",
    "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Check that `name` can be used as a Rust `static` name.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_"
        && !RUST_KEYWORDS.contains(&name);
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Emit `image` as Rust items with a `pub static {name}: Script<'static>` root.
pub fn generate(image: &Image, name: &str) -> Result<String> {
    validate_name(name)?;

    let mut out = String::new();
    let _ = writeln!(out, "// @generated by stage0, do not edit.");

    for (index, script) in image.scripts.iter().enumerate() {
        let _ = writeln!(
            out,
            "\nstatic {name}_S{index}: [::bareio::Message<'static>; {}] = [",
            script.messages.len()
        );
        for (offset, message) in script.messages.iter().enumerate() {
            let _ = writeln!(out, "    {},", message_expr(name, index, offset, message));
        }
        let _ = writeln!(out, "];");
    }

    for (index, script) in image.scripts.iter().enumerate() {
        for (offset, message) in script.messages.iter().enumerate() {
            let MessageDef::Send { arguments, .. } = message else {
                continue;
            };
            if arguments.is_empty() {
                continue;
            }
            let _ = writeln!(
                out,
                "\nstatic {name}_A{index}_{offset}: [::bareio::Script<'static>; {}] = [",
                arguments.len()
            );
            for argument in arguments {
                let _ = writeln!(out, "    ::bareio::Script::new(&{name}_S{argument}),");
            }
            let _ = writeln!(out, "];");
        }
    }

    let _ = writeln!(
        out,
        "\npub static {name}: ::bareio::Script<'static> = ::bareio::Script::new(&{name}_S{});",
        Image::ROOT
    );

    debug!("codegen: {} bytes of Rust for `{name}`", out.len());
    Ok(out)
}

/// `index` and `offset` locate `message` and name its argument array.
fn message_expr(name: &str, index: usize, offset: usize, message: &MessageDef) -> String {
    match message {
        MessageDef::String(bytes) => format!(
            "::bareio::Message::Literal(::bareio::Object::string(b\"{}\"))",
            bytes.escape_ascii()
        ),
        MessageDef::Integer(i64::MIN) => {
            "::bareio::Message::Literal(::bareio::Object::Integer(i64::MIN))".to_string()
        }
        MessageDef::Integer(value) => {
            format!("::bareio::Message::Literal(::bareio::Object::Integer({value}))")
        }
        MessageDef::Send { builtin, arguments } => {
            let builtin = format!("::bareio::Builtin::{builtin:?}");
            if arguments.is_empty() {
                format!("::bareio::Message::send({builtin})")
            } else {
                format!("::bareio::Message::send_with({builtin}, &{name}_A{index}_{offset})")
            }
        }
        MessageDef::ResetContext => "::bareio::Message::ResetContext".to_string(),
        MessageDef::End => "::bareio::Message::End".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn generate_from(src: &str, name: &str) -> String {
        let image = Image::build(&parser::parse(src).unwrap()).unwrap();
        generate(&image, name).unwrap()
    }

    #[test]
    fn generate_single_script() {
        let expected = "\
// @generated by stage0, do not edit.

static HELLO_S0: [::bareio::Message<'static>; 5] = [
    ::bareio::Message::Literal(::bareio::Object::string(b\"Bare IO!\")),
    ::bareio::Message::send(::bareio::Builtin::Print),
    ::bareio::Message::ResetContext,
    ::bareio::Message::send(::bareio::Builtin::Halt),
    ::bareio::Message::End,
];

pub static HELLO: ::bareio::Script<'static> = ::bareio::Script::new(&HELLO_S0);
";
        assert_eq!(generate_from("\"Bare IO!\" print\nhalt", "HELLO"), expected);
    }

    #[test]
    fn generate_argument_arrays() {
        let out = generate_from("\"abc\" printRange(1, 2)", "SCRIPT");
        assert!(out.contains(
            "::bareio::Message::send_with(::bareio::Builtin::PrintRange, &SCRIPT_A0_1),"
        ));
        assert!(out.contains("static SCRIPT_A0_1: [::bareio::Script<'static>; 2] = [\n    ::bareio::Script::new(&SCRIPT_S1),\n    ::bareio::Script::new(&SCRIPT_S2),\n];"));
        assert!(out.contains("static SCRIPT_S2: [::bareio::Message<'static>; 2] = [\n    ::bareio::Message::Literal(::bareio::Object::Integer(2)),"));
    }

    #[test]
    fn generate_escapes_string_bytes() {
        let out = generate_from("\"tab\there\nquote'\"", "S");
        assert!(out.contains(r#"b"tab\there\nquote\'""#), "{out}");
    }

    #[test]
    fn generate_integer_extremes() {
        let out = generate_from("-9223372036854775808 9223372036854775807", "S");
        assert!(out.contains("Object::Integer(i64::MIN)"));
        assert!(out.contains("Object::Integer(9223372036854775807)"));
    }

    #[test]
    fn names_must_be_identifiers() {
        assert!(validate_name("SCRIPT").is_ok());
        assert!(validate_name("_boot2").is_ok());
        for bad in ["", "_", "2fast", "with-dash", "sp ace", "fn", "static", "self", "Self", "gen"] {
            assert!(matches!(validate_name(bad), Err(Error::InvalidName { .. })), "{bad}");
        }
    }
}
