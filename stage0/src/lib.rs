//! # stage0
//!
//! Host-side builder for BareIO scripts.
//!
//! ```text
//!  .bio source ──▶ parser ──▶ Image ──┬─▶ codegen   (Rust statics for the board)
//!                                     ├─▶ dump      (listing with raw ids)
//!                                     └─▶ materialize ──▶ bareio::run on the host
//! ```

pub mod codegen;
pub mod dump;
pub mod error;
pub mod host;
pub mod image;
pub mod materialize;

use std::fs;
use std::io::Write;
use std::path::Path;

use bareio::{InterpreterSettings, Outcome};
use log::info;

pub use codegen::generate;
pub use dump::dump;
pub use error::{Error, Result};
pub use host::HostMachine;
pub use image::{Image, MessageDef, ScriptDef};
pub use materialize::materialize;

/// Parse and resolve `source` into an image.
///
/// Source is raw bytes; string literals may hold any byte except `"`.
pub fn compile_source(source: impl AsRef<[u8]>) -> Result<Image> {
    let script = parser::parse_bytes(source.as_ref())?;
    info!("parsed {} send(s)", script.send_count());
    let image = Image::build(&script)?;
    info!(
        "built image: {} script(s), {} message(s)",
        image.scripts.len(),
        image.message_count()
    );
    Ok(image)
}

pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| Error::io(path, err))
}

/// Read `path` and generate Rust source for a `pub static {name}` script.
///
/// Used by build scripts; errors are rendered against the source text.
pub fn compile_file(path: &Path, name: &str) -> std::result::Result<String, String> {
    let source = read_source(path).map_err(|err| err.to_string())?;
    compile_source(&source)
        .and_then(|image| generate(&image, name))
        .map_err(|err| render_error(&source, &err))
}

/// Evaluate `image` on the host, writing console output to `out`.
pub fn run_image<W: Write>(
    image: &Image,
    settings: InterpreterSettings,
    out: W,
) -> Result<(Outcome<'static>, W)> {
    let script = materialize(image);
    let mut machine = HostMachine::new(out);
    let outcome = bareio::run_with(&mut machine, &script, settings);
    info!("run finished, shutdown requested: {}", machine.shutdown_requested());
    let out = machine
        .finish()
        .map_err(|err| Error::io("<console>", err))?;
    Ok((outcome?, out))
}

/// Render `err`, with a source excerpt when it points into `source`.
pub fn render_error(source: impl AsRef<[u8]>, err: &Error) -> String {
    match err.span() {
        Some(span) => format_diagnostic(
            source.as_ref(),
            "error",
            &err.to_string(),
            span.start.offset,
            span.end.offset,
        ),
        None => format!("error: {err}"),
    }
}

fn format_diagnostic(
    source: &[u8],
    kind: &str,
    message: &str,
    start: usize,
    end: usize,
) -> String {
    let start = start.min(source.len());
    let end = end.min(source.len());

    let line_start = source[..start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = source[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |i| start + i);
    let mut source_line = &source[line_start..line_end];
    if let [rest @ .., b'\r'] = source_line {
        source_line = rest;
    }
    let line = source[..start].iter().filter(|&&b| b == b'\n').count() + 1;
    let col = start - line_start + 1;

    let underline_start = (start - line_start).min(source_line.len());
    let underline_len = end
        .min(line_start + source_line.len())
        .saturating_sub(start)
        .max(1);

    let line_num = line.to_string();
    let pad = " ".repeat(line_num.len());
    let source_line = String::from_utf8_lossy(source_line);

    format!(
        "{kind}: {message}\n\
         {pad}--> {line}:{col}\n\
         {pad} |\n\
         {line_num} | {source_line}\n\
         {pad} | {}{}\n",
        " ".repeat(underline_start),
        "^".repeat(underline_len),
    )
}
