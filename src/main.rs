use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::{Read, Write};

use bracket_indent::cli::{CliArgs, InputSource, RunConfig};
use bracket_indent::config::IndentConfig;
use bracket_indent::host::TextEditor;
use bracket_indent::intercept::{dispatch_type, Dispatch, EditorContext};
use bracket_indent::model::{BufferEditor, Document, Position, Selection};
use bracket_indent::update::NewlineReport;

/// Machine-readable result for `--json`
#[derive(Debug, Serialize)]
struct JsonOutput {
    text: String,
    selections: Vec<Selection>,
    primary: usize,
    presses: Vec<PressOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "handled_by", rename_all = "snake_case")]
enum PressOutcome {
    Indented(NewlineReport),
    Native,
}

fn main() -> Result<()> {
    bracket_indent::tracing::init();

    let run = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let mut config = match &run.config_file {
        Some(path) => IndentConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IndentConfig::load(),
    };
    run.overrides.apply(&mut config);

    let (document, uri) = read_document(&run)?;
    let mut editor = BufferEditor::new(document, config.editor.normalized());
    place_selections(&mut editor, &run.selections)?;

    let context = EditorContext::new(uri);
    let mut presses = Vec::with_capacity(run.times);
    for _ in 0..run.times {
        match dispatch_type(Some(&mut editor), &context, "\n", &config) {
            Dispatch::Indented(report) => presses.push(PressOutcome::Indented(report)),
            Dispatch::Native => {
                editor
                    .type_native("\n")
                    .context("native newline insertion failed")?;
                presses.push(PressOutcome::Native);
            }
        }
    }

    write_output(&run, &mut editor, presses)
}

fn read_document(run: &RunConfig) -> Result<(Document, String)> {
    match &run.input {
        InputSource::File(path) => {
            let document = Document::from_file(path.clone())
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((document, format!("file://{}", path.display())))
        }
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok((Document::with_text(&text), "untitled:stdin".to_string()))
        }
    }
}

/// Apply CLI selections, or put a single cursor at the end of the buffer
fn place_selections(editor: &mut BufferEditor, selections: &[Selection]) -> Result<()> {
    if selections.is_empty() {
        let last_line = editor.line_count() - 1;
        let end = Position::new(last_line, editor.document.line_length(last_line));
        editor.set_selections(vec![Selection::new(end)]);
        return Ok(());
    }

    for selection in selections {
        for position in [selection.anchor, selection.head] {
            let in_bounds = position.line < editor.line_count()
                && position.column <= editor.document.line_length(position.line);
            if !in_bounds {
                bail!(
                    "position {}:{} is outside the buffer",
                    position.line + 1,
                    position.column + 1
                );
            }
        }
    }
    editor.set_selections(selections.to_vec());
    Ok(())
}

fn write_output(
    run: &RunConfig,
    editor: &mut BufferEditor,
    presses: Vec<PressOutcome>,
) -> Result<()> {
    if run.in_place {
        let written = editor
            .document
            .save()
            .context("writing buffer back to its file")?;
        tracing::info!(written, presses = presses.len(), "in-place run finished");
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if run.json {
        let output = JsonOutput {
            text: editor.text(),
            selections: editor.selections.clone(),
            primary: editor.primary,
            presses,
        };
        serde_json::to_writer_pretty(&mut out, &output).context("encoding JSON")?;
        writeln!(out)?;
    } else {
        out.write_all(editor.text().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
