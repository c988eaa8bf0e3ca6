//! Command-line argument parsing for the `bracket-indent` binary
//!
//! Supports:
//! - Reading a file or stdin
//! - Placing cursors and selections (1-indexed, like an editor status bar)
//! - Pressing Enter one or more times
//! - Overriding the saved indentation config

use clap::Parser;
use std::path::PathBuf;

use crate::config::IndentConfig;
use crate::model::{Position, Selection};

/// Press Enter in a buffer with bracket-aware indentation
#[derive(Parser, Debug, Default)]
#[command(
    name = "bracket-indent",
    version,
    about = "Insert newlines with bracket-aware indentation"
)]
pub struct CliArgs {
    /// File to edit (reads stdin when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Cursor position as LINE:COL, 1-indexed (repeatable)
    #[arg(short = 'c', long = "cursor", value_name = "LINE:COL", value_parser = parse_position)]
    pub cursors: Vec<Position>,

    /// Selection as LINE:COL-LINE:COL (anchor-head), 1-indexed (repeatable)
    #[arg(short = 's', long = "select", value_name = "RANGE", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    /// Press Enter N times
    #[arg(short = 't', long, value_name = "N", default_value_t = 1)]
    pub times: usize,

    /// Write the result back to PATH instead of stdout
    #[arg(short = 'i', long)]
    pub in_place: bool,

    /// Print the buffer and final selections as JSON
    #[arg(long)]
    pub json: bool,

    /// Read config from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tab size in columns
    #[arg(long, value_name = "N")]
    pub tab_size: Option<usize>,

    /// Indent with tabs instead of spaces
    #[arg(long)]
    pub tabs: bool,

    /// Use default indentation when the cursor follows an open bracket
    #[arg(long)]
    pub default_after_empty_bracket: bool,

    /// Legacy mode: a trailing open bracket adds one tab stop to the outer one
    #[arg(long)]
    pub tab_stop_after_trailing_bracket: bool,

    /// Treat `<` and `>` as brackets
    #[arg(long)]
    pub angle_brackets: bool,
}

/// Where the buffer comes from and goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Settings from the command line that override the loaded config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub tab_size: Option<usize>,
    pub tabs: bool,
    pub default_after_empty_bracket: bool,
    pub tab_stop_after_trailing_bracket: bool,
    pub angle_brackets: bool,
}

impl ConfigOverrides {
    /// Apply on top of a loaded config. Flags only ever switch options on.
    pub fn apply(&self, config: &mut IndentConfig) {
        if let Some(tab_size) = self.tab_size {
            config.editor.tab_size = tab_size;
        }
        if self.tabs {
            config.editor.insert_spaces = false;
        }
        config.use_default_indentation_after_empty_bracket |= self.default_after_empty_bracket;
        config.tab_stop_after_trailing_bracket |= self.tab_stop_after_trailing_bracket;
        config.include_angle_brackets |= self.angle_brackets;
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    /// Selections to start from (0-indexed); empty means one cursor at the end
    pub selections: Vec<Selection>,
    pub times: usize,
    pub in_place: bool,
    pub json: bool,
    pub config_file: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let input = match self.path {
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        };

        if self.in_place && input == InputSource::Stdin {
            return Err("--in-place needs a file path".to_string());
        }
        if self.in_place && self.json {
            return Err("--in-place and --json cannot be combined".to_string());
        }

        let mut selections: Vec<Selection> =
            self.cursors.into_iter().map(Selection::new).collect();
        selections.extend(self.selections);

        Ok(RunConfig {
            input,
            selections,
            times: self.times,
            in_place: self.in_place,
            json: self.json,
            config_file: self.config,
            overrides: ConfigOverrides {
                tab_size: self.tab_size,
                tabs: self.tabs,
                default_after_empty_bracket: self.default_after_empty_bracket,
                tab_stop_after_trailing_bracket: self.tab_stop_after_trailing_bracket,
                angle_brackets: self.angle_brackets,
            },
        })
    }
}

/// Parse `LINE:COL` (1-indexed) into a 0-indexed position
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{}'", s))?;
    let line: usize = line
        .parse()
        .map_err(|_| format!("invalid line number '{}'", line))?;
    let column: usize = column
        .parse()
        .map_err(|_| format!("invalid column number '{}'", column))?;
    if line == 0 || column == 0 {
        return Err(format!("'{}': lines and columns start at 1", s));
    }
    // Convert from 1-indexed (user input) to 0-indexed (internal)
    Ok(Position::new(line - 1, column - 1))
}

/// Parse `LINE:COL-LINE:COL` into an anchor-head selection
pub fn parse_selection(s: &str) -> Result<Selection, String> {
    let (anchor, head) = s
        .split_once('-')
        .ok_or_else(|| format!("expected LINE:COL-LINE:COL, got '{}'", s))?;
    Ok(Selection::from_anchor_head(
        parse_position(anchor)?,
        parse_position(head)?,
    ))
}
