//! Batch driver behind the `mica-parse` binary
//!
//! The runner loads source buffers (files, a `-e` string, or stdin),
//! parses each one, and hands successful trees to the selected output
//! mode: the plain s-expression dump, the JSON dump, or the per-node
//! locate visualization. Parse failures are reported per buffer and do
//! not stop the batch; they only turn the final exit code nonzero.

use crate::mica::ast::Node;
use crate::mica::lexing::{ExplainingLexer, StandardLexer};
use crate::mica::locate::{Palette, RenderError, Renderer};
use crate::mica::parsing::Parser;
use crate::mica::source::SourceBuffer;
use clap::{Parser as ClapParser, ValueEnum};
use std::error::Error;
use std::fmt;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

/// Command-line options for mica-parse
#[derive(Debug, ClapParser)]
#[command(
    name = "mica-parse",
    version,
    about = "Parse mica source and inspect ASTs and their source maps"
)]
pub struct Options {
    /// Mica source files to parse; with no files and no -e, reads stdin
    #[arg(value_name = "FILES", conflicts_with = "eval")]
    pub files: Vec<PathBuf>,

    /// Parse a literal code string instead of files
    #[arg(short = 'e', value_name = "CODE")]
    pub eval: Option<String>,

    /// Explain how source maps for AST nodes are laid out
    #[arg(short = 'L', long)]
    pub locate: bool,

    /// Explain how the source is tokenized
    #[arg(short = 'E', long)]
    pub explain: bool,

    /// Plain dump format (ignored under --locate)
    #[arg(long, value_enum, default_value_t = DumpFormat::Sexp)]
    pub format: DumpFormat,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// How to print a parsed tree when not locating
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Sexp,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// The palette this choice selects; `Auto` colors only terminals
    pub fn palette(self) -> Palette {
        match self {
            ColorChoice::Always => Palette::colored(),
            ColorChoice::Never => Palette::plain(),
            ColorChoice::Auto => {
                if io::stdout().is_terminal() {
                    Palette::colored()
                } else {
                    Palette::plain()
                }
            }
        }
    }
}

/// Errors that abort the whole run (as opposed to per-buffer parse
/// failures, which are reported and skipped)
#[derive(Debug)]
pub enum RunnerError {
    /// An input could not be read
    Read { name: String, source: io::Error },
    Render(RenderError),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::Read { name, source } => write!(f, "cannot read {}: {}", name, source),
            RunnerError::Render(err) => write!(f, "{}", err),
            RunnerError::Json(err) => write!(f, "cannot serialize tree: {}", err),
            RunnerError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RunnerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunnerError::Read { source, .. } => Some(source),
            RunnerError::Render(err) => Some(err),
            RunnerError::Json(err) => Some(err),
            RunnerError::Io(err) => Some(err),
        }
    }
}

impl From<RenderError> for RunnerError {
    fn from(err: RenderError) -> Self {
        RunnerError::Render(err)
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(err: serde_json::Error) -> Self {
        RunnerError::Json(err)
    }
}

impl From<io::Error> for RunnerError {
    fn from(err: io::Error) -> Self {
        RunnerError::Io(err)
    }
}

/// Walks nodes in pre-order; per node, prints the s-expression dump line
/// and then the node's source-map visualization
pub struct LocationProcessor<'a> {
    renderer: &'a Renderer,
}

impl<'a> LocationProcessor<'a> {
    pub fn new(renderer: &'a Renderer) -> Self {
        Self { renderer }
    }

    pub fn process<W: Write>(
        &self,
        root: &Node,
        buffer: &SourceBuffer,
        out: &mut W,
    ) -> Result<(), RenderError> {
        for node in root.preorder() {
            writeln!(out, "{}", node)?;
            self.renderer.render(node.map.as_ref(), buffer, out)?;
        }
        Ok(())
    }
}

/// The batch driver
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Runs the batch against stdout, returning the process exit code
    pub fn run(&self) -> Result<i32, RunnerError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    /// Runs the batch against an arbitrary sink
    pub fn run_with<W: Write>(&self, out: &mut W) -> Result<i32, RunnerError> {
        let buffers = self.load_buffers()?;
        log::debug!("processing {} buffer(s)", buffers.len());

        let renderer = Renderer::new(self.options.color.palette());
        let mut parser = self.build_parser();
        let mut failures = 0usize;
        for buffer in &buffers {
            match parser.parse(buffer) {
                Ok(node) => self.process(&node, buffer, &renderer, out)?,
                Err(err) => {
                    failures += 1;
                    eprintln!("{}: {}", buffer.name(), err);
                }
            }
        }

        if buffers.len() > 1 {
            writeln!(
                out,
                "Using {} parser to parse {} files.",
                parser.lexer_description(),
                buffers.len()
            )?;
        }
        Ok(if failures > 0 { 1 } else { 0 })
    }

    fn build_parser(&self) -> Parser {
        if self.options.explain {
            Parser::new(Box::new(ExplainingLexer::new(
                StandardLexer::new(),
                io::stdout(),
            )))
        } else {
            Parser::standard()
        }
    }

    fn load_buffers(&self) -> Result<Vec<SourceBuffer>, RunnerError> {
        if let Some(code) = &self.options.eval {
            return Ok(vec![SourceBuffer::new("(eval)", code.clone())]);
        }
        if self.options.files.is_empty() {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| RunnerError::Read {
                    name: "(stdin)".to_string(),
                    source,
                })?;
            return Ok(vec![SourceBuffer::new("(stdin)", text)]);
        }
        self.options
            .files
            .iter()
            .map(|path| {
                SourceBuffer::from_path(path).map_err(|source| RunnerError::Read {
                    name: path.display().to_string(),
                    source,
                })
            })
            .collect()
    }

    fn process<W: Write>(
        &self,
        node: &Node,
        buffer: &SourceBuffer,
        renderer: &Renderer,
        out: &mut W,
    ) -> Result<(), RunnerError> {
        if self.options.locate {
            LocationProcessor::new(renderer).process(node, buffer, out)?;
        } else {
            match self.options.format {
                DumpFormat::Sexp => writeln!(out, "{}", node)?,
                DumpFormat::Json => {
                    serde_json::to_writer(&mut *out, node)?;
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }
}
