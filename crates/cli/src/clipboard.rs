//! System clipboard access through external programs

use copyqn_core::config::ClipboardConfig;
use copyqn_core::error::{Error, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Write access to a clipboard
pub trait Clipboard {
    /// Replace the clipboard contents, or clear them with `None`
    fn set_contents(&mut self, contents: Option<&str>) -> Result<()>;
}

/// A clipboard program known to `auto` and by name
struct Provider {
    name: &'static str,
    program: &'static str,
    args: &'static [&'static str],
    clear_args: Option<&'static [&'static str]>,
}

/// Providers in `auto` order: desktop clipboards first, then generic ones
const PROVIDERS: &[Provider] = &[
    Provider {
        name: "wl-copy",
        program: "wl-copy",
        args: &[],
        clear_args: Some(&["--clear"]),
    },
    Provider {
        name: "pbcopy",
        program: "pbcopy",
        args: &[],
        clear_args: None,
    },
    Provider {
        name: "xclip",
        program: "xclip",
        args: &["-selection", "clipboard"],
        clear_args: None,
    },
    Provider {
        name: "xsel",
        program: "xsel",
        args: &["--clipboard", "--input"],
        clear_args: Some(&["--clipboard", "--clear"]),
    },
    Provider {
        name: "clip",
        program: "clip.exe",
        args: &[],
        clear_args: None,
    },
];

/// Clipboard backed by a program that reads the new contents from stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
    clear_args: Option<Vec<String>>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            clear_args: None,
        }
    }

    /// Arguments that clear the clipboard instead of writing an empty string
    pub fn with_clear_args(mut self, clear_args: Vec<String>) -> Self {
        self.clear_args = Some(clear_args);
        self
    }

    fn run(&self, args: &[String], input: Option<&str>) -> Result<()> {
        debug!(program = %self.program.display(), ?args, "Running clipboard program");

        // xclip and xsel fork a child that keeps serving the selection; only
        // stdin is piped and it is closed before waiting
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                Error::clipboard(format!(
                    "Failed to start {}: {e}",
                    self.program.display()
                ))
            })?;

        if let Some(input) = input {
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin.write_all(input.as_bytes()),
                None => Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "clipboard program has no stdin",
                )),
            };
            // Stdin is closed here, signalling end of input
            if let Err(e) = written {
                let status = child.wait()?;
                return Err(Error::clipboard(format!(
                    "Failed to write to {} ({status}): {e}",
                    self.program.display()
                )));
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::clipboard(format!(
                "{} exited with {status}",
                self.program.display()
            )));
        }
        Ok(())
    }
}

impl Clipboard for CommandClipboard {
    fn set_contents(&mut self, contents: Option<&str>) -> Result<()> {
        match (contents, &self.clear_args) {
            (Some(text), _) => self.run(&self.args, Some(text)),
            (None, Some(clear_args)) => self.run(clear_args, None),
            (None, None) => self.run(&self.args, Some("")),
        }
    }
}

/// Clipboard that prints the contents, one name per line
#[derive(Debug)]
pub struct StdoutClipboard<W: Write> {
    out: W,
}

impl<W: Write> StdoutClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for StdoutClipboard<W> {
    fn set_contents(&mut self, contents: Option<&str>) -> Result<()> {
        if let Some(text) = contents {
            writeln!(self.out, "{text}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Open the clipboard selected by configuration
///
/// `auto` picks the first provider program found on `PATH`.
pub fn open_clipboard(config: &ClipboardConfig) -> Result<Box<dyn Clipboard>> {
    match config.provider.as_str() {
        "stdout" => Ok(Box::new(StdoutClipboard::new(io::stdout()))),
        "command" => {
            let (program, args) = config.command.split_first().ok_or_else(|| {
                Error::config("clipboard.command must name a program when provider is \"command\"")
            })?;
            debug!(program = %program, "Using configured clipboard command");
            Ok(Box::new(CommandClipboard::new(program, args.to_vec())))
        }
        "auto" => {
            let found = PROVIDERS
                .iter()
                .find_map(|provider| locate(provider).map(|path| (provider, path)));
            match found {
                Some((provider, path)) => {
                    debug!(provider = provider.name, "Selected clipboard provider");
                    Ok(Box::new(provider_clipboard(provider, path)))
                }
                None => {
                    let tried: Vec<&str> = PROVIDERS.iter().map(|p| p.program).collect();
                    Err(Error::clipboard(format!(
                        "No clipboard program found on PATH (tried {})",
                        tried.join(", ")
                    )))
                }
            }
        }
        name => {
            let provider = PROVIDERS
                .iter()
                .find(|provider| provider.name == name)
                .ok_or_else(|| Error::config(format!("Unknown clipboard provider: {name}")))?;
            let path = locate(provider).ok_or_else(|| {
                Error::clipboard(format!("{} not found on PATH", provider.program))
            })?;
            Ok(Box::new(provider_clipboard(provider, path)))
        }
    }
}

fn locate(provider: &Provider) -> Option<PathBuf> {
    which::which(provider.program).ok()
}

fn provider_clipboard(provider: &Provider, path: PathBuf) -> CommandClipboard {
    let to_owned = |args: &[&str]| args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>();
    let clipboard = CommandClipboard::new(path, to_owned(provider.args));
    match provider.clear_args {
        Some(clear_args) => clipboard.with_clear_args(to_owned(clear_args)),
        None => clipboard,
    }
}
