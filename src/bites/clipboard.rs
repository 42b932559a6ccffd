//! System clipboard via the platform's copy command.

use crate::error::{BitesError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copy commands to try, in order.
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_spawn_error = None;
    for (program, args) in CANDIDATES {
        match Command::new(program).args(*args).stdin(Stdio::piped()).spawn() {
            Ok(mut child) => {
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(text.as_bytes()).map_err(|e| {
                        BitesError::Clipboard(format!("failed to write to {}: {}", program, e))
                    })?;
                }
                let status = child.wait().map_err(|e| {
                    BitesError::Clipboard(format!("failed to wait for {}: {}", program, e))
                })?;
                return if status.success() {
                    Ok(())
                } else {
                    Err(BitesError::Clipboard(format!("{} exited with {}", program, status)))
                };
            }
            Err(e) => last_spawn_error = Some(format!("{}: {}", program, e)),
        }
    }
    Err(BitesError::Clipboard(format!(
        "no clipboard command available ({})",
        last_spawn_error.unwrap_or_default()
    )))
}

/// One line per link, `name: url`.
pub fn format_links(links: &[crate::commands::MapLink]) -> String {
    links
        .iter()
        .map(|l| format!("{}: {}", l.label, l.url))
        .collect::<Vec<_>>()
        .join("\n")
}
