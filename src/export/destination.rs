use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use arboard::Clipboard;

use super::ExportResult;

/// Largest export accepted by the clipboard (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Where a successful export's content is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    File(PathBuf),
    Clipboard,
}

/// Clipboard access seam, mocked in tests
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Clipboard is unavailable")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy an empty transcript to the clipboard");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!("Transcript too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(())
}

/// Write an export's content to its destination
///
/// Failed exports pass through untouched. A write failure turns the result into a failure
/// that keeps the original message count. The system clipboard is only opened for
/// [`ExportDestination::Clipboard`].
pub fn deliver(result: ExportResult, destination: &ExportDestination) -> ExportResult {
    match destination {
        ExportDestination::File(_) => deliver_with(result, destination, None),
        ExportDestination::Clipboard => {
            if !result.success {
                return result;
            }
            // Validate before opening the system clipboard
            let opened = validate_clipboard_text(result.content.as_deref().unwrap_or_default())
                .and_then(|()| SystemClipboard::new());
            match opened {
                Ok(mut clipboard) => deliver_with(result, destination, Some(&mut clipboard)),
                Err(e) => {
                    log::warn!("Export delivery failed: {:#}", e);
                    ExportResult::failure(format!("{:#}", e), result.message_count)
                }
            }
        }
    }
}

/// [`deliver`] with an injected clipboard
pub fn deliver_with(
    result: ExportResult,
    destination: &ExportDestination,
    clipboard: Option<&mut dyn ClipboardProvider>,
) -> ExportResult {
    if !result.success {
        return result;
    }
    let content = result.content.as_deref().unwrap_or_default();

    let written = match destination {
        ExportDestination::File(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
        }
        ExportDestination::Clipboard => match clipboard {
            Some(provider) => validate_clipboard_text(content).and_then(|()| provider.set_text(content)),
            None => Err(anyhow::anyhow!("Clipboard is unavailable")),
        },
    };

    match written {
        Ok(()) => result,
        Err(e) => {
            log::warn!("Export delivery failed: {:#}", e);
            ExportResult::failure(format!("{:#}", e), result.message_count)
        }
    }
}
