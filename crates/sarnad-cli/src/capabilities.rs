//! OS integrations behind the core's capability traits.

use sarnad_core::{ClipboardWriter, ExternalOpener, InteractionError};

pub(crate) struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    /// X11 and Wayland only serve the selection while its owner is alive.
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold_selection: bool,
}

impl SystemClipboard {
    /// Clipboard for a long-running session that outlives each copy.
    pub(crate) fn new() -> Self {
        Self {
            inner: open_clipboard(),
            hold_selection: false,
        }
    }

    /// Clipboard for a process that exits right after copying.
    ///
    /// On Linux each write blocks until another client takes the selection
    /// over, so the text is still there to paste once we are gone.
    pub(crate) fn one_shot() -> Self {
        Self {
            inner: open_clipboard(),
            hold_selection: cfg!(target_os = "linux"),
        }
    }
}

fn open_clipboard() -> Option<arboard::Clipboard> {
    match arboard::Clipboard::new() {
        Ok(clipboard) => Some(clipboard),
        Err(e) => {
            tracing::warn!(error = %e, "system clipboard unavailable");
            None
        }
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), InteractionError> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| InteractionError::Clipboard("no system clipboard".to_string()))?;

        #[cfg(target_os = "linux")]
        if self.hold_selection {
            use arboard::SetExtLinux;

            tracing::debug!("holding clipboard selection until it is replaced");
            return clipboard
                .set()
                .wait()
                .text(text.to_owned())
                .map_err(|e| InteractionError::Clipboard(e.to_string()));
        }

        clipboard
            .set_text(text.to_owned())
            .map_err(|e| InteractionError::Clipboard(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open_external(&mut self, url: &str) -> Result<(), InteractionError> {
        open::that(url).map_err(|e| InteractionError::Open {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
