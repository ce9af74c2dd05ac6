//! Clipboard text read.

use arboard::Clipboard;

use ncm_core::input::{InputError, InputProvider};

const PROVIDER_NAME: &str = "clipboard";

/// Reads the current system clipboard text. No write-back.
pub struct ClipboardProvider;

impl InputProvider for ClipboardProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch(&self) -> Result<Option<String>, InputError> {
        let mut clipboard = Clipboard::new().map_err(|e| InputError::ProviderFailed {
            provider: PROVIDER_NAME.to_string(),
            message: e.to_string(),
        })?;

        match clipboard.get_text() {
            Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(_) => Ok(None),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(InputError::ProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
