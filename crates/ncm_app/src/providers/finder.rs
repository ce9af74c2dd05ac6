//! File-manager selection query via AppleScript.

use std::process::Command;

use ncm_core::input::{InputError, InputProvider};

/// Returns the POSIX path of the first selected item, or the
/// NO_SELECTION sentinel when the selection is empty.
const SELECTION_SCRIPT: &str = r#"
tell application "Finder"
    set selectedFiles to selection as alias list
    if (count of selectedFiles) is 0 then
        return "NO_SELECTION"
    else
        return POSIX path of (item 1 of selectedFiles as text)
    end if
end tell
"#;

const NO_SELECTION: &str = "NO_SELECTION";

const PROVIDER_NAME: &str = "Finder selection";

/// Queries the file manager for its current single-item selection.
pub struct FinderSelectionProvider;

impl InputProvider for FinderSelectionProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch(&self) -> Result<Option<String>, InputError> {
        let output = Command::new("osascript")
            .args(["-e", SELECTION_SCRIPT])
            .output()
            .map_err(|e| InputError::ProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(InputError::ProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let selected = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if selected.is_empty() || selected == NO_SELECTION {
            return Ok(None);
        }

        Ok(Some(selected))
    }
}
