/// Blocking yes/no prompt and alert, as provided by the platform
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// `window.confirm` / `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}
