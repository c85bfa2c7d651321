//! Keyboard shortcuts for the terminal.

/// A recognized terminal shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// F1: jump to the search input.
    FocusSearch,
    /// F2: open the checkout modal.
    OpenCheckout,
    /// Escape: dismiss the open dropdown or modal.
    Dismiss,
}

impl Shortcut {
    /// Map a key name (as reported by the host) to a shortcut.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "F1" => Some(Shortcut::FocusSearch),
            "F2" => Some(Shortcut::OpenCheckout),
            "Escape" => Some(Shortcut::Dismiss),
            _ => None,
        }
    }
}
