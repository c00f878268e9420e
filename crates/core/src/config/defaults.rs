//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_CLIPBOARD_PROVIDER: &str = "auto";

/// Providers accepted by `clipboard.provider`
pub const VALID_CLIPBOARD_PROVIDERS: &[&str] = &[
    "auto", "wl-copy", "pbcopy", "xclip", "xsel", "clip", "command", "stdout",
];

pub(crate) fn default_clipboard_provider() -> String {
    DEFAULT_CLIPBOARD_PROVIDER.to_string()
}

pub(crate) fn default_clear_on_unresolved() -> bool {
    false
}

pub(crate) fn default_echo_status() -> bool {
    true
}
