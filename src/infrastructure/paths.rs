//! Path utilities for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox path of the plugin's data directory (trace files).
///
/// `/host` is the cwd of the last focused terminal, usually the user's home,
/// so this resolves to `~/.local/share/zellij/eventboard` on the host.
///
/// # Examples
///
/// ```
/// use eventboard::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/eventboard"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("eventboard")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// Used for the `theme_file` option, which users write as a home-relative path.
///
/// # Examples
///
/// ```
/// use eventboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~other/theme.toml"), "~other/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
