//! ANSI SGR fragments.
//!
//! A colored piece of text is written as
//! `ANSI_COLOR_PREFIX + spec + ANSI_COLOR_SUFFIX + text + ANSI_COLOR_RESET`,
//! where `spec` is an SGR parameter list such as `0;33` or `101;1;33`.

pub const ANSI_COLOR_PREFIX: &str = "\x1b[";
pub const ANSI_COLOR_SUFFIX: &str = "m";
/// Terminates any active SGR styling so subsequent text returns to the terminal default.
pub const ANSI_COLOR_RESET: &str = "\x1b[0m";
