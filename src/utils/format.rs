//! Multi-line presentation of compiled commands.
//!
//! `format` breaks the command before every long flag; `compact` undoes
//! exactly that, so `compact(&format(s)) == s` for any `s`.

/// Continuation inserted before each long flag
const CONTINUATION: &str = " \\\n    --";

/// Break a command onto one line per long flag
///
/// # Examples
/// ```
/// use sqlmapgen::utils::format::format;
///
/// assert_eq!(format("sqlmap -u x --batch"), "sqlmap -u x \\\n    --batch");
/// ```
pub fn format(command: &str) -> String {
    command.replace(" --", CONTINUATION)
}

/// Join a formatted command back onto a single line
pub fn compact(command: &str) -> String {
    // Every " --" in formatted text is the tail of a continuation, so a
    // literal replace restores the original exactly.
    command.replace(CONTINUATION, " --")
}

/// True when the command contains continuations produced by `format`
pub fn is_formatted(command: &str) -> bool {
    command.contains(CONTINUATION)
}

/// Flip between the single-line and multi-line presentation
pub fn toggle(command: &str) -> String {
    if is_formatted(command) {
        compact(command)
    } else {
        format(command)
    }
}
