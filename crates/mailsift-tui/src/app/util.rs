use std::io::Write;

/// Copy text to the system clipboard via OSC 52 escape sequence.
/// Works in Ghostty, iTerm2, kitty, WezTerm, and most modern terminals.
pub(super) fn osc52_copy(text: &str) -> std::io::Result<()> {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    // Write directly to stdout, bypassing the terminal backend buffer
    let mut stdout = std::io::stdout();
    stdout.write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes())?;
    stdout.flush()
}
