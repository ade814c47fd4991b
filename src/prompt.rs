use std::io::{self, Write};

/// Expands the escape sequences a prompt may carry.
///
/// `\a`, `\n`, `\r` and `\t` become their control characters. `\\` is written
/// as two backslashes, any other escape passes through untouched, and a
/// trailing lone backslash is kept as is.
pub fn expand_escapes(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    let mut chars = prompt.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push_str("\\\\"),
            Some('a') => out.push('\u{7}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Writes the expanded prompt without a trailing newline and flushes, so the
/// prompt is visible before the key read blocks.
pub fn write_prompt<W: Write + ?Sized>(prompt: &str, out: &mut W) -> io::Result<()> {
    out.write_all(expand_escapes(prompt).as_bytes())?;
    out.flush()
}
