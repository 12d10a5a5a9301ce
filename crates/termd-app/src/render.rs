//! Plain-text rendering of line records for a line-mode console.

use termd_terminal::LineRecord;

/// Turn record markup into console text: `<br>` becomes a newline, other
/// tags are dropped and a few entities are decoded.
pub fn to_plain(content: &str) -> String {
    let content = content.replace("<br>", "\n");
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {},
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// One record as it should be printed.
pub fn record(line: &LineRecord) -> String {
    match &line.header {
        Some(header) => format!("{} {}", header.prefix(), to_plain(&line.content)),
        None => to_plain(&line.content),
    }
}
