//! Parse completion output into line items

/// Markers stripped from the start of list items
const BULLETS: [&str; 3] = ["-", "*", "•"];

/// Split a completion response into non-empty, trimmed lines
///
/// Markdown code fences are dropped and leading list bullets are removed,
/// since models often wrap line-oriented answers in either.
pub fn parse_lines(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    for bullet in BULLETS {
        if let Some(rest) = line.strip_prefix(bullet) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    line
}
