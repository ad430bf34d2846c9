//! Line-oriented test-case driver.
//!
//! A multi-case script is sliced on comment-line boundaries: `//` lines
//! label and delimit cases, every other non-empty line accumulates into the
//! current case, and the trailing case is flushed at end of file. Each case
//! is later parsed and executed against its own fresh registry.

/// One slice of a multi-case script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptCase {
    /// The comment lines that introduced this case, if any.
    pub header: Option<String>,
    /// The case's source text, ready for the parser.
    pub source: String,
}

/// Slice a script into cases on comment-line boundaries.
pub fn split_cases(script: &str) -> Vec<ScriptCase> {
    let mut cases = Vec::new();
    let mut header: Option<String> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("//") {
            if !buffer.is_empty() {
                cases.push(ScriptCase {
                    header: header.take(),
                    source: buffer.join("\n"),
                });
                buffer.clear();
            }
            header = Some(match header.take() {
                Some(existing) => format!("{existing}\n{trimmed}"),
                None => trimmed.to_string(),
            });
        } else {
            buffer.push(trimmed);
        }
    }

    if !buffer.is_empty() {
        cases.push(ScriptCase {
            header: header.take(),
            source: buffer.join("\n"),
        });
    }

    cases
}
