use crate::parser::{TITLE_CLOSE, TITLE_OPEN};

/// Text between the first `<title>` and the first `</title>`, with words
/// separated by single spaces as in the dump.
pub fn extract(body: &str) -> String {
    let Some(open) = body.find(TITLE_OPEN) else {
        return String::new();
    };
    let Some(close) = body.find(TITLE_CLOSE) else {
        return String::new();
    };
    body.get(open + TITLE_OPEN.len()..close)
        .unwrap_or_default()
        .to_string()
}
