// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Cut a `srcset` on every occurrence of `ext` and rebuild one URL per piece.
/// Width/density descriptors and the comma left over from the previous
/// candidate are dropped; the text after the last marker is discarded.
/// Commas inside a URL (CDN transform params) survive.
///
/// `"a.jpg 1x, b.jpg 2x"` → `["a.jpg", "b.jpg"]`
pub fn split_srcset(srcset: &str, ext: &str) -> Vec<String> {
    let mut pieces: Vec<&str> = srcset.split(ext).collect();
    pieces.pop(); // tail after the last marker
    pieces
        .into_iter()
        .filter_map(|piece| {
            let mut url = piece.split_whitespace().last()?;
            // "2x,https://…" when candidates are not space separated
            if let Some((head, tail)) = url.split_once(',') {
                if is_descriptor(head) { url = tail; }
            }
            if url.is_empty() { return None; }
            Some(join!(url, ext))
        })
        .collect()
}

/// `""`, `2x`, `1.5x`, `640w`
fn is_descriptor(s: &str) -> bool {
    if s.is_empty() { return true; }
    match s.strip_suffix(['w', 'x']) {
        Some(num) => num.parse::<f32>().is_ok(),
        None => false,
    }
}

/// Excel sheet names: at most 31 chars, none of `[]:*?/\`.
/// Also used as file stems for delimited exports.
pub fn sanitize_sheet_name(name: &str) -> String {
    let out: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let out = out.trim_matches('\'').trim().to_string();
    if out.is_empty() { s!("Sheet") } else { out }
}
