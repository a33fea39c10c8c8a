/// Decorative marker some spreadsheet exports put in front of names.
const MARKER: char = '◆';

/// Accented Latin letters kept alongside plain ASCII.
const ACCENTED: &str = "áàâãäéèêëíìîïóòôõöúùûüçÁÀÂÃÄÉÈÊËÍÌÎÏÓÒÔÕÖÚÙÛÜÇ";

fn is_null_token(s: &str) -> bool {
    s == "NULL" || s == "null"
}

/// ASCII plus [`ACCENTED`]. Other Latin-1 symbols such as `º`, `ª` and `©`
/// are dropped, so `"Violino 1º"` cleans to `"Violino 1"`.
fn is_allowed(c: char) -> bool {
    c.is_ascii() || ACCENTED.contains(c)
}

/// Clean a raw CSV field.
///
/// Returns `None` for empty, whitespace-only or `NULL`/`null` values, and for
/// values that end up empty once the marker and disallowed characters are
/// removed. Applying it to its own output yields the same value.
pub fn clean_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || is_null_token(raw) {
        return None;
    }

    let kept: String = raw
        .chars()
        .filter(|&c| c != MARKER && is_allowed(c))
        .collect();
    let kept = kept.trim();

    if kept.is_empty() || is_null_token(kept) {
        None
    } else {
        Some(kept.to_string())
    }
}
