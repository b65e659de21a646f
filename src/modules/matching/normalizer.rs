use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[(\[]([^)\]]*)[)\]]").unwrap());
static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap());
static FEAT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)f(ea)?t\.?").unwrap());

/// Turn a noisy video title into a search-friendly track query.
///
/// Deterministic and free of external state. The output contains only
/// `[a-zA-Z0-9 ]`, trimmed, with single internal spaces.
pub fn normalize_title(title: &str) -> String {
    // Keep a trailing bracketed qualifier, drop anything after it. Only
    // applies when the last closing bracket sits past the midpoint, so a
    // leading "(intro)" does not truncate the whole title.
    let mut kept: &str = title;
    let last_close = title.rfind(')').into_iter().chain(title.rfind(']')).max();
    if let Some(idx) = last_close {
        if idx > title.len() / 2 {
            kept = &title[..=idx];
        }
    }

    // "Official Video" style suffixes arrive after a pipe.
    let kept = kept.split('|').next().unwrap_or_default();

    // Drop bracketed annotations, but keep spans naming a remix or cover:
    // those words change which track the search should find.
    let kept = BRACKETED_SPAN.replace_all(kept, |caps: &regex::Captures| {
        let inner = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .to_lowercase();
        if inner.ends_with("remix") || inner.ends_with("cover") {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    let kept = NON_ALPHANUMERIC.replace_all(&kept, "");
    let kept = kept.replace(" x ", " ");
    let kept = FEAT_MARKER.replace_all(&kept, "");

    kept.split_whitespace().collect::<Vec<&str>>().join(" ")
}
