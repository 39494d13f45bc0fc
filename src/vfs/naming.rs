/*!
 * Name Collision Avoidance
 * Picks a free entry name using the `name(N).ext` scheme
 */

use std::collections::HashSet;
use std::hash::BuildHasher;

/// Return `desired` if it is free, otherwise the first free `stem(N)ext`
///
/// The extension starts at the first dot of a file name (`archive.tar.gz`
/// keeps `.tar.gz`); folders never have one. Leading dots are not an
/// extension separator, so dotfiles keep them in the stem: `.env` becomes
/// `.env(1)` and `.config.json` becomes `.config(1).json`. A stem already
/// ending in `(N)` continues counting from `N + 1`. The counter strictly
/// increases, so the loop ends for any finite set of existing names.
pub fn resolve_name<S: BuildHasher>(
    existing: &HashSet<String, S>,
    desired: &str,
    is_folder: bool,
) -> String {
    if !existing.contains(desired) {
        return desired.to_string();
    }

    let (stem, ext) = split_name(desired, is_folder);
    // A `(u64::MAX)` suffix cannot be continued, it is kept as part of the stem
    let (mut stem, mut counter) = match strip_counter(stem) {
        (base, Some(n)) if n < u64::MAX => (base.to_string(), n + 1),
        _ => (stem.to_string(), 1),
    };

    loop {
        let candidate = format!("{}({}){}", stem, counter, ext);
        if !existing.contains(&candidate) {
            return candidate;
        }
        match counter.checked_add(1) {
            Some(next) => counter = next,
            None => {
                stem = format!("{}({})", stem, counter);
                counter = 1;
            }
        }
    }
}

/// Split a name into stem and extension
///
/// Leading dots belong to the stem, so `.env` has no extension and
/// `.config.json` splits into `.config` + `.json`.
pub fn split_name(name: &str, is_folder: bool) -> (&str, &str) {
    if is_folder {
        return (name, "");
    }
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].find('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}

/// Strip a trailing `(N)` counter from a stem
fn strip_counter(stem: &str) -> (&str, Option<u64>) {
    let Some(inner) = stem.strip_suffix(')') else {
        return (stem, None);
    };
    let Some(open) = inner.rfind('(') else {
        return (stem, None);
    };

    let digits = &inner[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (stem, None);
    }
    match digits.parse::<u64>() {
        Ok(n) => (&inner[..open], Some(n)),
        Err(_) => (stem, None),
    }
}
