//! Display policy: how many filtered installers are actually shown.

/// Maximum number of installers shown while the search box is empty.
pub const DISPLAY_CAP: usize = 50;

/// Trim `filtered` to the visible subset.
///
/// A non-empty term means the user narrowed the view, so nothing is cut.
/// Idempotent: capping an already-capped slice returns it unchanged.
#[must_use]
pub fn cap<'s, T>(filtered: &'s [T], term: &str) -> &'s [T] {
    if term.is_empty() {
        &filtered[..filtered.len().min(DISPLAY_CAP)]
    } else {
        filtered
    }
}

/// Whether [`cap`] dropped anything for this filtered length.
#[must_use]
pub fn is_truncated(filtered_len: usize, term: &str) -> bool {
    term.is_empty() && filtered_len > DISPLAY_CAP
}
