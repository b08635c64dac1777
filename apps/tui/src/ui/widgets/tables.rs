/// First row to draw so that `selected` stays inside a window of `visible` rows.
///
/// Stays at the top until the selection walks past the last visible row, then
/// follows it so the selection sits on the bottom row.
pub const fn scroll_offset(total: usize, visible: usize, selected: usize) -> usize {
    if visible == 0 || total <= visible || selected < visible {
        return 0;
    }

    let last_window = total - visible;
    let offset = selected + 1 - visible;
    if offset > last_window {
        last_window
    } else {
        offset
    }
}
