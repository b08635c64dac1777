/// Steps `index` through `0..len`, wrapping at either end.
pub const fn cycle_index(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }

    match (forward, index) {
        (true, _) => (index + 1) % len,
        (false, 0) => len - 1,
        (false, _) => (index - 1) % len,
    }
}
