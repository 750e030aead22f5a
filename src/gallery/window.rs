//! Progressive disclosure state for one grid

/// How many items of a fixed-length collection a grid currently shows.
///
/// `visible_count` starts at the full length (unbounded) or at the initial
/// threshold (windowed), only grows, and never exceeds `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryWindow {
    len: usize,
    visible_count: usize,
    windowed: bool,
}

impl GalleryWindow {
    pub fn new(len: usize, windowed: bool, initial_threshold: usize) -> Self {
        let visible_count = if windowed {
            initial_threshold.min(len)
        } else {
            len
        };
        Self {
            len,
            visible_count,
            windowed,
        }
    }

    /// Window that shows everything up front
    pub fn unbounded(len: usize) -> Self {
        Self::new(len, false, len)
    }

    /// Window that starts at `initial_threshold` and grows on request
    pub fn windowed(len: usize, initial_threshold: usize) -> Self {
        Self::new(len, true, initial_threshold)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_windowed(&self) -> bool {
        self.windowed
    }

    /// The visible prefix of `items`. `items` is the collection this window
    /// was created for; a shorter slice is clamped rather than overrun.
    pub fn visible_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count.min(items.len())]
    }

    /// First item past the window, if any
    pub fn next_hidden<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if self.has_more() {
            items.get(self.visible_count)
        } else {
            None
        }
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.len
    }

    pub fn remaining_count(&self) -> usize {
        self.len.saturating_sub(self.visible_count)
    }

    /// Grow the window by `step`, clamped to the collection length.
    /// No-op once everything is visible.
    pub fn reveal_more(&mut self, step: usize) {
        self.visible_count = self.visible_count.saturating_add(step).min(self.len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{INITIAL_VISIBLE_COUNT, LOAD_MORE_COUNT};

    #[test]
    fn windowed_shows_min_of_threshold_and_len() {
        for len in [0usize, 1, 5, 9, 10, 30] {
            for threshold in [0usize, 1, 9, 12, 100] {
                let items: Vec<usize> = (0..len).collect();
                let window = GalleryWindow::new(len, true, threshold);
                assert_eq!(
                    window.visible_items(&items).len(),
                    threshold.min(len),
                    "len={} threshold={}",
                    len,
                    threshold
                );
            }
        }
    }

    #[test]
    fn unbounded_never_has_more() {
        for len in [0usize, 1, 9, 50] {
            let window = GalleryWindow::unbounded(len);
            assert!(!window.has_more());
            assert_eq!(window.remaining_count(), 0);
            assert_eq!(window.visible_count(), len);
        }
    }

    #[test]
    fn ten_photos_reveal_in_two_steps() {
        let items: Vec<u32> = (0..10).collect();
        let mut window = GalleryWindow::new(items.len(), true, 9);

        assert_eq!(window.visible_items(&items), &items[..9]);
        assert!(window.has_more());
        assert_eq!(window.remaining_count(), 1);
        assert_eq!(window.next_hidden(&items), Some(&9));

        window.reveal_more(9);
        assert_eq!(window.visible_items(&items).len(), 10);
        assert!(!window.has_more());
        assert_eq!(window.next_hidden(&items), None);
    }

    #[test]
    fn reveal_is_monotonic_and_idempotent_at_boundary() {
        let mut window = GalleryWindow::new(25, true, 9);
        let mut last = window.visible_count();
        for _ in 0..6 {
            window.reveal_more(9);
            assert!(window.visible_count() >= last);
            assert!(window.visible_count() <= window.len());
            last = window.visible_count();
        }
        assert_eq!(window.visible_count(), 25);

        window.reveal_more(9);
        window.reveal_more(usize::MAX);
        assert_eq!(window.visible_count(), 25);
    }

    #[test]
    fn zero_step_is_noop() {
        let mut window = GalleryWindow::new(20, true, INITIAL_VISIBLE_COUNT);
        window.reveal_more(0);
        assert_eq!(window.visible_count(), INITIAL_VISIBLE_COUNT);
        window.reveal_more(LOAD_MORE_COUNT);
        assert_eq!(window.visible_count(), INITIAL_VISIBLE_COUNT + LOAD_MORE_COUNT);
    }

    #[test]
    fn threshold_at_or_above_len_has_nothing_more() {
        let window = GalleryWindow::windowed(9, 9);
        assert!(!window.has_more());
        let window = GalleryWindow::windowed(3, 9);
        assert!(!window.has_more());
        assert_eq!(window.visible_count(), 3);
    }

    #[test]
    fn short_slice_is_clamped() {
        let window = GalleryWindow::unbounded(5);
        let items = [1, 2, 3];
        assert_eq!(window.visible_items(&items), &[1, 2, 3]);
    }
}
