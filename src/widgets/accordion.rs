//! FAQ accordion and the access gate that reveals it.

/// Expanded state of one accordion entry after a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryState {
    /// Entry index.
    pub index: usize,
    /// Whether the entry is expanded.
    pub expanded: bool,
}

/// An accordion where at most one entry is expanded.
#[derive(Debug, Clone, Default)]
pub struct Accordion {
    len: usize,
    expanded: Option<usize>,
}

impl Accordion {
    /// `len` collapsed entries.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            expanded: None,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The expanded entry.
    #[must_use]
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Resize after the page re-measured its entries. An expanded entry
    /// that no longer exists collapses.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.expanded.is_some_and(|i| i >= len) {
            self.expanded = None;
        }
    }

    /// Click on entry `index`: every other entry collapses and the clicked
    /// one toggles. Returns the state of every entry, or nothing for an
    /// out-of-range index.
    pub fn toggle(&mut self, index: usize) -> Vec<EntryState> {
        if index >= self.len {
            log::warn!("faq entry {index} out of range (len {})", self.len);
            return Vec::new();
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        (0..self.len)
            .map(|i| EntryState {
                index: i,
                expanded: self.expanded == Some(i),
            })
            .collect()
    }
}

/// Button that shows or hides the FAQ content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessGate {
    open: bool,
}

impl AccessGate {
    /// Whether the content is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip visibility; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded_count(states: &[EntryState]) -> usize {
        states.iter().filter(|s| s.expanded).count()
    }

    #[test]
    fn at_most_one_expanded() {
        let mut faq = Accordion::new(4);
        for click in [0, 2, 2, 3, 1, 1, 0, 3] {
            let states = faq.toggle(click);
            assert_eq!(states.len(), 4);
            assert!(expanded_count(&states) <= 1);
        }
    }

    #[test]
    fn clicking_expanded_entry_collapses_it() {
        let mut faq = Accordion::new(3);
        let states = faq.toggle(1);
        assert_eq!(faq.expanded(), Some(1));
        assert!(states[1].expanded);

        let states = faq.toggle(1);
        assert_eq!(faq.expanded(), None);
        assert_eq!(expanded_count(&states), 0);
    }

    #[test]
    fn opening_another_closes_the_first() {
        let mut faq = Accordion::new(3);
        let _ = faq.toggle(0);
        let states = faq.toggle(2);
        assert!(!states[0].expanded);
        assert!(states[2].expanded);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut faq = Accordion::new(2);
        let _ = faq.toggle(1);
        assert!(faq.toggle(5).is_empty());
        assert_eq!(faq.expanded(), Some(1));

        faq.set_len(1);
        assert_eq!(faq.expanded(), None);
    }

    #[test]
    fn gate_toggles() {
        let mut gate = AccessGate::default();
        assert!(!gate.is_open());
        assert!(gate.toggle());
        assert!(!gate.toggle());
    }
}
