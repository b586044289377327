//! Expandable card traversal
//!
//! Card-grid panels expose one focusable node per card. Activating a card
//! expands it and admits its internal links into the tab order; at most one
//! card is open at a time, so opening a card closes whichever card was open
//! before. Forward Tab from the last internal link closes the card and
//! carries focus to the next card, or out of the panel when the open card
//! was the last one.
//!
//! The rail only tracks which card is open. Enabling and disabling the link
//! nodes on the host is the caller's job, driven by the state transitions
//! reported here.

/// One expandable card: its focusable face and the links revealed when open.
#[derive(Debug, Clone)]
pub struct Card {
    pub node: u64,
    pub links: Vec<u64>,
}

impl Card {
    pub fn new(node: u64, links: Vec<u64>) -> Self {
        Self { node, links }
    }
}

/// The cards of one panel, with the single-open invariant.
#[derive(Debug, Clone)]
pub struct CardRail {
    panel: usize,
    cards: Vec<Card>,
    open: Option<usize>,
}

impl CardRail {
    pub fn new(panel: usize, cards: Vec<Card>) -> Self {
        Self { panel, cards, open: None }
    }

    /// Index of the panel this rail belongs to.
    pub fn panel(&self) -> usize {
        self.panel
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Position of the currently open card, if any.
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// Position of the card whose face node this is.
    pub fn card_position(&self, node: u64) -> Option<usize> {
        self.cards.iter().position(|c| c.node == node)
    }

    /// Whether the node is an internal link of the open card.
    pub fn is_open_link(&self, node: u64) -> bool {
        self.open
            .map(|idx| self.cards[idx].links.contains(&node))
            .unwrap_or(false)
    }

    /// Internal links of the open card, empty when all cards are closed.
    pub fn open_links(&self) -> &[u64] {
        match self.open {
            Some(idx) => &self.cards[idx].links,
            None => &[],
        }
    }

    /// Marks a card open, returning the card that closed to make room.
    pub fn set_open(&mut self, idx: usize) -> Option<usize> {
        debug_assert!(idx < self.cards.len());
        let previous = self.open.filter(|&prev| prev != idx);
        self.open = Some(idx);
        previous
    }

    /// Clears the open card, returning which one was open.
    pub fn clear_open(&mut self) -> Option<usize> {
        self.open.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rail() -> CardRail {
        CardRail::new(
            1,
            vec![
                Card::new(100, vec![101, 102]),
                Card::new(200, vec![201]),
                Card::new(300, vec![]),
            ],
        )
    }

    #[test]
    fn test_single_open_card() {
        let mut rail = rail();
        assert_eq!(rail.set_open(0), None);
        assert_eq!(rail.open_index(), Some(0));

        // Opening another card reports the one it displaced.
        assert_eq!(rail.set_open(1), Some(0));
        assert_eq!(rail.open_index(), Some(1));

        // Re-opening the open card displaces nothing.
        assert_eq!(rail.set_open(1), None);

        assert_eq!(rail.clear_open(), Some(1));
        assert_eq!(rail.open_index(), None);
        assert_eq!(rail.clear_open(), None);
    }

    #[test]
    fn test_open_links_follow_open_card() {
        let mut rail = rail();
        assert!(rail.open_links().is_empty());

        rail.set_open(0);
        assert_eq!(rail.open_links(), &[101, 102]);
        assert!(rail.is_open_link(102));
        assert!(!rail.is_open_link(201));

        rail.set_open(2);
        assert!(rail.open_links().is_empty());
    }

    #[test]
    fn test_card_position_by_face_node() {
        let rail = rail();
        assert_eq!(rail.card_position(200), Some(1));
        assert_eq!(rail.card_position(201), None);
    }
}
