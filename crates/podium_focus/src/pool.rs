//! Per-panel focus pools
//!
//! Every panel owns an ordered list of focusable nodes. At any moment
//! exactly one pool is enabled: the one belonging to the current panel.
//! Keeping the other pools out of the tab order is what stops keyboard
//! users from tabbing into off-screen content.

/// The ordered tab ring of one panel.
#[derive(Debug, Clone)]
pub struct FocusPool {
    panel: usize,
    nodes: Vec<u64>,
}

impl FocusPool {
    pub fn new(panel: usize, nodes: Vec<u64>) -> Self {
        Self { panel, nodes }
    }

    /// Index of the panel this pool belongs to.
    pub fn panel(&self) -> usize {
        self.panel
    }

    /// Nodes in tab order.
    pub fn nodes(&self) -> &[u64] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: u64) -> bool {
        self.nodes.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_keeps_declared_order() {
        let pool = FocusPool::new(2, vec![30, 10, 20]);
        assert_eq!(pool.panel(), 2);
        assert_eq!(pool.nodes(), &[30, 10, 20]);
        assert!(pool.contains(10));
        assert!(!pool.contains(99));
    }
}
