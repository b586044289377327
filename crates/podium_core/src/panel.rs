//! Panel deck
//!
//! The ordered, fixed sequence of full-viewport sections a surface is made
//! of. The deck is built once at startup from the static panel list and is
//! never mutated afterwards; every other component borrows it read-only.
//!
//! Panels are stacked vertically, one viewport-height each, so all geometry
//! questions (where does panel `i` start, which panel's center is nearest,
//! how much of panel `i` is visible) reduce to arithmetic on the scroll
//! offset and the stable viewport height.

use serde::{Deserialize, Serialize};

/// What a panel hosts, as far as navigation side-effects are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    /// Plain content panel.
    #[default]
    Standard,
    /// Panel holding a rail of keyboard-openable cards.
    CardGrid,
    /// Panel embedding the 3D exhibit.
    Exhibit,
    /// Panel that can open a modal dialog.
    ModalHost,
}

/// One full-viewport section in the deck.
///
/// `node` is the opaque handle of the panel's rendering node. It is `None`
/// while the markup for the panel has not been realized yet; navigation to
/// such a panel is silently dropped.
#[derive(Clone, Debug)]
pub struct Panel {
    pub index: usize,
    pub node: Option<u64>,
    /// Fragment name this panel answers to (`#workshop` style addressing).
    pub anchor: Option<String>,
    pub kind: PanelKind,
    /// Video node hosted by this panel, if any. Played while current,
    /// paused otherwise.
    pub media: Option<u64>,
}

impl Panel {
    pub fn new(index: usize, node: u64) -> Self {
        Self {
            index,
            node: Some(node),
            anchor: None,
            kind: PanelKind::Standard,
            media: None,
        }
    }

    /// Panel whose rendering node has not been realized.
    pub fn unrealized(index: usize) -> Self {
        Self {
            index,
            node: None,
            anchor: None,
            kind: PanelKind::Standard,
            media: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_kind(mut self, kind: PanelKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_media(mut self, media: u64) -> Self {
        self.media = Some(media);
        self
    }
}

/// The fixed panel sequence plus its vertical-stack geometry.
#[derive(Clone, Debug, Default)]
pub struct PanelDeck {
    panels: Vec<Panel>,
}

impl PanelDeck {
    pub fn new(panels: Vec<Panel>) -> Self {
        debug_assert!(panels.iter().enumerate().all(|(i, p)| p.index == i));
        Self { panels }
    }

    /// Validated construction for descriptor-driven assembly.
    pub fn try_new(panels: Vec<Panel>) -> crate::error::Result<Self> {
        if panels.is_empty() {
            return Err(crate::error::SurfaceError::EmptyDeck);
        }
        for (expected, panel) in panels.iter().enumerate() {
            if panel.index != expected {
                return Err(crate::error::SurfaceError::PanelOrder {
                    expected,
                    found: panel.index,
                });
            }
        }
        Ok(Self { panels })
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Clamp a possibly-negative, possibly-overshooting request into range.
    pub fn clamp(&self, requested: isize) -> usize {
        if self.panels.is_empty() {
            return 0;
        }
        requested.clamp(0, self.panels.len() as isize - 1) as usize
    }

    pub fn last_index(&self) -> usize {
        self.panels.len().saturating_sub(1)
    }

    /// Resolve a fragment identifier (with or without a leading `#`) to a
    /// panel index.
    pub fn index_of_anchor(&self, fragment: &str) -> Option<usize> {
        let name = fragment.strip_prefix('#').unwrap_or(fragment);
        if name.is_empty() {
            return None;
        }
        self.panels
            .iter()
            .find(|p| p.anchor.as_deref() == Some(name))
            .map(|p| p.index)
    }

    /// First panel of the given kind, if any.
    pub fn find_kind(&self, kind: PanelKind) -> Option<usize> {
        self.panels.iter().find(|p| p.kind == kind).map(|p| p.index)
    }

    /// Scroll offset at which panel `index` fills the viewport exactly.
    pub fn offset_of(&self, index: usize, viewport_height: f32) -> f32 {
        index as f32 * viewport_height
    }

    /// Panel whose geometric center is nearest the viewport's vertical
    /// center at the given scroll offset. Ties resolve to the lower index.
    pub fn nearest_index(&self, offset: f32, viewport_height: f32) -> usize {
        if self.panels.is_empty() || viewport_height <= 0.0 {
            return 0;
        }
        let viewport_center = offset + viewport_height / 2.0;
        let mut best = 0usize;
        let mut best_distance = f32::INFINITY;
        for panel in &self.panels {
            let center = panel.index as f32 * viewport_height + viewport_height / 2.0;
            let distance = (center - viewport_center).abs();
            if distance < best_distance {
                best_distance = distance;
                best = panel.index;
            }
        }
        best
    }

    /// Fraction of panel `index` currently inside the viewport, in `[0, 1]`.
    pub fn visible_ratio(&self, index: usize, offset: f32, viewport_height: f32) -> f32 {
        if viewport_height <= 0.0 || index >= self.panels.len() {
            return 0.0;
        }
        let top = index as f32 * viewport_height;
        let bottom = top + viewport_height;
        let view_top = offset;
        let view_bottom = offset + viewport_height;
        let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        overlap / viewport_height
    }

    /// Fraction of the way through the deck for the given index, in `[0, 1]`.
    /// A single-panel deck pins this to 1.0.
    pub fn progress_fraction(&self, index: usize) -> f32 {
        if self.panels.len() < 2 {
            return 1.0;
        }
        index as f32 / (self.panels.len() - 1) as f32
    }
}
