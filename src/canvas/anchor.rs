use egui::Pos2;

use super::CanvasDimensions;

/// One of the eight resize handles around the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

/// Which way an anchor moves the canvas edge along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Start,
    Center,
    End,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopMiddle,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomMiddle,
        Anchor::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopMiddle => "top_middle",
            Anchor::TopRight => "top_right",
            Anchor::MiddleLeft => "middle_left",
            Anchor::MiddleRight => "middle_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomMiddle => "bottom_middle",
            Anchor::BottomRight => "bottom_right",
        }
    }

    /// The handle that stays put while this one is dragged
    pub fn opposite(&self) -> Anchor {
        match self {
            Anchor::TopLeft => Anchor::BottomRight,
            Anchor::TopMiddle => Anchor::BottomMiddle,
            Anchor::TopRight => Anchor::BottomLeft,
            Anchor::MiddleLeft => Anchor::MiddleRight,
            Anchor::MiddleRight => Anchor::MiddleLeft,
            Anchor::BottomLeft => Anchor::TopRight,
            Anchor::BottomMiddle => Anchor::TopMiddle,
            Anchor::BottomRight => Anchor::TopLeft,
        }
    }

    pub(crate) fn horizontal(&self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::MiddleLeft | Anchor::BottomLeft => Edge::Start,
            Anchor::TopMiddle | Anchor::BottomMiddle => Edge::Center,
            Anchor::TopRight | Anchor::MiddleRight | Anchor::BottomRight => Edge::End,
        }
    }

    pub(crate) fn vertical(&self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::TopMiddle | Anchor::TopRight => Edge::Start,
            Anchor::MiddleLeft | Anchor::MiddleRight => Edge::Center,
            Anchor::BottomLeft | Anchor::BottomMiddle | Anchor::BottomRight => Edge::End,
        }
    }

    fn index(&self) -> usize {
        match self {
            Anchor::TopLeft => 0,
            Anchor::TopMiddle => 1,
            Anchor::TopRight => 2,
            Anchor::MiddleLeft => 3,
            Anchor::MiddleRight => 4,
            Anchor::BottomLeft => 5,
            Anchor::BottomMiddle => 6,
            Anchor::BottomRight => 7,
        }
    }
}

/// Positions of all eight handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSet {
    positions: [Pos2; 8],
}

impl AnchorSet {
    /// Derive handle positions from canvas dimensions.
    ///
    /// Corners sit at the rectangle extremes pushed outward by `offset`,
    /// edge handles at half width / half height.
    pub fn compute(dimensions: CanvasDimensions, offset: f32) -> Self {
        let width = dimensions.width as f32;
        let height = dimensions.height as f32;
        let mut positions = [Pos2::ZERO; 8];
        for anchor in Anchor::ALL {
            let x = match anchor.horizontal() {
                Edge::Start => -offset,
                Edge::Center => width / 2.0,
                Edge::End => width + offset,
            };
            let y = match anchor.vertical() {
                Edge::Start => -offset,
                Edge::Center => height / 2.0,
                Edge::End => height + offset,
            };
            positions[anchor.index()] = Pos2::new(x, y);
        }
        Self { positions }
    }

    pub fn get(&self, anchor: Anchor) -> Pos2 {
        self.positions[anchor.index()]
    }

    /// Move a single handle; only used while it follows the pointer
    pub(crate) fn set(&mut self, anchor: Anchor, position: Pos2) {
        self.positions[anchor.index()] = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_positions_without_offset() {
        let anchors = AnchorSet::compute(CanvasDimensions::new(500, 500), 0.0);
        assert_eq!(anchors.get(Anchor::BottomRight), Pos2::new(500.0, 500.0));
        assert_eq!(anchors.get(Anchor::BottomMiddle), Pos2::new(250.0, 500.0));
        assert_eq!(anchors.get(Anchor::TopLeft), Pos2::new(0.0, 0.0));
        assert_eq!(anchors.get(Anchor::MiddleRight), Pos2::new(500.0, 250.0));
    }

    #[test]
    fn test_offset_pushes_handles_outward() {
        let anchors = AnchorSet::compute(CanvasDimensions::new(400, 300), 5.0);
        assert_eq!(anchors.get(Anchor::TopLeft), Pos2::new(-5.0, -5.0));
        assert_eq!(anchors.get(Anchor::BottomRight), Pos2::new(405.0, 305.0));
        assert_eq!(anchors.get(Anchor::TopMiddle), Pos2::new(200.0, -5.0));
    }

    #[test]
    fn test_opposite_is_symmetric() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.opposite().opposite(), anchor);
            assert_ne!(anchor.opposite(), anchor);
        }
    }
}
