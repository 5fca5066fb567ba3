use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;
use crate::geom::Rect;

/// Side of the anchor the content is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Whether the main axis runs horizontally (content beside the anchor).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Side {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Side::Top),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            other => Err(OverlayError::UnknownSide(other.to_string())),
        }
    }
}

/// Alignment of the content along the cross axis of the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Alignment {
    Start,
    Center,
    End,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Alignment::Start => "start",
            Alignment::Center => "center",
            Alignment::End => "end",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Alignment {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Alignment::Start),
            "center" => Ok(Alignment::Center),
            "end" => Ok(Alignment::End),
            other => Err(OverlayError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Requested side + alignment pair; one of the 12 anchored placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Placement {
    pub side: Side,
    pub alignment: Alignment,
}

impl Placement {
    pub const TOP_START: Placement = Placement::new(Side::Top, Alignment::Start);
    pub const TOP: Placement = Placement::new(Side::Top, Alignment::Center);
    pub const TOP_END: Placement = Placement::new(Side::Top, Alignment::End);
    pub const RIGHT_START: Placement = Placement::new(Side::Right, Alignment::Start);
    pub const RIGHT: Placement = Placement::new(Side::Right, Alignment::Center);
    pub const RIGHT_END: Placement = Placement::new(Side::Right, Alignment::End);
    pub const BOTTOM_START: Placement = Placement::new(Side::Bottom, Alignment::Start);
    pub const BOTTOM: Placement = Placement::new(Side::Bottom, Alignment::Center);
    pub const BOTTOM_END: Placement = Placement::new(Side::Bottom, Alignment::End);
    pub const LEFT_START: Placement = Placement::new(Side::Left, Alignment::Start);
    pub const LEFT: Placement = Placement::new(Side::Left, Alignment::Center);
    pub const LEFT_END: Placement = Placement::new(Side::Left, Alignment::End);

    pub const fn new(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }

    /// This placement with the side flipped to its opposite; alignment is kept.
    pub fn flipped(self) -> Placement {
        Placement::new(self.side.opposite(), self.alignment)
    }

    pub fn all() -> [Placement; 12] {
        [
            Placement::TOP_START,
            Placement::TOP,
            Placement::TOP_END,
            Placement::RIGHT_START,
            Placement::RIGHT,
            Placement::RIGHT_END,
            Placement::BOTTOM_START,
            Placement::BOTTOM,
            Placement::BOTTOM_END,
            Placement::LEFT_START,
            Placement::LEFT,
            Placement::LEFT_END,
        ]
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alignment {
            Alignment::Center => write!(f, "{}", self.side),
            _ => write!(f, "{}-{}", self.side, self.alignment),
        }
    }
}

impl FromStr for Placement {
    type Err = OverlayError;

    /// Parses `"bottom"` (center alignment implied) or `"bottom-start"` style
    /// text. Unknown text is a configuration error and fails fast.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OverlayError::UnknownPlacement(s.to_string());
        match s.split_once('-') {
            None => {
                let side = Side::from_str(s).map_err(|_| invalid())?;
                Ok(Placement::new(side, Alignment::Center))
            }
            Some((side, alignment)) => {
                let side = Side::from_str(side).map_err(|_| invalid())?;
                let alignment = Alignment::from_str(alignment).map_err(|_| invalid())?;
                Ok(Placement::new(side, alignment))
            }
        }
    }
}

/// Pixel displacement applied after alignment. The main axis pushes the
/// content away from the anchor; the cross axis shifts it along the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub main_axis: i32,
    pub cross_axis: i32,
}

impl Offset {
    pub const fn new(main_axis: i32, cross_axis: i32) -> Self {
        Self {
            main_axis,
            cross_axis,
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::new(8, 0)
    }
}

/// Viewport box plus minimum clearance from its edges. Input to collision
/// handling only; never mutated by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBounds {
    pub rect: Rect,
    pub padding: u16,
}

impl ViewportBounds {
    pub const fn new(rect: Rect, padding: u16) -> Self {
        Self { rect, padding }
    }

    fn min_x(&self) -> i32 {
        self.rect.x + self.padding as i32
    }

    fn min_y(&self) -> i32 {
        self.rect.y + self.padding as i32
    }

    fn max_x(&self) -> i32 {
        self.rect.right() - self.padding as i32
    }

    fn max_y(&self) -> i32 {
        self.rect.bottom() - self.padding as i32
    }
}

/// Resolver output. `placement_used` reflects a flip but never the cross-axis
/// clamp; `cross_shift` is how far the clamp nudged the cross coordinate, so
/// arrow-aligning callers can recover the pre-clamp anchor-relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedPosition {
    pub x: i32,
    pub y: i32,
    pub placement_used: Placement,
    pub cross_shift: i32,
}

/// Computes where `content` should be placed relative to `anchor`.
///
/// Pure function of its arguments: identical inputs always yield identical
/// output. Collision handling is a single flip to the opposite side when the
/// main axis overflows the padded bounds; if the flipped side overflows too,
/// the flipped result is kept as-is to avoid oscillation. The cross axis is
/// then clamped into the padded bounds without changing the side. Zero-sized
/// anchors or content are legal and yield a degenerate but defined position.
pub fn compute(
    anchor: Rect,
    content: Rect,
    placement: Placement,
    offset: Offset,
    bounds: ViewportBounds,
) -> ComputedPosition {
    let mut used = placement;
    let mut main = main_coord(used.side, anchor, content, offset);
    if overflows_main(used.side, main, content, bounds) {
        used = used.flipped();
        main = main_coord(used.side, anchor, content, offset);
    }
    let cross = cross_coord(used.side, used.alignment, anchor, content, offset);
    let (clamped, cross_shift) = clamp_cross(used.side, cross, content, bounds);

    let (x, y) = if used.side.is_horizontal() {
        (main, clamped)
    } else {
        (clamped, main)
    };
    ComputedPosition {
        x,
        y,
        placement_used: used,
        cross_shift,
    }
}

/// Leading-edge main-axis coordinate: content flush against the anchor's
/// trailing edge on `side`, pushed outward by `offset.main_axis`.
fn main_coord(side: Side, anchor: Rect, content: Rect, offset: Offset) -> i32 {
    match side {
        Side::Bottom => anchor.bottom() + offset.main_axis,
        Side::Top => anchor.y - content.height as i32 - offset.main_axis,
        Side::Right => anchor.right() + offset.main_axis,
        Side::Left => anchor.x - content.width as i32 - offset.main_axis,
    }
}

fn cross_coord(side: Side, alignment: Alignment, anchor: Rect, content: Rect, offset: Offset) -> i32 {
    let (anchor_lead, anchor_len, content_len) = if side.is_horizontal() {
        (anchor.y, anchor.height as i32, content.height as i32)
    } else {
        (anchor.x, anchor.width as i32, content.width as i32)
    };
    let aligned = match alignment {
        Alignment::Start => anchor_lead,
        Alignment::Center => anchor_lead + (anchor_len - content_len) / 2,
        Alignment::End => anchor_lead + anchor_len - content_len,
    };
    aligned + offset.cross_axis
}

fn overflows_main(side: Side, main: i32, content: Rect, bounds: ViewportBounds) -> bool {
    match side {
        Side::Bottom => main + content.height as i32 > bounds.max_y(),
        Side::Top => main < bounds.min_y(),
        Side::Right => main + content.width as i32 > bounds.max_x(),
        Side::Left => main < bounds.min_x(),
    }
}

/// Shifts the cross coordinate by the minimum amount needed to keep the
/// content within the padded bounds. When the content is larger than the
/// bounds the upper limit wins, biasing the coordinate negative rather than
/// erroring. Returns the clamped coordinate and the applied shift.
fn clamp_cross(side: Side, cross: i32, content: Rect, bounds: ViewportBounds) -> (i32, i32) {
    let (lo, hi) = if side.is_horizontal() {
        (bounds.min_y(), bounds.max_y() - content.height as i32)
    } else {
        (bounds.min_x(), bounds.max_x() - content.width as i32)
    };
    let clamped = cross.max(lo).min(hi);
    (clamped, clamped - cross)
}
