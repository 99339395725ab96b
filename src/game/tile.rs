//! # Tile Types
//!
//! Every cell of a level holds one [`TileType`]. Placement code never matches on
//! individual variants when deciding whether a cell is free; it goes through the
//! semantic groups defined here (empty, reserved, flat wall, junction wall).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Directions a wall segment extends out of its cell.
    ///
    /// Wall junctions are resolved by taking the union of the arms already
    /// present in a cell with the arms of the segment being placed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WallArms: u8 {
        const NORTH = 0b0001;
        const EAST  = 0b0010;
        const SOUTH = 0b0100;
        const WEST  = 0b1000;
    }
}

/// Shape of a wall tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    /// Unconnected wall block
    Solid,
    Vertical,
    Horizontal,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// T-junction opening downwards (╦)
    TeeDown,
    /// T-junction opening upwards (╩)
    TeeUp,
    /// T-junction opening to the left (╣)
    TeeLeft,
    /// T-junction opening to the right (╠)
    TeeRight,
    Cross,
}

impl WallKind {
    /// Arms this wall shape extends along.
    pub fn arms(self) -> WallArms {
        match self {
            WallKind::Solid => WallArms::empty(),
            WallKind::Vertical => WallArms::NORTH | WallArms::SOUTH,
            WallKind::Horizontal => WallArms::EAST | WallArms::WEST,
            WallKind::TopLeft => WallArms::EAST | WallArms::SOUTH,
            WallKind::TopRight => WallArms::WEST | WallArms::SOUTH,
            WallKind::BottomLeft => WallArms::NORTH | WallArms::EAST,
            WallKind::BottomRight => WallArms::NORTH | WallArms::WEST,
            WallKind::TeeDown => WallArms::EAST | WallArms::WEST | WallArms::SOUTH,
            WallKind::TeeUp => WallArms::EAST | WallArms::WEST | WallArms::NORTH,
            WallKind::TeeLeft => WallArms::NORTH | WallArms::SOUTH | WallArms::WEST,
            WallKind::TeeRight => WallArms::NORTH | WallArms::SOUTH | WallArms::EAST,
            WallKind::Cross => WallArms::all(),
        }
    }

    /// Picks the wall shape that covers exactly the given arms.
    ///
    /// A single dangling arm is drawn as the straight wall along its axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::{WallArms, WallKind};
    ///
    /// let arms = WallKind::TopLeft.arms() | WallKind::TopRight.arms();
    /// assert_eq!(WallKind::from_arms(arms), WallKind::TeeDown);
    /// ```
    pub fn from_arms(arms: WallArms) -> WallKind {
        let n = arms.contains(WallArms::NORTH);
        let e = arms.contains(WallArms::EAST);
        let s = arms.contains(WallArms::SOUTH);
        let w = arms.contains(WallArms::WEST);

        match (n, e, s, w) {
            (false, false, false, false) => WallKind::Solid,
            (true, true, true, true) => WallKind::Cross,
            (false, true, true, true) => WallKind::TeeDown,
            (true, true, false, true) => WallKind::TeeUp,
            (true, false, true, true) => WallKind::TeeLeft,
            (true, true, true, false) => WallKind::TeeRight,
            (false, true, true, false) => WallKind::TopLeft,
            (false, false, true, true) => WallKind::TopRight,
            (true, true, false, false) => WallKind::BottomLeft,
            (true, false, false, true) => WallKind::BottomRight,
            (_, false, _, false) => WallKind::Vertical,
            (false, _, false, _) => WallKind::Horizontal,
        }
    }

    /// True for straight wall runs that doors and windows may replace.
    pub fn is_flat(self) -> bool {
        matches!(self, WallKind::Vertical | WallKind::Horizontal)
    }
}

/// Contents of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Open air above street level
    Sky,
    /// Unbuilt ground, sidewalks and lot gaps
    Cement,
    Floor,
    /// Floor that furniture must leave free (door approaches)
    ReservedFloor,
    Grass,
    Tree,
    /// Plain road surface
    Road,
    /// Road centerline
    RoadDivider { vertical: bool },
    Wall(WallKind),
    Window { vertical: bool },
    Door,
    StairsUp,
    StairsDown,
    Chair,
    Table,
    Bookcase { full: bool },
    Sink,
    Toilet,
    ComputerDesk,
}

impl TileType {
    /// Tiles that count as free ground for placement.
    pub fn is_empty(self) -> bool {
        matches!(self, TileType::Cement | TileType::Floor)
    }

    /// Tiles that later passes must not overwrite with furniture.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            TileType::ReservedFloor | TileType::Door | TileType::StairsUp | TileType::StairsDown
        )
    }

    pub fn is_wall(self) -> bool {
        matches!(self, TileType::Wall(_))
    }

    /// Straight wall runs.
    pub fn is_flat_wall(self) -> bool {
        matches!(self, TileType::Wall(kind) if kind.is_flat())
    }

    /// Corners, tees and crosses.
    pub fn is_junction_wall(self) -> bool {
        matches!(self, TileType::Wall(kind) if !kind.is_flat() && kind != WallKind::Solid)
    }

    pub fn is_road(self) -> bool {
        matches!(self, TileType::Road | TileType::RoadDivider { .. })
    }

    /// Whether actors can stand on this tile.
    pub fn is_walkable(self) -> bool {
        match self {
            TileType::Cement
            | TileType::Floor
            | TileType::ReservedFloor
            | TileType::Grass
            | TileType::Road
            | TileType::RoadDivider { .. }
            | TileType::Door
            | TileType::StairsUp
            | TileType::StairsDown
            | TileType::Chair => true,
            TileType::Sky
            | TileType::Tree
            | TileType::Wall(_)
            | TileType::Window { .. }
            | TileType::Table
            | TileType::Bookcase { .. }
            | TileType::Sink
            | TileType::Toilet
            | TileType::ComputerDesk => false,
        }
    }

    /// Single-character form used by the text preview.
    pub fn glyph(self) -> char {
        match self {
            TileType::Sky => ' ',
            TileType::Cement => ',',
            TileType::Floor | TileType::ReservedFloor => '.',
            TileType::Grass => '"',
            TileType::Tree => '♣',
            TileType::Road => ' ',
            TileType::RoadDivider { vertical: true } => '¦',
            TileType::RoadDivider { vertical: false } => '-',
            TileType::Window { vertical: true } => '│',
            TileType::Window { vertical: false } => '─',
            TileType::Door => '+',
            TileType::StairsUp => '<',
            TileType::StairsDown => '>',
            TileType::Chair => 'h',
            TileType::Table => 'T',
            TileType::Bookcase { full: true } => 'π',
            TileType::Bookcase { full: false } => 'Σ',
            TileType::Sink => 's',
            TileType::Toilet => 'o',
            TileType::ComputerDesk => 'c',
            TileType::Wall(kind) => match kind {
                WallKind::Solid => '█',
                WallKind::Vertical => '║',
                WallKind::Horizontal => '═',
                WallKind::TopLeft => '╔',
                WallKind::TopRight => '╗',
                WallKind::BottomLeft => '╚',
                WallKind::BottomRight => '╝',
                WallKind::TeeDown => '╦',
                WallKind::TeeUp => '╩',
                WallKind::TeeLeft => '╣',
                WallKind::TeeRight => '╠',
                WallKind::Cross => '╬',
            },
        }
    }
}
