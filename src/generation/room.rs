//! # Rooms
//!
//! A room is a [`Structure`] with at most one door on its outline and an
//! optional purpose that drives furnishing. Wall-relative interior sets are
//! derived from whichever side the door sits on.

use crate::generation::{Side, Structure};
use crate::{Position, SprawlError, SprawlResult};
use serde::{Deserialize, Serialize};

/// Declared function of a room or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomPurpose {
    Office,
    Library,
    ConferenceRoom,
    HalfBathroom,
    Park,
}

impl RoomPurpose {
    pub fn name(self) -> &'static str {
        match self {
            RoomPurpose::Office => "Office",
            RoomPurpose::Library => "Library",
            RoomPurpose::ConferenceRoom => "Conference Room",
            RoomPurpose::HalfBathroom => "Half Bathroom",
            RoomPurpose::Park => "Park",
        }
    }
}

/// A walled room inside a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub bounds: Structure,
    pub door: Option<Position>,
    pub purpose: Option<RoomPurpose>,
}

impl Room {
    pub fn new(bounds: Structure) -> Self {
        Self {
            bounds,
            door: None,
            purpose: None,
        }
    }

    /// Sets the room's door. The door must sit on an edge, never a corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::{Position, Room, Structure};
    ///
    /// let mut room = Room::new(Structure::new(0, 0, 6, 4));
    /// assert!(room.set_door(Position::new(3, 0)).is_ok());
    /// assert!(room.set_door(Position::new(0, 0)).is_err());
    /// ```
    pub fn set_door(&mut self, door: Position) -> SprawlResult<()> {
        if self.bounds.side_of(door).is_none() {
            return Err(SprawlError::InvalidPlacement(format!(
                "door ({}, {}) is not on an edge of {:?}",
                door.x, door.y, self.bounds
            )));
        }
        self.door = Some(door);
        Ok(())
    }

    /// Side of the outline the door is on.
    pub fn door_side(&self) -> Option<Side> {
        self.door.and_then(|door| self.bounds.side_of(door))
    }

    pub fn inside_wall_same_as_door(&self) -> Vec<Position> {
        self.inside_wall_relative_to_door(|side| side)
    }

    pub fn inside_wall_opposite_door(&self) -> Vec<Position> {
        self.inside_wall_relative_to_door(Side::opposite)
    }

    /// Inside wall to the left when standing in the doorway facing in.
    pub fn inside_wall_left_of_door(&self) -> Vec<Position> {
        self.inside_wall_relative_to_door(Side::clockwise)
    }

    /// Inside wall to the right when standing in the doorway facing in.
    pub fn inside_wall_right_of_door(&self) -> Vec<Position> {
        self.inside_wall_relative_to_door(|side| side.clockwise().opposite())
    }

    fn inside_wall_relative_to_door(&self, pick: impl Fn(Side) -> Side) -> Vec<Position> {
        match self.door_side() {
            Some(side) => self.bounds.inside_wall(pick(side)),
            None => Vec::new(),
        }
    }
}
