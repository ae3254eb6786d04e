// Shared value types for the Pacman agents
// Coordinates follow the course layout convention: x grows east, y grows north.

use serde::{Deserialize, Serialize};

/// Index of a participant in the game; 0 is Pacman (the maximizer)
pub type AgentId = usize;

/// 2D coordinate in the maze
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as u32
}

/// The four movement directions plus the no-op `Stop`
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Returns the cardinal directions in successor-generation order
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::North => Coord { x: coord.x, y: coord.y + 1 },
            Direction::South => Coord { x: coord.x, y: coord.y - 1 },
            Direction::East => Coord { x: coord.x + 1, y: coord.y },
            Direction::West => Coord { x: coord.x - 1, y: coord.y },
            Direction::Stop => *coord,
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }
}
