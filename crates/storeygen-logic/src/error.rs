//! Outcomes of bounded searches and generation-level errors.

use crate::config::ConfigError;

/// Which bounded search ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    GroundRoom,
    Stairwell,
    Balcony,
    OutsideDoor,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::GroundRoom => "ground room",
            Stage::Stairwell => "stairwell",
            Stage::Balcony => "balcony",
            Stage::OutsideDoor => "outside door",
        };
        f.write_str(name)
    }
}

/// Why a single placement attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The floor has no room to start from.
    NoSourceRoom,
    /// The chosen wall already has a neighbour, door or stair.
    WallBlocked,
    /// A minimum-size room would not fit between the wall and the plot edge.
    TooCloseToSide,
    /// The candidate overlaps an existing room.
    Intersects,
    /// A stair from the floor below ends in the room.
    StairArrival,
    /// The room is already an open balcony.
    AlreadyBalcony,
}

/// A bounded search found no valid candidate within its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementExhausted {
    pub stage: Stage,
    /// Floor the search ran on.
    pub floor: usize,
    pub attempts: u32,
}

impl std::fmt::Display for PlacementExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no valid {} on floor {} after {} attempts",
            self.stage, self.floor, self.attempts
        )
    }
}

impl std::error::Error for PlacementExhausted {}

/// Why a generation run produced no building.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The configuration failed validation.
    InvalidConfig(Vec<ConfigError>),
    /// A bounded search ran out of attempts in strict mode.
    Exhausted(PlacementExhausted),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidConfig(errors) => {
                write!(f, "invalid configuration: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            GenerationError::Exhausted(e) => write!(f, "generation aborted: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Exhausted(e) => Some(e),
            GenerationError::InvalidConfig(_) => None,
        }
    }
}

impl From<PlacementExhausted> for GenerationError {
    fn from(e: PlacementExhausted) -> Self {
        GenerationError::Exhausted(e)
    }
}
