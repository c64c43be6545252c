//! Entities bound to the grid and the rules that move them.

use sneak_core::{Direction, GridError, MoveRejection, Tile, TilePosition};

use crate::grid::Grid;

/// Kinds of entities that can inhabit the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The entity steered by the person playing.
    Player,
}

/// Mobile occupant of a single grid tile.
///
/// The entity keeps a copy of the tile it stands on rather than a separate
/// position, so its position and current tile cannot disagree. Grid lookups
/// borrow the grid for the duration of the call only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    kind: EntityKind,
    current_tile: Tile,
    orientation: Direction,
}

impl Entity {
    /// Places a new entity on the grid tile at `position`, facing right.
    pub fn spawn(kind: EntityKind, grid: &Grid, position: TilePosition) -> Result<Self, GridError> {
        let current_tile = *grid.tile(position)?;
        Ok(Self {
            kind,
            current_tile,
            orientation: Direction::default(),
        })
    }

    /// Kind of entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Tile the entity currently stands on.
    #[must_use]
    pub const fn current_tile(&self) -> &Tile {
        &self.current_tile
    }

    /// Position of the entity on the grid.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        self.current_tile.position()
    }

    /// Direction the entity faces.
    #[must_use]
    pub const fn orientation(&self) -> Direction {
        self.orientation
    }

    /// Reports whether the entity may move straight to `destination`.
    #[must_use]
    pub fn is_valid_move(&self, grid: &Grid, destination: &Tile) -> bool {
        self.check_move(grid, destination).is_ok()
    }

    /// Validates a straight-line move to `destination`.
    ///
    /// On success returns the direction of travel. The range always comes from
    /// the tile the entity stands on, and every tile after the origin up to
    /// and including the destination must be passable. Tiles along the way
    /// are read from `grid`.
    pub fn check_move(&self, grid: &Grid, destination: &Tile) -> Result<Direction, MoveRejection> {
        if !destination.is_passable() {
            return Err(MoveRejection::Impassable);
        }

        let origin = self.current_tile;
        let (dx, dy) = origin.position().displacement_to(destination.position());
        if !grid.contains(destination.position()) {
            return Err(MoveRejection::OutOfBounds);
        }

        let (direction, distance) = match (dx, dy) {
            (0, 0) => return Err(MoveRejection::ZeroDisplacement),
            (dx, 0) if dx > 0 => (Direction::Right, dx.unsigned_abs()),
            (dx, 0) => (Direction::Left, dx.unsigned_abs()),
            (0, dy) if dy > 0 => (Direction::Down, dy.unsigned_abs()),
            (0, dy) => (Direction::Up, dy.unsigned_abs()),
            _ => return Err(MoveRejection::NotAxisAligned),
        };

        let distance = u32::try_from(distance)
            .ok()
            .filter(|distance| *distance <= origin.movement_range())
            .ok_or(MoveRejection::OutOfRange)?;

        for steps in 1..=distance {
            let passable = origin
                .position()
                .step(direction, steps)
                .and_then(|position| grid.tile(position).ok())
                .is_some_and(Tile::is_passable);
            if !passable {
                return Err(MoveRejection::PathBlocked);
            }
        }

        Ok(direction)
    }

    /// Every tile the entity could legally move to from where it stands.
    ///
    /// Walks outward along each axis up to the origin's range and stops at the
    /// first impassable or missing tile, which yields exactly the destinations
    /// [`Entity::is_valid_move`] accepts.
    #[must_use]
    pub fn reachable_tiles(&self, grid: &Grid) -> Vec<TilePosition> {
        let origin = self.current_tile;
        let mut reachable = Vec::new();
        for direction in Direction::ALL {
            for steps in 1..=origin.movement_range() {
                let Some(tile) = origin
                    .position()
                    .step(direction, steps)
                    .and_then(|position| grid.tile(position).ok())
                else {
                    break;
                };
                if !tile.is_passable() {
                    break;
                }
                reachable.push(tile.position());
            }
        }
        reachable
    }

    /// Moves the entity onto `tile`, replacing position and current tile together.
    pub(crate) fn relocate(&mut self, tile: Tile, orientation: Direction) {
        self.current_tile = tile;
        self.orientation = orientation;
    }
}
