#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sneak.

mod entity;
mod grid;
mod session;

pub use entity::{Entity, EntityKind};
pub use grid::Grid;
pub use session::SharedWorld;

use sneak_core::{
    Command, ConfigError, Event, GridError, MoveRejection, TilePosition, Tuning, WELCOME_BANNER,
};
use thiserror::Error;
use tracing::{debug, info};

/// Failures raised while constructing a world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The tuning does not describe a usable map.
    #[error("invalid tuning")]
    Config(#[from] ConfigError),
    /// The grid could not be built.
    #[error("invalid grid")]
    Grid(#[from] GridError),
    /// The player would start on a tile it cannot stand on.
    #[error("spawn tile ({column}, {row}) is impassable")]
    ImpassableSpawn {
        /// Spawn column.
        column: u32,
        /// Spawn row.
        row: u32,
    },
}

/// Grid and player that live and die together.
#[derive(Clone, Debug)]
struct Session {
    grid: Grid,
    player: Entity,
}

impl Session {
    fn start(grid: Grid, spawn: TilePosition) -> Result<Self, WorldError> {
        let player = Entity::spawn(EntityKind::Player, &grid, spawn)?;
        if !player.current_tile().is_passable() {
            return Err(WorldError::ImpassableSpawn {
                column: spawn.column(),
                row: spawn.row(),
            });
        }
        Ok(Self { grid, player })
    }
}

/// Represents the authoritative Sneak world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    blueprint: Session,
    session: Session,
    session_index: u64,
}

impl World {
    /// Creates a world whose terrain is generated from `tuning`.
    pub fn new(tuning: Tuning) -> Result<Self, WorldError> {
        tuning.validate()?;
        let grid = Grid::generate(&tuning)?;
        let spawn = tuning.spawn_position();
        Self::assemble(tuning, grid, spawn)
    }

    /// Creates a world around a fixed grid with the player starting at `spawn`.
    ///
    /// The tuning is derived from the grid; new games restore this exact layout.
    pub fn from_grid(grid: Grid, spawn: TilePosition) -> Result<Self, WorldError> {
        let tuning = Tuning {
            map_width: grid.columns(),
            map_height: grid.rows(),
            tile_size: grid.tile_size(),
            spawn: Some(spawn),
            ..Tuning::default()
        };
        Self::assemble(tuning, grid, spawn)
    }

    fn assemble(tuning: Tuning, grid: Grid, spawn: TilePosition) -> Result<Self, WorldError> {
        let session = Session::start(grid, spawn)?;
        info!(
            columns = session.grid.columns(),
            rows = session.grid.rows(),
            column = spawn.column(),
            row = spawn.row(),
            "world created"
        );
        Ok(Self {
            banner: WELCOME_BANNER,
            tuning,
            blueprint: session.clone(),
            session,
            session_index: 0,
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Moves that fail validation leave the world untouched and emit no events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame => {
            world.session = world.blueprint.clone();
            world.session_index = world.session_index.saturating_add(1);
            let (columns, rows) = world.session.grid.dimensions();
            let spawn = world.session.player.position();
            info!(session = world.session_index, "started new game");
            out_events.push(Event::SessionStarted {
                session: world.session_index,
                columns,
                rows,
                spawn,
            });
        }
        Command::MovePlayer { destination } => {
            let session = &mut world.session;
            let verdict = session
                .grid
                .tile(destination)
                .map_err(|_| MoveRejection::OutOfBounds)
                .and_then(|tile| {
                    session
                        .player
                        .check_move(&session.grid, tile)
                        .map(|orientation| (*tile, orientation))
                });

            match verdict {
                Ok((tile, orientation)) => {
                    let from = session.player.position();
                    session.player.relocate(tile, orientation);
                    out_events.push(Event::PlayerMoved {
                        from,
                        to: tile.position(),
                        orientation,
                    });
                }
                Err(reason) => {
                    debug!(
                        column = destination.column(),
                        row = destination.row(),
                        ?reason,
                        "move rejected"
                    );
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use sneak_core::{
        Direction, MoveRejection, PlayerSnapshot, Tile, TilePosition, Tuning, WorldSnapshot,
    };

    use super::{Entity, Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built from.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Number of sessions started since the world was created.
    #[must_use]
    pub fn session_index(world: &World) -> u64 {
        world.session_index
    }

    /// Provides read-only access to the current grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.session.grid
    }

    /// Provides read-only access to the player entity.
    #[must_use]
    pub fn player(world: &World) -> &Entity {
        &world.session.player
    }

    /// Tile the player currently stands on.
    #[must_use]
    pub fn player_tile(world: &World) -> Tile {
        *world.session.player.current_tile()
    }

    /// Direction the player faces.
    #[must_use]
    pub fn orientation(world: &World) -> Direction {
        world.session.player.orientation()
    }

    /// Returns the tile at `position`, if it lies on the grid.
    #[must_use]
    pub fn tile_at(world: &World, position: TilePosition) -> Option<Tile> {
        world.session.grid.tile(position).ok().copied()
    }

    /// Converts a pixel coordinate into the tile containing it.
    ///
    /// Points outside the grid yield `None`; stray clicks are routine.
    #[must_use]
    pub fn convert_coords(world: &World, x: f32, y: f32) -> Option<Tile> {
        world.session.grid.tile_for_point(x, y).ok().copied()
    }

    /// Reports whether the player may move straight to `destination`. Side-effect free.
    #[must_use]
    pub fn is_valid_move(world: &World, destination: &Tile) -> bool {
        world
            .session
            .player
            .is_valid_move(&world.session.grid, destination)
    }

    /// Validates a player move and explains why it would be refused.
    pub fn check_move(world: &World, destination: &Tile) -> Result<Direction, MoveRejection> {
        world
            .session
            .player
            .check_move(&world.session.grid, destination)
    }

    /// Tiles the player could move to from its current tile.
    #[must_use]
    pub fn reachable_tiles(world: &World) -> Vec<TilePosition> {
        world
            .session
            .player
            .reachable_tiles(&world.session.grid)
    }

    /// Captures an owned copy of the current session for presentation.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        let grid = &world.session.grid;
        let player = &world.session.player;
        let (screen_width, screen_height) = world.tuning.screen_size();
        WorldSnapshot {
            session: world.session_index,
            columns: grid.columns(),
            rows: grid.rows(),
            tile_size: grid.tile_size(),
            screen_width,
            screen_height,
            tiles: grid.tiles().to_vec(),
            player: PlayerSnapshot {
                tile: *player.current_tile(),
                orientation: player.orientation(),
            },
            reachable: player.reachable_tiles(grid),
        }
    }
}
