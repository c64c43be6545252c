#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sneak engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Presentation layers never mutate state directly; they read
//! immutable [`WorldSnapshot`] values instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Sneak.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current grid and player and starts a fresh session.
    NewGame,
    /// Requests that the player travel in a straight line to the destination tile.
    MovePlayer {
        /// Tile the player wants to end up on.
        destination: TilePosition,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new grid and player replaced the previous session.
    SessionStarted {
        /// Monotonic session counter, starting at zero for the first session.
        session: u64,
        /// Number of tile columns in the new grid.
        columns: u32,
        /// Number of tile rows in the new grid.
        rows: u32,
        /// Tile the player occupies at the start of the session.
        spawn: TilePosition,
    },
    /// Confirms that the player moved between two tiles.
    PlayerMoved {
        /// Tile the player occupied before moving.
        from: TilePosition,
        /// Tile the player occupies after the move.
        to: TilePosition,
        /// Facing applied to the player as part of the move.
        orientation: Direction,
    },
}

/// Location of a single tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    column: u32,
    row: u32,
}

impl TilePosition {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Signed column and row offsets that lead from `self` to `other`.
    #[must_use]
    pub fn displacement_to(self, other: TilePosition) -> (i64, i64) {
        (
            i64::from(other.column) - i64::from(self.column),
            i64::from(other.row) - i64::from(self.row),
        )
    }

    /// Position reached by travelling `steps` tiles in `direction`.
    ///
    /// Returns `None` when the walk would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction, steps: u32) -> Option<TilePosition> {
        match direction {
            Direction::Up => self
                .row
                .checked_sub(steps)
                .map(|row| Self::new(self.column, row)),
            Direction::Down => self
                .row
                .checked_add(steps)
                .map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(steps)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(steps)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Cardinal directions used both for travel and for entity facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing row indices.
    Down,
    /// Toward increasing column indices.
    #[default]
    Right,
}

impl Direction {
    /// Every direction, in the order the highlight overlay scans them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];
}

/// Rotation applied to the grass texture; purely cosmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrassVariant {
    /// Unrotated texture.
    #[default]
    Upright,
    /// Rotated a quarter turn clockwise.
    Quarter,
    /// Rotated half a turn.
    Half,
    /// Rotated a quarter turn counter-clockwise.
    ThreeQuarter,
}

impl GrassVariant {
    /// All grass variants, in generation order.
    pub const ALL: [GrassVariant; 4] = [
        GrassVariant::Upright,
        GrassVariant::Quarter,
        GrassVariant::Half,
        GrassVariant::ThreeQuarter,
    ];

    /// Clockwise rotation of the texture in degrees.
    #[must_use]
    pub const fn rotation_degrees(self) -> i32 {
        match self {
            Self::Upright => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => -90,
        }
    }
}

/// Terrain classes a tile can be made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Open grass, drawn with one of four rotations.
    Grass(GrassVariant),
    /// Slippery ice; standing on it lets entities travel far.
    Ice,
    /// Sticky mud; standing on it allows a single step.
    Mud,
    /// Loose sand.
    Sand,
    /// Natural stone.
    Stone,
    /// Paved stone bricks.
    StoneBricks,
    /// Deep water, impassable.
    Water,
    /// Wooden planks.
    Wood,
    /// Bottomless void, impassable.
    Void,
}

impl TerrainKind {
    /// Reports whether entities may stand on or travel across this terrain.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Water | Self::Void)
    }

    /// Number of tiles an entity standing on this terrain may travel in one move.
    #[must_use]
    pub const fn movement_range(self) -> u32 {
        match self {
            Self::Grass(_) | Self::Stone | Self::Wood => 3,
            Self::Ice => 5,
            Self::Mud => 1,
            Self::Sand => 2,
            Self::StoneBricks => 4,
            Self::Water | Self::Void => 0,
        }
    }
}

/// Immutable descriptor of a single terrain cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    position: TilePosition,
    terrain: TerrainKind,
    passable: bool,
    movement_range: u32,
}

impl Tile {
    /// Creates a tile whose passability and range follow its terrain.
    #[must_use]
    pub const fn new(position: TilePosition, terrain: TerrainKind) -> Self {
        Self {
            position,
            terrain,
            passable: terrain.is_passable(),
            movement_range: terrain.movement_range(),
        }
    }

    /// Creates a tile with explicit passability and range, ignoring the terrain defaults.
    #[must_use]
    pub const fn with_properties(
        position: TilePosition,
        terrain: TerrainKind,
        passable: bool,
        movement_range: u32,
    ) -> Self {
        Self {
            position,
            terrain,
            passable,
            movement_range,
        }
    }

    /// Grid position the tile was placed at.
    #[must_use]
    pub const fn position(&self) -> TilePosition {
        self.position
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.position.column()
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.position.row()
    }

    /// Terrain the tile is made of.
    #[must_use]
    pub const fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    /// Reports whether entities may stand on or travel across the tile.
    #[must_use]
    pub const fn is_passable(&self) -> bool {
        self.passable
    }

    /// Number of tiles an entity standing here may travel in one move.
    #[must_use]
    pub const fn movement_range(&self) -> u32 {
        self.movement_range
    }
}

/// Reasons the world refuses a requested move.
///
/// Rejections are ordinary outcomes of user input, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination tile cannot be entered.
    Impassable,
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is the tile the entity already occupies.
    ZeroDisplacement,
    /// The destination shares neither a row nor a column with the entity.
    NotAxisAligned,
    /// The destination is further away than the origin tile allows.
    OutOfRange,
    /// An impassable tile lies between the entity and the destination.
    PathBlocked,
}

/// Failures raised by grid lookups and construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate does not address a tile of the grid.
    #[error("tile ({column}, {row}) lies outside the grid")]
    OutOfBounds {
        /// Requested column, which may be negative for pixel conversions.
        column: i64,
        /// Requested row, which may be negative for pixel conversions.
        row: i64,
    },
    /// A grid must contain at least one tile.
    #[error("grid dimensions {columns}x{rows} contain no tiles")]
    EmptyDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// Tiles must cover at least one pixel.
    #[error("tile size must be positive")]
    InvalidTileSize,
}

/// Failures raised when validating a [`Tuning`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The map must contain at least one tile.
    #[error("map dimensions {width}x{height} contain no tiles")]
    EmptyMap {
        /// Configured map width in tiles.
        width: u32,
        /// Configured map height in tiles.
        height: u32,
    },
    /// Tiles must cover at least one pixel.
    #[error("tile size must be positive")]
    ZeroTileSize,
    /// An explicit screen size must cover at least one pixel.
    #[error("screen size {width}x{height} is empty")]
    EmptyScreen {
        /// Resolved screen width in pixels.
        width: u32,
        /// Resolved screen height in pixels.
        height: u32,
    },
    /// The configured spawn does not address a tile of the map.
    #[error("spawn ({column}, {row}) lies outside the {width}x{height} map")]
    SpawnOutsideMap {
        /// Configured spawn column.
        column: u32,
        /// Configured spawn row.
        row: u32,
        /// Configured map width in tiles.
        width: u32,
        /// Configured map height in tiles.
        height: u32,
    },
}

/// Fixed configuration consumed by the world and the adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Side length of a tile in pixels.
    pub tile_size: u32,
    /// Width of the presentation surface in pixels; the map's pixel width when absent.
    pub screen_width: Option<u32>,
    /// Height of the presentation surface in pixels; the map's pixel height when absent.
    pub screen_height: Option<u32>,
    /// Enables debug overlays and verbose logging.
    pub debug: bool,
    /// Seed driving terrain generation.
    pub seed: u64,
    /// Tile the player starts on; the map center when absent.
    pub spawn: Option<TilePosition>,
}

impl Tuning {
    /// Default map width in tiles.
    pub const DEFAULT_MAP_WIDTH: u32 = 40;
    /// Default map height in tiles.
    pub const DEFAULT_MAP_HEIGHT: u32 = 30;
    /// Default tile side length in pixels.
    pub const DEFAULT_TILE_SIZE: u32 = 16;
    /// Default terrain seed.
    pub const DEFAULT_SEED: u64 = 0x5eed_0f_5ea4;

    /// Tile the player starts each session on.
    #[must_use]
    pub fn spawn_position(&self) -> TilePosition {
        self.spawn
            .unwrap_or_else(|| TilePosition::new(self.map_width / 2, self.map_height / 2))
    }

    /// Presentation surface in pixels. Only the part of the map it covers is drawn.
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.screen_width
                .unwrap_or_else(|| self.map_width.saturating_mul(self.tile_size)),
            self.screen_height
                .unwrap_or_else(|| self.map_height.saturating_mul(self.tile_size)),
        )
    }

    /// Checks that the configuration describes a usable map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let (width, height) = self.screen_size();
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyScreen { width, height });
        }

        let spawn = self.spawn_position();
        if spawn.column() >= self.map_width || spawn.row() >= self.map_height {
            return Err(ConfigError::SpawnOutsideMap {
                column: spawn.column(),
                row: spawn.row(),
                width: self.map_width,
                height: self.map_height,
            });
        }

        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            tile_size: Self::DEFAULT_TILE_SIZE,
            screen_width: None,
            screen_height: None,
            debug: false,
            seed: Self::DEFAULT_SEED,
            spawn: None,
        }
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Tile the player currently stands on.
    pub tile: Tile,
    /// Direction the player faces.
    pub orientation: Direction,
}

/// Read-only copy of a whole session, safe to hand to presentation threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSnapshot {
    /// Session counter the snapshot was taken from.
    pub session: u64,
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Side length of a tile in pixels.
    pub tile_size: u32,
    /// Presentation surface width in pixels.
    pub screen_width: u32,
    /// Presentation surface height in pixels.
    pub screen_height: u32,
    /// Tiles in row-major order.
    pub tiles: Vec<Tile>,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Tiles the player could legally move to from its current tile.
    pub reachable: Vec<TilePosition>,
}

impl WorldSnapshot {
    /// Returns the tile stored at the provided position, if any.
    #[must_use]
    pub fn tile(&self, position: TilePosition) -> Option<&Tile> {
        if position.column() >= self.columns || position.row() >= self.rows {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        self.tiles.get(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_round_trips_through_bincode() {
        let tile = Tile::new(
            TilePosition::new(3, 9),
            TerrainKind::Grass(GrassVariant::Half),
        );
        assert_round_trip(&tile);
    }

    #[test]
    fn move_rejection_round_trips_through_bincode() {
        assert_round_trip(&MoveRejection::PathBlocked);
    }

    #[test]
    fn impassable_terrain_has_no_range() {
        for terrain in [TerrainKind::Water, TerrainKind::Void] {
            assert!(!terrain.is_passable());
            assert_eq!(terrain.movement_range(), 0);
        }
        assert!(TerrainKind::Mud.is_passable());
        assert_eq!(TerrainKind::Mud.movement_range(), 1);
        assert!(TerrainKind::Ice.movement_range() > TerrainKind::Sand.movement_range());
    }

    #[test]
    fn explicit_properties_override_terrain_defaults() {
        let tile = Tile::with_properties(TilePosition::new(0, 0), TerrainKind::Water, true, 7);
        assert!(tile.is_passable());
        assert_eq!(tile.movement_range(), 7);
        assert_eq!(tile.terrain(), TerrainKind::Water);
    }

    #[test]
    fn step_refuses_to_leave_the_quadrant() {
        let origin = TilePosition::new(1, 0);
        assert_eq!(origin.step(Direction::Up, 1), None);
        assert_eq!(origin.step(Direction::Left, 2), None);
        assert_eq!(
            origin.step(Direction::Left, 1),
            Some(TilePosition::new(0, 0))
        );
        assert_eq!(
            origin.step(Direction::Down, 4),
            Some(TilePosition::new(1, 4))
        );
    }

    #[test]
    fn displacement_is_signed() {
        let origin = TilePosition::new(4, 2);
        assert_eq!(origin.displacement_to(TilePosition::new(1, 2)), (-3, 0));
        assert_eq!(origin.displacement_to(TilePosition::new(4, 6)), (0, 4));
    }

    #[test]
    fn default_tuning_is_valid_and_spawns_at_center() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.spawn_position(), TilePosition::new(20, 15));
    }

    #[test]
    fn screen_size_follows_the_map_unless_set() {
        let tuning = Tuning {
            map_width: 12,
            map_height: 5,
            tile_size: 8,
            ..Tuning::default()
        };
        assert_eq!(tuning.screen_size(), (96, 40));
        assert_eq!(Tuning::default().screen_size(), (640, 480));

        let cropped = Tuning {
            screen_width: Some(50),
            ..tuning
        };
        assert_eq!(cropped.screen_size(), (50, 40));
    }

    #[test]
    fn tuning_rejects_degenerate_maps() {
        let empty = Tuning {
            map_width: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::EmptyMap { width: 0, .. })
        ));

        let zero_tiles = Tuning {
            tile_size: 0,
            ..Tuning::default()
        };
        assert_eq!(zero_tiles.validate(), Err(ConfigError::ZeroTileSize));

        let no_screen = Tuning {
            screen_height: Some(0),
            ..Tuning::default()
        };
        assert_eq!(
            no_screen.validate(),
            Err(ConfigError::EmptyScreen {
                width: 640,
                height: 0
            })
        );

        let stray_spawn = Tuning {
            spawn: Some(TilePosition::new(40, 0)),
            ..Tuning::default()
        };
        assert!(matches!(
            stray_spawn.validate(),
            Err(ConfigError::SpawnOutsideMap { column: 40, .. })
        ));
    }

    #[test]
    fn snapshot_tile_lookup_respects_bounds() {
        let tiles: Vec<Tile> = (0..2)
            .flat_map(|row| {
                (0..3).map(move |column| {
                    Tile::new(TilePosition::new(column, row), TerrainKind::Sand)
                })
            })
            .collect();
        let player = PlayerSnapshot {
            tile: tiles[0],
            orientation: Direction::Right,
        };
        let snapshot = WorldSnapshot {
            session: 0,
            columns: 3,
            rows: 2,
            tile_size: 16,
            screen_width: 48,
            screen_height: 32,
            tiles,
            player,
            reachable: Vec::new(),
        };

        assert_eq!(
            snapshot.tile(TilePosition::new(2, 1)).map(Tile::position),
            Some(TilePosition::new(2, 1))
        );
        assert!(snapshot.tile(TilePosition::new(3, 0)).is_none());
        assert!(snapshot.tile(TilePosition::new(0, 2)).is_none());
    }
}
