//! Fixed-shape tile storage and deterministic terrain generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sneak_core::{GrassVariant, GridError, TerrainKind, Tile, TilePosition, Tuning};

/// Relative weights of the generated terrain mix. Grass variants are drawn separately.
const TERRAIN_MIX: [(TerrainKind, u32); 9] = [
    (TerrainKind::Grass(GrassVariant::Upright), 46),
    (TerrainKind::Sand, 10),
    (TerrainKind::Stone, 8),
    (TerrainKind::Mud, 8),
    (TerrainKind::Water, 8),
    (TerrainKind::StoneBricks, 6),
    (TerrainKind::Ice, 6),
    (TerrainKind::Wood, 5),
    (TerrainKind::Void, 3),
];

/// Rectangular collection of tiles stored in row-major order.
///
/// The shape is fixed at construction. Every in-range position maps to
/// exactly one tile, and that tile reports the same position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds a grid by asking `tile_for` for the tile at every position.
    ///
    /// Only the terrain, passability and range of the returned tile are kept;
    /// its position is always overwritten with the position it was requested for.
    pub fn from_fn<F>(
        columns: u32,
        rows: u32,
        tile_size: u32,
        mut tile_for: F,
    ) -> Result<Self, GridError>
    where
        F: FnMut(TilePosition) -> Tile,
    {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize);
        }

        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        let mut tiles = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                let position = TilePosition::new(column, row);
                let template = tile_for(position);
                tiles.push(Tile::with_properties(
                    position,
                    template.terrain(),
                    template.is_passable(),
                    template.movement_range(),
                ));
            }
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            tiles,
        })
    }

    /// Generates the terrain described by `tuning`.
    ///
    /// The same tuning always yields the same layout. The spawn tile is always
    /// grass so a session never starts on impassable terrain.
    pub fn generate(tuning: &Tuning) -> Result<Self, GridError> {
        let mut rng = ChaCha8Rng::seed_from_u64(tuning.seed);
        let spawn = tuning.spawn_position();
        let total_weight: u32 = TERRAIN_MIX.iter().map(|(_, weight)| weight).sum();

        Self::from_fn(
            tuning.map_width,
            tuning.map_height,
            tuning.tile_size,
            |position| {
                let grass = TerrainKind::Grass(GrassVariant::ALL[rng.gen_range(0..4)]);
                let terrain = if position == spawn {
                    grass
                } else {
                    match pick_terrain(rng.gen_range(0..total_weight)) {
                        TerrainKind::Grass(_) => grass,
                        other => other,
                    }
                };
                Tile::new(position, terrain)
            },
        )
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Columns and rows of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Side length of a tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Reports whether the position addresses a tile of this grid.
    #[must_use]
    pub const fn contains(&self, position: TilePosition) -> bool {
        position.column() < self.columns && position.row() < self.rows
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles of a single row, left to right.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[Tile]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()? * width;
        self.tiles.get(start..start + width)
    }

    /// Returns the tile at the provided column and row.
    pub fn at(&self, column: u32, row: u32) -> Result<&Tile, GridError> {
        self.lookup(i64::from(column), i64::from(row))
    }

    /// Returns the tile at the provided position.
    pub fn tile(&self, position: TilePosition) -> Result<&Tile, GridError> {
        self.at(position.column(), position.row())
    }

    /// Returns the tile containing the provided pixel coordinate.
    pub fn tile_for_point(&self, x: f32, y: f32) -> Result<&Tile, GridError> {
        self.lookup(
            pixel_to_index(x, self.tile_size),
            pixel_to_index(y, self.tile_size),
        )
    }

    fn lookup(&self, column: i64, row: i64) -> Result<&Tile, GridError> {
        let out_of_bounds = GridError::OutOfBounds { column, row };
        if column < 0
            || row < 0
            || column >= i64::from(self.columns)
            || row >= i64::from(self.rows)
        {
            return Err(out_of_bounds);
        }

        let index = row * i64::from(self.columns) + column;
        usize::try_from(index)
            .ok()
            .and_then(|index| self.tiles.get(index))
            .ok_or(out_of_bounds)
    }
}

fn pick_terrain(mut roll: u32) -> TerrainKind {
    for (terrain, weight) in TERRAIN_MIX {
        if roll < weight {
            return terrain;
        }
        roll -= weight;
    }
    TERRAIN_MIX[0].0
}

fn pixel_to_index(pixel: f32, tile_size: u32) -> i64 {
    // NaN never addresses a tile.
    if pixel.is_nan() {
        return -1;
    }
    (f64::from(pixel) / f64::from(tile_size)).floor() as i64
}
