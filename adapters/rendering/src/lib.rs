#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sneak adapters.
//!
//! Adapters never read the world directly. They receive a [`Scene`] built
//! from an immutable `WorldSnapshot` and hand it to a [`RenderingBackend`].

use std::{error::Error, fmt};

use anyhow::Result as AnyResult;
use glam::Vec2;
use sneak_core::{Direction, GrassVariant, TerrainKind, Tile, TilePosition, WorldSnapshot};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Channels scaled to bytes, alpha dropped.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Translucent white wash laid over tiles the player can reach.
pub const HIGHLIGHT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 100.0 / 255.0);

/// Color of the debug guidelines.
pub const GUIDELINE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Describes the tile grid in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile in pixels.
    pub tile_size: f32,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_size` is not a positive finite number.
    pub fn new(columns: u32, rows: u32, tile_size: f32) -> Result<Self, RenderingError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
        })
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Pixel position of the tile's upper-left corner.
    #[must_use]
    pub fn tile_origin(&self, position: TilePosition) -> Vec2 {
        Vec2::new(
            position.column() as f32 * self.tile_size,
            position.row() as f32 * self.tile_size,
        )
    }

    /// Number of columns and rows whose tiles start inside `viewport`.
    #[must_use]
    pub fn visible_extent(&self, viewport: Vec2) -> (u32, u32) {
        let columns = (0..self.columns)
            .filter(|&column| self.tile_origin(TilePosition::new(column, 0)).x < viewport.x)
            .count();
        let rows = (0..self.rows)
            .filter(|&row| self.tile_origin(TilePosition::new(0, row)).y < viewport.y)
            .count();
        (columns as u32, rows as u32)
    }
}

/// Visual description of a single terrain tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTile {
    /// Grid position of the tile.
    pub position: TilePosition,
    /// Terrain being drawn.
    pub terrain: TerrainKind,
    /// Character used by text backends.
    pub glyph: char,
    /// Base color of the terrain.
    pub color: Color,
    /// Clockwise texture rotation in degrees.
    pub rotation_degrees: i32,
}

impl SceneTile {
    /// Derives the visual for a tile.
    #[must_use]
    pub fn from_tile(tile: &Tile) -> Self {
        let terrain = tile.terrain();
        let rotation_degrees = match terrain {
            TerrainKind::Grass(variant) => variant.rotation_degrees(),
            _ => 0,
        };
        Self {
            position: tile.position(),
            terrain,
            glyph: terrain_glyph(terrain),
            color: terrain_color(terrain),
            rotation_degrees,
        }
    }
}

fn terrain_glyph(terrain: TerrainKind) -> char {
    match terrain {
        TerrainKind::Grass(GrassVariant::Upright) => ',',
        TerrainKind::Grass(GrassVariant::Quarter) => ';',
        TerrainKind::Grass(GrassVariant::Half) => '\'',
        TerrainKind::Grass(GrassVariant::ThreeQuarter) => '`',
        TerrainKind::Ice => '-',
        TerrainKind::Mud => '%',
        TerrainKind::Sand => '.',
        TerrainKind::Stone => 'o',
        TerrainKind::StoneBricks => '#',
        TerrainKind::Water => '~',
        TerrainKind::Wood => '=',
        TerrainKind::Void => ' ',
    }
}

fn terrain_color(terrain: TerrainKind) -> Color {
    match terrain {
        TerrainKind::Grass(_) => Color::from_rgb_u8(0x4c, 0x8c, 0x2b),
        TerrainKind::Ice => Color::from_rgb_u8(0xb8, 0xe2, 0xf2),
        TerrainKind::Mud => Color::from_rgb_u8(0x5b, 0x40, 0x2a),
        TerrainKind::Sand => Color::from_rgb_u8(0xdb, 0xc8, 0x8b),
        TerrainKind::Stone => Color::from_rgb_u8(0x80, 0x80, 0x80),
        TerrainKind::StoneBricks => Color::from_rgb_u8(0x6a, 0x6a, 0x72),
        TerrainKind::Water => Color::from_rgb_u8(0x27, 0x5d, 0xad),
        TerrainKind::Wood => Color::from_rgb_u8(0x9c, 0x6b, 0x3c),
        TerrainKind::Void => Color::from_rgb_u8(0x08, 0x08, 0x10),
    }
}

/// Visual description of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerVisual {
    /// Tile the player stands on.
    pub position: TilePosition,
    /// Direction the sprite faces.
    pub facing: Direction,
}

impl PlayerVisual {
    /// Character used by text backends, pointing where the player faces.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self.facing {
            Direction::Up => '^',
            Direction::Left => '<',
            Direction::Down => 'v',
            Direction::Right => '>',
        }
    }

    /// Clockwise sprite rotation in degrees, relative to a right-facing sprite.
    #[must_use]
    pub const fn rotation_degrees(&self) -> i32 {
        match self.facing {
            Direction::Right => 0,
            Direction::Down => 90,
            Direction::Left => 180,
            Direction::Up => -90,
        }
    }
}

/// Axis a guideline label annotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuidelineAxis {
    /// Label naming a column.
    Column,
    /// Label naming a row.
    Row,
}

/// Numeric label drawn next to a debug guideline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidelineLabel {
    /// Axis being labelled.
    pub axis: GuidelineAxis,
    /// Column or row index.
    pub index: u32,
    /// Pixel position of the label's baseline.
    pub anchor: Vec2,
}

const COLUMN_LABEL_OFFSET: Vec2 = Vec2::new(5.0, 8.0);
const ROW_LABEL_OFFSET: Vec2 = Vec2::new(5.0, 10.0);

/// Debug overlay drawing tile boundaries and their indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Guidelines {
    /// Color of the lines and labels.
    pub color: Color,
    /// Labels along both axes.
    pub labels: Vec<GuidelineLabel>,
}

impl Guidelines {
    fn for_grid(grid: &TileGridPresentation, viewport: Vec2) -> Self {
        let (visible_columns, visible_rows) = grid.visible_extent(viewport);
        let columns = (0..visible_columns).map(|index| GuidelineLabel {
            axis: GuidelineAxis::Column,
            index,
            anchor: grid.tile_origin(TilePosition::new(index, 0)) + COLUMN_LABEL_OFFSET,
        });
        let rows = (0..visible_rows).map(|index| GuidelineLabel {
            axis: GuidelineAxis::Row,
            index,
            anchor: grid.tile_origin(TilePosition::new(0, index)) + ROW_LABEL_OFFSET,
        });
        Self {
            color: GUIDELINE_COLOR,
            labels: columns.chain(rows).collect(),
        }
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Session the scene was captured from.
    pub session: u64,
    /// Grid geometry.
    pub grid: TileGridPresentation,
    /// Drawable area in pixels, never larger than the grid.
    pub viewport: Vec2,
    /// Tiles in row-major order.
    pub tiles: Vec<SceneTile>,
    /// Tiles the player can move to, drawn with [`HIGHLIGHT_COLOR`].
    pub highlights: Vec<TilePosition>,
    /// Player sprite.
    pub player: PlayerVisual,
    /// Debug overlay, when enabled.
    pub guidelines: Option<Guidelines>,
}

impl Scene {
    /// Builds a scene from a world snapshot.
    pub fn from_snapshot(snapshot: &WorldSnapshot, debug: bool) -> Result<Self, RenderingError> {
        let grid = TileGridPresentation::new(
            snapshot.columns,
            snapshot.rows,
            snapshot.tile_size as f32,
        )?;
        let screen = Vec2::new(snapshot.screen_width as f32, snapshot.screen_height as f32);
        let viewport = screen.min(Vec2::new(grid.width(), grid.height()));
        let guidelines = debug.then(|| Guidelines::for_grid(&grid, viewport));

        Ok(Self {
            session: snapshot.session,
            grid,
            viewport,
            tiles: snapshot.tiles.iter().map(SceneTile::from_tile).collect(),
            highlights: snapshot.reachable.clone(),
            player: PlayerVisual {
                position: snapshot.player.tile.position(),
                facing: snapshot.player.orientation,
            },
            guidelines,
        })
    }

    /// Returns the visual for the tile at `position`, if any.
    #[must_use]
    pub fn tile(&self, position: TilePosition) -> Option<&SceneTile> {
        if position.column() >= self.grid.columns || position.row() >= self.grid.rows {
            return None;
        }
        let width = usize::try_from(self.grid.columns).ok()?;
        let index = usize::try_from(position.row()).ok()? * width
            + usize::try_from(position.column()).ok()?;
        self.tiles.get(index)
    }

    /// Number of columns and rows drawn inside the viewport.
    #[must_use]
    pub fn visible_extent(&self) -> (u32, u32) {
        self.grid.visible_extent(self.viewport)
    }

    /// Reports whether the tile at `position` carries the reachable highlight.
    #[must_use]
    pub fn is_highlighted(&self, position: TilePosition) -> bool {
        self.highlights.contains(&position)
    }
}

/// Scene plus the window-level settings it is shown with.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Backend capable of drawing presentations.
pub trait RenderingBackend {
    /// Draws a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive, finite size.
    InvalidTileSize {
        /// Provided size that failed validation.
        tile_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile_size must be positive (received {tile_size})")
            }
        }
    }
}

impl Error for RenderingError {}
