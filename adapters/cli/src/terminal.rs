use std::{fmt::Write as _, io::Write};

use anyhow::{Context, Result};
use sneak_core::TilePosition;
use sneak_rendering::{Color, GuidelineAxis, Presentation, RenderingBackend, Scene, HIGHLIGHT_COLOR};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const HIGHLIGHT_GLYPH: char = '+';

/// Backend drawing scenes as text, one character per tile.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    ansi: bool,
}

impl<W: Write> TerminalBackend<W> {
    /// Creates a backend writing to `out`; `ansi` enables colors and screen clearing.
    pub(crate) fn new(out: W, ansi: bool) -> Self {
        Self { out, ansi }
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<()> {
        let frame = render_text(presentation, self.ansi);
        self.out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
            .context("failed to write frame to terminal")
    }
}

/// Formats a presentation as a block of text.
pub(crate) fn render_text(presentation: &Presentation, ansi: bool) -> String {
    let scene = &presentation.scene;
    let mut frame = String::new();
    if ansi {
        frame.push_str(CLEAR_SCREEN);
    }
    let _ = writeln!(
        frame,
        "{} (session {})",
        presentation.window_title, scene.session
    );

    let labelled = scene.guidelines.is_some();
    if let Some(guidelines) = &scene.guidelines {
        frame.push_str("    ");
        for label in &guidelines.labels {
            if label.axis == GuidelineAxis::Column {
                let _ = write!(frame, "{}", label.index % 10);
            }
        }
        frame.push('\n');
    }

    let (columns, rows) = scene.visible_extent();
    for row in 0..rows {
        if labelled {
            let _ = write!(frame, "{row:>3} ");
        }
        for column in 0..columns {
            push_tile(
                &mut frame,
                scene,
                TilePosition::new(column, row),
                ansi,
                presentation.clear_color,
            );
        }
        if ansi {
            frame.push_str(RESET);
        }
        frame.push('\n');
    }
    frame
}

fn push_tile(
    frame: &mut String,
    scene: &Scene,
    position: TilePosition,
    ansi: bool,
    fallback: Color,
) {
    let highlighted = scene.is_highlighted(position);
    let tile = scene.tile(position);
    let glyph = if scene.player.position == position {
        scene.player.glyph()
    } else if highlighted && !ansi {
        HIGHLIGHT_GLYPH
    } else {
        tile.map_or(' ', |tile| tile.glyph)
    };

    if ansi {
        let base = tile.map_or(fallback, |tile| tile.color);
        let background = if highlighted {
            base.lighten(HIGHLIGHT_COLOR.alpha)
        } else {
            base
        };
        let (red, green, blue) = background.to_rgb_u8();
        let _ = write!(frame, "\x1b[48;2;{red};{green};{blue}m");
    }
    frame.push(glyph);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sneak_core::{Direction, PlayerSnapshot, TerrainKind, Tile, WorldSnapshot};

    fn presentation(debug: bool) -> Presentation {
        cropped_presentation(debug, 48, 32)
    }

    fn cropped_presentation(debug: bool, screen_width: u32, screen_height: u32) -> Presentation {
        let tiles: Vec<Tile> = (0..2)
            .flat_map(|row| {
                (0..3).map(move |column| {
                    let terrain = if (column, row) == (2, 1) {
                        TerrainKind::Water
                    } else {
                        TerrainKind::Sand
                    };
                    Tile::new(TilePosition::new(column, row), terrain)
                })
            })
            .collect();
        let snapshot = WorldSnapshot {
            session: 2,
            columns: 3,
            rows: 2,
            tile_size: 16,
            screen_width,
            screen_height,
            player: PlayerSnapshot {
                tile: tiles[0],
                orientation: Direction::Left,
            },
            tiles,
            reachable: vec![TilePosition::new(1, 0), TilePosition::new(0, 1)],
        };
        let scene = Scene::from_snapshot(&snapshot, debug).expect("valid scene");
        Presentation::new("Sneak", Color::from_rgb_u8(0, 0, 0), scene)
    }

    #[test]
    fn plain_frame_marks_player_and_reachable_tiles() {
        let frame = render_text(&presentation(false), false);
        assert_eq!(frame, "Sneak (session 2)\n<+.\n+.~\n");
    }

    #[test]
    fn debug_frame_numbers_rows_and_columns() {
        let frame = render_text(&presentation(true), false);
        assert_eq!(frame, "Sneak (session 2)\n    012\n  0 <+.\n  1 +.~\n");
    }

    #[test]
    fn frame_is_cropped_to_the_screen() {
        let frame = render_text(&cropped_presentation(true, 20, 16), false);
        assert_eq!(frame, "Sneak (session 2)\n    01\n  0 <+\n");
    }

    #[test]
    fn ansi_frame_clears_screen_and_resets_colors() {
        let frame = render_text(&presentation(false), true);
        assert!(frame.starts_with(CLEAR_SCREEN));
        assert_eq!(frame.matches(RESET).count(), 2);
        assert!(frame.contains('<'));
    }

    #[test]
    fn backend_writes_frames_to_its_sink() {
        let mut backend = TerminalBackend::new(Vec::new(), false);
        backend.present(&presentation(false)).expect("write succeeds");
        let written = String::from_utf8(backend.out).expect("utf-8 frame");
        assert!(written.starts_with("Sneak (session 2)"));
    }
}
