#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns presentation input into world commands.

use sneak_core::{Command, Event, Tile};

/// Pointer click reported by the presentation layer, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
    /// Session that was on screen when the click happened.
    pub session: u64,
}

impl PointerClick {
    /// Creates a click aimed at the provided session.
    #[must_use]
    pub const fn new(x: f32, y: f32, session: u64) -> Self {
        Self { x, y, session }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Pointer click observed on this frame, if any.
    pub click: Option<PointerClick>,
    /// Whether the player asked for a new game on this frame.
    pub new_game: bool,
}

/// Controls system translating clicks and the new-game key into commands.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    session: u64,
}

impl Controls {
    /// Creates a controls system that expects the first session.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: 0 }
    }

    /// Session the system believes is active.
    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Consumes world events and adapter input to emit commands.
    ///
    /// `convert_coords` should mirror the world's `query::convert_coords`.
    /// Clicks outside the grid, and clicks aimed at a session that has since
    /// been replaced, are dropped. A new-game request wins over a click on
    /// the same frame.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: ControlInput,
        mut convert_coords: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(f32, f32) -> Option<Tile>,
    {
        for event in events {
            if let Event::SessionStarted { session, .. } = event {
                self.session = *session;
            }
        }

        if input.new_game {
            out.push(Command::NewGame);
            return;
        }

        let Some(click) = input.click else {
            return;
        };
        if click.session != self.session {
            return;
        }

        if let Some(tile) = convert_coords(click.x, click.y) {
            out.push(Command::MovePlayer {
                destination: tile.position(),
            });
        }
    }
}
