#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Sneak in a terminal.

mod config;
mod input;
mod observer;
mod terminal;

use std::{
    io::{self, BufRead},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use input::Request;
use observer::RepaintObserver;
use sneak_core::{Command, Event, Tuning};
use sneak_system_controls::{ControlInput, Controls, PointerClick};
use sneak_world::{query, SharedWorld, World};
use terminal::TerminalBackend;
use tracing::warn;

const HELP: &str = "commands: click X Y | move COLUMN ROW | n (new game) | q (quit)";

/// Tile-grid movement game played from the terminal.
#[derive(Debug, Parser)]
#[command(name = "sneak", version)]
struct Args {
    /// TOML file with a `[game]` table overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed driving terrain generation.
    #[arg(long)]
    seed: Option<u64>,
    /// Draw guidelines and log at debug level.
    #[arg(long)]
    debug: bool,
    /// Milliseconds between repaint checks.
    #[arg(long, default_value_t = 50)]
    frame_interval_ms: u64,
    /// Print plain text without ANSI colors.
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn apply(&self, tuning: &mut Tuning) {
        if let Some(seed) = self.seed {
            tuning.seed = seed;
        }
        if self.debug {
            tuning.debug = true;
        }
    }
}

/// Entry point for the Sneak command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let mut tuning = config::load(args.config.as_deref())?;
    args.apply(&mut tuning);

    let level = if tuning.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();

    let debug = tuning.debug;
    let world = SharedWorld::new(World::new(tuning).context("failed to create world")?);
    println!("{}", world.read(query::welcome_banner));
    println!("{HELP}");

    let observer = RepaintObserver::spawn(
        world.clone(),
        TerminalBackend::new(io::stdout(), !args.no_color),
        Duration::from_millis(args.frame_interval_ms),
        debug,
    );
    let outcome = run(&world, &observer);
    let rendered = observer.finish();
    outcome.and(rendered)
}

/// Reads requests from stdin until the player quits, input ends or the display stops.
fn run(world: &SharedWorld, observer: &RepaintObserver) -> Result<()> {
    let mut dispatcher = Dispatcher::default();
    for line in io::stdin().lock().lines() {
        if !observer.is_running() {
            break;
        }
        let line = line.context("failed to read from stdin")?;
        match Request::parse(&line) {
            Ok(Request::Quit) => break,
            Ok(request) => dispatcher.dispatch(world, request),
            Err(error) => warn!(%error, "ignored input"),
        }
    }
    Ok(())
}

/// Routes player requests through the controls system into the world.
#[derive(Debug, Default)]
struct Dispatcher {
    controls: Controls,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Dispatcher {
    fn dispatch(&mut self, world: &SharedWorld, request: Request) {
        let mut input = ControlInput::default();
        match request {
            Request::Nothing | Request::Quit => {}
            Request::NewGame => input.new_game = true,
            Request::Click { x, y } => {
                let session = world.read(query::session_index);
                input.click = Some(PointerClick::new(x, y, session));
            }
            Request::Move(destination) => {
                self.commands.push(Command::MovePlayer { destination });
            }
        }

        // Controls must see every batch of events before it is dropped.
        self.controls.handle(
            &self.events,
            input,
            |x, y| world.read(|world| query::convert_coords(world, x, y)),
            &mut self.commands,
        );
        self.events.clear();
        for command in self.commands.drain(..) {
            self.events.extend(world.submit(command));
        }
    }
}
