use sneak_core::{Command, Event, TerrainKind, Tile, TilePosition};
use sneak_system_controls::{ControlInput, Controls, PointerClick};
use sneak_world::{self as world, query, Grid, World};

fn corridor() -> World {
    let grid = Grid::from_fn(8, 2, 16, |position| {
        Tile::with_properties(position, TerrainKind::Wood, true, 3)
    })
    .expect("valid grid");
    World::from_grid(grid, TilePosition::new(0, 0)).expect("valid world")
}

fn click(x: f32, y: f32, session: u64) -> ControlInput {
    ControlInput {
        click: Some(PointerClick::new(x, y, session)),
        ..ControlInput::default()
    }
}

#[test]
fn click_inside_grid_emits_move_command() {
    let world = corridor();
    let mut controls = Controls::new();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        click(50.0, 4.0, 0),
        |x, y| query::convert_coords(&world, x, y),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MovePlayer {
            destination: TilePosition::new(3, 0),
        }]
    );
}

#[test]
fn click_outside_grid_is_ignored() {
    let world = corridor();
    let mut controls = Controls::new();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        click(500.0, 4.0, 0),
        |x, y| query::convert_coords(&world, x, y),
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn new_game_wins_over_click() {
    let mut controls = Controls::new();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        ControlInput {
            new_game: true,
            click: Some(PointerClick::new(20.0, 4.0, 0)),
        },
        |_, _| panic!("click must not be converted when a new game is requested"),
        &mut commands,
    );

    assert_eq!(commands, vec![Command::NewGame]);
}

#[test]
fn clicks_aimed_at_a_replaced_session_are_dropped() {
    let mut world = corridor();
    let mut controls = Controls::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::NewGame, &mut events);

    let mut commands = Vec::new();
    controls.handle(
        &events,
        click(20.0, 4.0, 0),
        |x, y| query::convert_coords(&world, x, y),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(controls.session(), 1);

    controls.handle(
        &[],
        click(20.0, 4.0, 1),
        |x, y| query::convert_coords(&world, x, y),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::MovePlayer {
            destination: TilePosition::new(1, 0),
        }]
    );
}

#[test]
fn emitted_commands_drive_the_world() {
    let mut world = corridor();
    let mut controls = Controls::new();
    let mut commands = Vec::new();

    controls.handle(
        &[],
        click(40.0, 8.0, 0),
        |x, y| query::convert_coords(&world, x, y),
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert!(matches!(
        events.as_slice(),
        [Event::PlayerMoved { to, .. }] if *to == TilePosition::new(2, 0)
    ));
}
