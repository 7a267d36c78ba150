use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::WindowResolution;

use crate::simulation::engine::WindowSettings;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

#[derive(Component)]
struct ParticleIndex(pub usize);

const BACKGROUND: Color = Color::srgb(1.0, 1.0, 1.0);
const RING_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
const FLOOR_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);

/// Open the viewer window and step `scenario` at `engine.tick_hz` until the
/// window closes, Escape/Q is pressed, or the frame budget runs out
pub fn run_2d(scenario: Scenario) {
    log::info!(
        "run_2d: starting Bevy 2D viewer with {} particles at {} Hz",
        scenario.particles.len(),
        scenario.engine().tick_hz
    );

    let window = Window {
        title: scenario.window.title.clone(),
        resolution: WindowResolution::new(
            scenario.window.width as f32,
            scenario.window.height as f32,
        ),
        ..Default::default()
    };

    App::new()
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(Time::<Fixed>::from_duration(scenario.engine().tick_period()))
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .add_systems(Startup, setup_particles_system)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(Update, (sync_transforms_system, draw_ring_system, exit_on_key_system))
        .run();
}

/// Simulation space has y growing downward from the top-left corner;
/// Bevy's 2D camera is centered with y growing upward
fn to_world(p: &NVec2, window: &WindowSettings) -> Vec2 {
    Vec2::new(
        (p.x - 0.5 * window.width) as f32,
        (0.5 * window.height - p.y) as f32,
    )
}

fn setup_particles_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let material = materials.add(ColorMaterial::from(RING_COLOR));
    for (i, particle) in scenario.particles.particles().iter().enumerate() {
        let pos = to_world(&particle.x, &scenario.window);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(particle.radius() as f32))),
                material: material.clone(),
                transform: Transform::from_xyz(pos.x, pos.y, 1.0),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

/// Runs on the fixed clock: exactly one simulation step per tick
fn physics_step_system(mut scenario: ResMut<Scenario>, mut exit: EventWriter<AppExit>) {
    if scenario.finished() {
        exit.send(AppExit::Success);
        return;
    }
    scenario.tick();
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = scenario.particles.get(*i) {
            let pos = to_world(&p.x, &scenario.window);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
        }
    }
}

/// Ring edges i -> (i + 1) % n, and the floor line
fn draw_ring_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let window = &scenario.window;
    for (a, b) in scenario.particles.segments() {
        gizmos.line_2d(to_world(&a, window), to_world(&b, window), RING_COLOR);
    }

    let floor_y = scenario.floor().y;
    gizmos.line_2d(
        to_world(&NVec2::new(0.0, floor_y), window),
        to_world(&NVec2::new(window.width, floor_y), window),
        FLOOR_COLOR,
    );
}

fn exit_on_key_system(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) || keys.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}
