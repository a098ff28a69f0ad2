use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::field::grid::Bounds;
use crate::field::scenario::Scenario;
use crate::field::states::{ChargeSign, NVec2};
use crate::visualization::streamlines::trace_streamlines;

/// Window side length in logical pixels
const WINDOW_PX: f32 = 800.0;
/// Share of the window used by the grid
const FILL: f32 = 0.92;
const MARKER_RADIUS_PX: f32 = 6.0;
const ARROW_PX: f32 = 12.0;

/// Traced streamlines in screen space
#[derive(Resource)]
struct Streamlines(Vec<Vec<Vec2>>);

/// World -> screen mapping that fits the grid bounds into the window
#[derive(Resource, Clone, Copy)]
struct View {
    center: Vec2,
    scale: f32,
}

impl View {
    fn fit(b: &Bounds) -> Self {
        let extent = b.width().max(b.height()).max(f64::EPSILON) as f32;
        Self {
            center: Vec2::new(
                (0.5 * (b.xmin + b.xmax)) as f32,
                (0.5 * (b.ymin + b.ymax)) as f32,
            ),
            scale: FILL * WINDOW_PX / extent,
        }
    }

    fn to_screen(&self, p: &NVec2) -> Vec2 {
        (Vec2::new(p.x as f32, p.y as f32) - self.center) * self.scale
    }
}

fn marker_color(sign: ChargeSign) -> Color {
    match sign {
        ChargeSign::Negative => Color::srgb(0.85, 0.1, 0.1),
        ChargeSign::Positive => Color::srgb(0.1, 0.6, 0.1),
        ChargeSign::Neutral => Color::BLACK,
    }
}

pub fn run_2d(scenario: Scenario) {
    let view = View::fit(&scenario.field.grid.bounds);
    let lines: Vec<Vec<Vec2>> = trace_streamlines(&scenario.field, &scenario.render)
        .iter()
        .map(|line| line.iter().map(|p| view.to_screen(p)).collect())
        .collect();

    ::log::info!(
        "run_2d: starting Bevy 2D viewer with {} particles, {} streamlines",
        scenario.particles.len(),
        lines.len()
    );

    App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(view)
        .insert_resource(Streamlines(lines))
        .insert_resource(scenario)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Electric Field".into(),
                        resolution: (WINDOW_PX, WINDOW_PX).into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                // env_logger already owns the global logger
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_markers_system)
        .add_systems(Update, draw_streamlines_system)
        .run();
}

fn setup_markers_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    view: Res<View>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let circle = Mesh2dHandle(meshes.add(Circle::new(MARKER_RADIUS_PX)));
    for p in &scenario.particles {
        let at = view.to_screen(&p.x);
        commands.spawn(MaterialMesh2dBundle {
            mesh: circle.clone(),
            material: materials.add(ColorMaterial::from(marker_color(ChargeSign::of(p)))),
            transform: Transform::from_xyz(at.x, at.y, 1.0),
            ..Default::default()
        });
    }
}

fn draw_streamlines_system(mut gizmos: Gizmos, lines: Res<Streamlines>) {
    let color = Color::srgb(0.12, 0.47, 0.71);
    for line in &lines.0 {
        gizmos.linestrip_2d(line.iter().copied(), color);

        // one arrow head halfway along, pointing with the field
        let mid = line.len() / 2;
        if mid + 1 < line.len() {
            let dir = (line[mid + 1] - line[mid]).normalize_or_zero();
            if dir != Vec2::ZERO {
                gizmos.arrow_2d(line[mid], line[mid] + dir * ARROW_PX, color);
            }
        }
    }
}
