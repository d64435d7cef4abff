//! Visualization plugin - Self-contained plugin pattern
//!
//! Draws the current simulation state with 2-D gizmos: a circle per body, the
//! orbit ring of every satellite around its primary, and a label box around
//! each body. Text labels under the boxes show distance from the root and
//! speed, and the frame-time chart carries a readout of the latest frame. It
//! only reads the controller.

use crate::config::ViewConfig;
use crate::physics::body::BodySnapshot;
use crate::physics::math::Vector;
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use crate::utils::RingBuffer;
use bevy::color::palettes::css;
use bevy::sprite::Anchor;

/// Bodies never shrink below this many pixels
const MIN_BODY_PIXELS: f32 = 2.0;
/// Frame time the chart's reference line marks
const TARGET_FRAME_MILLISECONDS: f32 = 1000.0 / 60.0;
const CHART_MARGIN: f32 = 10.0;
/// Label box drawn around the root body
const ROOT_LABEL_BOX_SIZE: f32 = 60.0;
/// Gap between a body and the top of its text label
const LABEL_TEXT_OFFSET: f32 = 20.0;
const LABEL_FONT_SIZE: f32 = 12.0;

/// Text label following one body
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLabel(pub BodyId);

/// Latest frame time shown above the chart
#[derive(Component, Debug, Default)]
pub struct FrameTimeReadout;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct VisualizationSettings {
    pub chart_size: Vec2,
    pub label_box_size: f32,
}

impl From<&ViewConfig> for VisualizationSettings {
    fn from(view: &ViewConfig) -> Self {
        Self {
            chart_size: Vec2::new(view.chart_width, view.chart_height),
            label_box_size: view.label_box_size,
        }
    }
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

#[derive(Default)]
pub struct VisualizationPlugin {
    settings: VisualizationSettings,
}

impl VisualizationPlugin {
    pub fn new(view: &ViewConfig) -> Self {
        Self {
            settings: view.into(),
        }
    }
}

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings);
        app.add_systems(Startup, (spawn_camera, spawn_labels));
        app.add_systems(
            Update,
            (
                draw_orbits,
                draw_bodies,
                draw_frame_time_chart,
                update_body_labels,
                update_frame_time_readout,
            )
                .in_set(SimulationSet::Render),
        );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Main Camera"),
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
    ));
}

/// Map a simulation position to pixels, with the root at the window center
pub fn world_to_screen(position: Vector, zoom: f32, pan: Vec2) -> Vec2 {
    position.as_vec2() * zoom + pan
}

pub fn body_pixel_radius(radius: f64, zoom: f32) -> f32 {
    (radius as f32 * zoom).max(MIN_BODY_PIXELS)
}

fn body_color(snapshot: &BodySnapshot) -> Color {
    let [r, g, b] = snapshot.color;
    Color::srgb(r, g, b)
}

fn draw_orbits(controller: Res<SimulationController>, mut gizmos: Gizmos) {
    let registry = controller.registry();
    let (zoom, pan) = (controller.zoom(), controller.pan());

    for body in registry.iter() {
        let Some(primary) = body.primary().and_then(|id| registry.get(id)) else {
            continue;
        };
        let center = world_to_screen(primary.position(), zoom, pan);
        let radius = (body.position() - primary.position()).length() as f32 * zoom;
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            radius,
            css::DIM_GRAY.with_alpha(0.5),
        );
    }
}

/// Side of the label box drawn around `snapshot`
pub fn label_box_size(snapshot: &BodySnapshot, settings: &VisualizationSettings) -> f32 {
    if snapshot.primary.is_none() {
        ROOT_LABEL_BOX_SIZE
    } else {
        settings.label_box_size
    }
}

fn draw_bodies(
    controller: Res<SimulationController>,
    settings: Res<VisualizationSettings>,
    mut gizmos: Gizmos,
) {
    let (zoom, pan) = (controller.zoom(), controller.pan());

    for snapshot in controller.snapshots() {
        let center = world_to_screen(snapshot.position, zoom, pan);
        let color = body_color(&snapshot);
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            body_pixel_radius(snapshot.radius, zoom),
            color,
        );

        let size = label_box_size(&snapshot, &settings);
        gizmos.rect_2d(Isometry2d::from_translation(center), Vec2::splat(size), color);
        gizmos.cross_2d(Isometry2d::from_translation(center), size / 8.0, color);
    }
}

/// Name, distance from the root in km and speed in km/s
pub fn body_label_text(snapshot: &BodySnapshot) -> String {
    format!(
        "{}\ndistance: {:.1} km\nspeed: {:.1} km/s",
        snapshot.name,
        snapshot.distance_from_root / 1000.0,
        snapshot.speed / 1000.0
    )
}

fn label_font() -> TextFont {
    TextFont {
        font_size: LABEL_FONT_SIZE,
        ..default()
    }
}

pub fn spawn_labels(mut commands: Commands, controller: Res<SimulationController>) {
    for snapshot in controller.snapshots() {
        commands.spawn((
            Name::new(format!("{} Label", snapshot.name)),
            BodyLabel(snapshot.id),
            Text2d::new(body_label_text(&snapshot)),
            label_font(),
            TextColor(css::WHITE.into()),
            Anchor::TopLeft,
        ));
    }
    commands.spawn((
        Name::new("Frame Time Readout"),
        FrameTimeReadout,
        Text2d::new(frame_time_text(controller.frame_times())),
        label_font(),
        TextColor(css::LIME.into()),
        Anchor::BottomLeft,
    ));
}

pub fn update_body_labels(
    controller: Res<SimulationController>,
    mut labels: Query<(&BodyLabel, &mut Text2d, &mut Transform)>,
) {
    let (zoom, pan) = (controller.zoom(), controller.pan());

    for (label, mut text, mut transform) in &mut labels {
        let Some(snapshot) = controller.snapshot(label.0) else {
            continue;
        };
        let anchor = world_to_screen(snapshot.position, zoom, pan)
            - Vec2::new(0.0, LABEL_TEXT_OFFSET);
        transform.translation = anchor.extend(0.0);
        text.0 = body_label_text(&snapshot);
    }
}

/// Latest frame duration and the rate it corresponds to
pub fn frame_time_text(samples: &RingBuffer<f32>) -> String {
    match samples.latest() {
        Some(&milliseconds) if milliseconds > 0.0 => {
            format!("{:.0} FPS ({milliseconds:.2} ms)", 1000.0 / milliseconds)
        }
        _ => "- FPS".to_string(),
    }
}

fn update_frame_time_readout(
    controller: Res<SimulationController>,
    settings: Res<VisualizationSettings>,
    window: Single<&Window>,
    mut readout: Single<(&mut Text2d, &mut Transform), With<FrameTimeReadout>>,
) {
    let (text, transform) = &mut *readout;
    let corner = chart_origin(&window) + Vec2::new(0.0, settings.chart_size.y + 4.0);
    transform.translation = corner.extend(0.0);
    text.0 = frame_time_text(controller.frame_times());
}

fn chart_origin(window: &Window) -> Vec2 {
    Vec2::new(
        -window.width() / 2.0 + CHART_MARGIN,
        -window.height() / 2.0 + CHART_MARGIN,
    )
}

/// Chart height in milliseconds; never below two target frames
fn chart_ceiling(samples: &RingBuffer<f32>) -> f32 {
    samples
        .iter()
        .copied()
        .fold(2.0 * TARGET_FRAME_MILLISECONDS, f32::max)
}

/// Chart vertices, oldest sample on the left, scaled so the tallest fits
pub fn chart_points(samples: &RingBuffer<f32>, origin: Vec2, size: Vec2) -> Vec<Vec2> {
    let ceiling = chart_ceiling(samples);
    let x_step = size.x / samples.capacity().saturating_sub(1).max(1) as f32;

    (0..samples.len())
        .filter_map(|i| samples.get(i as isize).ok())
        .enumerate()
        .map(|(i, &milliseconds)| {
            origin + Vec2::new(i as f32 * x_step, milliseconds / ceiling * size.y)
        })
        .collect()
}

fn draw_frame_time_chart(
    controller: Res<SimulationController>,
    settings: Res<VisualizationSettings>,
    window: Single<&Window>,
    mut gizmos: Gizmos,
) {
    let size = settings.chart_size;
    let origin = chart_origin(&window);
    gizmos.rect_2d(
        Isometry2d::from_translation(origin + size / 2.0),
        size,
        css::GRAY,
    );

    let samples = controller.frame_times();
    let target_y = origin.y + TARGET_FRAME_MILLISECONDS / chart_ceiling(samples) * size.y;
    gizmos.line_2d(
        Vec2::new(origin.x, target_y),
        Vec2::new(origin.x + size.x, target_y),
        css::DARK_GREEN,
    );
    gizmos.linestrip_2d(chart_points(samples, origin, size), css::LIME);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_screen() {
        let point = world_to_screen(Vector::new(1.0e11, -2.0e11), 1.0e-9, Vec2::new(5.0, 5.0));
        assert!((point - Vec2::new(105.0, -195.0)).length() < 1e-3);
    }

    #[test]
    fn test_small_bodies_stay_visible() {
        assert_eq!(body_pixel_radius(6.4e6, 1.5e-10), MIN_BODY_PIXELS);
        assert!((body_pixel_radius(7.0e8, 1.0e-7) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_chart_points_follow_logical_order() {
        let mut samples = RingBuffer::new(5).unwrap();
        samples.extend([10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);

        let points = chart_points(&samples, Vec2::ZERO, Vec2::new(100.0, 70.0));

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[4].x, 100.0);
        assert!((points[0].y - 30.0).abs() < 1e-4);
        assert!((points[4].y - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_body_label_text() {
        let controller = SimulationController::from_config(&SimulationConfig::default()).unwrap();
        let earth = controller.registry().find("Earth").unwrap();
        let snapshot = controller.snapshot(earth).unwrap();

        assert_eq!(
            body_label_text(&snapshot),
            "Earth\ndistance: 149597890.0 km\nspeed: 29.8 km/s"
        );
    }

    #[test]
    fn test_root_gets_the_large_label_box() {
        let controller = SimulationController::from_config(&SimulationConfig::default()).unwrap();
        let settings = VisualizationSettings::default();
        let registry = controller.registry();
        let sun = controller.snapshot(registry.find("Sun").unwrap()).unwrap();
        let mars = controller.snapshot(registry.find("Mars").unwrap()).unwrap();

        assert_eq!(label_box_size(&sun, &settings), ROOT_LABEL_BOX_SIZE);
        assert_eq!(label_box_size(&mars, &settings), settings.label_box_size);
    }

    #[test]
    fn test_frame_time_text() {
        let mut samples = RingBuffer::new(4).unwrap();
        assert_eq!(frame_time_text(&samples), "- FPS");

        samples.push(40.0);
        samples.push(20.0);
        assert_eq!(frame_time_text(&samples), "50 FPS (20.00 ms)");
    }

    #[test]
    fn test_labels_follow_their_bodies() {
        let mut app = crate::test_utils::create_test_app();
        app.add_systems(Startup, spawn_labels);
        app.add_systems(Update, update_body_labels.in_set(SimulationSet::Render));
        for _ in 0..3 {
            app.update();
        }

        let controller = app.world().resource::<SimulationController>().clone();
        let mut labels = app.world_mut().query::<(&BodyLabel, &Text2d, &Transform)>();
        let labels: Vec<_> = labels.iter(app.world()).collect();
        assert_eq!(labels.len(), controller.registry().len());

        for (label, text, transform) in labels {
            let snapshot = controller.snapshot(label.0).unwrap();
            assert_eq!(text.0, body_label_text(&snapshot));
            let expected = world_to_screen(snapshot.position, controller.zoom(), controller.pan())
                - Vec2::new(0.0, LABEL_TEXT_OFFSET);
            assert_eq!(transform.translation.truncate(), expected);
        }
    }

    #[test]
    fn test_chart_of_empty_buffer() {
        let samples = RingBuffer::<f32>::new(8).unwrap();
        assert!(chart_points(&samples, Vec2::ZERO, Vec2::ONE).is_empty());
    }
}
