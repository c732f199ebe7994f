// Booth rendering. Everything here reads session state and draws it; nothing
// writes back except through the probe, which shares the transform chains.

use std::f32::consts::PI;

use duck_gallery::probe::{bullseye_model, duck_model, gun_model, laser_dot, round_model};
use duck_gallery::target::{DUCK_DEPTH, DUCK_LENGTH, DUCK_WIDTH};
use duck_gallery::Session;
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;

// ============================================================================
// STYLE
// ============================================================================

/// Per-duck colours. Pure decoration, handed to the draw code as-is.
#[derive(Clone, Copy)]
pub struct DuckStyle {
    pub body: Color,
    pub beak: Color,
    pub bullseye: Color,
    pub bullseye_inner: Color,
}

pub const DUCK_STYLE: DuckStyle = DuckStyle {
    body: Color::new(0.957, 0.74, 0.047, 1.0),
    beak: Color::new(0.878, 0.129, 0.153, 1.0),
    bullseye: Color::new(0.851, 0.118, 0.161, 1.0),
    bullseye_inner: Color::new(0.929, 0.929, 0.929, 1.0),
};

const GUN_COLOR: Color = Color::new(0.05, 0.05, 0.05, 1.0);
const ROUND_COLOR: Color = Color::new(0.878, 0.129, 0.153, 1.0);
const BOOTH_COLOR: Color = Color::new(0.45, 0.08, 0.08, 1.0);
const BOOTH_TRIM: Color = Color::new(0.95, 0.85, 0.6, 1.0);
const WATER_COLOR: Color = Color::new(0.15, 0.45, 0.85, 1.0);
const GROUND_COLOR: Color = Color::new(0.2, 0.3, 0.15, 1.0);
const SKY_COLOR: Color = Color::new(0.45, 0.65, 0.9, 1.0);

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 24.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const ROUND_RADIUS: f32 = 0.5;

/// Counters for the current run only, shown on the HUD.
#[derive(Default)]
pub struct RunStats {
    pub shots: u32,
    pub hits: u32,
}

// ============================================================================
// MESH HELPERS
// ============================================================================

fn vertex(position: Vec3, normal: Vec3, color: Color) -> Vertex {
    Vertex {
        position,
        uv: vec2(0.0, 0.0),
        color: color.into(),
        normal: vec4(normal.x, normal.y, normal.z, 0.0),
    }
}

/// A box of `size` centred on the origin of `model` space.
fn draw_box(model: Mat4, size: Vec3, color: Color) {
    let h = size * 0.5;
    let c = [
        vec3(-h.x, -h.y, -h.z), // 0: back-bottom-left
        vec3(h.x, -h.y, -h.z),  // 1: back-bottom-right
        vec3(h.x, h.y, -h.z),   // 2: back-top-right
        vec3(-h.x, h.y, -h.z),  // 3: back-top-left
        vec3(-h.x, -h.y, h.z),  // 4: front-bottom-left
        vec3(h.x, -h.y, h.z),   // 5: front-bottom-right
        vec3(h.x, h.y, h.z),    // 6: front-top-right
        vec3(-h.x, h.y, h.z),   // 7: front-top-left
    ]
    .map(|p| model.transform_point3(p));

    let normal = |axis: Vec3| model.transform_vector3(axis).normalize_or_zero();
    let faces: [([usize; 4], Vec3); 6] = [
        ([0, 1, 2, 3], normal(-Vec3::Z)),
        ([5, 4, 7, 6], normal(Vec3::Z)),
        ([4, 0, 3, 7], normal(-Vec3::X)),
        ([1, 5, 6, 2], normal(Vec3::X)),
        ([3, 2, 6, 7], normal(Vec3::Y)),
        ([4, 5, 1, 0], normal(-Vec3::Y)),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (corners, n) in faces {
        let base = vertices.len() as u16;
        vertices.extend(corners.iter().map(|&i| vertex(c[i], n, color)));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    draw_mesh(&Mesh { vertices, indices, texture: None });
}

/// An ellipsoid with the given radii, centred on the origin of `model` space.
fn draw_ellipsoid(model: Mat4, radii: Vec3, color: Color) {
    const RINGS: u16 = 12;
    const SEGMENTS: u16 = 16;

    let mut vertices = Vec::with_capacity(((RINGS + 1) * (SEGMENTS + 1)) as usize);
    for ring in 0..=RINGS {
        let theta = ring as f32 / RINGS as f32 * PI;
        for seg in 0..=SEGMENTS {
            let phi = seg as f32 / SEGMENTS as f32 * PI * 2.0;
            let unit = vec3(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            let local = unit * radii;
            let n = model.transform_vector3(unit / radii.max(Vec3::splat(1e-3))).normalize_or_zero();
            vertices.push(vertex(model.transform_point3(local), n, color));
        }
    }

    let mut indices = Vec::with_capacity((RINGS * SEGMENTS * 6) as usize);
    for ring in 0..RINGS {
        for seg in 0..SEGMENTS {
            let a = ring * (SEGMENTS + 1) + seg;
            let b = a + SEGMENTS + 1;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    draw_mesh(&Mesh { vertices, indices, texture: None });
}

/// A tapered tube running `length` along +Z from the origin of `model` space.
fn draw_tube(model: Mat4, base_radius: f32, top_radius: f32, length: f32, color: Color) {
    const SEGMENTS: u16 = 16;

    let mut vertices = Vec::with_capacity(((SEGMENTS + 1) * 2) as usize);
    for seg in 0..=SEGMENTS {
        let phi = seg as f32 / SEGMENTS as f32 * PI * 2.0;
        let (s, c) = phi.sin_cos();
        let n = model.transform_vector3(vec3(c, s, 0.0)).normalize_or_zero();
        vertices.push(vertex(model.transform_point3(vec3(c * base_radius, s * base_radius, 0.0)), n, color));
        vertices.push(vertex(model.transform_point3(vec3(c * top_radius, s * top_radius, length)), n, color));
    }

    let mut indices = Vec::with_capacity((SEGMENTS * 6) as usize);
    for seg in 0..SEGMENTS {
        let i = seg * 2;
        indices.extend_from_slice(&[i, i + 1, i + 2, i + 2, i + 1, i + 3]);
    }

    draw_mesh(&Mesh { vertices, indices, texture: None });
}

// ============================================================================
// SCENE
// ============================================================================

fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(vec3(x, y, z))
}

fn rot_y(deg: f32) -> Mat4 { Mat4::from_rotation_y(deg.to_radians()) }
fn rot_z(deg: f32) -> Mat4 { Mat4::from_rotation_z(deg.to_radians()) }

fn draw_duck(model: Mat4, bullseye: Mat4, style: &DuckStyle) {
    let (w, l, d) = (DUCK_WIDTH, DUCK_LENGTH, DUCK_DEPTH);

    // Body
    draw_ellipsoid(model, vec3(w, l, d), style.body);

    // Bullseye: red outer ring, body-coloured band, red centre. Each disc sits a
    // little further out than the one behind it.
    let disc = |radius: f32, lift: f32, color: Color| {
        draw_ellipsoid(bullseye * translate(0.0, 0.0, -lift), vec3(radius, radius, 0.08 * w), color);
    };
    disc(0.5 * w, 0.0, style.bullseye);
    disc(0.35 * w, 0.05, style.body);
    disc(0.2 * w, 0.1, style.bullseye);
    disc(0.06 * w, 0.15, style.bullseye_inner);

    // Neck
    let neck = model
        * translate(-0.55 * w, 0.3 * l, 0.05 * d)
        * rot_z(65.0)
        * rot_y(90.0)
        * Mat4::from_scale(vec3(0.2 * w, 0.45 * w, 1.95 * d));
    draw_tube(neck, 0.8, 0.8, 2.0, style.body);

    // Head
    let head = model * translate(-0.3 * w, 1.5 * l, 0.05 * d);
    draw_ellipsoid(head, vec3(1.05 * 0.5 * w, 1.05 * 0.5 * w, d), style.body);

    // Beak
    let beak = head
        * translate(-0.1 * w, -0.1 * l, 0.0)
        * rot_z(-10.0)
        * rot_y(-90.0)
        * Mat4::from_scale(vec3(0.3 * w, 0.5 * w, 1.25 * d));
    draw_tube(beak, 0.8, 0.1, 2.0, style.beak);

    // Tail
    let tail = model
        * translate(0.7 * w, 0.3 * l, 0.0)
        * rot_z(45.0)
        * rot_y(90.0)
        * Mat4::from_scale(vec3(0.3 * w, 0.5 * w, 1.25 * d));
    draw_tube(tail, 0.8, 0.2, 2.0, style.body);
}

fn draw_gun(session: &Session) {
    let aimer = session.aimer();
    let model = gun_model(&aimer.pose());

    // Handle, then the barrel on top of it
    draw_box(model * Mat4::from_scale(vec3(1.0, 1.5, 1.0)), Vec3::ONE, GUN_COLOR);
    draw_box(model * translate(1.0, 1.0, 0.0), vec3(3.0, 1.0, 1.0), GUN_COLOR);

    // The round: glued to the muzzle until it is fired
    let round = round_model(&aimer.projectile_pose());
    draw_sphere(round.transform_point3(Vec3::ZERO), ROUND_RADIUS, None, ROUND_COLOR);

    draw_sphere(laser_dot(&aimer.pose()), 0.12, None, GREEN);
}

fn draw_booth(time: f32) {
    // Ground
    draw_plane(vec3(0.0, -10.0, 0.0), vec2(64.0, 64.0), None, GROUND_COLOR);

    // Awning and side posts
    draw_cube(vec3(0.0, 12.0, -8.0), vec3(32.0, 4.0, 4.0), None, BOOTH_COLOR);
    draw_cube_wires(vec3(0.0, 12.0, -8.0), vec3(32.0, 4.0, 4.0), BOOTH_TRIM);
    for x in [-14.0, 14.0] {
        draw_cube(vec3(x, 0.0, -8.0), vec3(2.0, 20.0, 4.0), None, BOOTH_COLOR);
        draw_cube_wires(vec3(x, 0.0, -8.0), vec3(2.0, 20.0, 4.0), BOOTH_TRIM);
    }

    // Water the ducks ride on, just behind the counter
    let columns: u16 = 64;
    let (x0, x1) = (-13.0, 13.0);
    let mut vertices = Vec::with_capacity(((columns + 1) * 2) as usize);
    for i in 0..=columns {
        let x = x0 + (x1 - x0) * i as f32 / columns as f32;
        let y = -2.2 + 0.25 * (x * 1.5 + time * 2.0).sin();
        vertices.push(vertex(vec3(x, y, -9.5), Vec3::Y, WATER_COLOR));
        vertices.push(vertex(vec3(x, y, -6.5), Vec3::Y, WATER_COLOR));
    }
    let mut indices = Vec::with_capacity((columns * 6) as usize);
    for i in 0..columns {
        let a = i * 2;
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }
    draw_mesh(&Mesh { vertices, indices, texture: None });

    // Counter front, hides the ducks travelling back underneath
    draw_cube(vec3(0.0, -6.0, -6.0), vec3(24.0, 8.0, 1.0), None, BOOTH_COLOR);
    draw_cube_wires(vec3(0.0, -6.0, -6.0), vec3(24.0, 8.0, 1.0), BOOTH_TRIM);
}

pub fn render_3d(session: &Session) {
    set_camera(&Camera3D {
        position: CAMERA_POSITION,
        target: CAMERA_TARGET,
        up: Vec3::Y,
        fovy: 60f32.to_radians(),
        projection: Projection::Perspective,
        ..Default::default()
    });

    draw_booth(get_time() as f32);

    for target in session.targets() {
        let pose = target.pose();
        draw_duck(duck_model(&pose), bullseye_model(&pose), &DUCK_STYLE);
    }

    draw_gun(session);

    set_default_camera();
}

pub fn render_hud(session: &Session, stats: &RunStats) {
    let sw = screen_width();
    let sh = screen_height();

    draw_rectangle(10.0, 10.0, 220.0, 60.0, Color::new(0.0, 0.0, 0.0, 0.5));
    draw_text(&format!("HITS: {}", stats.hits), 20.0, 35.0, 26.0, YELLOW);
    draw_text(&format!("SHOTS: {}", stats.shots), 20.0, 60.0, 20.0, WHITE);

    let down = session.targets().iter().filter(|t| t.is_down()).count();
    if down > 0 {
        draw_text(&format!("DUCKS DOWN: {}", down), 130.0, 35.0, 18.0, ORANGE);
    }

    if !session.is_running() {
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, 0.3));
        draw_text("PAUSED", sw / 2.0 - 70.0, sh / 2.0 - 20.0, 48.0, WHITE);
        draw_text("Press SPACE to Resume", sw / 2.0 - 110.0, sh / 2.0 + 30.0, 20.0, GRAY);
    }

    draw_text(
        "Mouse / Left stick - Aim   Click / A / RT - Shoot   Space / Start - Pause   ESC / Back - Quit",
        20.0,
        sh - 20.0,
        16.0,
        LIGHTGRAY,
    );
    draw_text(&format!("FPS: {}", get_fps()), sw - 80.0, 20.0, 16.0, WHITE);
}

pub fn clear() {
    clear_background(SKY_COLOR);
}
