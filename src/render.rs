//! Overlay rendering of tracks and their trajectories.

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
    draw_text_mut,
};
use imageproc::point::Point;

use crate::tracker::{Track, TrackStore};

/// Colors and stroke parameters for the overlay. Colors are RGB.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub circle_color: Rgb<u8>,
    pub circle_thickness: u32,
    pub radius_line_color: Rgb<u8>,
    pub radius_line_thickness: u32,
    pub center_color: Rgb<u8>,
    pub center_radius: i32,
    pub label_color: Rgb<u8>,
    /// Hershey-style font scale; glyphs render at roughly 32px per unit.
    pub font_scale: f32,
    pub trail_color: Rgb<u8>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            circle_color: Rgb([255, 255, 0]),
            circle_thickness: 2,
            radius_line_color: Rgb([0, 0, 255]),
            radius_line_thickness: 2,
            center_color: Rgb([255, 0, 0]),
            center_radius: 5,
            label_color: Rgb([255, 255, 255]),
            font_scale: 0.5,
            trail_color: Rgb([255, 0, 0]),
        }
    }
}

/// Draws current positions, radii, id labels and fading trajectories onto a
/// frame in place.
pub struct TrajectoryRenderer {
    style: RenderStyle,
    font: Option<FontArc>,
}

impl TrajectoryRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style, font: None }
    }

    /// Supply a font for the id labels. Without one, labels are skipped and
    /// everything else is still drawn; the font asset belongs to the display
    /// collaborator, not this crate.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn draw(&self, frame: &mut RgbImage, tracks: &TrackStore) {
        for track in tracks.iter() {
            self.draw_track(frame, track);
        }
    }

    fn draw_track(&self, frame: &mut RgbImage, track: &Track) {
        let center = track.last_position();
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        let radius = track.radius();

        draw_hollow_circle_thick(
            frame,
            (cx, cy),
            radius.round() as i32,
            self.style.circle_thickness,
            self.style.circle_color,
        );

        // Radius indicator: a spoke from the center to the circle's edge.
        draw_thick_line(
            frame,
            (center.x, center.y),
            (center.x + radius, center.y),
            self.style.radius_line_thickness,
            self.style.radius_line_color,
        );

        draw_filled_circle_mut(frame, (cx, cy), self.style.center_radius, self.style.center_color);

        if let Some(font) = &self.font {
            let scale = PxScale::from(self.style.font_scale * 32.0);
            draw_text_mut(
                frame,
                self.style.label_color,
                cx - 20,
                cy - 20,
                scale,
                font,
                &format!("ID: {}", track.id()),
            );
        }

        let positions: Vec<(f32, f32)> = track.positions().map(|p| (p.x, p.y)).collect();
        for i in 1..positions.len() {
            let thickness = trail_thickness(track.capacity(), i);
            draw_thick_line(
                frame,
                positions[i - 1],
                positions[i],
                thickness,
                self.style.trail_color,
            );
        }
    }
}

/// Stroke width of the i-th trajectory segment (1-based from the oldest
/// point): `floor(sqrt(buffer_size / (i + 1)) * 2.5)`.
pub fn trail_thickness(buffer_size: usize, i: usize) -> u32 {
    ((buffer_size as f32 / (i as f32 + 1.0)).sqrt() * 2.5) as u32
}

/// imageproc circles are single-pixel; emulate stroke width with concentric
/// rings growing inward.
fn draw_hollow_circle_thick(
    frame: &mut RgbImage,
    center: (i32, i32),
    radius: i32,
    thickness: u32,
    color: Rgb<u8>,
) {
    for dr in 0..thickness as i32 {
        if radius - dr < 0 {
            break;
        }
        draw_hollow_circle_mut(frame, center, radius - dr, color);
    }
}

/// imageproc lines are single-pixel; emulate stroke width by filling the
/// quad spanned by the segment and its perpendicular offsets.
fn draw_thick_line(
    frame: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    thickness: u32,
    color: Rgb<u8>,
) {
    if thickness == 0 {
        return;
    }
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        let r = (thickness / 2) as i32;
        draw_filled_circle_mut(frame, (start.0.round() as i32, start.1.round() as i32), r, color);
        return;
    }
    if thickness == 1 {
        draw_line_segment_mut(frame, start, end, color);
        return;
    }

    let half = thickness as f32 / 2.0;
    let (nx, ny) = (-dy / length * half, dx / length * half);
    let corner = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
    let quad = [
        corner(start.0 + nx, start.1 + ny),
        corner(end.0 + nx, end.1 + ny),
        corner(end.0 - nx, end.1 - ny),
        corner(start.0 - nx, start.1 - ny),
    ];
    draw_polygon_mut(frame, &quad, color);
}
