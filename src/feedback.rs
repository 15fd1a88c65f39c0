// Tap feedback, software-drawn with additive blending.
// Visual outcomes:
// - Tap on a new danger: a green ring pops out from the tap point and fades.
// - Tap on a safe area: a small grey cross appears and fades.
// - While a marker is alive the HUD shows "Correct!" or "Nope...".

use crate::draw::draw_line;
use crate::types::FrameBuffer;

const HIT_RGB: (u8, u8, u8) = (40, 230, 90);
const MISS_RGB: (u8, u8, u8) = (170, 170, 170);
pub const MARKER_LIFE: f32 = 0.6; // seconds

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
}

/// One marker. Visual: a ring (hit) or cross (miss) that fades out.
#[derive(Debug, Clone)]
struct Marker {
    x: f32, y: f32,  // position in frame pixels
    outcome: Outcome,
    life: f32,       // remaining lifetime in seconds
}

impl Marker {
    #[inline] fn alive(&self) -> bool { self.life > 0.0 }
    #[inline] fn fade(&self) -> f32 { (self.life / MARKER_LIFE).clamp(0.0, 1.0) }
}

/// Additive blend one RGB triplet at (x,y) with saturation to 255.
#[inline]
fn add_rgb_saturating(fb: &mut FrameBuffer, x: i32, y: i32, r: u8, g: u8, b: u8) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let idx = y * fb.width + x;
    let old = fb.pixels[idx];

    let nr = (((old >> 16) & 0xFF) as u16 + r as u16).min(255) as u32;
    let ng = (((old >> 8) & 0xFF) as u16 + g as u16).min(255) as u32;
    let nb = ((old & 0xFF) as u16 + b as u16).min(255) as u32;

    fb.pixels[idx] = (nr << 16) | (ng << 8) | nb;
}

/// 2-pixel-thick ring of radius `radius` around (cx,cy), colour scaled by `strength`.
fn draw_ring(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, rgb: (u8, u8, u8), strength: f32) {
    let scale = |c: u8| (c as f32 * strength).round().clamp(0.0, 255.0) as u8;
    let (r, g, b) = (scale(rgb.0), scale(rgb.1), scale(rgb.2));
    let inner = ((radius - 1) * (radius - 1)) as i64;
    let outer = ((radius + 1) * (radius + 1)) as i64;

    for y in (cy - radius - 1)..=(cy + radius + 1) {
        for x in (cx - radius - 1)..=(cx + radius + 1) {
            let (dx, dy) = ((x - cx) as i64, (y - cy) as i64);
            let d2 = dx * dx + dy * dy;
            if d2 >= inner && d2 <= outer {
                add_rgb_saturating(fb, x, y, r, g, b);
            }
        }
    }
}

/// Marker container. Visual: keeps every ring/cross currently on screen.
pub struct Feedback {
    markers: Vec<Marker>,
    max_markers: usize,
}

impl Feedback {
    pub fn new(max_markers: usize) -> Self {
        Self { markers: Vec::with_capacity(max_markers), max_markers }
    }

    /// Start a marker at the tap. Oldest markers are dropped past the cap.
    pub fn spawn(&mut self, x: f32, y: f32, outcome: Outcome) {
        if self.markers.len() >= self.max_markers && !self.markers.is_empty() {
            self.markers.remove(0);
        }
        self.markers.push(Marker { x, y, outcome, life: MARKER_LIFE });
    }

    /// Forget everything (used when the picture changes).
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Outcome of the most recent live marker, for the HUD line.
    pub fn latest(&self) -> Option<Outcome> {
        self.markers.last().map(|m| m.outcome)
    }

    /// Age markers by `dt` seconds, drop dead ones, draw the rest.
    pub fn update_and_render(&mut self, fb: &mut FrameBuffer, dt: f32) {
        for m in &mut self.markers {
            m.life -= dt;
        }
        self.markers.retain(Marker::alive);

        for m in &self.markers {
            let fade = m.fade();
            let (cx, cy) = (m.x.round() as i32, m.y.round() as i32);
            match m.outcome {
                Outcome::Hit => {
                    // Ring grows while it fades
                    let radius = 6 + ((1.0 - fade) * 10.0) as i32;
                    draw_ring(fb, cx, cy, radius, HIT_RGB, fade);
                }
                Outcome::Miss => {
                    let scale = |c: u8| (c as f32 * fade) as u32;
                    let color = (scale(MISS_RGB.0) << 16) | (scale(MISS_RGB.1) << 8) | scale(MISS_RGB.2);
                    draw_line(fb, cx - 4, cy - 4, cx + 4, cy + 4, color);
                    draw_line(fb, cx - 4, cy + 4, cx + 4, cy - 4, color);
                }
            }
        }
    }
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Hit => "Correct!",
            Outcome::Miss => "Nope...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_expire_after_their_life() {
        let mut fx = Feedback::new(8);
        let mut fb = FrameBuffer::filled(32, 32, 0);
        fx.spawn(16.0, 16.0, Outcome::Hit);
        fx.update_and_render(&mut fb, MARKER_LIFE / 2.0);
        assert_eq!(fx.markers.len(), 1);
        assert_eq!(fx.latest(), Some(Outcome::Hit));

        fx.update_and_render(&mut fb, MARKER_LIFE);
        assert_eq!(fx.markers.len(), 0);
        assert_eq!(fx.latest(), None);
    }

    #[test]
    fn hit_ring_brightens_green_channel() {
        let mut fx = Feedback::new(8);
        let mut fb = FrameBuffer::filled(40, 40, 0);
        fx.spawn(20.0, 20.0, Outcome::Hit);
        fx.update_and_render(&mut fb, 0.0);

        assert!(fb.pixels.iter().any(|&p| (p >> 8) & 0xFF > 0));
        // Centre of the ring stays untouched.
        assert_eq!(fb.pixels[20 * 40 + 20], 0);
    }

    #[test]
    fn cap_drops_oldest() {
        let mut fx = Feedback::new(2);
        fx.spawn(0.0, 0.0, Outcome::Hit);
        fx.spawn(1.0, 1.0, Outcome::Hit);
        fx.spawn(2.0, 2.0, Outcome::Miss);
        assert_eq!(fx.markers.len(), 2);
        assert_eq!(fx.latest(), Some(Outcome::Miss));
        assert_eq!(Outcome::Miss.message(), "Nope...");
    }
}
