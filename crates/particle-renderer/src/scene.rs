//! Drawing the stars and the attractor onto a [`Canvas`]

use crate::canvas::{Canvas, Shadow};
use glam::Vec2;
use particle_physics::{Attractor, Color, Particle, Viewport, GLOW_SCALE};

/// Palette and draw rules for one frame of the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRenderer {
    pub background: Color,
    pub attractor_fill: Color,
    pub glow: Color,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            attractor_fill: Color::WHITE,
            glow: Color::SHADOW,
        }
    }
}

impl SceneRenderer {
    /// Reset the surface scale and wipe it with the background
    pub fn clear<C: Canvas + ?Sized>(&self, canvas: &mut C, viewport: &Viewport) {
        canvas.set_scale(viewport.pixel_ratio);
        canvas.fill(self.background);
    }

    /// Draw a star as a square of side `radius`. Stars entirely off-surface
    /// are skipped; returns whether anything was drawn.
    pub fn draw_particle<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        viewport: &Viewport,
        particle: &Particle,
    ) -> bool {
        if !viewport.is_visible(particle) {
            return false;
        }

        canvas.fill_rect(particle.position, Vec2::splat(particle.radius), particle.color);
        true
    }

    pub fn draw_attractor<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        viewport: &Viewport,
        attractor: &Attractor,
    ) {
        let glow = Shadow {
            color: self.glow,
            blur: GLOW_SCALE * attractor.radius,
        };
        canvas.fill_circle(
            viewport.center(),
            attractor.radius,
            self.attractor_fill,
            Some(glow),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Scale(f32),
        Fill(Color),
        Rect(Vec2, Vec2, Color),
        Circle(Vec2, f32, Color, Option<Shadow>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        fn set_scale(&mut self, pixel_ratio: f32) {
            self.calls.push(Call::Scale(pixel_ratio));
        }

        fn fill(&mut self, color: Color) {
            self.calls.push(Call::Fill(color));
        }

        fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
            self.calls.push(Call::Rect(origin, size, color));
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, shadow: Option<Shadow>) {
            self.calls.push(Call::Circle(center, radius, color, shadow));
        }
    }

    fn star_at(x: f32, y: f32) -> Particle {
        Particle {
            id: 0,
            position: Vec2::new(x, y),
            radius: 2.0,
            color: Color::star_tint(50.0),
            angle: 0.0,
            orbit_radius: 150.0,
            angular_speed: 0.0,
            acceleration: 0.0,
        }
    }

    #[test]
    fn test_clear_scales_then_fills() {
        let mut canvas = Recorder::default();
        SceneRenderer::default().clear(&mut canvas, &Viewport::new(800.0, 600.0, 2.0));

        assert_eq!(
            canvas.calls,
            vec![Call::Scale(2.0), Call::Fill(Color::WHITE)]
        );
    }

    #[test]
    fn test_visible_star_drawn_as_square() {
        let mut canvas = Recorder::default();
        let star = star_at(10.0, 20.0);
        let drawn =
            SceneRenderer::default().draw_particle(&mut canvas, &Viewport::default(), &star);

        assert!(drawn);
        assert_eq!(
            canvas.calls,
            vec![Call::Rect(Vec2::new(10.0, 20.0), Vec2::splat(2.0), star.color)]
        );
    }

    #[test]
    fn test_offscreen_star_skipped() {
        let mut canvas = Recorder::default();
        let drawn = SceneRenderer::default().draw_particle(
            &mut canvas,
            &Viewport::new(800.0, 600.0, 1.0),
            &star_at(-50.0, 20.0),
        );

        assert!(!drawn);
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_attractor_glow() {
        let mut canvas = Recorder::default();
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        SceneRenderer::default().draw_attractor(&mut canvas, &viewport, &Attractor::new(120.0));

        assert_eq!(
            canvas.calls,
            vec![Call::Circle(
                Vec2::new(400.0, 300.0),
                120.0,
                Color::WHITE,
                Some(Shadow {
                    color: Color::SHADOW,
                    blur: 180.0
                })
            )]
        );
    }
}
