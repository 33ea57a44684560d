//! Axis-aligned collision detection and response
//!
//! Sprites are square and positioned by their top-left corner. Gameplay
//! checks (contact kills, attack hits) use tight colliders that are smaller
//! than the drawn sprite; full sprite rectangles are only used to shove the
//! penguin out of the vampire's body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_upper;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Full footprint of a square sprite at `pos`
    pub fn sprite(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point test with inclusive edges (used for UI regions)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// True iff the rectangles share positive-area overlap
///
/// Touching edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Push `mover` out of `solid` along the axis of least penetration
///
/// Only one axis moves, by exactly the penetration depth. Equal depths are
/// settled by evaluation order (left, right, up, down). Returns whether the
/// mover was displaced.
pub fn resolve_pushback(mover: &mut Rect, solid: &Rect) -> bool {
    if !rects_overlap(mover, solid) {
        return false;
    }

    let push_left = mover.right() - solid.x;
    let push_right = solid.right() - mover.x;
    let push_up = mover.bottom() - solid.y;
    let push_down = solid.bottom() - mover.y;

    let mut shift = Vec2::new(-push_left, 0.0);
    let mut depth = push_left;
    if push_right < depth {
        depth = push_right;
        shift = Vec2::new(push_right, 0.0);
    }
    if push_up < depth {
        depth = push_up;
        shift = Vec2::new(0.0, -push_up);
    }
    if push_down < depth {
        shift = Vec2::new(0.0, push_down);
    }

    mover.x += shift.x;
    mover.y += shift.y;
    true
}

/// Vampire hit-box: 48% x 58% of the sprite, sitting low on the body
pub fn player_collider(pos: Vec2, sprite_size: f32) -> Rect {
    let w = sprite_size * 0.48;
    let h = sprite_size * 0.58;
    Rect::new(
        pos.x + (sprite_size - w) / 2.0,
        pos.y + (sprite_size - h) * 0.7,
        w,
        h,
    )
}

/// Penguin hit-box: 42% x 50% of the sprite, centred
pub fn enemy_collider(pos: Vec2, sprite_size: f32) -> Rect {
    let w = sprite_size * 0.42;
    let h = sprite_size * 0.50;
    Rect::new(
        pos.x + (sprite_size - w) / 2.0,
        pos.y + (sprite_size - h) / 2.0,
        w,
        h,
    )
}

/// Playable area, sized from the background image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f32,
    pub height: f32,
}

impl MapBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Largest top-left a sprite of `size` may have
    pub fn max_origin(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    /// Clamp a sprite's top-left so the sprite stays on the map
    pub fn clamp(&self, pos: Vec2, size: f32) -> Vec2 {
        Vec2::new(
            clamp_upper(pos.x, self.width - size),
            clamp_upper(pos.y, self.height - size),
        )
    }

    pub fn contains(&self, pos: Vec2, size: f32) -> bool {
        let max = self.max_origin(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_strict_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &Rect::new(9.0, 9.0, 10.0, 10.0)));
        // Sharing an edge is not an overlap
        assert!(!rects_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Rect::new(30.0, 30.0, 5.0, 5.0)));
    }

    #[test]
    fn test_pushback_minimal_axis() {
        // Left penetration 5, every other side 20
        let solid = Rect::new(0.0, 0.0, 15.0, 20.0);
        let mut mover = Rect::new(-5.0, 0.0, 10.0, 20.0);

        assert!(resolve_pushback(&mut mover, &solid));
        assert_eq!(mover.x, -10.0);
        assert_eq!(mover.y, 0.0);
        assert!(!rects_overlap(&mover, &solid));
    }

    #[test]
    fn test_pushback_vertical() {
        let solid = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut mover = Rect::new(40.0, 97.0, 20.0, 20.0);
        resolve_pushback(&mut mover, &solid);
        assert_eq!(mover.x, 40.0);
        assert_eq!(mover.y, 100.0);
        assert!(!rects_overlap(&mover, &solid));
    }

    #[test]
    fn test_pushback_tie_picks_some_minimal_axis() {
        let solid = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut mover = Rect::new(6.0, 6.0, 10.0, 10.0);
        resolve_pushback(&mut mover, &solid);
        let moved = (mover.x - 6.0).abs() + (mover.y - 6.0).abs();
        assert_eq!(moved, 4.0);
        assert!(!rects_overlap(&mover, &solid));
    }

    #[test]
    fn test_pushback_noop_without_overlap() {
        let solid = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut mover = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!resolve_pushback(&mut mover, &solid));
        assert_eq!(mover, Rect::new(10.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_colliders_inside_sprite() {
        let pos = Vec2::new(100.0, 200.0);
        let sprite = Rect::sprite(pos, 96.0);
        for c in [player_collider(pos, 96.0), enemy_collider(pos, 96.0)] {
            assert!(c.x > sprite.x && c.right() < sprite.right());
            assert!(c.y > sprite.y && c.bottom() < sprite.bottom());
        }
        // Vampire collider sits below centre
        assert!(player_collider(pos, 96.0).center().y > sprite.center().y);
        let offset = enemy_collider(pos, 96.0).center() - sprite.center();
        assert!(offset.length() < 1e-3);
    }

    #[test]
    fn test_map_clamp() {
        let map = MapBounds::new(500.0, 400.0);
        assert_eq!(map.clamp(Vec2::new(-3.0, 900.0), 96.0), Vec2::new(0.0, 304.0));
        assert!(map.contains(Vec2::new(404.0, 304.0), 96.0));
        assert!(!map.contains(Vec2::new(404.5, 0.0), 96.0));

        let tiny = MapBounds::new(50.0, 50.0);
        assert_eq!(tiny.clamp(Vec2::new(10.0, 10.0), 96.0), Vec2::ZERO);
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(270.0, 200.0, 100.0, 40.0);
        assert!(r.contains_point(Vec2::new(270.0, 200.0)));
        assert!(r.contains_point(Vec2::new(370.0, 240.0)));
        assert!(!r.contains_point(Vec2::new(371.0, 220.0)));
    }
}
