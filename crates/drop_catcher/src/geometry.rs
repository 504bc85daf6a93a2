//! Pure rectangle geometry for the catch logic, independent of any
//! rendering surface. Everything here works in play area coordinates:
//! origin at the top left corner, y growing downward, sizes in pixels.

use bevy::math::{Rect, Vec2};

use crate::core::config::{
    BUCKET_BOTTOM_OFFSET, BUCKET_SIZE, DROP_SIZE, EDGE_MARGIN, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH,
};

pub fn rect_at(top_left: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(top_left, top_left + size)
}

/// Bounding box of a drop whose top left corner sits at `pos`
pub fn drop_rect(pos: Vec2) -> Rect {
    rect_at(pos, DROP_SIZE)
}

/// Bounding box of the bucket at horizontal position `x` (left edge)
pub fn bucket_rect(x: f32) -> Rect {
    let top = PLAY_AREA_HEIGHT - BUCKET_SIZE.y - BUCKET_BOTTOM_OFFSET;
    rect_at(Vec2::new(x, top), BUCKET_SIZE)
}

/// Union of an object's pre and post move boxes. Testing against this
/// region instead of the post move box alone keeps fast objects from
/// tunneling through the bucket in a single tick.
pub fn swept(before: Rect, after: Rect) -> Rect {
    before.union(after)
}

/// Axis aligned overlap test with strict inequalities: rectangles that
/// merely share an edge do not count as touching.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}

/// Clamps a requested bucket position (left edge) to the play area,
/// keeping the fixed margin from both walls.
pub fn clamp_bucket_x(x: f32) -> f32 {
    x.clamp(EDGE_MARGIN, PLAY_AREA_WIDTH - BUCKET_SIZE.x - EDGE_MARGIN)
}

/// Center of an entity in world coordinates, for the display surface.
/// World space is centered on the window with y growing upward.
pub fn play_to_world(top_left: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        top_left.x + size.x / 2.0 - PLAY_AREA_WIDTH / 2.0,
        PLAY_AREA_HEIGHT / 2.0 - top_left.y - size.y / 2.0,
    )
}

/// A single point translated to world coordinates
pub fn world_point(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x - PLAY_AREA_WIDTH / 2.0,
        PLAY_AREA_HEIGHT / 2.0 - point.y,
    )
}

/// Maps a window position (logical pixels, origin top left) into play
/// area coordinates, compensating for a resized window.
pub fn screen_to_play(screen: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        screen.x / window_size.x * PLAY_AREA_WIDTH,
        screen.y / window_size.y * PLAY_AREA_HEIGHT,
    )
}
