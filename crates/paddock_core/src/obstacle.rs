//! Obstacle capability
//!
//! Anything that can block decoration placement exposes where it is. The
//! streamer only ever sees `&dyn HasWorldPosition`, so pads, zones,
//! workbenches and levers share one code path.

use paddock_math::Vec2;

/// Something with a resolvable position in the world
pub trait HasWorldPosition {
    /// World position, or None when the position cannot be resolved
    fn world_position(&self) -> Option<Vec2>;
}

impl HasWorldPosition for Vec2 {
    fn world_position(&self) -> Option<Vec2> {
        Some(*self)
    }
}

impl<T: HasWorldPosition> HasWorldPosition for Option<T> {
    fn world_position(&self) -> Option<Vec2> {
        self.as_ref().and_then(HasWorldPosition::world_position)
    }
}
