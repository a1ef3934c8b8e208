//! Arena geometry: the coordinate-space specifics of the two stagings.
//!
//! The simulation runs on `Vec3` everywhere with Y up. `Radial` is the 3D
//! first-person arena: a round floor with the playing plane in XZ. `SideView`
//! is the 2D canvas: the playing plane is XY and depth (Z) is pinned to 0.
//! Everything that differs between the two (plane directions, aim projection,
//! clamping, spawn points) goes through this type.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Facing;

/// Arena bounds and coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Arena {
    /// Circular 3D floor centred on the origin.
    Radial {
        radius: f32,
        min_height: f32,
        max_height: f32,
    },
    /// Rectangular 2D side view.
    SideView {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },
}

impl Default for Arena {
    fn default() -> Self {
        Self::radial()
    }
}

impl Arena {
    pub fn radial() -> Self {
        Arena::Radial {
            radius: ARENA_RADIUS,
            min_height: ARENA_MIN_HEIGHT,
            max_height: ARENA_MAX_HEIGHT,
        }
    }

    pub fn side_view() -> Self {
        Arena::SideView {
            min_x: SIDE_MIN_X,
            max_x: SIDE_MAX_X,
            min_y: SIDE_MIN_Y,
            max_y: SIDE_MAX_Y,
        }
    }

    pub fn is_side_view(&self) -> bool {
        matches!(self, Arena::SideView { .. })
    }

    /// Unit direction in the playing plane for `angle` radians.
    ///
    /// Radial: 0 = +Z, PI/2 = +X. Side view: 0 = +X, PI/2 = +Y.
    pub fn plane_dir(&self, angle: f32) -> Vec3 {
        match self {
            Arena::Radial { .. } => Vec3::new(angle.sin(), 0.0, angle.cos()),
            Arena::SideView { .. } => Vec3::new(angle.cos(), angle.sin(), 0.0),
        }
    }

    /// Plane angle pointing from `from` toward `to` (inverse of `plane_dir`).
    pub fn angle_to(&self, from: Vec3, to: Vec3) -> f32 {
        let d = to - from;
        match self {
            Arena::Radial { .. } => d.x.atan2(d.z),
            Arena::SideView { .. } => d.y.atan2(d.x),
        }
    }

    /// Distance measured in the playing plane (ignores height in 3D).
    pub fn plane_distance(&self, a: Vec3, b: Vec3) -> f32 {
        match self {
            Arena::Radial { .. } => Vec3::new(b.x - a.x, 0.0, b.z - a.z).length(),
            Arena::SideView { .. } => Vec3::new(b.x - a.x, b.y - a.y, 0.0).length(),
        }
    }

    /// Unit direction leaving `origin` at plane `angle`, tilted in 3D so it
    /// descends or climbs to `target`'s height over the planar distance.
    pub fn aim_along(&self, angle: f32, origin: Vec3, target: Vec3) -> Vec3 {
        let flat = self.plane_dir(angle);
        match self {
            Arena::Radial { .. } => {
                let reach = self.plane_distance(origin, target).max(1.0);
                (flat * reach + Vec3::Y * (target.y - origin.y)).normalize_or_zero()
            }
            Arena::SideView { .. } => flat,
        }
    }

    /// Unit aim direction for a facing.
    pub fn aim_dir(&self, facing: Facing) -> Vec3 {
        match self {
            Arena::Radial { .. } => {
                let (sp, cp) = facing.pitch.sin_cos();
                Vec3::new(cp * facing.yaw.sin(), sp, cp * facing.yaw.cos())
            }
            Arena::SideView { .. } => self.plane_dir(facing.yaw),
        }
    }

    /// Map a local movement intent (x = right, y = up, z = forward) to world
    /// space. The side view maps screen axes directly.
    pub fn move_to_world(&self, intent: Vec3, facing: Facing) -> Vec3 {
        match self {
            Arena::Radial { .. } => {
                let forward = Vec3::new(facing.yaw.sin(), 0.0, facing.yaw.cos());
                let right = Vec3::Y.cross(forward);
                right * intent.x + Vec3::Y * intent.y + forward * intent.z
            }
            Arena::SideView { .. } => Vec3::new(intent.x, intent.y, 0.0),
        }
    }

    /// Clamp a position into the playable volume.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        match *self {
            Arena::Radial {
                radius,
                min_height,
                max_height,
            } => {
                let mut flat = Vec3::new(p.x, 0.0, p.z);
                let len = flat.length();
                if len > radius {
                    flat *= radius / len;
                }
                Vec3::new(flat.x, p.y.clamp(min_height, max_height), flat.z)
            }
            Arena::SideView {
                min_x,
                max_x,
                min_y,
                max_y,
            } => Vec3::new(p.x.clamp(min_x, max_x), p.y.clamp(min_y, max_y), 0.0),
        }
    }

    /// Whether `p` lies within the arena expanded by `margin` on every side.
    /// The vertical envelope reaches up to the sky-hazard drop height.
    pub fn in_bounds(&self, p: Vec3, margin: f32) -> bool {
        let ceiling = self.sky_height() + margin;
        match *self {
            Arena::Radial {
                radius, min_height, ..
            } => {
                let flat = (p.x * p.x + p.z * p.z).sqrt();
                flat <= radius + margin && p.y >= min_height - margin && p.y <= ceiling
            }
            Arena::SideView {
                min_x, max_x, min_y, ..
            } => {
                p.x >= min_x - margin
                    && p.x <= max_x + margin
                    && p.y >= min_y - margin
                    && p.y <= ceiling
                    && p.z.abs() <= margin
            }
        }
    }

    /// Floor height.
    pub fn ground_y(&self) -> f32 {
        match *self {
            Arena::Radial { min_height, .. } => min_height,
            Arena::SideView { min_y, .. } => min_y,
        }
    }

    /// Height from which sky hazards fall.
    pub fn sky_height(&self) -> f32 {
        match *self {
            Arena::Radial { max_height, .. } => max_height.max(SKY_HEIGHT),
            Arena::SideView { max_y, .. } => max_y,
        }
    }

    /// Ground-plane scatter offset from two unit samples in [-1, 1].
    /// The side view scatters along the floor only.
    pub fn scatter(&self, u: f32, v: f32, extent: f32) -> Vec3 {
        match self {
            Arena::Radial { .. } => Vec3::new(u * extent, 0.0, v * extent),
            Arena::SideView { .. } => Vec3::new(u * extent, 0.0, 0.0),
        }
    }

    /// Boss home position.
    pub fn boss_home(&self) -> Vec3 {
        match *self {
            Arena::Radial { min_height, .. } => Vec3::new(0.0, min_height, 0.0),
            Arena::SideView { max_x, min_y, .. } => Vec3::new(max_x - SIDE_BOSS_INSET, min_y, 0.0),
        }
    }

    /// Player spawn position.
    pub fn player_spawn(&self) -> Vec3 {
        match *self {
            Arena::Radial {
                radius, min_height, ..
            } => Vec3::new(0.0, min_height, -radius * PLAYER_SPAWN_FRACTION),
            Arena::SideView { min_x, min_y, .. } => {
                Vec3::new(min_x + SIDE_PLAYER_INSET, min_y, 0.0)
            }
        }
    }
}
