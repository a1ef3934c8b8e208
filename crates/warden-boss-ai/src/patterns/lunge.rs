//! Body lunge: the boss dashes at where the player stood, lingers, and walks
//! back home. Touching the body during the dash hurts.

use glam::Vec3;

use warden_core::constants::*;

use super::{telegraph, AttackContext, AttackOutput};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LungeScratch {
    /// Dash destination, captured when the wind-up ends.
    pub target: Option<Vec3>,
}

impl LungeScratch {
    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, LUNGE_WINDUP);
        if t < LUNGE_WINDUP {
            return;
        }

        let home = ctx.boss_home;
        let target = *self.target.get_or_insert_with(|| {
            let mut spot = ctx.arena.clamp(ctx.player_position);
            spot.y = home.y;
            spot
        });

        let dash_end = LUNGE_WINDUP + LUNGE_DASH;
        let hold_end = dash_end + LUNGE_HOLD;
        let return_end = hold_end + LUNGE_RETURN;

        if t < dash_end {
            let s = smoothstep((t - LUNGE_WINDUP) / LUNGE_DASH);
            out.body_position = Some(home.lerp(target, s));
            out.contact_damage = LUNGE_CONTACT_DAMAGE;
        } else if t < hold_end {
            out.body_position = Some(target);
        } else if t < return_end {
            let s = smoothstep((t - hold_end) / LUNGE_RETURN);
            out.body_position = Some(target.lerp(home, s));
        } else {
            out.body_position = Some(home);
            out.finished = true;
        }
    }
}

fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}
