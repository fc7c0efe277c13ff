//! Reference tween driver.
//!
//! The core only asks a backend to start, cancel, and report tweens; this one
//! advances them on Bevy's frame clock and writes interpolated values straight
//! into `Transform` / alpha components. Tweens flagged `ignore_time_scale`
//! advance with real time instead of the virtual (scalable) clock.

use bevy::prelude::*;

use flick_animation_core::{
    Ease, LoopMode, TweenBackend, TweenId, TweenOp, TweenSpec, Vec3 as CoreVec3, WidgetId,
};

use crate::components::{AnimatedAlpha, AnimatedGroupAlpha};
use crate::resources::WidgetIndex;

/// Start value captured lazily on the first frame a tween is active, so the
/// motion always departs from whatever the widget currently shows.
#[derive(Debug, Clone, Copy)]
enum TweenStart {
    Point(Vec3),
    EulerDeg(Vec3),
    Scalar(f32),
    Orientation(Quat),
}

#[derive(Debug)]
struct ActiveTween {
    widget: WidgetId,
    id: TweenId,
    spec: TweenSpec,
    elapsed: f32,
    from: Option<TweenStart>,
}

/// Tween driver resource; implements the core backend contract.
#[derive(Resource, Default)]
pub struct FlickTweens {
    live: Vec<ActiveTween>,
    completed: Vec<(WidgetId, TweenId)>,
}

impl FlickTweens {
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl TweenBackend for FlickTweens {
    fn submit(&mut self, widget: WidgetId, tween: TweenId, spec: TweenSpec) {
        self.live.push(ActiveTween {
            widget,
            id: tween,
            spec,
            elapsed: 0.0,
            from: None,
        });
    }

    fn cancel_all(&mut self, widget: WidgetId) {
        self.live.retain(|t| t.widget != widget);
        self.completed.retain(|(w, _)| *w != widget);
    }

    fn drain_completed(&mut self, out: &mut Vec<TweenId>) {
        out.extend(self.completed.drain(..).map(|(_, t)| t));
    }
}

pub(crate) fn to_bevy(v: CoreVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn euler_deg_of(rotation: Quat) -> Vec3 {
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

fn quat_from_euler_deg(e: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        e.x.to_radians(),
        e.y.to_radians(),
        e.z.to_radians(),
    )
}

/// Normalized progress under the tween's loop shape, plus whether it finished.
/// Looping shapes never finish on their own.
fn shaped_progress(raw: f32, loop_mode: LoopMode) -> (f32, bool) {
    match loop_mode {
        LoopMode::Once => (raw.clamp(0.0, 1.0), raw >= 1.0),
        LoopMode::Loop => (raw.fract(), false),
        LoopMode::PingPong => {
            let cycle = raw.floor() as i64;
            let frac = raw.fract();
            let p = if cycle % 2 == 0 { frac } else { 1.0 - frac };
            (p, false)
        }
    }
}

fn ease_value(ease: Ease, t: f32) -> f32 {
    match ease {
        Ease::Linear => t,
        Ease::QuadIn => t * t,
        Ease::QuadOut => t * (2.0 - t),
        Ease::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Ease::CubicIn => t * t * t,
        Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
        Ease::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
        Ease::BackOut => {
            const C1: f32 = 1.70158;
            const C3: f32 = C1 + 1.0;
            1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
        }
        Ease::ElasticOut => {
            if t <= 0.0 {
                0.0
            } else if t >= 1.0 {
                1.0
            } else {
                const C4: f32 = std::f32::consts::TAU / 3.0;
                2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
        Ease::BounceOut => {
            const N1: f32 = 7.5625;
            const D1: f32 = 2.75;
            let mut t = t;
            if t < 1.0 / D1 {
                N1 * t * t
            } else if t < 2.0 / D1 {
                t -= 1.5 / D1;
                N1 * t * t + 0.75
            } else if t < 2.5 / D1 {
                t -= 2.25 / D1;
                N1 * t * t + 0.9375
            } else {
                t -= 2.625 / D1;
                N1 * t * t + 0.984375
            }
        }
    }
}

/// Advance every live tween and write interpolated values to the host
/// components. Runs before the engine tick so completions surface the same
/// frame they happen.
pub fn advance_tweens(
    time: Res<Time>,
    real_time: Res<Time<Real>>,
    mut tweens: ResMut<FlickTweens>,
    index: Res<WidgetIndex>,
    mut transforms: Query<&mut Transform>,
    mut alphas: Query<&mut AnimatedAlpha>,
    mut group_alphas: Query<&mut AnimatedGroupAlpha>,
) {
    let dt_scaled = time.delta_seconds();
    let dt_real = real_time.delta_seconds();

    let FlickTweens { live, completed } = &mut *tweens;
    live.retain_mut(|tw| {
        let dt = if tw.spec.ignore_time_scale {
            dt_real
        } else {
            dt_scaled
        };
        tw.elapsed += dt;
        let t_active = tw.elapsed - tw.spec.delay;
        if t_active < 0.0 {
            return true;
        }
        let Some(&entity) = index.map.get(&tw.widget) else {
            // the widget left the world; drop the tween quietly
            return false;
        };

        let raw = if tw.spec.duration <= 0.0 {
            1.0
        } else {
            t_active / tw.spec.duration
        };
        let (p, finished) = shaped_progress(raw, tw.spec.loop_mode);
        let k = ease_value(tw.spec.ease, p);

        match tw.spec.op {
            TweenOp::ScaleTo(to) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    let from = match tw.from {
                        Some(TweenStart::Point(v)) => v,
                        _ => {
                            let v = tf.scale;
                            tw.from = Some(TweenStart::Point(v));
                            v
                        }
                    };
                    tf.scale = from.lerp(to_bevy(to), k);
                }
            }
            TweenOp::MoveTo(to) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    let from = match tw.from {
                        Some(TweenStart::Point(v)) => v,
                        _ => {
                            let v = tf.translation;
                            tw.from = Some(TweenStart::Point(v));
                            v
                        }
                    };
                    tf.translation = from.lerp(to_bevy(to), k);
                }
            }
            TweenOp::RotateTo(to) => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    let from = match tw.from {
                        Some(TweenStart::EulerDeg(v)) => v,
                        _ => {
                            let v = euler_deg_of(tf.rotation);
                            tw.from = Some(TweenStart::EulerDeg(v));
                            v
                        }
                    };
                    tf.rotation = quat_from_euler_deg(from.lerp(to_bevy(to), k));
                }
            }
            TweenOp::FadeTo(to) => {
                if let Ok(mut alpha) = alphas.get_mut(entity) {
                    let from = match tw.from {
                        Some(TweenStart::Scalar(v)) => v,
                        _ => {
                            let v = alpha.0;
                            tw.from = Some(TweenStart::Scalar(v));
                            v
                        }
                    };
                    alpha.0 = from + (to - from) * k;
                }
            }
            TweenOp::GroupFadeTo(to) => {
                if let Ok(mut alpha) = group_alphas.get_mut(entity) {
                    let from = match tw.from {
                        Some(TweenStart::Scalar(v)) => v,
                        _ => {
                            let v = alpha.0;
                            tw.from = Some(TweenStart::Scalar(v));
                            v
                        }
                    };
                    alpha.0 = from + (to - from) * k;
                }
            }
            TweenOp::SpinAround { axis, degrees } => {
                if let Ok(mut tf) = transforms.get_mut(entity) {
                    let base = match tw.from {
                        Some(TweenStart::Orientation(q)) => q,
                        _ => {
                            let q = tf.rotation;
                            tw.from = Some(TweenStart::Orientation(q));
                            q
                        }
                    };
                    let axis = to_bevy(axis).normalize_or_zero();
                    if axis != Vec3::ZERO {
                        tf.rotation =
                            base * Quat::from_axis_angle(axis, (degrees * k).to_radians());
                    }
                }
            }
        }

        if finished {
            completed.push((tw.widget, tw.id));
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_progress_clamps_and_finishes() {
        assert_eq!(shaped_progress(0.5, LoopMode::Once), (0.5, false));
        assert_eq!(shaped_progress(1.0, LoopMode::Once), (1.0, true));
        assert_eq!(shaped_progress(2.5, LoopMode::Once), (1.0, true));
    }

    #[test]
    fn looping_shapes_never_finish() {
        assert!(!shaped_progress(3.2, LoopMode::Loop).1);
        assert!(!shaped_progress(3.2, LoopMode::PingPong).1);
        // ping-pong reflects on odd cycles
        let (p, _) = shaped_progress(1.25, LoopMode::PingPong);
        assert!((p - 0.75).abs() < 1e-6);
    }

    #[test]
    fn eases_hit_their_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::QuadIn,
            Ease::QuadOut,
            Ease::QuadInOut,
            Ease::CubicIn,
            Ease::CubicOut,
            Ease::CubicInOut,
            Ease::BackOut,
            Ease::ElasticOut,
            Ease::BounceOut,
        ] {
            assert!(ease_value(ease, 0.0).abs() < 1e-4, "{ease:?} at 0");
            assert!((ease_value(ease, 1.0) - 1.0).abs() < 1e-4, "{ease:?} at 1");
        }
    }
}
