use crate::world::position::Vec2;

const BASE_TOSS_MS: f32 = 400.0;
const DISTANCE_FACTOR: f32 = 10.0;
const ARC_HEIGHT: f32 = 192.0;

/// Closed-form projectile from a launch point to a target.
///
/// Integrating `velocity` and `acceleration` (both per millisecond) over
/// `duration_ms` lands exactly on the target with zero horizontal velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TossCurve {
    pub duration_ms: f32,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// Solves the toss from `launch` to `target`. `item_speed` must be positive.
pub fn solve(launch: Vec2, target: Vec2, item_speed: f32) -> TossCurve {
    let travel = target - launch;
    let distance = launch.distance(target);
    // Only upward travel (negative y) lengthens the toss and raises the arc.
    let climb = travel.y.min(0.0);

    let duration_ms = (DISTANCE_FACTOR * distance.sqrt() + BASE_TOSS_MS - 0.5 * climb) / item_speed;
    let arc_height = ARC_HEIGHT - climb;

    let t = duration_ms;
    let velocity = Vec2::new(2.0 * travel.x / t, (travel.y - arc_height) / t);
    let acceleration = Vec2::new(-2.0 * travel.x / (t * t), 2.0 * arc_height / (t * t));

    TossCurve {
        duration_ms,
        velocity,
        acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land(launch: Vec2, curve: TossCurve) -> (Vec2, Vec2) {
        let t = curve.duration_ms;
        let position = launch + curve.velocity * t + curve.acceleration * (0.5 * t * t);
        let velocity = curve.velocity + curve.acceleration * t;
        (position, velocity)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn toss_lands_on_target_with_no_horizontal_drift() {
        let cases = [
            (Vec2::new(0.0, 0.0), Vec2::new(128.0, 0.0)),
            (Vec2::new(300.0, 500.0), Vec2::new(100.0, 96.0)),
            (Vec2::new(64.0, -32.0), Vec2::new(64.0, 400.0)),
            (Vec2::new(-250.0, 40.0), Vec2::new(900.0, -700.0)),
        ];
        for speed in [0.5, 1.0, 2.5] {
            for (launch, target) in cases {
                let curve = solve(launch, target, speed);
                let (position, velocity) = land(launch, curve);
                assert!(close(position.x, target.x), "x {position:?} vs {target:?}");
                assert!(close(position.y, target.y), "y {position:?} vs {target:?}");
                assert!(velocity.x.abs() < 1e-4, "residual vx {}", velocity.x);
            }
        }
    }

    #[test]
    fn toss_rises_before_falling() {
        let curve = solve(Vec2::new(0.0, 0.0), Vec2::new(128.0, 0.0), 1.0);
        assert!(curve.velocity.y < 0.0);
        assert!(curve.acceleration.y > 0.0);
    }

    #[test]
    fn duration_scales_with_sqrt_distance_and_speed() {
        let short = solve(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0);
        let long = solve(Vec2::ZERO, Vec2::new(400.0, 0.0), 1.0);
        assert!(close(short.duration_ms, 500.0));
        assert!(close(long.duration_ms, 600.0));
        let fast = solve(Vec2::ZERO, Vec2::new(400.0, 0.0), 2.0);
        assert!(close(fast.duration_ms, 300.0));
    }

    #[test]
    fn upward_travel_lengthens_toss() {
        let flat = solve(Vec2::ZERO, Vec2::new(0.0, 100.0), 1.0);
        let climb = solve(Vec2::ZERO, Vec2::new(0.0, -100.0), 1.0);
        assert!(close(flat.duration_ms, 500.0));
        assert!(close(climb.duration_ms, 550.0));
    }
}
