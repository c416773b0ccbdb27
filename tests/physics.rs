// Property-style tests for the dot physics, native-friendly (no browser APIs).
// These exercise the public `dot` module the way the frame loop and the input
// listeners do, across sampled positions / velocities rather than one case.

use cat_pounce::dot::{Axis, Dot, DotError, Point};
use cat_pounce::{FRICTION_COEFFICIENT, MAXIMUM_SPEED, TOUCH_ACCURACY};

const EPS: f64 = 1e-9;

fn make_dot(pos: Point, speed: f64, direction: f64) -> Dot {
    // 800x600 viewport, stock 20 px radius: bounds [20, 780] x [20, 580].
    Dot::new(20.0, pos, speed, direction, Point::new(800.0, 600.0))
}

// Deterministic sample stream; same LCG family the toy uses for launch angles.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[test]
fn hits_outside_touch_accuracy_never_change_velocity() {
    let mut lcg = Lcg(7);
    for _ in 0..200 {
        let speed = lcg.next_unit() * MAXIMUM_SPEED;
        let direction = lcg.next_unit() * std::f64::consts::TAU;
        let mut dot = make_dot(Point::new(400.0, 300.0), speed, direction);
        let before = dot.velocity();

        let angle = lcg.next_unit() * std::f64::consts::TAU;
        let dist = TOUCH_ACCURACY + lcg.next_unit() * 500.0;
        dot.hit(Point::new(
            400.0 + dist * angle.cos(),
            300.0 + dist * angle.sin(),
        ));
        let after = dot.velocity();
        assert!((after.x - before.x).abs() < EPS);
        assert!((after.y - before.y).abs() < EPS);
    }
}

#[test]
fn hits_inside_touch_accuracy_gain_at_most_half_maximum_speed() {
    let mut lcg = Lcg(11);
    for _ in 0..200 {
        let speed = lcg.next_unit() * MAXIMUM_SPEED;
        let direction = lcg.next_unit() * std::f64::consts::TAU;
        let mut dot = make_dot(Point::new(400.0, 300.0), speed, direction);
        let before = dot.speed();

        let angle = lcg.next_unit() * std::f64::consts::TAU;
        let dist = lcg.next_unit() * TOUCH_ACCURACY;
        dot.hit(Point::new(
            400.0 + dist * angle.cos(),
            300.0 + dist * angle.sin(),
        ));
        assert!(
            dot.speed() <= before + MAXIMUM_SPEED / 2.0 + 1e-6,
            "speed {} from {} exceeds impulse cap",
            dot.speed(),
            before
        );
    }
}

#[test]
fn position_stays_in_bounds_through_arbitrary_advances() {
    let mut lcg = Lcg(23);
    for _ in 0..50 {
        let mut dot = make_dot(
            Point::new(
                20.0 + lcg.next_unit() * 760.0,
                20.0 + lcg.next_unit() * 560.0,
            ),
            lcg.next_unit() * MAXIMUM_SPEED,
            lcg.next_unit() * std::f64::consts::TAU,
        );
        for _ in 0..100 {
            let dt = lcg.next_unit() * 0.5;
            let gravity = Point::new(lcg.next_unit() * 2.0 - 1.0, lcg.next_unit() * 2.0 - 1.0);
            dot.advance(dt, gravity);
            let p = dot.position();
            let b = dot.bounds();
            assert!(p.x >= b.min.x - EPS && p.x <= b.max.x + EPS, "x escaped: {p:?}");
            assert!(p.y >= b.min.y - EPS && p.y <= b.max.y + EPS, "y escaped: {p:?}");
        }
    }
}

#[test]
fn friction_alone_brings_the_dot_to_rest() {
    let mut dot = make_dot(Point::new(400.0, 300.0), MAXIMUM_SPEED, 1.3);
    let mut prev = dot.speed();
    for step in 0..10_000 {
        dot.advance(1.0 / 60.0, Point::ZERO);
        if dot.speed() == 0.0 {
            return;
        }
        assert!(dot.speed() < prev, "no decay at step {step}");
        prev = dot.speed();
    }
    panic!("dot never came to rest: speed {}", dot.speed());
}

#[test]
fn resting_dot_stays_put() {
    let mut dot = make_dot(Point::new(123.0, 456.0), 0.0, 0.0);
    dot.advance(1.0, Point::ZERO);
    assert_eq!(dot.position(), Point::new(123.0, 456.0));
    assert_eq!(dot.speed(), 0.0);
}

#[test]
fn bounce_flips_one_component_only() {
    let mut dot = make_dot(Point::new(400.0, 300.0), 640.0, 2.1);
    let before = dot.velocity();
    dot.bounce(Axis::X);
    let after_x = dot.velocity();
    assert!((after_x.x + before.x).abs() < EPS);
    assert!((after_x.y - before.y).abs() < EPS);
    dot.bounce(Axis::Y);
    let after_y = dot.velocity();
    assert!((after_y.x - after_x.x).abs() < EPS);
    assert!((after_y.y + after_x.y).abs() < EPS);
}

#[test]
fn invalid_axis_identifier_is_rejected() {
    let err = Axis::try_from("diagonal").unwrap_err();
    assert_eq!(err, DotError::InvalidAxis("diagonal".to_string()));
    assert_eq!(err.to_string(), "invalid bounce axis 'diagonal'");
}

#[test]
fn crossing_a_bound_reflects_and_flips_velocity() {
    // Dot at (100, 100), vx 1000, max x bound 300 (320 px extent, 20 px
    // radius). dt 0.3 s crosses the bound: x reflects about 300, vx flips.
    let mut dot = Dot::new(
        20.0,
        Point::new(100.0, 100.0),
        1000.0,
        0.0,
        Point::new(320.0, 320.0),
    );
    let after_friction = 1000.0 * (1.0 - FRICTION_COEFFICIENT);
    dot.advance(0.3, Point::ZERO);
    let expected = 2.0 * 300.0 - (100.0 + after_friction * 0.3);
    assert!((dot.position().x - expected).abs() < EPS);
    assert!(dot.velocity().x < 0.0);
    assert!((dot.velocity().y).abs() < EPS);
}
