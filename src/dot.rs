//! Pure physics for the pounce dot: impulse response to hits, per-frame
//! kinematics with friction and tilt gravity, and edge bouncing.
//!
//! Nothing in this module touches `web_sys`, so the whole model runs under
//! plain `cargo test` on the host. The browser driver in `toy` owns exactly
//! one [`Dot`] and feeds it events and frame times.

use std::f64::consts::{PI, TAU};
use std::fmt;

/// A 2D point / vector. Event coordinates, positions, and the gravity
/// reading all use this.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned region the dot center may occupy, already shrunk by the
/// dot radius on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Bounds for a dot of `radius` inside a viewport of `extent` px.
    /// A viewport smaller than the dot collapses to a single point.
    fn for_extent(radius: f64, extent: Point) -> Self {
        Bounds {
            min: Point::new(radius, radius),
            max: Point::new(
                (extent.x - radius).max(radius),
                (extent.y - radius).max(radius),
            ),
        }
    }
}

/// The two bounce axes. Parsed from the wire-ish `"x"` / `"y"` identifiers
/// via `TryFrom`; anything else is a programming error surfaced as
/// [`DotError::InvalidAxis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl TryFrom<&str> for Axis {
    type Error = DotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            other => Err(DotError::InvalidAxis(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DotError {
    /// An axis identifier other than `"x"` or `"y"` was supplied.
    InvalidAxis(String),
}

impl fmt::Display for DotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DotError::InvalidAxis(axis) => write!(f, "invalid bounce axis '{axis}'"),
        }
    }
}

impl std::error::Error for DotError {}

/// The single moving entity. Velocity is stored in polar form (`speed`,
/// `direction`); the cartesian view is computed on read and re-derived on
/// write so the two representations can never drift apart.
#[derive(Clone, Debug)]
pub struct Dot {
    radius: f64,
    pos: Point,
    speed: f64,
    direction: f64,
    bounds: Bounds,
}

impl Dot {
    /// Create the dot inside a viewport of `extent` px. Position is clamped
    /// into bounds immediately.
    pub fn new(radius: f64, pos: Point, speed: f64, direction: f64, extent: Point) -> Self {
        let mut dot = Dot {
            radius,
            pos,
            speed,
            direction,
            bounds: Bounds::for_extent(radius, extent),
        };
        dot.clamp_to_bounds();
        dot
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cartesian view of the polar velocity.
    pub fn velocity(&self) -> Point {
        Point::new(
            self.speed * self.direction.cos(),
            self.speed * self.direction.sin(),
        )
    }

    /// Assign velocity in cartesian form; recomputes `speed` / `direction`
    /// so the polar representation stays authoritative.
    fn set_velocity(&mut self, vel: Point) {
        self.speed = vel.x.hypot(vel.y);
        self.direction = vel.y.atan2(vel.x);
    }

    /// Viewport changed: recompute bounds and pull the dot back inside.
    pub fn set_extent(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::for_extent(self.radius, Point::new(width, height));
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        self.pos.x = self.pos.x.clamp(self.bounds.min.x, self.bounds.max.x);
        self.pos.y = self.pos.y.clamp(self.bounds.min.y, self.bounds.max.y);
    }

    /// Apply a spring-like impulse from a touch / click at `at`.
    ///
    /// The impulse magnitude falls off linearly from `MAXIMUM_SPEED / 2` at
    /// zero distance to nothing at `TOUCH_ACCURACY` px; farther events leave
    /// the velocity untouched. The current velocity is rotated into a basis
    /// aligned with the displacement (u normal, v parallel), the force is
    /// added to the parallel component only, and the result rotated back.
    pub fn hit(&mut self, at: Point) {
        let dx = self.pos.x - at.x;
        let dy = self.pos.y - at.y;
        let distance = dx.hypot(dy);
        let force =
            (crate::MAXIMUM_SPEED / 2.0) * (crate::TOUCH_ACCURACY - distance) / crate::TOUCH_ACCURACY;
        if force < 0.0 {
            return;
        }
        // theta points from the event toward the dot; atan2(0, 0) == 0 covers
        // the dead-center tap without a special case.
        let theta = dy.atan2(dx).rem_euclid(TAU);
        let phi = theta - PI / 2.0;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let vel = self.velocity();
        let u = vel.x * cos_phi + vel.y * sin_phi;
        let v = -vel.x * sin_phi + vel.y * cos_phi + force;
        self.set_velocity(Point::new(u * cos_phi - v * sin_phi, u * sin_phi + v * cos_phi));
    }

    /// Advance the dot by `dt` seconds under friction, `gravity` (normalized
    /// tilt reading), and edge bouncing. Position and velocity are updated
    /// in place.
    pub fn advance(&mut self, dt: f64, gravity: Point) {
        self.speed *= 1.0 - crate::FRICTION_COEFFICIENT;
        if gravity != Point::ZERO {
            let vel = self.velocity();
            // Device y grows upward, canvas y downward.
            self.set_velocity(Point::new(
                vel.x + gravity.x * crate::GRAVITY_SCALE,
                vel.y - gravity.y * crate::GRAVITY_SCALE,
            ));
        }
        if self.speed > crate::MAXIMUM_SPEED {
            self.speed = crate::MAXIMUM_SPEED;
        }
        if self.speed < crate::MINIMUM_SPEED {
            self.speed = 0.0;
        }

        let vel = self.velocity();
        self.pos.x += vel.x * dt;
        self.pos.y += vel.y * dt;

        // Reflect a crossed bound about itself (linear interpolation of the
        // crossing point) and invert that axis's velocity.
        if self.pos.x < self.bounds.min.x {
            self.pos.x = 2.0 * self.bounds.min.x - self.pos.x;
            self.bounce(Axis::X);
        } else if self.pos.x > self.bounds.max.x {
            self.pos.x = 2.0 * self.bounds.max.x - self.pos.x;
            self.bounce(Axis::X);
        }
        if self.pos.y < self.bounds.min.y {
            self.pos.y = 2.0 * self.bounds.min.y - self.pos.y;
            self.bounce(Axis::Y);
        } else if self.pos.y > self.bounds.max.y {
            self.pos.y = 2.0 * self.bounds.max.y - self.pos.y;
            self.bounce(Axis::Y);
        }
        // A very large dt can reflect past the far edge; the invariant is
        // position-in-bounds after every advance.
        self.clamp_to_bounds();
    }

    /// Invert one velocity component, keeping speed and recomputing direction.
    pub fn bounce(&mut self, axis: Axis) {
        let vel = self.velocity();
        match axis {
            Axis::X => self.set_velocity(Point::new(-vel.x, vel.y)),
            Axis::Y => self.set_velocity(Point::new(vel.x, -vel.y)),
        }
    }
}
