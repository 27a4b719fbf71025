//! Orbit camera math (Y up)

/// Camera position of the home view
pub const HOME_POSITION: [f32; 3] = [-10.0, -2.0, 10.0];
/// Orbit target of the home view
pub const HOME_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 20.0;
pub const MAX_ELEVATION: f32 = 1.5;

/// Spherical camera placement around a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub target: [f32; 3],
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::home()
    }
}

impl OrbitState {
    /// The view "Reset View" returns to
    pub fn home() -> Self {
        let offset = [
            HOME_POSITION[0] - HOME_TARGET[0],
            HOME_POSITION[1] - HOME_TARGET[1],
            HOME_POSITION[2] - HOME_TARGET[2],
        ];
        let mut state = Self::from_offset(offset);
        state.target = HOME_TARGET;
        state
    }

    /// Build from a camera offset relative to the target
    pub fn from_offset(offset: [f32; 3]) -> Self {
        let [x, y, z] = offset;
        let distance = (x * x + y * y + z * z).sqrt();
        if distance <= f32::EPSILON {
            return Self {
                distance: MIN_DISTANCE,
                azimuth: 0.0,
                elevation: 0.0,
                target: [0.0; 3],
            };
        }
        Self {
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            azimuth: z.atan2(x),
            elevation: (y / distance).asin().clamp(-MAX_ELEVATION, MAX_ELEVATION),
            target: [0.0; 3],
        }
    }

    /// Camera offset relative to the target
    pub fn offset(&self) -> [f32; 3] {
        let horizontal = self.distance * self.elevation.cos();
        [
            horizontal * self.azimuth.cos(),
            self.distance * self.elevation.sin(),
            horizontal * self.azimuth.sin(),
        ]
    }

    /// Absolute camera position
    pub fn position(&self) -> [f32; 3] {
        let o = self.offset();
        [self.target[0] + o[0], self.target[1] + o[1], self.target[2] + o[2]]
    }

    /// Orbit by a drag delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.azimuth += dx * sensitivity;
        self.elevation = (self.elevation + dy * sensitivity).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Multiply the distance, clamped to the allowed range
    pub fn zoom(&mut self, factor: f32) {
        self.distance = clamp_distance(self.distance * factor);
    }

    /// Slide the target in the camera's horizontal right / world up plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let speed = self.distance * 0.002;
        let right = [self.azimuth.sin(), 0.0, -self.azimuth.cos()];
        self.target[0] -= right[0] * dx * speed;
        self.target[2] -= right[2] * dx * speed;
        self.target[1] += dy * speed;
    }
}

pub fn clamp_distance(distance: f32) -> f32 {
    distance.clamp(MIN_DISTANCE, MAX_DISTANCE)
}
