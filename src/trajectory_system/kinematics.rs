/// Vertical motion of the balloon, integrated with forward Euler.
#[derive(Debug, Clone, Default)]
pub struct Kinematics {
    pub altitude: f64,     // m above the launch site
    pub velocity: f64,     // m/s, positive upwards
    pub acceleration: f64, // m/s²
    pub max_altitude: f64, // m
    pub time: f64,         // s
}

impl Kinematics {
    pub fn new() -> Self {
        Kinematics::default()
    }

    /// Advance one step under `net_force`. Velocity is updated before
    /// altitude, and a balloon sitting on the ground cannot be pushed
    /// through it.
    pub fn update(&mut self, delta_time: f64, net_force: f64, total_mass: f64) {
        self.acceleration = net_force / total_mass;
        self.velocity += self.acceleration * delta_time;

        if self.altitude <= 0.0 && self.velocity < 0.0 {
            self.velocity = 0.0;
            self.altitude = 0.0;
        }

        self.altitude += self.velocity * delta_time;
        self.max_altitude = self.max_altitude.max(self.altitude);

        self.time += delta_time;
    }

    pub fn is_on_ground(&self) -> bool {
        self.altitude <= 0.0
    }
}
