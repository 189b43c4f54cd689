// Screen-space units, roughly pixels.
pub const NUCLEON_RADIUS: f32 = 10.0;
pub const ELECTRON_RADIUS: f32 = 8.0;

// Electron shell radii around the atom center.
pub const INNER_ELECTRON_SHELL_RADIUS: f32 = 85.0;
pub const OUTER_ELECTRON_SHELL_RADIUS: f32 = 130.0;
pub const INNER_SHELL_CAPACITY: usize = 2;
pub const OUTER_SHELL_CAPACITY: usize = 8;

// Release distances inside which a particle is absorbed by the atom.
pub const NUCLEON_CAPTURE_RADIUS: f32 = 100.0;
pub const ELECTRON_CAPTURE_RADIUS: f32 = OUTER_ELECTRON_SHELL_RADIUS * 1.1;

// Initial particle supply.
pub const NUM_PROTONS: usize = 10;
pub const NUM_NEUTRONS: usize = 13;
pub const NUM_ELECTRONS: usize = 10;

// Bucket geometry.
pub const BUCKET_WIDTH: f32 = 150.0;
pub const BUCKET_HEIGHT: f32 = BUCKET_WIDTH * 0.6;
pub const BUCKET_Y_OFFSET: f32 = -300.0;

// Particle animation speed toward destination, units per second.
pub const PARTICLE_SPEED: f32 = 400.0;

// Game scoring.
pub const MAX_PROBLEM_ATTEMPTS: u32 = 2;
pub const POINTS_FIRST_ATTEMPT: u32 = 2;
pub const DEFAULT_CHALLENGES_PER_LEVEL: usize = 5;
pub const LEVEL_COUNT: usize = 4;

// Nucleus layering only kicks in above this many nucleons.
pub const LAYERING_THRESHOLD: usize = 3;
