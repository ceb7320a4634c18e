// --- Canvas ---
pub const CELL_WIDTH: f64 = 10.0; // Virtual pixels per terminal column
pub const CELL_HEIGHT: f64 = 20.0; // Virtual pixels per terminal row

// --- Ship ---
pub const SHIP_START_X: f64 = 400.0;
pub const SHIP_START_Y: f64 = 500.0;
pub const SHIP_WIDTH: f64 = 20.0;
pub const SHIP_HEIGHT: f64 = 20.0;
pub const SHIP_SPEED: f64 = 5.0; // Pixels per key event
pub const FLAME_HALF_WIDTH: f64 = 5.0;
pub const FLAME_LENGTH: f64 = 10.0;

// --- Asteroids ---
pub const INITIAL_ASTEROID_COUNT: usize = 8;
pub const ASTEROID_SIZE: f64 = 30.0;
pub const ASTEROID_SPAWN_MAX_Y: f64 = 400.0;
pub const ASTEROID_BASE_SPEED: f64 = 2.0; // Speeds are drawn from [-2, 2) * level
pub const ASTEROIDS_PER_LEVEL: usize = 2;
pub const LEVEL_UP_SPEED_FACTOR: f64 = 1.2;

// --- Stars ---
pub const STAR_COUNT: usize = 50;
pub const STAR_MIN_SIZE: f64 = 1.0;
pub const STAR_MAX_SIZE: f64 = 3.0;

// --- Delivery ---
pub const DELIVERY_SIZE: f64 = 20.0;
pub const DELIVERY_SPAWN_MAX_Y: f64 = 300.0;
pub const DELIVERY_SCORE: u32 = 10;
pub const DELIVERIES_PER_LEVEL: u32 = 5;
pub const PULSE_RATE: f64 = 0.005; // Radians per millisecond
pub const PULSE_AMPLITUDE: f64 = 3.0;

// --- Fuel ---
pub const MAX_FUEL: f64 = 200.0;
pub const FUEL_DECAY_PER_FRAME: f64 = 0.03;
pub const FUEL_PICKUP_AMOUNT: f64 = 50.0;
pub const LEVEL_UP_FUEL_BONUS: f64 = 50.0;
pub const FUEL_PICKUP_SIZE: f64 = 15.0;
pub const FUEL_PICKUP_SPAWN_MARGIN: f64 = 20.0; // Keeps orbs off the right and bottom edges

// --- Tones ---
pub const CRASH_TONE_HZ: f32 = 200.0;
pub const CRASH_TONE_SECS: f32 = 0.5;
pub const FUEL_TONE_HZ: f32 = 600.0;
pub const FUEL_TONE_SECS: f32 = 0.15;
pub const DELIVERY_TONE_HZ: f32 = 800.0;
pub const DELIVERY_TONE_SECS: f32 = 0.2;
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub const TONE_START_GAIN: f32 = 0.1;
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub const TONE_END_GAIN: f32 = 0.01;

// --- Loop ---
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_DEBUG_WIDTH: u16 = 80;
pub const DEFAULT_DEBUG_HEIGHT: u16 = 30;
