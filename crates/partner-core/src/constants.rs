//! Engine constants and tuning parameters.

// --- Tick handling ---

/// Minimum time between two power recomputes while not attacking (ms).
pub const DEBOUNCE_MS: u64 = 2000;

/// Route distance jump (meters) between two recomputes that counts as a skip.
pub const SKIP_THRESHOLD_M: f64 = 50.0;

// --- Attack plan ---

/// An attack must be shorter than this fraction of the pacing interval.
pub const MAX_ATTACK_FRACTION: f64 = 0.9;

// --- Separation control ---

/// Power multiplier when the partner is too far ahead.
pub const SLOW_DOWN_FACTOR: f64 = 0.8;

/// Power multiplier when the partner is too far behind.
pub const SPEED_UP_FACTOR: f64 = 1.2;

/// Separation limit (meters) applied while waiting for the athlete.
pub const WAITING_SEPARATION_LIMIT_M: f64 = 1.0;

// --- Units ---

/// Meters per kilometer.
pub const METERS_PER_KM: f64 = 1000.0;

/// Feet per meter, for imperial display.
pub const FEET_PER_METER: f64 = 3.2808399;
