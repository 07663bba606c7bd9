//! Configuration constants for the buggy sequence engine.

// Drive
pub const SPEED_SCALE: i16 = 4; // actuator duty units per percent of full speed

// Variable file
pub const VAR_COUNT: usize = 10; // V0..V9
