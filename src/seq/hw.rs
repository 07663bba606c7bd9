// Hardware boundary: the external services the interpreter drives.
// Register-level drivers live behind these traits; tests substitute mocks.

use super::error::ActuatorError;
use super::motor::{Direction, Motor};

/// Two-motor drive actuator. The interpreter hands over magnitudes that are
/// already scaled and offset-adjusted.
pub trait MotorActuator {
    fn set_direction(&mut self, motor: Motor, direction: Direction) -> Result<(), ActuatorError>;
    fn set_magnitude(&mut self, motor: Motor, magnitude: u16) -> Result<(), ActuatorError>;
    fn start_motors(&mut self) -> Result<(), ActuatorError>;
    fn stop_motors(&mut self) -> Result<(), ActuatorError>;
}

/// Blocking whole-second delay.
pub trait TimingService {
    fn wait_seconds(&mut self, seconds: u8);
}

/// Uniform random source for LOAD_RAND.
pub trait RngService {
    fn uniform_random(&mut self) -> u32;
}
