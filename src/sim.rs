// Host-side stand-ins for the buggy's motor, clock, and RNG drivers

use std::thread;
use std::time::Duration;

use log::info;
use rand::prelude::*;

use crate::seq::error::ActuatorError;
use crate::seq::hw::{MotorActuator, RngService, TimingService};
use crate::seq::motor::{Direction, Motor};

/// Logs motor commands instead of poking PWM and direction registers.
pub struct SimMotors;

impl MotorActuator for SimMotors {
    fn set_direction(&mut self, motor: Motor, direction: Direction) -> Result<(), ActuatorError> {
        crate::debug_motor!("{:?} direction {:?}", motor, direction);
        Ok(())
    }

    fn set_magnitude(&mut self, motor: Motor, magnitude: u16) -> Result<(), ActuatorError> {
        crate::debug_motor!("{:?} magnitude {}", motor, magnitude);
        Ok(())
    }

    fn start_motors(&mut self) -> Result<(), ActuatorError> {
        info!("motors running");
        Ok(())
    }

    fn stop_motors(&mut self) -> Result<(), ActuatorError> {
        info!("motors stopped");
        Ok(())
    }
}

/// Wall-clock delay; `fast` elides the sleep so long sequences can be dry-run.
pub struct SimClock {
    pub fast: bool,
}

impl TimingService for SimClock {
    fn wait_seconds(&mut self, seconds: u8) {
        info!("waiting {} s", seconds);
        if !self.fast {
            thread::sleep(Duration::from_secs(u64::from(seconds)));
        }
    }
}

/// Uniform RNG for LOAD_RAND, seedable for reproducible runs.
pub struct SimRng {
    rng: StdRng,
}

impl SimRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SimRng { rng }
    }
}

impl RngService for SimRng {
    fn uniform_random(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SimRng::new(Some(143));
        let mut b = SimRng::new(Some(143));
        for _ in 0..8 {
            assert_eq!(a.uniform_random(), b.uniform_random());
        }
    }
}
