// Run state: variable file, motor commands, program counter, halt flag

use super::motor::{Motor, MotorCalibration, MotorState};
use super::variables::VariableStore;

/// Mutable state owned by one interpreter run.
#[derive(Debug, Clone)]
pub struct SeqState {
    pub vars: VariableStore,
    pub pc: usize, // index of the next instruction to execute
    pub halted: bool,
    motors: [MotorState; 2],
}

impl SeqState {
    pub fn new(start: usize, calibration: MotorCalibration) -> Self {
        SeqState {
            vars: VariableStore::new(),
            pc: start,
            halted: false,
            motors: [
                MotorState::new(calibration.left),
                MotorState::new(calibration.right),
            ],
        }
    }

    pub fn advance_pc(&mut self) {
        self.pc += 1;
    }

    pub fn motor(&self, motor: Motor) -> &MotorState {
        &self.motors[motor.idx()]
    }

    pub fn motor_mut(&mut self, motor: Motor) -> &mut MotorState {
        &mut self.motors[motor.idx()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::motor::Direction;

    #[test]
    fn test_initial_state() {
        let state = SeqState::new(0, MotorCalibration::default());
        assert_eq!(state.pc, 0);
        assert!(!state.halted);
        for motor in [Motor::Left, Motor::Right] {
            assert_eq!(state.motor(motor).magnitude, 0);
            assert_eq!(state.motor(motor).direction, Direction::Forward);
        }
    }

    #[test]
    fn test_calibration_lands_on_the_right_motor() {
        let state = SeqState::new(0, MotorCalibration { left: 3, right: 7 });
        assert_eq!(state.motor(Motor::Left).offset, 3);
        assert_eq!(state.motor(Motor::Right).offset, 7);
    }
}
