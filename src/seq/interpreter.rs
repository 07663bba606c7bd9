// Fetch/decode/execute loop for drive sequences

use super::error::SeqError;
use super::hw::{MotorActuator, RngService, TimingService};
use super::instruction::{CalcOp, Instruction};
use super::motor::{Motor, MotorCalibration};
use super::program::Program;
use super::state::SeqState;

/// Walks a validated program one instruction at a time, mutating the variable
/// file and motor commands and calling out through the hardware boundary. The
/// interpreter is the sole caller into the actuator, clock, and RNG.
pub struct Interpreter<'p, M, C, R> {
    program: &'p Program,
    pub state: SeqState,
    pub motors: M,
    pub clock: C,
    pub rng: R,
}

impl<'p, M, C, R> Interpreter<'p, M, C, R>
where
    M: MotorActuator,
    C: TimingService,
    R: RngService,
{
    pub fn new(
        program: &'p Program,
        calibration: MotorCalibration,
        motors: M,
        clock: C,
        rng: R,
    ) -> Self {
        Interpreter {
            program,
            state: SeqState::new(0, calibration),
            motors,
            clock,
            rng,
        }
    }

    /// Run until the sequence halts or faults. A table without a reachable
    /// FINISH runs forever; that is the patrol-forever idiom, not an error.
    pub fn run(&mut self) -> Result<(), SeqError> {
        while !self.state.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Fetch and execute one instruction.
    pub fn step(&mut self) -> Result<(), SeqError> {
        let instruction = self.program.fetch(self.state.pc)?.clone();
        crate::debug_seq!(self.state.pc, "{:?}", instruction);

        match instruction {
            Instruction::SetVar { var, value } => {
                self.state.vars.set(var, value)?;
                self.state.advance_pc();
            }
            Instruction::LoadRand { var, low, high } => {
                // Validation guarantees high >= low, so the span is at least 1.
                let span = (i32::from(high) - i32::from(low) + 1) as u32;
                let draw = (self.rng.uniform_random() % span) as i32 + i32::from(low);
                self.state.vars.set(var, draw as i16)?;
                self.state.advance_pc();
            }
            Instruction::Calc { op, var, operand } => {
                match op {
                    CalcOp::Add => {
                        self.state.vars.add(var, operand)?;
                    }
                }
                self.state.advance_pc();
            }
            Instruction::DecSkip { var } => {
                let next = self.state.vars.add(var, -1)?;
                if next == 0 {
                    self.state.pc += 2;
                } else {
                    self.state.advance_pc();
                }
            }
            Instruction::TestSkip { .. } => {
                return Err(SeqError::UnsupportedOpcode("TESTSKIP"));
            }
            Instruction::Jump { target } => {
                self.state.pc = target;
            }
            Instruction::SetSpeed { right, left } => {
                let right_percent = right.resolve(&self.state.vars)?;
                let left_percent = left.resolve(&self.state.vars)?;
                self.state.motor_mut(Motor::Right).command(right_percent);
                self.state.motor_mut(Motor::Left).command(left_percent);
                crate::debug_motor!(
                    "SETSPEED right {}% -> {:?}, left {}% -> {:?}",
                    right_percent,
                    self.state.motor(Motor::Right),
                    left_percent,
                    self.state.motor(Motor::Left)
                );
                self.state.advance_pc();
            }
            Instruction::Start => {
                for motor in [Motor::Left, Motor::Right] {
                    let command = *self.state.motor(motor);
                    self.motors.set_direction(motor, command.direction)?;
                    self.motors.set_magnitude(motor, command.magnitude)?;
                }
                self.motors.start_motors()?;
                self.state.advance_pc();
            }
            Instruction::Stop => {
                self.motors.stop_motors()?;
                self.state.advance_pc();
            }
            Instruction::Wait { seconds } => {
                self.clock.wait_seconds(seconds);
                self.state.advance_pc();
            }
            Instruction::Finish => {
                self.state.motor_mut(Motor::Left).magnitude = 0;
                self.state.motor_mut(Motor::Right).magnitude = 0;
                self.motors.set_magnitude(Motor::Left, 0)?;
                self.motors.set_magnitude(Motor::Right, 0)?;
                self.state.halted = true;
            }
        }
        Ok(())
    }
}
