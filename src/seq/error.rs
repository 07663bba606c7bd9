// Sequence engine error types: load-time validation failures and run-time faults

use thiserror::Error;

/// Failure reported by the motor actuator. Fatal to the run: a motor command
/// that did not take effect mid-maneuver cannot be safely continued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ActuatorError(pub String);

/// Faults surfaced by the sequence engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    #[error("instruction {at}: jump or skip target {target} is outside the {len}-instruction program")]
    MalformedProgram { at: usize, target: usize, len: usize },
    #[error("instruction {at}: random range {low}..={high} is empty")]
    EmptyRandomRange { at: usize, low: i16, high: i16 },
    #[error("program counter ran off the end of the program ({pc} of {len})")]
    ProgramOverrun { pc: usize, len: usize },
    #[error("variable index {0} is outside V0..V9")]
    InvalidRegister(u8),
    #[error("{0} has no executable semantics")]
    UnsupportedOpcode(&'static str),
    #[error("motor actuator fault: {0}")]
    Actuator(#[from] ActuatorError),
}
