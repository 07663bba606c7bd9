// Variable file: ten signed 16-bit slots, V0..V9

use super::error::SeqError;
use crate::config::VAR_COUNT;

/// Runtime variable storage for a sequence program. All slots start at zero.
#[derive(Debug, Clone)]
pub struct VariableStore {
    data: [i16; VAR_COUNT],
}

impl VariableStore {
    pub fn new() -> Self {
        VariableStore {
            data: [0; VAR_COUNT],
        }
    }

    /// Get the value of a variable
    pub fn get(&self, index: u8) -> Result<i16, SeqError> {
        self.data
            .get(index as usize)
            .copied()
            .ok_or(SeqError::InvalidRegister(index))
    }

    /// Set the value of a variable
    pub fn set(&mut self, index: u8, value: i16) -> Result<(), SeqError> {
        match self.data.get_mut(index as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SeqError::InvalidRegister(index)),
        }
    }

    /// Add to a variable and return the new value. Overflow wraps, matching
    /// the two's-complement int arithmetic of the authored table language.
    pub fn add(&mut self, index: u8, amount: i16) -> Result<i16, SeqError> {
        let next = self.get(index)?.wrapping_add(amount);
        self.set(index, next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_read_write() {
        let mut vars = VariableStore::new();
        assert_eq!(vars.get(0).unwrap(), 0);
        assert!(vars.set(0, 123).is_ok());
        assert_eq!(vars.get(0).unwrap(), 123);
        assert!(vars.set(9, -456).is_ok());
        assert_eq!(vars.get(9).unwrap(), -456);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut vars = VariableStore::new();
        assert_eq!(vars.get(10), Err(SeqError::InvalidRegister(10)));
        assert_eq!(vars.set(10, 1), Err(SeqError::InvalidRegister(10)));
        assert_eq!(vars.add(255, 1), Err(SeqError::InvalidRegister(255)));
    }

    #[test]
    fn test_add_wraps() {
        let mut vars = VariableStore::new();
        vars.set(3, i16::MAX).unwrap();
        assert_eq!(vars.add(3, 1).unwrap(), i16::MIN);
        vars.set(4, i16::MIN).unwrap();
        assert_eq!(vars.add(4, -1).unwrap(), i16::MAX);
    }
}
