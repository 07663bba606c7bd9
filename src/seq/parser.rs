// Sequence text parser: parses .seq sources, resolves labels, produces an
// instruction list ready for program validation

use std::collections::HashMap;

use thiserror::Error;

use super::instruction::{CalcOp, Comparator, Instruction, Operand};

/// Error type for sequence parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

fn parse_error(line: usize, message: impl Into<String>) -> ParseError {
    ParseError {
        line,
        message: message.into(),
    }
}

/// Result of parsing a sequence source
#[derive(Debug, Clone)]
pub struct ParsedSequence {
    pub instructions: Vec<Instruction>,
    pub labels: HashMap<String, usize>,
}

/// Strip trailing comments (`;`, `#`, or `//`) and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    let mut end = line.len();
    for marker in [";", "#", "//"] {
        if let Some(idx) = line.find(marker) {
            end = end.min(idx);
        }
    }
    line[..end].trim()
}

fn parse_var(token: &str, line: usize) -> Result<u8, ParseError> {
    let upper = token.to_uppercase();
    match upper.strip_prefix('V').and_then(|d| d.parse::<u8>().ok()) {
        Some(index) if index <= 9 && upper.len() == 2 => Ok(index),
        _ => Err(parse_error(
            line,
            format!("Expected a variable V0..V9, got '{}'", token),
        )),
    }
}

fn parse_i16(token: &str, line: usize) -> Result<i16, ParseError> {
    token
        .parse::<i16>()
        .map_err(|_| parse_error(line, format!("Expected a 16-bit constant, got '{}'", token)))
}

/// A token starting with V names a variable (REGISTER mode); a signed number
/// is a literal (IMMEDIATE mode).
fn parse_operand(token: &str, line: usize) -> Result<Operand, ParseError> {
    if token.to_uppercase().starts_with('V') {
        Ok(Operand::Register(parse_var(token, line)?))
    } else {
        Ok(Operand::Immediate(parse_i16(token, line)?))
    }
}

fn parse_comparator(token: &str, line: usize) -> Result<Comparator, ParseError> {
    match token.to_uppercase().as_str() {
        "GT" => Ok(Comparator::GreaterThan),
        "EQ" => Ok(Comparator::EqualTo),
        "LT" => Ok(Comparator::LessThan),
        _ => Err(parse_error(
            line,
            format!("Expected a comparator GT, EQ, or LT, got '{}'", token),
        )),
    }
}

/// A jump target is a literal index or a label collected in the first pass.
fn parse_target(
    token: &str,
    labels: &HashMap<String, usize>,
    line: usize,
) -> Result<usize, ParseError> {
    if let Ok(index) = token.parse::<usize>() {
        return Ok(index);
    }
    labels
        .get(token)
        .copied()
        .ok_or_else(|| parse_error(line, format!("Unknown jump target '{}'", token)))
}

fn expect_args(parts: &[&str], count: usize, usage: &str, line: usize) -> Result<(), ParseError> {
    if parts.len() - 1 != count {
        return Err(parse_error(
            line,
            format!("{} takes {} operand(s). Use: {}", parts[0].to_uppercase(), count, usage),
        ));
    }
    Ok(())
}

/// Parses a drive sequence from a string
pub fn parse_sequence(source: &str) -> Result<ParsedSequence, ParseError> {
    let mut labels = HashMap::new();

    // First pass: collect labels against the index of the next instruction
    let mut instruction_index = 0;
    for (line_num, line) in source.lines().enumerate() {
        let line_num = line_num + 1;
        let line = strip_comment(line);
        if line.is_empty() {
            continue;
        }

        let mut is_instruction_line = true;
        if let Some((label_part, rest_part)) = line.split_once(':') {
            let label = label_part.trim();
            if label.is_empty() {
                return Err(parse_error(line_num, "Label cannot be empty"));
            }
            if labels.contains_key(label) {
                return Err(parse_error(line_num, format!("Duplicate label: {}", label)));
            }
            labels.insert(label.to_string(), instruction_index);
            if rest_part.trim().is_empty() {
                is_instruction_line = false;
            }
        }

        if is_instruction_line {
            instruction_index += 1;
        }
    }

    // Second pass: parse instructions with the label table in hand
    let mut instructions = Vec::new();
    for (line_num, line) in source.lines().enumerate() {
        let line_num = line_num + 1;
        let line = strip_comment(line);
        if line.is_empty() {
            continue;
        }

        let instruction_part = match line.split_once(':') {
            Some((_, rest_part)) => rest_part.trim(),
            None => line,
        };
        if instruction_part.is_empty() {
            continue; // label-only line
        }

        let parts: Vec<_> = instruction_part.split_whitespace().collect();
        let instruction = match parts[0].to_lowercase().as_str() {
            "setvar" => {
                expect_args(&parts, 2, "SETVAR <var> <constant>", line_num)?;
                Instruction::SetVar {
                    var: parse_var(parts[1], line_num)?,
                    value: parse_i16(parts[2], line_num)?,
                }
            }
            "load_rand" => {
                expect_args(&parts, 3, "LOAD_RAND <var> <low> <high>", line_num)?;
                Instruction::LoadRand {
                    var: parse_var(parts[1], line_num)?,
                    low: parse_i16(parts[2], line_num)?,
                    high: parse_i16(parts[3], line_num)?,
                }
            }
            "calc" => {
                expect_args(&parts, 3, "CALC ADD <var> <constant>", line_num)?;
                let op = match parts[1].to_uppercase().as_str() {
                    "ADD" => CalcOp::Add,
                    other => {
                        return Err(parse_error(
                            line_num,
                            format!("Unsupported CALC operation '{}'", other),
                        ));
                    }
                };
                Instruction::Calc {
                    op,
                    var: parse_var(parts[2], line_num)?,
                    operand: parse_i16(parts[3], line_num)?,
                }
            }
            "decskip" => {
                expect_args(&parts, 1, "DECSKIP <var>", line_num)?;
                Instruction::DecSkip {
                    var: parse_var(parts[1], line_num)?,
                }
            }
            "testskip" => {
                expect_args(&parts, 3, "TESTSKIP <var> <GT|EQ|LT> <constant>", line_num)?;
                Instruction::TestSkip {
                    var: parse_var(parts[1], line_num)?,
                    cmp: parse_comparator(parts[2], line_num)?,
                    value: parse_i16(parts[3], line_num)?,
                }
            }
            "jump" => {
                expect_args(&parts, 1, "JUMP <label or index>", line_num)?;
                Instruction::Jump {
                    target: parse_target(parts[1], &labels, line_num)?,
                }
            }
            "setspeed" => {
                expect_args(&parts, 2, "SETSPEED <right> <left>", line_num)?;
                Instruction::SetSpeed {
                    right: parse_operand(parts[1], line_num)?,
                    left: parse_operand(parts[2], line_num)?,
                }
            }
            "start" => {
                expect_args(&parts, 0, "START", line_num)?;
                Instruction::Start
            }
            "stop" => {
                expect_args(&parts, 0, "STOP", line_num)?;
                Instruction::Stop
            }
            "wait" => {
                expect_args(&parts, 1, "WAIT <seconds>", line_num)?;
                let seconds = parts[1].parse::<u8>().map_err(|_| {
                    parse_error(
                        line_num,
                        format!("WAIT seconds must be 0..=255, got '{}'", parts[1]),
                    )
                })?;
                Instruction::Wait { seconds }
            }
            "finish" => {
                expect_args(&parts, 0, "FINISH", line_num)?;
                Instruction::Finish
            }
            other => {
                return Err(parse_error(
                    line_num,
                    format!("Unknown command '{}'", other),
                ));
            }
        };
        instructions.push(instruction);
    }

    Ok(ParsedSequence {
        instructions,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_straight_run() {
        let source = "\
; settle, then drive ahead for four seconds
        WAIT 5
        SETSPEED 100 100    ; right, left
        START
        WAIT 4
        STOP
        FINISH
";
        let parsed = parse_sequence(source).unwrap();
        assert_eq!(
            parsed.instructions,
            vec![
                Instruction::Wait { seconds: 5 },
                Instruction::SetSpeed {
                    right: Operand::Immediate(100),
                    left: Operand::Immediate(100),
                },
                Instruction::Start,
                Instruction::Wait { seconds: 4 },
                Instruction::Stop,
                Instruction::Finish,
            ]
        );
        assert!(parsed.labels.is_empty());
    }

    #[test]
    fn test_labels_resolve_to_next_instruction() {
        let source = "\
        SETVAR V2 10
loop:   SETSPEED V1 V1
        START
        DECSKIP V2
        JUMP loop
        FINISH
";
        let parsed = parse_sequence(source).unwrap();
        assert_eq!(parsed.labels.get("loop"), Some(&1));
        assert_eq!(parsed.instructions[4], Instruction::Jump { target: 1 });
    }

    #[test]
    fn test_label_on_its_own_line() {
        let source = "\
again:
        START
        JUMP again
";
        let parsed = parse_sequence(source).unwrap();
        assert_eq!(parsed.labels.get("again"), Some(&0));
        assert_eq!(parsed.instructions.len(), 2);
    }

    #[test]
    fn test_operand_mode_is_inferred() {
        let parsed = parse_sequence("SETSPEED V3 -50\nFINISH\n").unwrap();
        assert_eq!(
            parsed.instructions[0],
            Instruction::SetSpeed {
                right: Operand::Register(3),
                left: Operand::Immediate(-50),
            }
        );
    }

    #[test]
    fn test_numeric_jump_target() {
        let parsed = parse_sequence("JUMP 0\n").unwrap();
        assert_eq!(parsed.instructions[0], Instruction::Jump { target: 0 });
    }

    #[test]
    fn test_testskip_comparators() {
        let parsed = parse_sequence("TESTSKIP V0 GT 5\nTESTSKIP V1 eq -1\nTESTSKIP V2 LT 0\n")
            .unwrap();
        assert_eq!(
            parsed.instructions[1],
            Instruction::TestSkip {
                var: 1,
                cmp: Comparator::EqualTo,
                value: -1,
            }
        );
    }

    #[test]
    fn test_mnemonics_are_case_insensitive() {
        let parsed = parse_sequence("setvar v7 42\nfinish\n").unwrap();
        assert_eq!(
            parsed.instructions[0],
            Instruction::SetVar { var: 7, value: 42 }
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = parse_sequence("WAIT 1\nFLY 100\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("FLY"));
    }

    #[test]
    fn test_bad_variable_rejected() {
        let err = parse_sequence("SETVAR V12 1\n").unwrap_err();
        assert!(err.message.contains("V0..V9"));
    }

    #[test]
    fn test_wait_range_enforced() {
        let err = parse_sequence("WAIT 300\n").unwrap_err();
        assert!(err.message.contains("0..=255"));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let err = parse_sequence("SETSPEED 100\n").unwrap_err();
        assert!(err.message.contains("SETSPEED"));
    }

    #[test]
    fn test_unsupported_calc_operation_rejected() {
        let err = parse_sequence("CALC SUB V1 10\n").unwrap_err();
        assert!(err.message.contains("SUB"));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = parse_sequence("go: START\ngo: STOP\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("Duplicate label"));
    }

    #[test]
    fn test_unknown_jump_target_rejected() {
        let err = parse_sequence("JUMP nowhere\n").unwrap_err();
        assert!(err.message.contains("nowhere"));
    }
}
