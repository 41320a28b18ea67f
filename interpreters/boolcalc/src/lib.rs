//! Boolean-expression interpreter
//!
//! Supports `and`, `or`, `xor` and `not` over `True`/`False` literals and
//! named variables, with `let name = expr` assignment plus the `vars` and
//! `clear` inspection commands. Expressions are converted to reverse Polish
//! notation with the shunting-yard algorithm and evaluated on a stack.

use relish::{EvalError, Interpreter};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoolError {
    #[error("Unexpected character: '{0}'")]
    UnexpectedChar(char),

    #[error("Mismatched parentheses")]
    MismatchedParens,

    #[error("Undefined variable: '{0}'")]
    UndefinedVariable(String),

    #[error("Operator '{0}' is missing an operand")]
    MissingOperand(String),

    #[error("Invalid expression")]
    InvalidExpression,

    #[error("Invalid assignment. Use 'let var = expr'")]
    InvalidAssignment,

    #[error("'{0}' is not a valid variable name")]
    InvalidVariableName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Word(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

fn op_info(name: &str) -> Option<(u8, Assoc)> {
    match name {
        "not" => Some((4, Assoc::Right)),
        "and" => Some((3, Assoc::Left)),
        "or" | "xor" => Some((2, Assoc::Left)),
        _ => None,
    }
}

/// Boolean-logic interpreter with a variable store.
#[derive(Debug, Default)]
pub struct BoolCalc {
    variables: BTreeMap<String, bool>,
}

impl BoolCalc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a boolean expression against the current variables.
    pub fn evaluate(&self, expr: &str) -> Result<bool, BoolError> {
        let tokens = tokenize(expr)?;
        let rpn = shunting_yard(&tokens)?;
        self.eval_rpn(&rpn)
    }

    fn assign(&mut self, assignment: &str) -> Result<(String, bool), BoolError> {
        let (name, expr) = assignment
            .split_once('=')
            .ok_or(BoolError::InvalidAssignment)?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(BoolError::InvalidVariableName(name.to_string()));
        }
        let value = self.evaluate(expr)?;
        self.variables.insert(name.to_string(), value);
        Ok((name.to_string(), value))
    }

    fn show_variables(&self) {
        if self.variables.is_empty() {
            println!("No variables defined.");
            return;
        }
        let width = self.variables.keys().map(String::len).max().unwrap_or(0);
        for (name, value) in &self.variables {
            println!("{name:<width$} = {value}");
        }
    }

    fn eval_rpn(&self, rpn: &[String]) -> Result<bool, BoolError> {
        let mut stack: Vec<bool> = Vec::new();

        for token in rpn {
            if op_info(token).is_some() {
                apply_operator(token, &mut stack)?;
            } else if token == "True" {
                stack.push(true);
            } else if token == "False" {
                stack.push(false);
            } else if let Some(&value) = self.variables.get(token) {
                stack.push(value);
            } else {
                return Err(BoolError::UndefinedVariable(token.clone()));
            }
        }

        if stack.len() != 1 {
            return Err(BoolError::InvalidExpression);
        }
        Ok(stack[0])
    }
}

fn apply_operator(op: &str, stack: &mut Vec<bool>) -> Result<(), BoolError> {
    if op == "not" {
        let operand = stack
            .pop()
            .ok_or_else(|| BoolError::MissingOperand(op.to_string()))?;
        stack.push(!operand);
        return Ok(());
    }

    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
        return Err(BoolError::MissingOperand(op.to_string()));
    };
    let value = match op {
        "and" => left && right,
        "or" => left || right,
        "xor" => left != right,
        _ => return Err(BoolError::InvalidExpression),
    };
    stack.push(value);
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn tokenize(expr: &str) -> Result<Vec<Token>, BoolError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            chars.next();
            tokens.push(Token::LParen);
        } else if c == ')' {
            chars.next();
            tokens.push(Token::RParen);
        } else if c.is_alphabetic() || c == '_' {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Word(word));
        } else {
            return Err(BoolError::UnexpectedChar(c));
        }
    }

    Ok(tokens)
}

fn shunting_yard(tokens: &[Token]) -> Result<Vec<String>, BoolError> {
    let mut output: Vec<String> = Vec::new();
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Word(word) => {
                if let Some((precedence, assoc)) = op_info(word) {
                    while let Some(Token::Word(top)) = operators.last() {
                        let Some((top_precedence, _)) = op_info(top) else {
                            break;
                        };
                        if top_precedence > precedence
                            || (top_precedence == precedence && assoc == Assoc::Left)
                        {
                            output.push(top.clone());
                            operators.pop();
                        } else {
                            break;
                        }
                    }
                    operators.push(token.clone());
                } else {
                    output.push(word.clone());
                }
            }
            Token::LParen => operators.push(Token::LParen),
            Token::RParen => {
                loop {
                    match operators.pop() {
                        Some(Token::Word(op)) => output.push(op),
                        Some(Token::LParen) => break,
                        _ => return Err(BoolError::MismatchedParens),
                    }
                }
            }
        }
    }

    while let Some(token) = operators.pop() {
        match token {
            Token::Word(op) => output.push(op),
            _ => return Err(BoolError::MismatchedParens),
        }
    }

    Ok(output)
}

impl Interpreter for BoolCalc {
    fn eval(&mut self, line: &str) -> Result<(), EvalError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if line == "vars" {
            self.show_variables();
            return Ok(());
        }
        if line == "clear" {
            self.variables.clear();
            println!("All variables cleared.");
            return Ok(());
        }

        if let Some(assignment) = line.strip_prefix("let ") {
            let (name, value) = self.assign(assignment)?;
            println!("{name} = {value}");
            return Ok(());
        }

        let result = self.evaluate(line)?;
        println!("=> {result}");
        Ok(())
    }

    fn keywords(&self) -> Option<BTreeSet<String>> {
        let mut words: BTreeSet<String> = ["not", "and", "or", "xor", "let", "vars", "clear", "True", "False"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        words.extend(self.variables.keys().cloned());
        Some(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_and_operators() {
        let calc = BoolCalc::new();
        assert!(calc.evaluate("True").unwrap());
        assert!(!calc.evaluate("False").unwrap());
        assert!(calc.evaluate("True or False").unwrap());
        assert!(!calc.evaluate("True and False").unwrap());
        assert!(calc.evaluate("True xor False").unwrap());
        assert!(!calc.evaluate("not True").unwrap());
    }

    #[test]
    fn not_binds_tighter_than_and_than_or() {
        let calc = BoolCalc::new();
        // Parsed as (not False) and True
        assert!(calc.evaluate("not False and True").unwrap());
        // Parsed as False and (not True), then or True
        assert!(calc.evaluate("False and not True or True").unwrap());
    }

    #[test]
    fn parentheses_override_precedence() {
        let calc = BoolCalc::new();
        assert!(!calc.evaluate("not (False or True)").unwrap());
        assert!(calc.evaluate("(True or False) and True").unwrap());
    }

    #[test]
    fn variables_resolve() {
        let mut calc = BoolCalc::new();
        calc.assign("A = True").unwrap();
        calc.assign("B = not A").unwrap();
        assert!(calc.evaluate("A or B").unwrap());
        assert!(!calc.evaluate("A and B").unwrap());
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let calc = BoolCalc::new();
        assert_eq!(
            calc.evaluate("missing"),
            Err(BoolError::UndefinedVariable("missing".to_string()))
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        let calc = BoolCalc::new();
        assert_eq!(calc.evaluate("True ?"), Err(BoolError::UnexpectedChar('?')));
        assert_eq!(
            calc.evaluate("(True or False"),
            Err(BoolError::MismatchedParens)
        );
        assert_eq!(
            calc.evaluate("and True"),
            Err(BoolError::MissingOperand("and".to_string()))
        );
        assert_eq!(calc.evaluate("True False"), Err(BoolError::InvalidExpression));
    }

    #[test]
    fn assignment_validates_names() {
        let mut calc = BoolCalc::new();
        assert_eq!(
            calc.assign("2x = True"),
            Err(BoolError::InvalidVariableName("2x".to_string()))
        );
        assert_eq!(calc.assign("True"), Err(BoolError::InvalidAssignment));
    }

    #[test]
    fn keywords_include_defined_variables() {
        let mut calc = BoolCalc::new();
        calc.assign("flag = True").unwrap();
        let words = calc.keywords().unwrap();
        assert!(words.contains("and"));
        assert!(words.contains("let"));
        assert!(words.contains("flag"));
    }
}
