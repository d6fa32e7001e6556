//! Line-oriented prompts for the interactive menu
//!
//! Numeric prompts keep asking until they get a strictly positive number.
//! Every prompt returns `None` once the input is exhausted, which ends the
//! session.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::LivrariaResult;

const NOT_POSITIVE: &str = "O valor deve ser um número positivo.";
const NOT_AN_INTEGER: &str = "Valor inválido. Digite um número inteiro.";
const NOT_A_NUMBER: &str = "Valor inválido. Digite um número.";
const EMPTY_TEXT: &str = "O campo não pode ficar vazio.";

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn say(&mut self, message: impl Display) -> LivrariaResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Ask once and return the trimmed answer
    pub fn prompt_string(&mut self, prompt: &str) -> LivrariaResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer is not blank
    pub fn prompt_non_empty(&mut self, prompt: &str) -> LivrariaResult<Option<String>> {
        loop {
            match self.prompt_string(prompt)? {
                None => return Ok(None),
                Some(answer) if answer.is_empty() => self.say(EMPTY_TEXT)?,
                Some(answer) => return Ok(Some(answer)),
            }
        }
    }

    /// Ask until the answer is an integer greater than zero
    pub fn prompt_positive_int(&mut self, prompt: &str) -> LivrariaResult<Option<i64>> {
        loop {
            let Some(answer) = self.prompt_string(prompt)? else {
                return Ok(None);
            };

            match answer.parse::<i64>() {
                Ok(value) if value > 0 => return Ok(Some(value)),
                Ok(_) => self.say(NOT_POSITIVE)?,
                Err(_) => self.say(NOT_AN_INTEGER)?,
            }
        }
    }

    /// Ask until the answer is a finite number greater than zero
    ///
    /// A comma is accepted as the decimal separator.
    pub fn prompt_positive_float(&mut self, prompt: &str) -> LivrariaResult<Option<f64>> {
        loop {
            let Some(answer) = self.prompt_string(prompt)? else {
                return Ok(None);
            };

            match answer.replace(',', ".").parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => return Ok(Some(value)),
                Ok(value) if value.is_nan() || value.is_infinite() => self.say(NOT_A_NUMBER)?,
                Ok(_) => self.say(NOT_POSITIVE)?,
                Err(_) => self.say(NOT_A_NUMBER)?,
            }
        }
    }

    /// Consume the prompter and return the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
