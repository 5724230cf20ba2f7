use crate::console::messages::{MessageKey, Messages};
use crate::console::ConsoleError;
use punto_banco_lib::{BetSide, MAX_STAKE};
use std::io::{BufRead, Write};
use tracing::debug;

/// Struct that handles all reading and writing for the interactive table.
/// Input that cannot form a valid wager is rejected here and asked for again, it never reaches the round engine.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Prompter<R, W> {
        Prompter { input, output }
    }

    /// Writes `text` as is and flushes, prompts are not newline terminated.
    pub fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line with its line ending removed. Fails with `InputClosed` at end of input.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads a whole number of coins from 1 to `MAX_STAKE`, asking again after anything else.
    pub fn read_stake(&mut self, messages: &Messages) -> Result<u64, ConsoleError> {
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<u64>() {
                Ok(stake) if (1..=MAX_STAKE).contains(&stake) => return Ok(stake),
                _ => {
                    debug!(input = %line, "rejected stake");
                    self.say(messages.get(MessageKey::InvalidStake))?;
                }
            }
        }
    }

    /// Reads the side to bet on from the first character typed, asking again after anything invalid.
    pub fn read_side(&mut self, messages: &Messages) -> Result<BetSide, ConsoleError> {
        loop {
            let line = self.read_line()?;
            let side = line
                .trim()
                .chars()
                .next()
                .and_then(|choice| BetSide::from_choice(choice).ok());
            match side {
                Some(side) => return Ok(side),
                None => {
                    debug!(input = %line, "rejected bet side");
                    self.say(messages.get(MessageKey::InvalidBet))?;
                }
            }
        }
    }

    /// True only if the answer starts with a `y`. A closed input counts as no.
    pub fn read_yes_no(&mut self) -> Result<bool, ConsoleError> {
        match self.read_line() {
            Ok(line) => Ok(line
                .trim_start()
                .starts_with(|c: char| c.eq_ignore_ascii_case(&'y'))),
            Err(ConsoleError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Gives back the output, used to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }
}
