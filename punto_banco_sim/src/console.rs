//! Module for the interactive console version of the game. The player bets against the captain one round at a time,
//! every round is dealt from a newly shuffled shoe and revealed card by card.

pub mod messages;
pub mod pacing;
pub mod prompt;

use messages::{MessageKey, Messages};
use pacing::Pacing;
use prompt::Prompter;
use punto_banco_lib::{play_round, Outcome, PuntoBancoError, Settlement, Shoe, Wager, DECK_COUNT};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can end an interactive session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed before the game was over")]
    InputClosed,
    #[error("invalid message file: {0}")]
    Messages(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] PuntoBancoError),
}

/// Struct that runs the interactive game over any input and output.
pub struct InteractiveGame<R: BufRead, W: Write> {
    prompter: Prompter<R, W>,
    messages: Messages,
    pacing: Pacing,
    num_decks: usize,
}

impl<R: BufRead, W: Write> InteractiveGame<R, W> {
    pub fn new(input: R, output: W, messages: Messages, pacing: Pacing) -> InteractiveGame<R, W> {
        InteractiveGame {
            prompter: Prompter::new(input, output),
            messages,
            pacing,
            num_decks: DECK_COUNT,
        }
    }

    /// Sets the number of decks each new shoe is built from.
    pub fn with_decks(mut self, num_decks: usize) -> InteractiveGame<R, W> {
        self.num_decks = num_decks;
        self
    }

    /// Method that runs the whole session: the opening question, then rounds for as long as the player
    /// wants another one, then the farewell. Returns the number of rounds played.
    pub fn run(&mut self) -> Result<u32, ConsoleError> {
        let mut rounds = 0;
        self.say(MessageKey::Opening)?;
        let mut keep_playing = self.prompter.read_yes_no()?;

        while keep_playing {
            let wager = self.ask_wager()?;
            let mut shoe = Shoe::build(self.num_decks)?;
            shoe.shuffle();
            let settlement = self.play_hand(&wager, &mut shoe)?;
            rounds += 1;
            info!(round = rounds, side = %wager.side(), stake = wager.stake(), net = settlement.net, "round over");

            self.say(MessageKey::PlayAgain)?;
            keep_playing = self.prompter.read_yes_no()?;
        }

        self.say(MessageKey::Farewell)?;
        Ok(rounds)
    }

    fn ask_wager(&mut self) -> Result<Wager, ConsoleError> {
        self.say(MessageKey::Wager)?;
        let stake = self.prompter.read_stake(&self.messages)?;
        self.say(MessageKey::BetQuestion)?;
        self.say(MessageKey::BetChoices)?;
        let side = self.prompter.read_side(&self.messages)?;
        Ok(Wager::new(side, stake)?)
    }

    /// Plays one round from `shoe` and walks the player through it: the opening hands, any third cards,
    /// the winner and what the wager paid.
    pub fn play_hand(&mut self, wager: &Wager, shoe: &mut Shoe) -> Result<Settlement, ConsoleError> {
        let result = play_round(shoe)?;
        debug!(%result, "round dealt");

        self.pacing.pause(5);
        self.say_with(MessageKey::PlayerHand, result.player.opening())?;
        self.pacing.pause(2);
        self.say_with(MessageKey::BankerHand, result.banker.opening())?;

        let player_drew = result.player.third_card().is_some();
        let banker_drew = result.banker.third_card().is_some();
        let mut step = 1;
        if player_drew {
            self.reveal(&mut step);
            self.say(MessageKey::PlayerDraws)?;
        }
        if banker_drew {
            self.reveal(&mut step);
            self.say(MessageKey::BankerDraws)?;
        }
        if player_drew {
            self.reveal(&mut step);
            self.say_with(MessageKey::PlayerFullHand, result.player)?;
        }
        if banker_drew {
            self.reveal(&mut step);
            self.say_with(MessageKey::BankerFullHand, result.banker)?;
        }

        self.pacing.pause(1);
        self.say(match result.outcome {
            Outcome::Player => MessageKey::PlayerWins,
            Outcome::Banker => MessageKey::BankerWins,
            Outcome::Tie => MessageKey::Tie,
        })?;

        let settlement = wager.settle(result.outcome);
        if settlement.won {
            let text = self.messages.render(MessageKey::BetWon, settlement.payout);
            self.prompter.say(&text)?;
        } else {
            self.say(MessageKey::BetLost)?;
        }
        Ok(settlement)
    }

    fn reveal(&self, step: &mut u32) {
        self.pacing.pause(*step);
        *step += 1;
    }

    fn say(&mut self, key: MessageKey) -> Result<(), ConsoleError> {
        self.prompter.say(self.messages.get(key))
    }

    fn say_with<T: std::fmt::Display>(&mut self, key: MessageKey, value: T) -> Result<(), ConsoleError> {
        let text = format!("{}{}", self.messages.get(key), value);
        self.prompter.say(&text)
    }

    /// Gives back the output the game wrote to.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}
