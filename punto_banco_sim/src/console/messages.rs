use crate::console::ConsoleError;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Every piece of text the interactive table prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    Opening,
    Wager,
    BetQuestion,
    BetChoices,
    PlayerDraws,
    BankerDraws,
    PlayerHand,
    BankerHand,
    PlayerFullHand,
    BankerFullHand,
    PlayerWins,
    BankerWins,
    Tie,
    BetWon,
    BetLost,
    PlayAgain,
    Farewell,
    InvalidStake,
    InvalidBet,
}

/// Placeholder replaced with the payout in `MessageKey::BetWon`.
pub const AMOUNT_PLACEHOLDER: &str = "{amount}";

lazy_static! {
    static ref DEFAULT_MESSAGES: HashMap<MessageKey, &'static str> = {
        use MessageKey::*;
        let mut messages = HashMap::new();
        messages.insert(Opening, "\nFancy a quick round of Punto Banco, mate? (y/n): ");
        messages.insert(Wager, "\nHow much of yer precious gold coins are ye willin' to wager? ");
        messages.insert(
            BetQuestion,
            "\nWhere be your bet, brave one? On yourself, yours truly mighty Captain, or do you fancy the winds will call it even?",
        );
        messages.insert(
            BetChoices,
            "\nMake yer pick: write 'p' for Player, 'c' for Captain, or 't' for Tie!\n",
        );
        messages.insert(PlayerDraws, "\nThe Captain draws another card for you.");
        messages.insert(BankerDraws, "\nThe Captain draws another card for himself.");
        messages.insert(PlayerHand, "\nYour hand:          ");
        messages.insert(BankerHand, "\nThe Captain's hand: ");
        messages.insert(PlayerFullHand, "\nYour full hand:          ");
        messages.insert(BankerFullHand, "\nThe Captain's full hand: ");
        messages.insert(PlayerWins, "\n\nA fine victory for the Player!");
        messages.insert(BankerWins, "\n\nThe Captain claims victory once again!");
        messages.insert(
            Tie,
            "\n\nAye, it's a Tie! Fortune couldn't make up its mind this time, savvy?",
        );
        messages.insert(
            BetWon,
            "\nWell done, matey! Ye won the bet and now sit on a fine hoard of {amount} gold coins!",
        );
        messages.insert(
            BetLost,
            "\nAh, tough luck, mate. Ye lost your coins this round, but there's always another sail on the horizon.",
        );
        messages.insert(PlayAgain, "\n\nFeel like trying yer luck again, my friend? (y/n): ");
        messages.insert(
            Farewell,
            "\nA grand game, mate! 'Til we meet again, I've got treasures aplenty waitin' for ye next time!\n\n\n",
        );
        messages.insert(
            InvalidStake,
            "Ah, seems like ye fumbled the numbers. Try again, and give me a proper value of coins.\n",
        );
        messages.insert(
            InvalidBet,
            "A wrong choice, mate! Bet again and make sure to pick from 'p', 'c', or 't', Player, Captain, or Tie!\n",
        );
        messages
    };
}

/// Struct mapping each `MessageKey` to the template printed for it. Starts from the built in pirate table,
/// any subset of templates can be replaced from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    templates: HashMap<MessageKey, String>,
}

impl Messages {
    /// Associated function returning the built in templates.
    pub fn new() -> Messages {
        let templates = DEFAULT_MESSAGES
            .iter()
            .map(|(&key, &template)| (key, template.to_string()))
            .collect();
        Messages { templates }
    }

    /// Builds the default templates and replaces those present in `json`, an object keyed by snake case message name.
    pub fn from_json(json: &str) -> Result<Messages, ConsoleError> {
        let overrides: HashMap<MessageKey, String> = serde_json::from_str(json)?;
        let mut messages = Messages::new();
        messages.templates.extend(overrides);
        Ok(messages)
    }

    /// Same as `from_json`, reading the overrides from the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Messages, ConsoleError> {
        let json = std::fs::read_to_string(path)?;
        Messages::from_json(&json)
    }

    pub fn get(&self, key: MessageKey) -> &str {
        self.templates.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// The template for `key` with the amount placeholder filled in.
    pub fn render(&self, key: MessageKey, amount: u64) -> String {
        self.get(key)
            .replace(AMOUNT_PLACEHOLDER, &amount.to_string())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Messages::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_default() {
        let messages = Messages::new();
        for key in [
            MessageKey::Opening,
            MessageKey::Wager,
            MessageKey::BetQuestion,
            MessageKey::BetChoices,
            MessageKey::PlayerDraws,
            MessageKey::BankerDraws,
            MessageKey::PlayerHand,
            MessageKey::BankerHand,
            MessageKey::PlayerFullHand,
            MessageKey::BankerFullHand,
            MessageKey::PlayerWins,
            MessageKey::BankerWins,
            MessageKey::Tie,
            MessageKey::BetWon,
            MessageKey::BetLost,
            MessageKey::PlayAgain,
            MessageKey::Farewell,
            MessageKey::InvalidStake,
            MessageKey::InvalidBet,
        ] {
            assert!(!messages.get(key).is_empty(), "{key:?}");
        }
    }

    #[test]
    fn renders_amount() {
        let messages = Messages::new();
        let text = messages.render(MessageKey::BetWon, 195);
        assert!(text.contains("hoard of 195 gold coins"));
        assert!(!text.contains(AMOUNT_PLACEHOLDER));
    }

    #[test]
    fn json_overrides_only_given_keys() {
        let messages =
            Messages::from_json(r#"{"opening": "Play? ", "bet_won": "You won {amount}."}"#).unwrap();
        assert_eq!(messages.get(MessageKey::Opening), "Play? ");
        assert_eq!(messages.render(MessageKey::BetWon, 40), "You won 40.");
        assert_eq!(
            messages.get(MessageKey::Tie),
            Messages::new().get(MessageKey::Tie)
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            Messages::from_json(r#"{"welcome": "hi"}"#),
            Err(ConsoleError::Messages(_))
        ));
    }
}
