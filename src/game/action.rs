use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions in the order the agents index them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionType {
    Call,
    Raise,
    Fold,
    Check,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::Call,
        ActionType::Raise,
        ActionType::Fold,
        ActionType::Check,
    ];

    pub fn index(self) -> usize {
        match self {
            ActionType::Call => 0,
            ActionType::Raise => 1,
            ActionType::Fold => 2,
            ActionType::Check => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<ActionType> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionType::Call => "call",
            ActionType::Raise => "raise",
            ActionType::Fold => "fold",
            ActionType::Check => "check",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub action_type: ActionType,
    pub player_index: u32,
    pub street: u8,
    /// Chips the player put in with this action.
    pub amount: u32,
}

impl Action {
    pub fn to_print_string(&self) -> String {
        match self.action_type {
            ActionType::Call | ActionType::Raise => {
                format!("{} {}", self.action_type, self.amount)
            }
            _ => self.action_type.to_string(),
        }
    }
}

/// Betting structure of a fixed-limit table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    pub player_count: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Raise size on preflop and flop, doubled on turn and river.
    /// Follows the big blind when unset.
    pub raise_amount: Option<u32>,
    /// Maximum number of raises in one betting round.
    pub allowed_raise_num: u8,
}

impl Default for LimitConfig {
    fn default() -> Self {
        LimitConfig {
            player_count: 2,
            small_blind: 1,
            big_blind: 2,
            raise_amount: None,
            allowed_raise_num: 4,
        }
    }
}

impl LimitConfig {
    pub fn new(player_count: u32) -> LimitConfig {
        LimitConfig {
            player_count,
            ..LimitConfig::default()
        }
    }

    pub fn raise_size(&self, street: u8) -> u32 {
        let raise_amount = self.raise_amount.unwrap_or(self.big_blind);
        if street >= 3 {
            2 * raise_amount
        } else {
            raise_amount
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(2..=10).contains(&self.player_count) {
            anyhow::bail!(
                "player count must be between 2 and 10, got {}",
                self.player_count
            );
        }
        if self.big_blind == 0 {
            anyhow::bail!("big blind must be positive");
        }
        if self.small_blind > self.big_blind {
            anyhow::bail!(
                "small blind ({}) is larger than big blind ({})",
                self.small_blind,
                self.big_blind
            );
        }
        if self.raise_amount == Some(0) {
            anyhow::bail!("raise amount must be positive");
        }
        Ok(())
    }
}
