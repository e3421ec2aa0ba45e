use colored::*;
use poker::{Card, Rank, Suit};

pub const CARD_SLOTS: usize = 52;

fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Spades => 'S',
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
        Suit::Clubs => 'C',
    }
}

fn suit_offset(suit: Suit) -> usize {
    match suit {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Ace => 'A',
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
    }
}

// Aces come first in the observation layout.
fn rank_offset(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 0,
        Rank::Two => 1,
        Rank::Three => 2,
        Rank::Four => 3,
        Rank::Five => 4,
        Rank::Six => 5,
        Rank::Seven => 6,
        Rank::Eight => 7,
        Rank::Nine => 8,
        Rank::Ten => 9,
        Rank::Jack => 10,
        Rank::Queen => 11,
        Rank::King => 12,
    }
}

/// Display index of a card: suit letter then rank letter, e.g. `HQ`.
pub fn card_index(card: &Card) -> String {
    format!("{}{}", suit_char(card.suit()), rank_char(card.rank()))
}

pub fn card_indices(cards: &[Card]) -> Vec<String> {
    cards.iter().map(card_index).collect()
}

/// Slot of a card in the observation vector.
pub fn card_slot(card: &Card) -> usize {
    suit_offset(card.suit()) * 13 + rank_offset(card.rank())
}

pub fn colored_card(card: &Card) -> ColoredString {
    let text = format!("[{}{}]", rank_char(card.rank()), suit_symbol(card.suit()));
    match card.suit() {
        Suit::Hearts | Suit::Diamonds => text.red(),
        Suit::Spades | Suit::Clubs => text.normal(),
    }
}

fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
    }
}

pub fn colored_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(none)".to_string();
    }
    cards
        .iter()
        .map(|c| colored_card(c).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
