//! The interactive loop: play a hand, show how it ended, ask whether to go on.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};

use crate::env::Env;
use crate::game::card::card_indices;
use crate::game::table::Table;

pub const HUMAN_SEAT: usize = 0;
pub const AGENT_SEAT: usize = 1;

const BANNER_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 24;

/// Only `q`, whatever the case and surrounding whitespace, ends the session.
pub fn should_quit(input: &str) -> bool {
    input.trim().to_lowercase() == "q"
}

/// What gets shown once a hand is over.
#[derive(Clone, Debug, PartialEq)]
pub struct HandSummary {
    pub public_cards: Vec<String>,
    pub agent_cards: Vec<String>,
    pub payoffs: Vec<f32>,
}

impl HandSummary {
    pub fn new(table: &Table, agent_seat: usize, payoffs: &[f32]) -> anyhow::Result<HandSummary> {
        if payoffs.len() != table.players.len() {
            bail!(
                "hand returned {} payoffs for {} players",
                payoffs.len(),
                table.players.len()
            );
        }
        if payoffs.len() <= HUMAN_SEAT.max(AGENT_SEAT) {
            bail!("manual play needs seats {} and {}", HUMAN_SEAT, AGENT_SEAT);
        }
        let agent = table
            .players
            .get(agent_seat)
            .with_context(|| format!("no player in seat {}", agent_seat))?;
        Ok(HandSummary {
            public_cards: card_indices(&table.public_cards),
            agent_cards: card_indices(&agent.hand),
            payoffs: payoffs.to_vec(),
        })
    }

    pub fn write<W: Write>(&self, out: &mut W, agent_name: &str) -> std::io::Result<()> {
        let (human_payoff, agent_payoff) =
            match (self.payoffs.get(HUMAN_SEAT), self.payoffs.get(AGENT_SEAT)) {
                (Some(human), Some(agent)) => (human, agent),
                _ => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("{} payoffs, both seats need one", self.payoffs.len()),
                    ))
                }
            };
        writeln!(out)?;
        writeln!(out, "--- Hand Over ---")?;
        writeln!(out, "{:<LABEL_WIDTH$}{:?}", "Community Cards:", self.public_cards)?;
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{:?}",
            format!("{}'s Hole Cards:", agent_name),
            self.agent_cards
        )?;
        writeln!(out, "-------------------------")?;
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{:?}",
            format!("Your Payoff (Player {}):", HUMAN_SEAT),
            human_payoff
        )?;
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{:?}",
            format!("{} Payoff (Player {}):", agent_name, AGENT_SEAT),
            agent_payoff
        )?;
        Ok(())
    }
}

/// Totals over a whole session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub hands: usize,
    pub totals: Vec<f32>,
}

/// Plays hands until the operator types `q` or the input ends.
///
/// The environment must already have its agents bound; the agent in
/// `AGENT_SEAT` is the one whose cards get revealed.
pub fn run<R: BufRead, W: Write>(
    env: &mut Env,
    agent_name: &str,
    mut input: R,
    mut out: W,
) -> anyhow::Result<SessionSummary> {
    let mut summary = SessionSummary {
        hands: 0,
        totals: vec![0.0; env.num_players()],
    };

    loop {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(out, "STARTING NEW HAND")?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        out.flush()?;

        // Greedy play, no exploration
        let (_trajectories, payoffs) = env.run(false)?;

        let hand = HandSummary::new(env.game(), AGENT_SEAT, &payoffs)?;
        hand.write(&mut out, agent_name)?;

        summary.hands += 1;
        for (total, payoff) in summary.totals.iter_mut().zip(payoffs.iter()) {
            *total += payoff;
        }
        log::debug!("hand {} payoffs {:?}", summary.hands, payoffs);

        write!(
            out,
            "\nPress Enter to play another hand, or type 'q' to quit: "
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            log::info!("input closed, ending the session");
            break;
        }
        if should_quit(&line) {
            break;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Played {} hand(s). Your total payoff: {:?}",
        summary.hands, summary.totals[HUMAN_SEAT]
    )?;
    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::agent_random::AgentRandom;
    use crate::config::EnvConfig;
    use std::io::Cursor;
    use std::sync::Arc;

    fn random_env(seed: u64) -> Env {
        let mut env = Env::new(EnvConfig {
            seed: Some(seed),
            ..EnvConfig::default()
        })
        .unwrap();
        env.set_agents(vec![Arc::new(AgentRandom {}), Arc::new(AgentRandom {})])
            .unwrap();
        env
    }

    fn play(input: &str) -> (SessionSummary, String) {
        let mut env = random_env(21);
        let mut out = Vec::new();
        let summary = run(&mut env, "Random", Cursor::new(input), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn quits_on_q_in_any_case_and_padding() {
        for input in ["q", "Q", " q ", " Q ", "q\n", "\tQ\r\n"] {
            assert!(should_quit(input), "{:?} should quit", input);
        }
    }

    #[test]
    fn anything_else_continues() {
        for input in ["", "\n", "quit", "qq", "n", "exit", "y"] {
            assert!(!should_quit(input), "{:?} should continue", input);
        }
    }

    #[test]
    fn summary_layout() {
        let summary = HandSummary {
            public_cards: vec!["S2".to_string(), "HK".to_string(), "DT".to_string()],
            agent_cards: vec!["CA".to_string(), "C9".to_string()],
            payoffs: vec![-1.5, 1.5],
        };
        let mut out = Vec::new();
        summary.write(&mut out, "DQN").unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "\n--- Hand Over ---\n\
            Community Cards:        [\"S2\", \"HK\", \"DT\"]\n\
            DQN's Hole Cards:       [\"CA\", \"C9\"]\n\
            -------------------------\n\
            Your Payoff (Player 0): -1.5\n\
            DQN Payoff (Player 1):  1.5\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn enter_continues_and_q_stops() {
        let (summary, text) = play("\n  \nq\n");
        assert_eq!(summary.hands, 3);
        assert_eq!(text.matches("STARTING NEW HAND").count(), 3);
        assert_eq!(text.matches("--- Hand Over ---").count(), 3);
        assert!(text.contains("Played 3 hand(s)."));
    }

    #[test]
    fn uppercase_q_stops_after_the_first_hand() {
        let (summary, _) = play(" Q \n\n");
        assert_eq!(summary.hands, 1);
    }

    #[test]
    fn closed_input_ends_the_session() {
        let (summary, text) = play("");
        assert_eq!(summary.hands, 1);
        let last_line = text.lines().last().unwrap();
        assert_eq!(
            last_line,
            format!("Played 1 hand(s). Your total payoff: {:?}", summary.totals[HUMAN_SEAT])
        );
    }

    #[test]
    fn totals_stay_zero_sum() {
        let (summary, _) = play("\n\n\n\n\nq\n");
        assert_eq!(summary.hands, 6);
        assert_eq!(summary.totals.len(), 2);
        assert!((summary.totals[0] + summary.totals[1]).abs() < 1e-4);
    }

    #[test]
    fn unbound_env_is_an_error() {
        let mut env = Env::new(EnvConfig::default()).unwrap();
        let mut out = Vec::new();
        assert!(run(&mut env, "DQN", Cursor::new("q\n"), &mut out).is_err());
    }

    #[test]
    fn summary_needs_one_payoff_per_seat() {
        let table = Table::new(2);
        assert!(HandSummary::new(&table, AGENT_SEAT, &[1.0]).is_err());
        assert!(HandSummary::new(&table, AGENT_SEAT, &[1.0, -1.0, 0.0]).is_err());
        let summary = HandSummary::new(&table, AGENT_SEAT, &[1.0, -1.0]).unwrap();
        assert_eq!(summary.payoffs, vec![1.0, -1.0]);
        assert!(summary.agent_cards.is_empty());

        let short = HandSummary {
            payoffs: vec![1.0],
            ..summary
        };
        assert!(short.write(&mut Vec::new(), "DQN").is_err());
    }
}
