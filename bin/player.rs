use anyhow::Error as Anyhow;
use derive_more::{Display, Error, From};
use lib::chess::{Color, Move};
use lib::play::{Game, Mover, Random};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{stdin, stdout, Write};
use std::{fmt, str::FromStr};
use tracing::warn;

/// The reason why parsing player configuration failed.
#[derive(Debug, Display, Error, From)]
#[display("failed to parse player configuration")]
pub struct ParsePlayerConfigError(ron::de::SpannedError);

/// Runtime configuration for a [`Player`].
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum PlayerConfig {
    /// Reads moves in coordinate notation from the standard input.
    Manual,

    /// Picks uniformly among the legal moves.
    Random {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

/// Prints the ron notation accepted by [`FromStr`].
impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for PlayerConfig {
    type Err = ParsePlayerConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl PlayerConfig {
    /// Builds the configured [`Player`].
    pub fn build(&self) -> Player {
        match *self {
            PlayerConfig::Manual => Player::Manual(Manual),
            PlayerConfig::Random { seed: Some(seed) } => Player::Random(Random::seeded(seed)),
            PlayerConfig::Random { seed: None } => {
                Player::Random(Random::new(StdRng::from_entropy()))
            }
        }
    }
}

/// A player that reads moves in coordinate notation from the standard input.
pub struct Manual;

impl Manual {
    fn pick(&mut self, game: &Game) -> Result<Option<Move>, Anyhow> {
        loop {
            match game.turn() {
                Color::White => print!("white> "),
                Color::Black => print!("black> "),
            }

            stdout().flush()?;

            let mut line = String::new();
            if stdin().read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim() {
                "quit" => return Ok(None),
                s => match s.parse() {
                    Ok(m) => return Ok(Some(m)),
                    Err(e) => warn!("{e}"),
                },
            }
        }
    }
}

/// A generic player.
#[derive(From)]
pub enum Player {
    Manual(Manual),
    Random(Random<StdRng>),
}

impl Player {
    /// Chooses a [`Move`], or `None` to end the session.
    pub fn pick(&mut self, game: &Game) -> Result<Option<Move>, Anyhow> {
        match self {
            Player::Manual(p) => p.pick(game),
            Player::Random(p) => Ok(Mover::pick(p, game)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_config_is_an_identity(c: PlayerConfig) {
        assert_eq!(c.to_string().parse::<PlayerConfig>().ok(), Some(c));
    }

    #[test]
    fn config_is_parsed_from_ron_notation() {
        assert_eq!(
            "manual".parse::<PlayerConfig>().ok(),
            Some(PlayerConfig::Manual)
        );

        assert_eq!(
            "random()".parse::<PlayerConfig>().ok(),
            Some(PlayerConfig::Random { seed: None })
        );

        assert_eq!(
            "random(seed: Some(42))".parse::<PlayerConfig>().ok(),
            Some(PlayerConfig::Random { seed: Some(42) })
        );
    }
}
