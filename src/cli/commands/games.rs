//! List the game registry

use anyhow::Result;

use crate::cli::Output;
use crate::registry::{GameProfile, GAMES};

pub fn run(out: Output) -> Result<()> {
    out.value(&GAMES[..], format_games);
    Ok(())
}

fn format_games(games: &[GameProfile]) -> String {
    let mut text = format!("{:<14} {:<14} {:>6}", "ID", "NAME", "PORT");
    for game in games {
        text.push_str(&format!("\n{:<14} {:<14} {:>6}", game.id, game.name, game.port));
    }
    text
}
