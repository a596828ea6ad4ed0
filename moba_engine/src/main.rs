#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Text MOBA **
//! Turn-based lane battles in the terminal

use moba_engine::style::GameStyle;
use moba_engine::{MOBA_VERSION, load_game, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use textwrap::fill;

use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading game data (v{MOBA_VERSION})...");
    let mut session = load_game().context("while loading game")?;
    info!("Game loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;
    info!("Starting the game!");

    println!("{:^84}", session.title.to_uppercase().bright_yellow().underline());
    if let Ok(player) = session.player() {
        println!(
            "\nYou are {}, a {} of the {} team.\n",
            player.name.bold().bright_blue(),
            player.class,
            player.team_name()
        );
    }
    if !session.intro.is_empty() {
        println!("{}", fill(&session.intro, moba_engine::style::normal_block()).description_style());
    }
    println!("{}", "Type \"help\" for the list of commands, \"quit\" to leave.".italic());

    run_repl(&mut session)
}
