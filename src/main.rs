use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use term_snake::config::Config;
use term_snake::game::SnakeGame;
use term_snake::input::ByteInput;
use term_snake::logging;
use term_snake::term::TermManager;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;
    info!(?config, "config loaded");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = SnakeGame::new(&config, rng);

    let mut term = TermManager::enable()?;
    let mut input = ByteInput::stdin();
    let result = game.play(&mut input, &mut term);

    // Restore the terminal before anything else is printed.
    term.disable()?;
    result?;

    println!("\nQuitting...");
    Ok(())
}
