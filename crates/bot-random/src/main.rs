//! Self-play driver: two random bots play each other through the rules engine.

use anyhow::Context;
use bot_random::{RandomBot, Searcher};
use chess_core::{Color, FenRecord, Move};
use chess_engine::{Game, Position, PromotionChoice, RulesConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Plays a game between two random bots and prints the result.
#[derive(Parser)]
#[command(name = "bot-random")]
#[command(about = "Self-play between two random move bots")]
struct Args {
    /// Maximum number of plies to play
    #[arg(long, default_value = "40")]
    plies: usize,

    /// Rules configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position
    #[arg(long, default_value = FenRecord::STARTPOS)]
    fen: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };
    tracing::info!(?config, plies = args.plies, "starting self-play");

    let position = Position::from_fen(&args.fen).context("parsing --fen")?;
    let opening = args.fen == FenRecord::STARTPOS;
    let mut game = Game::with_config(position, config.clone());
    game.subscribe(|event| tracing::info!(%event, "game event"));

    let mut bots = Color::BOTH.map(|color| {
        let bot = RandomBot::new(color, opening).with_legality(config.legality);
        match args.seed {
            Some(seed) => bot.with_seed(seed.wrapping_add(color.index() as u64)),
            None => bot,
        }
    });

    for _ in 0..args.plies {
        let turn = game.turn();
        if game.position().find_king(turn).is_none() {
            tracing::info!(%turn, "king captured, stopping");
            break;
        }
        let Some((from, to)) = bots[turn.index()].choose_move(game.position()) else {
            tracing::info!(%turn, "no candidate moves, stopping");
            break;
        };

        let mov = Move::new(from, to);
        let notation = bots[turn.index()].record(mov, game.position(), false);
        bots[turn.opposite().index()].record(mov, game.position(), true);
        game.make_move(from, to)
            .with_context(|| format!("engine rejected {notation}"))?;

        if game.position().pending_promotion().is_some() {
            game.resolve_promotion(PromotionChoice::Queen)?;
        }
    }

    println!("{}", game.to_fen());
    println!("{}", game.history_string());
    println!("{}", bots[Color::White.index()].history().join(" "));
    Ok(())
}
