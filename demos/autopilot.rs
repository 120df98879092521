use cargo_empire::balance::format_money;
use cargo_empire::history::MemoryHistoryLog;
use cargo_empire::seed::GameSeed;
use cargo_empire::store::MemorySessionStore;
use cargo_empire::{
    AirportCatalog, FlightMode, GameConfig, GameError, GameManager, GameStatus, GreatCircle, TurnCommand,
    TurnMenu,
};

type Manager = GameManager<MemorySessionStore, MemoryHistoryLog, AirportCatalog, GreatCircle>;

const MAX_TURNS: u32 = 200;

fn new_manager() -> Manager {
    GameManager::new(
        GameConfig::default(),
        GreatCircle,
        MemorySessionStore::new(),
        MemoryHistoryLog::new(),
        AirportCatalog::europe(),
    )
}

/// Play one game to the end. Returns the final status and number of turns.
fn autopilot(manager: &mut Manager, player: &str, seed: u64, verbose: bool) -> Result<(GameStatus, u32), GameError> {
    manager.login_with_seed(player, GameSeed::new(seed))?;

    for _ in 0..MAX_TURNS {
        let session = manager.session(player)?;
        let mode = match manager.menu(player)? {
            TurnMenu::FreeChoice if session.phase % 2 == 0 => Some(FlightMode::Random),
            TurnMenu::FreeChoice => Some(FlightMode::Basic),
            _ => None,
        };

        let views = match manager.offer(player, mode) {
            Ok(views) => views,
            Err(GameError::NoReachableDestination) => {
                let rescued = manager.rescue(player, Some(session.money / 2.0).filter(|m| *m > 0.0))?;
                if rescued.status == GameStatus::Lost {
                    return Ok((GameStatus::Lost, session.phase));
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        // Prefer the best paying option; the bot can't spot fraud either
        let selection = views
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.reward.total_cmp(&b.reward))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let outcome = manager.commit(player, TurnCommand::select(selection))?;

        if verbose {
            println!(
                "  Turn {:>2}: {:<24} -> {:<45} {:>5.0} km  {}  [{} | {:.0} km]",
                outcome.session.phase - 1,
                outcome.option.cargo,
                outcome.option.destination.name,
                outcome.option.distance_km,
                outcome.message(),
                format_money(outcome.session.money),
                outcome.session.fuel_range
            );
        }
        if outcome.session.status.is_terminal() {
            return Ok((outcome.session.status, outcome.session.phase - 1));
        }
    }
    Ok((GameStatus::Active, MAX_TURNS))
}

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("=== Cargo Empire Autopilot ===\n");
    let mut manager = new_manager();
    let (status, turns) = autopilot(&mut manager, "pilot", 2024, true)?;
    println!("\nGame {} after {} turns\n", status, turns);

    println!("=== Statistics (200 games) ===");
    let mut wins = 0;
    let mut losses = 0;
    let mut total_turns = 0;
    for seed in 0..200 {
        let mut manager = new_manager();
        let (status, turns) = autopilot(&mut manager, &format!("bot{}", seed), seed, false)?;
        match status {
            GameStatus::Won => wins += 1,
            GameStatus::Lost => losses += 1,
            GameStatus::Active => {}
        }
        total_turns += turns;
    }
    println!("Wins:   {} ({:.1}%)", wins, wins as f64 / 2.0);
    println!("Losses: {} ({:.1}%)", losses, losses as f64 / 2.0);
    println!("Average turns: {:.1}", total_turns as f64 / 200.0);
    Ok(())
}
