use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use unciv::battle::air_interception::air_sweep;
use unciv::battle::nuke::{may_use_nuke, nuke};
use unciv::battle::{battle, CityCombatant, Combatant, MapUnitCombatant};
use unciv::map::mapunit::UnitAction;
use unciv::map::tile_map::TileMap;
use unciv::models::ruleset::vanilla::vanilla_ruleset;
use unciv::GameInfo;
use unciv_core::mod_constants::ModConstants;
use unciv_core::{CivId, Vector2};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays out a scripted skirmish and prints what each side was told")]
struct Args {
    /// Seed for the combat rolls
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Json file overriding the combat constants
    #[arg(short, long)]
    constants: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut game = new_game(args.constants.as_ref())?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let rome = game.add_civ("Rome");
    let greece = game.add_civ("Greece");
    game.meet_civs(rome, greece);
    game.add_city("Rome", rome, Vector2::new(-5, 0))?;
    let athens = game.add_city("Athens", greece, Vector2::new(5, 0))?;
    game.add_city("Sparta", greece, Vector2::new(0, 5))?;
    game.declare_war(rome, greece);

    info!("Skirmish at the river");
    let legion = game.add_unit("Spearman", rome, Vector2::new(0, 0))?;
    let hoplite = game.add_unit("Warrior", greece, Vector2::new(1, 0))?;
    let damage = battle::attack(
        &mut game,
        &mut rng,
        Combatant::Unit(MapUnitCombatant::new(legion)),
        Combatant::Unit(MapUnitCombatant::new(hoplite)),
    );
    info!("{} dealt {}, took {}", game.unit(legion).name, damage.attacker_dealt, damage.defender_dealt);

    info!("Archers against the walls of Athens");
    let archer = game.add_unit("Archer", rome, Vector2::new(3, 0))?;
    battle::attack(
        &mut game,
        &mut rng,
        Combatant::Unit(MapUnitCombatant::new(archer)),
        Combatant::City(CityCombatant::new(athens)),
    );
    info!("Athens stands at {} HP", game.city(athens).health);

    info!("Fighters sweep the skies");
    game.add_unit("Anti-Aircraft Gun", greece, Vector2::new(4, 1))?;
    let fighter = game.add_unit("Fighter", rome, Vector2::new(-5, 0))?;
    game.unit_mut(fighter).action = Some(UnitAction::AirSweep);
    air_sweep(&mut game, &mut rng, MapUnitCombatant::new(fighter), Vector2::new(3, 1));

    info!("The bomb drops");
    let missile = game.add_unit("Nuclear Missile", rome, Vector2::new(-5, 0))?;
    game.update_visibility(rome);
    let ground_zero = Vector2::new(0, 5);
    game.civ_mut(rome).explored_tiles.insert(ground_zero);
    if may_use_nuke(&game, MapUnitCombatant::new(missile), ground_zero) {
        nuke(&mut game, &mut rng, MapUnitCombatant::new(missile), ground_zero);
    }

    print_notifications(&game, rome);
    print_notifications(&game, greece);
    Ok(())
}

fn new_game(constants_path: Option<&PathBuf>) -> anyhow::Result<GameInfo> {
    let ruleset = vanilla_ruleset();
    let tile_map = TileMap::hexagonal(6, "Grassland", &ruleset);
    let mut game = GameInfo::new(ruleset, tile_map);
    if let Some(path) = constants_path {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        game.constants = ModConstants::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    }
    Ok(game)
}

fn print_notifications(game: &GameInfo, civ: CivId) {
    let civ_info = game.civ(civ);
    println!("== {} ({} gold)", civ_info.civ_name, civ_info.gold);
    for notification in &civ_info.notifications {
        println!("  {}", notification.text);
    }
}
