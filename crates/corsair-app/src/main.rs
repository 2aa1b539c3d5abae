use std::path::Path;
use std::process::ExitCode;

use corsair_app::config::{AppConfig, CONFIG_FILE};
use corsair_app::game_loop;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = AppConfig::load_or_default(Path::new(&path));
    config.apply_env(|name| std::env::var(name).ok());
    log::info!(
        "Corsair starting: seed {}, {} step",
        config.seed,
        if config.fixed_step { "fixed" } else { "variable" }
    );

    match game_loop::run_session(&config) {
        Ok(summary) => {
            let snap = &summary.final_snapshot;
            log::info!(
                "Session over after {} frames ({} steps): {:?}, {} gold, hull {:.0}/{:.0}",
                summary.frames,
                summary.steps,
                snap.mode,
                snap.player.gold,
                snap.player_ship.health,
                snap.player_ship.max_health,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Could not save session: {err}");
            ExitCode::FAILURE
        }
    }
}
