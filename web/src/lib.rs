use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Options are read from the location hash, e.g. `#--difficulty=hard&-vv`.
fn parse_hash_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_hash_args(&location_hash).unwrap_or_else(|err| {
        gloo::console::error!(format!("ignoring location hash: {}", err));
        Args::default()
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::Difficulty;

    #[test]
    fn hash_options_are_parsed() {
        let args = parse_hash_args("#--seed=42&--difficulty=hard&-vv").unwrap();
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_hash_args("").unwrap();
        assert_eq!(args.game, game::GameProps::default());
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(parse_hash_args("#--difficulty=extreme").is_err());
    }
}
