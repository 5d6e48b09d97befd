use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod theme;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Reads `#--seed=42&--difficulty=hard` style fragments, the leading empty
/// piece stands in for the binary name.
fn parse_fragment(fragment: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(fragment.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let fragment = window().location().hash().unwrap_or_default();
    // logger is not up yet, bad fragments fall back to defaults
    let args = parse_fragment(&fragment).unwrap_or_else(|err| {
        web_sys::console::warn_1(&err.to_string().into());
        Args::parse_from([""])
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
