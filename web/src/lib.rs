use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod storage;
mod utils;

pub use game::*;
pub use storage::LocalStore;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::window;

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);
    utils::force_seed(args.seed);

    log::debug!("App started");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_from_location_hash() {
        let args = Args::try_parse_from("#--seed=7&-vv".split(['#', '&'])).unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();
        assert_eq!(args.seed, None);
    }
}
