mod cli;
mod commands;

use cli::{CapturesParams, CheckParams, RulesParams, ScopesParams, build_cli};
use tracing::Level;

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("rules", m)) => {
            let params = RulesParams::from_matches(m);
            commands::rules::run(params.into());
        }
        Some(("scopes", m)) => {
            let params = ScopesParams::from_matches(m);
            commands::scopes::run(params.into());
        }
        Some(("captures", m)) => {
            let params = CapturesParams::from_matches(m);
            commands::captures::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr; `-v` raises the level from warn up to trace.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
