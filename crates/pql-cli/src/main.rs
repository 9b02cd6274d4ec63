mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{AstParams, CheckParams, CompileParams, FilterParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("filter", m)) => {
            let params = FilterParams::from_matches(m);
            commands::filter::run(params.into());
        }
        Some(("types", _)) => commands::types::run(),
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` wins over `-v`. Logs go to stderr, output to stdout.
fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "pql=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
