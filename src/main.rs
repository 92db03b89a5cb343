use std::env;

use damage_aid::{cli, telemetry};

fn main() {
    telemetry::init_tracing();
    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_args(&args));
}
