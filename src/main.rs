use clap::Parser;
use hitscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
