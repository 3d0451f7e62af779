//! CLI smoke entry point. Output is `key=value` lines.

use clap::Parser;
use clientdb_cli::{run, Cli};
use clientdb_core::{core_version, ping};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("clientdb_core ping={}", ping());
    println!("clientdb_core version={}", core_version());

    match run(&cli) {
        Ok(report) => {
            println!(
                "clientdb_core store={} schema_version={} status=ok",
                report.db_path.display(),
                report.schema_version
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("clientdb_cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
