//! movie-dupecheck - duplicate finder for HD/UHD movie collections
//!
//! Entry point for the command-line tool.

use clap::Parser;
use movie_dupecheck::{
    cli::Cli,
    error::{ExitCode, StructuredError},
    logging::init_logging,
    output::OutputFormat,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let json_errors = cli.output == OutputFormat::Json;

    match movie_dupecheck::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err),
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
