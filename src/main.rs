use std::process::ExitCode;

use clap::Parser;

use tsukuyomi::{cli::Args, config::Config, diagnostic, run_file, run_prompt, run_source};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(64)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = Config::from_args(&args);

    let result = match (&args.eval, &args.script) {
        (Some(source), _) => run_source(source, &config),
        (None, Some(path)) => run_file(path, &config),
        (None, None) => run_prompt(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostic::report(&e, config.color_enabled);
            ExitCode::from(e.exit_code())
        }
    }
}
