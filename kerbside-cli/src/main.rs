//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use kerbside_cli::CliError;

fn main() {
    pretty_env_logger::init();
    if let Err(err) = kerbside_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        let mut stdout = std::io::stdout().lock();
        if kerbside_cli::write_error(&mut stdout, &err).is_err() {
            eprintln!("kerbside: {err}");
        }
        std::process::exit(1);
    }
}
