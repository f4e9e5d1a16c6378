use client::api::ApiClient;
use client::app::{App, Terminal};
use client::config::ClientConfig;
use env_logger::Env;
use log::info;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    info!("Talking to {}", api.base_url());

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout()).hide_secrets(interactive);
    match App::new(api).run(&mut terminal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
