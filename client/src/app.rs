//! # Console
//!
//! Reads one command per line and runs it against the server:
//!
//! | Command | Action |
//! |---|---|
//! | `register` | create an account |
//! | `login` | log in and keep the token for this process |
//! | `logout` | end the session |
//! | `list`, `1` | module instances and who taught them |
//! | `view` | every rated professor's average |
//! | `average` | one professor's average in one module |
//! | `rate` | rate a professor for a module instance (needs login) |
//! | `exit`, `quit` | leave |
//!
//! Failed requests are printed and the loop keeps going. End of input ends it.

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::render;
use crate::session::Session;
use common::requests::{LoginRequest, ModuleInstanceRef, RegisterRequest, SubmitRatingRequest};
use log::debug;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const USAGE: &str =
    "Unknown command. Try 'register', 'login', 'logout', 'list', 'view', 'average', 'rate' or 'exit'.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    Login,
    Logout,
    List,
    View,
    Average,
    Rate,
    Exit,
    Unknown(String),
}

impl Command {
    /// Interprets an input line; case and surrounding whitespace are ignored.
    pub fn parse(line: &str) -> Self {
        let word = line.trim().to_lowercase();
        match word.as_str() {
            "register" => Command::Register,
            "login" => Command::Login,
            "logout" => Command::Logout,
            "list" | "1" => Command::List,
            "view" => Command::View,
            "average" => Command::Average,
            "rate" => Command::Rate,
            "exit" | "quit" => Command::Exit,
            _ => Command::Unknown(word),
        }
    }
}

/// Line-oriented input and output.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    /// Reads secrets from the controlling terminal without echo. Only useful
    /// when input is an interactive terminal; piped input keeps using `ask`.
    pub fn hide_secrets(mut self, hide: bool) -> Self {
        self.hide_secrets = hide;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints `label` and reads the reply, without its line ending.
    pub fn ask(&mut self, label: &str) -> Result<String, ClientError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ClientError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Like [`Terminal::ask`], without echoing the reply when secrets are
    /// hidden.
    pub fn ask_secret(&mut self, label: &str) -> Result<String, ClientError> {
        if !self.hide_secrets {
            return self.ask(label);
        }
        self.output.flush()?;
        match rpassword::prompt_password(label) {
            Ok(secret) => Ok(secret),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(ClientError::EndOfInput),
            Err(err) => Err(err.into()),
        }
    }

    fn ask_number<T: FromStr>(
        &mut self,
        label: &str,
        name: &'static str,
        expected: &'static str,
    ) -> Result<T, ClientError> {
        let value = self.ask(label)?;
        value
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidInput {
                name,
                expected,
                value,
            })
    }
}

/// The interactive client: an API handle plus the login state of this
/// process.
pub struct App {
    api: ApiClient,
    session: Session,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs commands until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, terminal: &mut Terminal<R, W>) -> io::Result<()> {
        loop {
            let line = match terminal.ask("> ") {
                Ok(line) => line,
                Err(ClientError::EndOfInput) => return Ok(()),
                Err(ClientError::Io(err)) => return Err(err),
                Err(other) => return Err(io::Error::other(other)),
            };

            let command = Command::parse(&line);
            debug!("Running {:?}", command);
            if command == Command::Exit {
                terminal.say("Goodbye!")?;
                return Ok(());
            }

            match dispatch(&self.api, &mut self.session, terminal, command) {
                Ok(()) => {}
                Err(ClientError::EndOfInput) => return Ok(()),
                Err(ClientError::Io(err)) => return Err(err),
                Err(err) => terminal.say(&err.to_string())?,
            }
        }
    }
}

fn dispatch<R: BufRead, W: Write>(
    api: &ApiClient,
    session: &mut Session,
    terminal: &mut Terminal<R, W>,
    command: Command,
) -> Result<(), ClientError> {
    match command {
        Command::Register => register(api, terminal),
        Command::Login => login(api, session, terminal),
        Command::Logout => logout(api, session, terminal),
        Command::List => list(api, terminal),
        Command::View => view(api, terminal),
        Command::Average => average(api, terminal),
        Command::Rate => rate(api, session, terminal),
        Command::Exit => Ok(()),
        Command::Unknown(_) => Ok(terminal.say(USAGE)?),
    }
}

fn register<R: BufRead, W: Write>(
    api: &ApiClient,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    terminal.say("User Registration:")?;
    let request = RegisterRequest {
        username: terminal.ask("Enter username: ")?,
        email: terminal.ask("Enter email: ")?,
        password: terminal.ask_secret("Enter password: ")?,
    };
    api.register(&request)?;
    Ok(terminal.say("Registration successful!")?)
}

fn login<R: BufRead, W: Write>(
    api: &ApiClient,
    session: &mut Session,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    terminal.say("User Login:")?;
    let request = LoginRequest {
        username: terminal.ask("Enter username: ")?,
        password: terminal.ask_secret("Enter password: ")?,
    };
    let response = api.login(&request)?;
    session.start(response.token);
    Ok(terminal.say("Login successful! Token received.")?)
}

/// The local token is dropped whatever the server answers; if the server
/// refuses, it no longer knows the token anyway.
fn logout<R: BufRead, W: Write>(
    api: &ApiClient,
    session: &mut Session,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    let token = session.end().ok_or(ClientError::NotLoggedIn)?;
    terminal.say("Logging out...")?;
    let response = api.logout(&token)?;
    Ok(terminal.say(&response.message)?)
}

fn list<R: BufRead, W: Write>(
    api: &ApiClient,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    let modules = api.modules()?;
    Ok(terminal.say(render::module_table(&modules).trim_end())?)
}

fn view<R: BufRead, W: Write>(
    api: &ApiClient,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    let ratings = api.professor_ratings()?;
    Ok(terminal.say(render::professor_ratings(&ratings).trim_end())?)
}

fn average<R: BufRead, W: Write>(
    api: &ApiClient,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    let professor_id = terminal.ask("Enter professor ID: ")?.trim().to_string();
    let module_code = terminal.ask("Enter module code: ")?.trim().to_string();
    let response = api.module_average(&professor_id, &module_code)?;
    Ok(terminal.say(&render::module_average(
        &professor_id,
        &module_code,
        response.average_rating,
    ))?)
}

fn rate<R: BufRead, W: Write>(
    api: &ApiClient,
    session: &Session,
    terminal: &mut Terminal<R, W>,
) -> Result<(), ClientError> {
    let token = session.token().ok_or(ClientError::NotLoggedIn)?;

    terminal.say("Rate a Professor:")?;
    let professor_id = terminal.ask("Enter professor ID: ")?.trim().to_string();
    let module_code = terminal.ask("Enter module code: ")?.trim().to_string();
    let year = terminal.ask_number("Enter teaching year: ", "year", "a year such as 2017")?;
    let semester = terminal.ask_number("Enter semester: ", "semester", "a whole number")?;
    let rating = terminal.ask_number("Enter rating (1-5): ", "rating", "a whole number")?;

    let request = SubmitRatingRequest {
        professor_id,
        module_instance: ModuleInstanceRef::Offering {
            module_code,
            year,
            semester,
        },
        rating,
    };
    let response = api.submit_rating(token, &request)?;
    Ok(terminal.say(&response.message)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use reqwest::Url;
    use std::io::Cursor;
    use std::time::Duration;

    fn offline_app() -> App {
        let api = ApiClient::new(&ClientConfig {
            base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        App::new(api)
    }

    fn run(app: &mut App, input: &str) -> String {
        let mut terminal = Terminal::new(Cursor::new(input.to_string()), Vec::new());
        app.run(&mut terminal).unwrap();
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("  LIST \n"), Command::List);
        assert_eq!(Command::parse("1"), Command::List);
        assert_eq!(Command::parse("Quit"), Command::Exit);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("rate"), Command::Rate);
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
    }

    #[test]
    fn unknown_command_prints_usage() {
        let output = run(&mut offline_app(), "dance\nexit\n");
        assert!(output.contains(USAGE));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn rate_needs_a_login() {
        let output = run(&mut offline_app(), "rate\nexit\n");
        assert!(output.contains("You must log in first!"));
        assert!(!output.contains("Enter professor ID"));
    }

    #[test]
    fn logout_needs_a_login() {
        let output = run(&mut offline_app(), "logout\n");
        assert!(output.contains("You must log in first!"));
    }

    #[test]
    fn network_errors_do_not_stop_the_loop() {
        let output = run(&mut offline_app(), "list\nview\nexit\n");
        assert_eq!(output.matches("Network error").count(), 2);
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn piped_passwords_are_read_from_input() {
        let mut terminal = Terminal::new(Cursor::new("hunter2\n".to_string()), Vec::new());
        assert_eq!(terminal.ask_secret("Enter password: ").unwrap(), "hunter2");
        assert_eq!(
            String::from_utf8(terminal.into_output()).unwrap(),
            "Enter password: "
        );
    }

    #[test]
    fn end_of_input_mid_command_exits() {
        let mut app = offline_app();
        let output = run(&mut app, "login\namy\n");
        assert!(output.contains("Enter password: "));
        assert!(!app.session().is_logged_in());
    }

    #[test]
    fn bad_numbers_are_reported() {
        let mut app = offline_app();
        app.session.start("abc".to_string());
        let output = run(&mut app, "rate\nJE1\nCD1\nlast year\nexit\n");
        assert!(output.contains("year must be a year such as 2017, got `last year`"));
        assert!(output.ends_with("Goodbye!\n"));
    }
}
