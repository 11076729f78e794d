//! `quickqr`: print the QR payload for a text, Wi-Fi, contact, email or SMS code.
//!
//! Each subcommand switches the controller to its kind and replays the given flags as
//! field edits, just like typing into the form. The payload goes to stdout; if the input
//! is not valid, the validation message goes to stderr and the exit code is 1.
//!
//! Logging goes to stderr and is controlled by `QUICKQR_LOG`, then `RUST_LOG`, then
//! `-v` / `-q`.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use quickqr::config::{FieldDefaults, Settings};
use quickqr::controller::{Controller, State};
use quickqr::i18n::{Catalog, Language};
use quickqr::payload::{Edit, Encryption, Field, FieldEdit, PayloadKind};
use quickqr::render::{present, View};

#[derive(Debug, Parser)]
#[command(name = "quickqr", version, about = "Build QR code payloads from structured input")]
struct Cli {
    /// Message language (ru or en). Overrides the settings file.
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// TOML settings file with language and per-kind defaults.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start from empty fields instead of the defaults.
    #[arg(long, global = true)]
    blank: bool,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Free text or a URL.
    Text {
        text: Option<String>,
    },
    /// Wi-Fi network credentials.
    Wifi {
        #[arg(long)]
        ssid: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// WPA, WEP or nopass.
        #[arg(long)]
        encryption: Option<Encryption>,
        /// Mark the network as hidden; `--hidden=false` overrides a hidden default.
        #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        hidden: Option<bool>,
    },
    /// A MeCard contact.
    Contact {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// A mailto: link.
    Email {
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// An SMSTO: intent.
    Sms {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
}

impl Command {
    /// The kind to activate and the field edits to replay, in form order.
    fn edits(&self) -> (PayloadKind, Vec<Edit>) {
        fn texts(pairs: &[(Field, &Option<String>)]) -> Vec<Edit> {
            pairs
                .iter()
                .filter_map(|&(field, value)| value.as_deref().map(|v| Edit::text(field, v)))
                .collect()
        }

        match self {
            Command::Text { text } => (PayloadKind::PlainText, texts(&[(Field::Text, text)])),
            Command::Wifi { ssid, password, encryption, hidden } => {
                let mut edits = texts(&[(Field::Ssid, ssid), (Field::Password, password)]);
                if let Some(encryption) = encryption {
                    edits.push(FieldEdit::Encryption(*encryption).into());
                }
                if let Some(hidden) = hidden {
                    edits.push(FieldEdit::Hidden(*hidden).into());
                }
                (PayloadKind::WifiCredential, edits)
            }
            Command::Contact { first_name, last_name, phone, email, company, title } => (
                PayloadKind::ContactCard,
                texts(&[
                    (Field::FirstName, first_name),
                    (Field::LastName, last_name),
                    (Field::Phone, phone),
                    (Field::Email, email),
                    (Field::Company, company),
                    (Field::Title, title),
                ]),
            ),
            Command::Email { to, subject, body } => (
                PayloadKind::EmailIntent,
                texts(&[(Field::To, to), (Field::Subject, subject), (Field::Body, body)]),
            ),
            Command::Sms { phone, body } => {
                (PayloadKind::SmsIntent, texts(&[(Field::Phone, phone), (Field::Body, body)]))
            }
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let filter = std::env::var("QUICKQR_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

/// Resolves settings and runs the edits, returning the final state and the catalog to
/// render messages with.
fn evaluate(cli: &Cli) -> anyhow::Result<(State, Catalog)> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("cannot use settings file {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(lang) = cli.lang {
        settings.language = lang;
    }

    let defaults = if cli.blank { FieldDefaults::blank() } else { settings.field_defaults() };
    let (kind, edits) = cli.command.edits();
    let mut controller = Controller::new(defaults, kind);
    for edit in edits {
        controller.apply(edit)?;
    }
    Ok((controller.state().clone(), settings.catalog()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let (state, catalog) = match evaluate(&cli) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::from(2);
        }
    };

    let mut print = |payload: &str| println!("{}", payload);
    match present(state.output(), &mut print, &catalog) {
        View::Code(()) => ExitCode::SUCCESS,
        View::Placeholder(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> State {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        evaluate(&cli).unwrap().0
    }

    #[test]
    fn test_wifi_command() {
        let state = run(&["quickqr", "wifi", "--ssid", "Home Net;", "--password", "p@ss:1"]);
        assert_eq!(state.payload(), r"WIFI:T:WPA;S:Home Net\;;P:p@ss\:1;;;");

        let state = run(&["quickqr", "wifi", "--ssid", "Open", "--encryption", "nopass", "--hidden"]);
        assert_eq!(state.payload(), "WIFI:T:nopass;S:Open;H:true;;;");
    }

    #[test]
    fn test_defaults_fill_unspecified_fields() {
        let state = run(&["quickqr", "--lang", "en", "contact", "--first-name", "Ann"]);
        assert!(state.payload().starts_with("MECARD:N:Doe,Ann;"));

        let state = run(&["quickqr", "--blank", "contact", "--first-name", "Ann", "--last-name", "Lee", "--phone", "123"]);
        assert_eq!(state.payload(), "MECARD:N:Lee,Ann;TEL:123;;");
    }

    #[test]
    fn test_text_default_and_override() {
        assert_eq!(run(&["quickqr", "text"]).payload(), "https://example.com");
        assert_eq!(run(&["quickqr", "text", "hello"]).payload(), "hello");
    }

    #[test]
    fn test_invalid_input_has_no_payload() {
        let state = run(&["quickqr", "sms", "--body", "hi"]);
        assert_eq!(state.payload(), "");
        assert!(!state.report().is_valid());
    }

    #[test]
    fn test_email_and_sms_commands() {
        let state = run(&["quickqr", "email", "--to", "a@b.com", "--subject", "Hi"]);
        assert_eq!(state.payload(), "mailto:a@b.com?subject=Hi");
        let state = run(&["quickqr", "sms", "--phone", "555"]);
        assert_eq!(state.payload(), "SMSTO:555:");
    }

    #[test]
    fn test_argument_errors() {
        assert!(Cli::try_parse_from(["quickqr", "wifi", "--encryption", "WPA3"]).is_err());
        assert!(Cli::try_parse_from(["quickqr", "--lang", "de", "text"]).is_err());
        assert!(Cli::try_parse_from(["quickqr", "-v", "-q", "text"]).is_err());
        assert!(Cli::try_parse_from(["quickqr"]).is_err());
    }

    #[test]
    fn test_hidden_flag_overrides_settings() {
        let path = std::env::temp_dir().join(format!("quickqr-hidden-{}.toml", std::process::id()));
        std::fs::write(&path, "[wifi]\nssid = \"Lab\"\nencryption = \"nopass\"\nhidden = true\n").unwrap();
        let config = path.to_str().unwrap();

        assert_eq!(run(&["quickqr", "--config", config, "wifi"]).payload(), "WIFI:T:nopass;S:Lab;H:true;;;");
        assert_eq!(
            run(&["quickqr", "--config", config, "wifi", "--hidden=false"]).payload(),
            "WIFI:T:nopass;S:Lab;;;"
        );
        assert_eq!(
            run(&["quickqr", "--config", config, "wifi", "--hidden"]).payload(),
            "WIFI:T:nopass;S:Lab;H:true;;;"
        );
        std::fs::remove_file(&path).unwrap();

        assert!(Cli::try_parse_from(["quickqr", "wifi", "--hidden=maybe"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let cli = Cli::try_parse_from(["quickqr", "--config", "/no/such/file.toml", "text"]).unwrap();
        let err = evaluate(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/file.toml"));
    }
}
