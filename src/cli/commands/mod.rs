use crate::firebase::DEFAULT_API_URL;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn password_args() -> [Arg; 2] {
    [
        Arg::new("email")
            .short('e')
            .long("email")
            .help("Account email address")
            .env("SESAMO_EMAIL"),
        Arg::new("password")
            .long("password")
            .help("Account password (prompted when omitted)")
            .env("SESAMO_PASSWORD"),
    ]
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("sesamo")
        .about("Email and password credential flows")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Identity provider base URL (the Auth emulator works too)")
                .default_value(DEFAULT_API_URL)
                .env("SESAMO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .help("Identity provider API key")
                .env("SESAMO_API_KEY")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SESAMO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .args(password_args()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and set its display name")
                .args(password_args())
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Display name for the new account")
                        .env("SESAMO_USERNAME"),
                )
                .arg(
                    Arg::new("password-confirm")
                        .long("password-confirm")
                        .help("Password confirmation (prompted when omitted)")
                        .env("SESAMO_PASSWORD_CONFIRM"),
                ),
        )
}
