//! lockfocus - apply reading aids to an HTML page

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use lockfocus::{Config, Message, Mode, Result, Scope, Session, Settings, parse_html_bytes};

#[derive(Parser)]
#[command(name = "lockfocus")]
#[command(version, about = "Apply reading aids to an HTML page", long_about = None)]
#[command(after_help = "EXAMPLES:
    lockfocus page.html out.html -m bionic           Bionic reading over the whole body
    lockfocus page.html -m syllable -s article       Split syllables inside <article> only
    lockfocus page.html --settings settings.json     Re-apply stored popup settings
    lockfocus page.html --host youtube.com \\
        --message '{\"action\":\"toggleFocusMode\",\"value\":true}'")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Text transform to apply (bionic, syllable); repeatable
    #[arg(short, long = "mode", value_name = "MODE")]
    modes: Vec<Mode>,

    /// Only transform elements matching this CSS selector list
    #[arg(short, long, value_name = "SELECTOR")]
    selector: Option<String>,

    /// Stored settings (JSON) to restore before anything else
    #[arg(long, value_name = "FILE")]
    settings: Option<String>,

    /// Toolkit configuration (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Popup message (JSON) to apply; repeatable, applied in order
    #[arg(long = "message", value_name = "JSON")]
    messages: Vec<String>,

    /// Hostname the page was served from
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let doc = parse_html_bytes(&fs::read(&cli.input)?);
    let mut session = Session::new(doc, config);
    if let Some(host) = &cli.host {
        session = session.with_hostname(host);
    }
    if let Some(selector) = &cli.selector {
        session = session.with_scope(Scope::parse(selector)?);
    }

    if let Some(path) = &cli.settings {
        session.restore(&Settings::load(path)?);
    }

    for mode in &cli.modes {
        let stats = session.set_mode(*mode, true)?;
        log::info!("{mode}: {} words in {} text nodes", stats.words, stats.transformed);
    }

    for json in &cli.messages {
        let message = match Message::from_json(json) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("ignoring message: {e}");
                continue;
            }
        };
        match session.apply(message) {
            Ok(Some(request)) => report_speech(&request)?,
            Ok(None) => {}
            Err(e) => log::warn!("message not applied: {e}"),
        }
    }

    let html = session.to_html()?;
    match &cli.output {
        Some(path) => fs::write(path, html)?,
        None => io::stdout().lock().write_all(html.as_bytes())?,
    }
    Ok(())
}

/// Speech requests have no engine to go to here; report them on stderr.
fn report_speech(request: &lockfocus::SpeechRequest) -> Result<()> {
    let json = serde_json::to_string(request)?;
    eprintln!("speak: {json}");
    Ok(())
}
