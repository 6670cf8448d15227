//! screener-render - format a model response for the terminal
//!
//! Reads response text from a file or stdin and writes it styled with
//! ANSI escapes.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener_render::config::Config;
use screener_render::error::{RenderError, Result};
use screener_render::terminal::Painter;
use screener_render::Renderer;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Options {
    theme: Option<String>,
    size: Option<u16>,
    language: Option<String>,
    verbose: bool,
    file: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Action {
    Render(Options),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Action> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| RenderError::Message(format!("{} requires a value", name)))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--verbose" | "-v" => options.verbose = true,
            "--theme" | "-t" => options.theme = Some(value(arg.as_str())?),
            "--language" | "-l" => options.language = Some(value(arg.as_str())?),
            "--size" | "-s" => {
                let size = value(arg.as_str())?;
                let size = size
                    .parse()
                    .map_err(|_| RenderError::Message(format!("invalid font size '{}'", size)))?;
                options.size = Some(size);
            }
            "-" => options.file = None,
            flag if flag.starts_with('-') => {
                return Err(RenderError::Message(format!("unknown option '{}'", flag)));
            }
            path => options.file = Some(PathBuf::from(path)),
        }
    }

    Ok(Action::Render(options))
}

fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();
    let level = if verbose { "debug" } else { "warn" };
    if let Ok(directive) = format!("screener_render={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args)? {
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            print_version();
            return Ok(());
        }
        Action::Render(options) => options,
    };

    init_logging(options.verbose);

    let mut config = Config::load();
    if let Some(theme) = options.theme {
        config.theme = theme.to_lowercase();
    }
    if let Some(size) = options.size {
        config.set_font_size(size);
    }
    if let Some(language) = options.language {
        config.language = language.to_lowercase();
    }

    let text = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    debug!("Read {} bytes", text.len());

    let renderer = Renderer::new()?;
    let ctx = config.context();
    let instructions = renderer.render(&text, &ctx);

    let stdout = io::stdout();
    let is_tty = stdout.is_tty();
    let mut painter = Painter::new(stdout.lock()).with_background(ctx.theme.background());
    if !is_tty {
        painter = painter.plain();
    }
    painter.paint(&text, &instructions)?;

    Ok(())
}

fn print_usage() {
    println!(
        "screener-render {} - format model responses for the terminal",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: screener-render [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is omitted or '-'.");
    println!();
    println!("Options:");
    println!("  -t, --theme NAME      Colour theme (light, dark or one from the config)");
    println!("  -s, --size POINTS     Base font size");
    println!("  -l, --language LANG   Language for untagged code fences");
    println!("  -v, --verbose         Debug logging on stderr");
    println!("  -h, --help            Show this help message");
    println!("  -V, --version         Show version information");
    println!();
    println!("Settings are read from ~/.screener-render.toml; RUST_LOG overrides logging.");
}

fn print_version() {
    println!("screener-render {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("screener-render")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_options() {
        let action = parse_args(&args(&["-t", "light", "--size", "15", "-v", "reply.md"])).unwrap();
        assert_eq!(
            action,
            Action::Render(Options {
                theme: Some("light".to_string()),
                size: Some(15),
                language: None,
                verbose: true,
                file: Some(PathBuf::from("reply.md")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Action::Help);
        assert_eq!(parse_args(&args(&["--version"])).unwrap(), Action::Version);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["--size"])).is_err());
        assert!(parse_args(&args(&["--size", "big"])).is_err());
        assert!(parse_args(&args(&["--colour"])).is_err());
    }

    #[test]
    fn test_stdin_by_default() {
        assert_eq!(
            parse_args(&args(&[])).unwrap(),
            Action::Render(Options::default())
        );
    }
}
