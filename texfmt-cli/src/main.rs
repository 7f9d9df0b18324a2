//! Command-line interface for texfmt
//! Formats LaTeX-like sources, or dumps the intermediate stages for inspection.
//!
//! Usage:
//!   texfmt `[path]`                        - Print the formatted file (stdin when omitted or `-`)
//!   texfmt `<path>` --write                - Format the file in place
//!   texfmt `<path>` --check                - Exit with status 1 when the file is not formatted
//!   texfmt `<path>` --output ast-json      - Print another stage (see --list-outputs)
//!
//! Settings come from the built-in defaults, then `.texfmt.toml` in the working
//! directory, then `--config`, then the individual flags.

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::sync::Arc;
use texfmt_config::{Loader, TexfmtConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("texfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A formatter for LaTeX-like markup")
        .arg(
            Arg::new("path")
                .help("Path to the source file, `-` for stdin")
                .default_value("-")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("What to print (formatted, raw, ast-json, ast-yaml, token-json)")
                .default_value("formatted"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("print-width")
                .long("print-width")
                .short('w')
                .help("Maximum line width")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("tab-width")
                .long("tab-width")
                .help("Columns per indentation level")
                .value_parser(clap::value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("use-tabs")
                .long("use-tabs")
                .help("Indent with tabs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report whether the file is formatted instead of printing it")
                .action(ArgAction::SetTrue)
                .conflicts_with("write"),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .help("Rewrite the file with the formatted output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-outputs")
                .long("list-outputs")
                .help("List available outputs")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging();

    if matches.get_flag("list-outputs") {
        handle_list_outputs_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(2);
    });

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("formatted");

    if matches.get_flag("check") {
        handle_check_command(path, &config);
    } else if matches.get_flag("write") {
        handle_write_command(path, &config);
    } else {
        handle_execute_command(path, output, &config);
    }
}

/// `TEXFMT_LOG` takes precedence over `RUST_LOG`; logs go to stderr.
fn init_logging() {
    let filter = std::env::var("TEXFMT_LOG")
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(matches: &ArgMatches) -> Result<TexfmtConfig, String> {
    let mut loader = Loader::new();
    if let Ok(dir) = std::env::current_dir() {
        loader = loader.with_project_file(dir);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(&width) = matches.get_one::<i64>("print-width") {
        loader = loader
            .set_override("format.print_width", width)
            .map_err(|e| e.to_string())?;
    }
    if let Some(&width) = matches.get_one::<i64>("tab-width") {
        loader = loader
            .set_override("format.tab_width", width)
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("use-tabs") {
        loader = loader
            .set_override("format.use_tabs", true)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(2);
    })
}

fn run(source: &str, output: &str, config: &TexfmtConfig) -> String {
    let catalog = Arc::new(config.catalog());
    tracing::debug!(output, "running output");
    transforms::execute_output(source, output, catalog, &config.format_options()).unwrap_or_else(
        |e| {
            eprintln!("{}", e);
            std::process::exit(1);
        },
    )
}

/// Formatted text as written to a file: exactly one trailing newline.
fn as_file_text(mut formatted: String) -> String {
    if !formatted.ends_with('\n') {
        formatted.push('\n');
    }
    formatted
}

/// Handle the default command
fn handle_execute_command(path: &str, output: &str, config: &TexfmtConfig) {
    let source = read_source(path);
    let printed = run(&source, output, config);
    print!("{}", as_file_text(printed));
}

/// Handle --check
fn handle_check_command(path: &str, config: &TexfmtConfig) {
    let source = read_source(path);
    let formatted = as_file_text(run(&source, "formatted", config));
    if formatted != source {
        eprintln!("{}: not formatted", path);
        std::process::exit(1);
    }
}

/// Handle --write
fn handle_write_command(path: &str, config: &TexfmtConfig) {
    if path == "-" {
        eprintln!("--write needs a file path");
        std::process::exit(2);
    }
    let source = read_source(path);
    let formatted = as_file_text(run(&source, "formatted", config));
    if formatted == source {
        tracing::info!(path, "already formatted");
        return;
    }
    if let Err(e) = std::fs::write(path, formatted) {
        eprintln!("Error writing {}: {}", path, e);
        std::process::exit(2);
    }
}

/// Handle the list-outputs command
fn handle_list_outputs_command() {
    println!("Available outputs:\n");
    for output in transforms::AVAILABLE_OUTPUTS {
        println!("  {}", output);
    }
}
