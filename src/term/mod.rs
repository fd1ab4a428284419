use ansi_term::Style;
use clap::{ArgAction, Parser, Subcommand};
use codedom::dom::{Indent, Listing, Parse, ParserWorker};
use codedom::lang::{CodeLine, Error, Options, Preprocessor};
use linefeed::{Interface, ReadResult, Signal};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codedom")]
#[command(version)]
#[command(about = "Tokenize and parse structured BASIC source")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keep lines ending in " _" separate
    #[arg(long, global = true)]
    no_continuation: bool,

    /// Spaces per nesting level in listings
    #[arg(long, global = true, default_value_t = 4)]
    indent: usize,

    /// Indent listings with tabs
    #[arg(long, global = true)]
    tabs: bool,

    /// More logging; repeat for trace output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse source and print the canonical listing
    Parse {
        /// Input file (reads stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Print the tokens of every cleaned line
    Tokens {
        /// Input file (reads stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Tokenize and parse lines as they are typed
    Repl,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options::default();
        if self.no_continuation {
            options.continuation = None;
        }
        options
    }

    fn listing(&self) -> Listing {
        if self.tabs {
            Listing::new(Indent::Tab)
        } else {
            Listing::new(Indent::Spaces(self.indent))
        }
    }
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl-C handler: {}", error);
    }
    let options = cli.options();
    let listing = cli.listing();
    let result = match &cli.command {
        Commands::Parse { file } => parse(file.as_ref(), options, listing, interrupted),
        Commands::Tokens { file } => tokens(file.as_ref(), options, interrupted),
        Commands::Repl => repl(options, listing),
    };
    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open(file: Option<&PathBuf>) -> Result<Box<dyn BufRead>, Error> {
    match file {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::new(f))),
            Err(error) => {
                let msg = match error.kind() {
                    ErrorKind::NotFound => format!("FILE NOT FOUND {}", path.display()),
                    _ => error.to_string(),
                };
                Err(codedom::error!(IoFailure; msg))
            }
        },
    }
}

fn parse(
    file: Option<&PathBuf>,
    options: Options,
    listing: Listing,
    interrupted: Arc<AtomicBool>,
) -> io::Result<ExitCode> {
    let reader = match open(file) {
        Ok(reader) => reader,
        Err(error) => {
            print_error(&error);
            return Ok(ExitCode::FAILURE);
        }
    };
    let parse = ParserWorker::with_options(options)
        .with_interrupt(interrupted)
        .parse(reader);
    print!("{}", listing.render(&parse.unit));
    report(&parse);
    if parse.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn tokens(
    file: Option<&PathBuf>,
    options: Options,
    interrupted: Arc<AtomicBool>,
) -> io::Result<ExitCode> {
    let reader = match open(file) {
        Ok(reader) => reader,
        Err(error) => {
            print_error(&error);
            return Ok(ExitCode::FAILURE);
        }
    };
    let lines = match Preprocessor::new(options)
        .with_interrupt(interrupted)
        .stream(reader)
    {
        Ok(lines) => lines,
        Err(error) => {
            print_error(&error);
            return Ok(ExitCode::FAILURE);
        }
    };
    for line in lines {
        let line = CodeLine::new(line.number, &line.text);
        println!("{:>5} {}", line.number(), line);
        for token in line.tokens() {
            println!("      {:?}", token);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn repl(options: Options, listing: Listing) -> io::Result<ExitCode> {
    let interface = Interface::new("codedom")?;
    interface.set_prompt("> ")?;
    interface.set_report_signal(Signal::Interrupt, true);
    let preprocessor = Preprocessor::new(options.clone());
    loop {
        let string = match interface.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if let Some(text) = preprocessor.line(&string) {
            let line = CodeLine::new(1, &text);
            for token in line.tokens() {
                interface.write_fmt(format_args!("{:?}\n", token))?;
            }
            let parse = ParserWorker::with_options(options.clone()).parse_str(&text);
            interface.write_fmt(format_args!("{}", listing.render(&parse.unit)))?;
            for error in &parse.diagnostics {
                interface.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint(error.to_string())
                ))?;
            }
            interface.add_history_unique(string);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_error(error: &Error) {
    eprintln!("{}", Style::new().bold().paint(error.to_string()));
}

fn report(parse: &Parse) {
    for error in &parse.diagnostics {
        print_error(error);
        let line = error
            .line_number()
            .and_then(|number| parse.lines.iter().find(|l| l.number() == number));
        if let Some(line) = line {
            eprintln!("    {}", decorate(line.source(), &error.column()));
        }
    }
}

// Underlines the columns of an error in the source line.
fn decorate(source: &str, column: &std::ops::Range<usize>) -> String {
    let style = Style::new().underline();
    let prefix = style.prefix().to_string();
    let suffix = style.suffix().to_string();
    let mut out = String::new();
    let mut under_on = false;
    let mut count = 0;
    for (index, ch) in source.chars().enumerate() {
        let do_under = column.contains(&index);
        if do_under != under_on {
            out.push_str(if do_under { &prefix } else { &suffix });
            under_on = do_under;
        }
        out.push(ch);
        count = index + 1;
    }
    if column.start == count && column.is_empty() {
        out.push_str(&prefix);
        out.push(' ');
        under_on = true;
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}
