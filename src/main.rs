use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process,
    rc::Rc,
    time::Instant,
};

use clap::{Parser, Subcommand};
use tracing::info;

use plc::{
    analyzer::analyzer::analyze,
    ast::ast::Source,
    errors::errors::Error,
    generator::generator::generate,
    interpreter::interpreter::Interpreter,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    render_error,
};

#[derive(Parser)]
#[command(name = "plc", about = "Interpreter and Java generator for plc programs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, e.g. `debug` or `plc::interpreter=trace`. Defaults to RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and exit with the value `main` returns
    Run { file: PathBuf },
    /// Parse and analyze a program without running it
    Check { file: PathBuf },
    /// Print the Java translation of a program
    Emit { file: PathBuf },
    /// Print the tokens of a program
    Tokens { file: PathBuf },
}

fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// A loaded source file.
struct Input {
    name: String,
    contents: String,
}

impl Input {
    fn read(path: &Path) -> Result<Input, String> {
        let contents = read_to_string(path)
            .map_err(|error| format!("Error: could not read {} ({})\n", path.display(), error))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Input { name, contents })
    }

    fn report(&self, error: &Error) -> String {
        render_error(error, &self.contents, &self.name)
    }
}

fn lex(input: &Input) -> Result<Vec<Token>, Error> {
    let start = Instant::now();
    let tokens = tokenize(&input.contents, Some(input.name.clone()))?;
    info!(count = tokens.len(), elapsed = ?start.elapsed(), "tokenized");
    Ok(tokens)
}

/// Tokenizes, parses and analyzes `input`.
fn front_end(input: &Input) -> Result<Source, Error> {
    let tokens = lex(input)?;

    let start = Instant::now();
    let mut source = parse(tokens, Rc::new(input.name.clone()))?;
    info!(
        globals = source.globals.len(),
        functions = source.functions.len(),
        elapsed = ?start.elapsed(),
        "parsed"
    );

    let start = Instant::now();
    analyze(&mut source)?;
    info!(elapsed = ?start.elapsed(), "analyzed");

    Ok(source)
}

/// Runs `command`, returning the process exit status or a rendered report.
fn execute(command: &Commands) -> Result<i32, String> {
    match command {
        Commands::Run { file } => {
            let input = Input::read(file)?;
            let source = front_end(&input).map_err(|error| input.report(&error))?;

            let start = Instant::now();
            let mut interpreter = Interpreter::new();
            let code = interpreter
                .run(&source)
                .map_err(|error| input.report(&error))?;
            info!(code, elapsed = ?start.elapsed(), "evaluated");

            Ok(code)
        }
        Commands::Check { file } => {
            let input = Input::read(file)?;
            front_end(&input).map_err(|error| input.report(&error))?;
            println!("{}: ok", input.name);
            Ok(0)
        }
        Commands::Emit { file } => {
            let input = Input::read(file)?;
            let source = front_end(&input).map_err(|error| input.report(&error))?;

            let start = Instant::now();
            let java = generate(&source);
            info!(elapsed = ?start.elapsed(), "generated");

            print!("{}", java);
            Ok(0)
        }
        Commands::Tokens { file } => {
            let input = Input::read(file)?;
            let tokens = lex(&input).map_err(|error| input.report(&error))?;
            for token in tokens {
                println!(
                    "{:>5} {:<10} {}",
                    token.span.start.0,
                    format!("{:?}", token.kind),
                    token.value
                );
            }
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match execute(&cli.command) {
        Ok(code) => process::exit(code),
        Err(report) => {
            eprint!("{}", report);
            process::exit(1);
        }
    }
}
