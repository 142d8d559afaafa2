//! Prim CLI

use clap::{Parser, Subcommand};
use prim::interp::{load_ast, InterpConfig, Interpreter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "prim", version, about = "Prim - a small expression language")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML file with interpreter settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum nested evaluation depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Spelling of the true literal
    #[arg(long, global = true)]
    true_keyword: Option<String>,

    /// Spelling of the false literal
    #[arg(long, global = true)]
    false_keyword: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a source file and print its value
    Run {
        /// Source file to run
        file: PathBuf,
    },
    /// Evaluate an expression given on the command line
    Eval {
        /// Expression source
        expr: String,
    },
    /// Evaluate a JSON-encoded AST
    EvalAst {
        /// JSON file holding the tree
        file: PathBuf,
    },
    /// Parse and dump AST as JSON (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
    /// Start an interactive session
    Repl,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Run { file } => run_file(&file, config),
        Command::Eval { expr } => eval_inline(&expr, config),
        Command::EvalAst { file } => eval_ast_file(&file, config),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
        Command::Repl => start_repl(config),
    };

    if let Err(e) = result {
        // Diagnostics were already rendered; this is for everything else
        if !e.is::<Reported>() {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}

/// Log filter comes from `PRIM_LOG`, defaulting to warnings only
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("PRIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Config file first, then command-line overrides
fn build_config(cli: &Cli) -> Result<InterpConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => InterpConfig::load(path)?,
        None => InterpConfig::default(),
    };
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(t) = &cli.true_keyword {
        config.keywords.true_lit = t.clone();
    }
    if let Some(f) = &cli.false_keyword {
        config.keywords.false_lit = f.clone();
    }
    config.validate()?;
    tracing::debug!(?config, "interpreter configuration");
    Ok(config)
}

/// Marker error: a diagnostic has already been printed
#[derive(Debug)]
struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evaluation failed")
    }
}

impl std::error::Error for Reported {}

fn evaluate(filename: &str, source: &str, config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut interp = Interpreter::with_config(config);
    match prim::eval_source(&mut interp, source) {
        Ok(value) => {
            println!("{value}");
            Ok(())
        }
        Err(err) => {
            err.report(filename, source);
            Err(Box::new(Reported))
        }
    }
}

fn run_file(path: &Path, config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    evaluate(&path.display().to_string(), &source, config)
}

fn eval_inline(expr: &str, config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    evaluate("<eval>", expr, config)
}

fn eval_ast_file(path: &Path, config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let expr = load_ast(&text)?;
    let value = Interpreter::with_config(config).run(&expr)?;
    println!("{value}");
    Ok(())
}

fn parse_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    match prim::parse_source(&filename, &source) {
        Ok(ast) => {
            println!("{}", serde_json::to_string_pretty(&ast)?);
            Ok(())
        }
        Err(err) => {
            prim::error::report_error(&filename, &source, &err);
            Err(Box::new(Reported))
        }
    }
}

fn tokenize_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let tokens = prim::lexer::tokenize(&source)?;
    for (tok, span) in &tokens {
        println!("{:?} @ {}..{}", tok, span.start, span.end);
    }

    Ok(())
}

fn start_repl(config: InterpConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = prim::repl::Repl::new(config)?;
    repl.run()?;
    Ok(())
}
