use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use fmtguess::input::parse_sample_file;
use fmtguess::render::{LOOP_SEPARATOR, PROMPT, render_json, render_text};
use fmtguess::{DEFAULT_PLACEHOLDER, Engine, FormatGuesser, Result, build_report};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Parser)]
#[command(name = "fmtguess")]
#[command(about = "Infer format-specification expressions from formatted samples", long_about = None)]
struct Cli {
    /// Name used inside the braces of every expression.
    #[arg(long, global = true, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// Log engine decisions to stderr (overrides RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single sample.
    Analyze {
        sample: String,

        #[arg(long)]
        json: bool,
    },

    /// Prompt for samples until quit, exit, q or end of input.
    Interactive,

    /// Analyze every sample in a file, one per line.
    Batch {
        #[arg(long)]
        input: String,

        #[arg(short = 'o', long)]
        out: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn check_placeholder(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_alphanumeric() || c == '_') {
        bail!("placeholder must be an identifier, got {:?}", name);
    }
    Ok(())
}

fn interactive(engine: &Engine<FormatGuesser>, placeholder: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{PROMPT}")?;

    for line in stdin.lock().lines() {
        let line = line.context("read sample from stdin")?;
        // Padding is significant, so only the line ending is dropped.
        let sample = line.strip_suffix('\r').unwrap_or(&line);
        if EXIT_WORDS.contains(&sample.trim().to_lowercase().as_str()) {
            return Ok(());
        }

        let report = build_report(engine, sample, placeholder);
        writeln!(stdout, "\n{}", render_text(&report))?;
        writeln!(stdout, "{LOOP_SEPARATOR}")?;
        writeln!(stdout, "{PROMPT}")?;
    }

    writeln!(stdout)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    check_placeholder(&cli.placeholder)?;

    let engine = Engine::<FormatGuesser>::default();
    let placeholder = cli.placeholder.as_str();

    match cli.cmd.unwrap_or(Commands::Interactive) {
        Commands::Analyze { sample, json } => {
            let report = build_report(&engine, &sample, placeholder);
            if json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
        }
        Commands::Interactive => interactive(&engine, placeholder)?,
        Commands::Batch { input, out, json } => {
            let samples = parse_sample_file(&input)?;
            info!(count = samples.len(), input = input.as_str(), "analyzing samples");

            let reports: Vec<_> = samples
                .iter()
                .map(|sample| {
                    debug!(line = sample.line, "analyzing sample");
                    build_report(&engine, &sample.text, placeholder)
                })
                .collect();

            let rendered = if json {
                render_json(&reports)? + "\n"
            } else {
                reports.iter().map(render_text).collect::<Vec<_>>().join("\n")
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, rendered).with_context(|| format!("write {}", out))?;
                    println!("Wrote {}", out);
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}
