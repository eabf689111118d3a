use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};

/// Compile a path program and run it on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "tsp", version)]
struct Cli {
    /// Print the instruction listing and trace every step to stderr
    #[arg(long)]
    debug: bool,

    /// Stop at the first runtime error instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Source file
    file: PathBuf,
}

fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout belongs to the program
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = tsp::Config {
        strict: cli.strict,
        debug: cli.debug,
    };

    let file = File::open(&cli.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to open {}", cli.file.display()))?;
    let name = cli.file.display().to_string();
    let compilation = tsp::compile_named(&name, file, config)
        .wrap_err("failed to compile the source")?;

    for warning in compilation.warnings {
        eprintln!("{:?}", miette::Report::new(warning));
    }

    compilation.program.run_stdio()?;
    Ok(())
}
