use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use complexity_cli::cli::{Cli, Commands};
use complexity_cli::{commands, completions, load_config};
use complexity_common::init_tracing;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        completions::generate(shell);
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(&cli.log_level)?;
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Infer {
            input,
            output,
            max_samples,
            model,
        } => {
            let args = commands::infer::InferArgs {
                input,
                output,
                max_samples,
                model,
            };
            commands::infer::run(config, args).await?;
        }
        Commands::Evaluate {
            input,
            scoring,
            plot,
            latex,
            json,
        } => {
            let args = commands::evaluate::EvaluateArgs {
                input,
                scoring,
                plot,
                latex,
                json,
            };
            print!("{}", commands::evaluate::run(&config, args)?);
        }
        Commands::Canonicalize { files, check } => {
            if check {
                let equal = commands::canonicalize::check(&files)?;
                println!("{}", if equal { "identical" } else { "different" });
                if !equal {
                    return Ok(ExitCode::from(1));
                }
            } else {
                print!("{}", commands::canonicalize::render(&files)?);
            }
        }
        Commands::Normalize { labels } => {
            print!("{}", commands::normalize::render(&labels));
        }
        Commands::Completions { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
