use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use codescribe::ai::AIClient;
use codescribe::analysis::ProjectAnalyzer;
use codescribe::archive;
use codescribe::config::Config;
use codescribe::docs::{self, Documentation, StructurePayload};
use codescribe::github::{GithubClient, RepoRef};

#[derive(Parser)]
#[command(name = "codescribe", version, about = "Generate technical documentation for a code project")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a local project directory or ZIP archive
    Analyze {
        /// Path to a project directory or a .zip file
        path: PathBuf,
        /// Extra instructions forwarded to the overview prompt
        #[arg(long, default_value = "")]
        instructions: String,
        /// Print the project model as JSON and skip generation
        #[arg(long)]
        structure_only: bool,
        /// Emit the full result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Download a GitHub repository and analyze it
    Repo {
        /// Repository as owner/name or a GitHub URL
        reference: String,
        /// Extra instructions forwarded to the overview prompt
        #[arg(long, default_value = "")]
        instructions: String,
        /// Print the project model as JSON and skip generation
        #[arg(long)]
        structure_only: bool,
        /// Emit the full result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            path,
            instructions,
            structure_only,
            json,
        } => {
            let config = load_config(structure_only)?;

            if path.extension().map(|ext| ext == "zip").unwrap_or(false) {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("could not read {}", path.display()))?;
                if bytes.len() as u64 > config.analysis.max_archive_bytes {
                    bail!(
                        "archive exceeds the configured limit of {} bytes",
                        config.analysis.max_archive_bytes
                    );
                }
                let extracted = archive::extract_zip(&bytes)?;
                run(
                    &config,
                    extracted.project_root().to_path_buf(),
                    &instructions,
                    structure_only,
                    json,
                )
                .await
            } else {
                run(&config, path, &instructions, structure_only, json).await
            }
        }
        Command::Repo {
            reference,
            instructions,
            structure_only,
            json,
        } => {
            let config = load_config(structure_only)?;
            let repo: RepoRef = reference.parse()?;
            let client = GithubClient::new()?;

            if !client.repository_exists(&repo).await? {
                bail!("repository {}/{} not found or not accessible", repo.owner, repo.name);
            }

            println!(
                "{} {}/{}",
                "Downloading".green().bold(),
                repo.owner,
                repo.name
            );
            let bytes = client.download_archive(&repo).await?;
            if bytes.len() as u64 > config.analysis.max_archive_bytes {
                bail!(
                    "repository archive exceeds the configured limit of {} bytes",
                    config.analysis.max_archive_bytes
                );
            }

            let extracted = archive::extract_zip(&bytes)?;
            run(
                &config,
                extracted.project_root().to_path_buf(),
                &instructions,
                structure_only,
                json,
            )
            .await
        }
    }
}

fn load_config(structure_only: bool) -> Result<Config> {
    if structure_only {
        Config::load_or_default()
    } else {
        Config::ensure_config_exists()
    }
}

async fn run(
    config: &Config,
    root: PathBuf,
    instructions: &str,
    structure_only: bool,
    json: bool,
) -> Result<()> {
    if !config.display.color_output {
        colored::control::set_override(false);
    }

    let started = Instant::now();
    let analyzer = ProjectAnalyzer::with_config(&root, &config.analysis);
    let analysis = analyzer.analyze()?;

    if config.display.show_timings {
        eprintln!(
            "{} {} files in {:.2?}",
            "Analyzed".green().bold(),
            analysis.structure.files.len(),
            started.elapsed()
        );
    }

    if structure_only {
        let payload = StructurePayload::from_structure(&analysis.structure);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let client = AIClient::new(config.ai.clone());
    let documentation = docs::generate_documentation(&client, &analysis, instructions)
        .await
        .context("documentation generation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&documentation)?);
    } else {
        print_documentation(&documentation);
    }

    Ok(())
}

fn print_documentation(documentation: &Documentation) {
    let stats = &documentation.project_overview.statistics;

    println!("{}", "Project Overview".green().bold());
    println!("{}\n", documentation.project_overview.overview);

    println!("{}", "Component Analysis".green().bold());
    println!("{}\n", documentation.component_analysis);

    println!("{}", "Features & Limitations".green().bold());
    println!("{}\n", documentation.project_analysis);

    println!("{}", "Statistics".blue().bold());
    println!("  files: {}", stats.total_files);
    println!("  entry points: {}", stats.entry_points.join(", "));
    for (group, count) in &stats.file_categories {
        println!("  {}: {}", group, count);
    }
}
