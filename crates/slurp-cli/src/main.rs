use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

use slurp_core::config::{self, CONFIG_FILE_NAME, SlurpConfig};
use slurp_core::ir::OperationDescriptor;
use slurp_core::parse::read_api_doc;
use slurp_core::store::{DescriptorStore, SubmitOutcome};
use slurp_core::transform::is_valid_category;
use slurp_core::{CodeGenerator, GeneratedFile};
use slurp_python_client::PythonClientGenerator;

#[derive(Parser)]
#[command(
    name = "slurp",
    about = "Turn copied API documentation into client methods",
    version
)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a documentation snippet and store it under a category
    Add {
        /// Category the operation belongs to
        #[arg(short, long)]
        category: String,

        /// Snippet file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Descriptor directory (defaults to the configured store)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Replace an existing, different descriptor without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Parse a documentation snippet and print the descriptor
    Parse {
        /// Snippet file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Generate client methods from stored descriptors
    Generate {
        /// Descriptor directory (defaults to the configured store)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a new slurp configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Add {
            category,
            input,
            dir,
            yes,
        } => cmd_add(&category, input, dir, yes),

        Commands::Parse { input, format } => cmd_parse(input, format),

        Commands::Generate { dir, output } => cmd_generate(dir, output),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "slurp", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn load_config() -> Result<SlurpConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?.unwrap_or_default())
}

fn read_snippet(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snippet from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_snippet(input: Option<&PathBuf>, cfg: &SlurpConfig) -> Result<OperationDescriptor> {
    let snippet = read_snippet(input)?;
    read_api_doc(&snippet, &cfg.parse_options()).context("failed to read API info")
}

fn ask_replace(existing: &OperationDescriptor) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "\"{}\" already exists under category \"{}\". Replace?",
            existing.title, existing.category
        ))
        .default(true)
        .interact()?;
    Ok(answer)
}

fn cmd_add(category: &str, input: Option<PathBuf>, dir: Option<PathBuf>, yes: bool) -> Result<()> {
    if !is_valid_category(category) {
        anyhow::bail!("invalid category {category:?}");
    }

    let cfg = load_config()?;
    let mut descriptor = parse_snippet(input.as_ref(), &cfg)?;
    descriptor.category = category.to_string();

    let store = DescriptorStore::new(dir.unwrap_or_else(|| PathBuf::from(&cfg.store.dir)));
    let mut prompt_error = None;
    let outcome = store.submit(&descriptor, |existing| {
        if yes {
            return true;
        }
        match ask_replace(existing) {
            Ok(answer) => answer,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    })?;
    if let Some(e) = prompt_error {
        return Err(e.context("failed to ask for confirmation"));
    }

    let path = store.path_for(&descriptor.identifier);
    match outcome {
        SubmitOutcome::Written | SubmitOutcome::Replaced { .. } => {
            eprintln!("Wrote function \"{}\" to {}", descriptor.title, path.display());
        }
        SubmitOutcome::OverwroteCorrupt => {
            eprintln!(
                "\"{}\" already existed but appeared to be corrupted; overwrote {}",
                descriptor.title,
                path.display()
            );
        }
        SubmitOutcome::Identical => {
            eprintln!(
                "\"{}\" already exists and is identical to the provided information. Skipping...",
                descriptor.title
            );
        }
        SubmitOutcome::Kept { existing_category } => {
            eprintln!(
                "Kept the existing \"{}\" under category \"{existing_category}\"",
                descriptor.title
            );
        }
    }
    Ok(())
}

fn cmd_parse(input: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let cfg = load_config()?;
    let descriptor = parse_snippet(input.as_ref(), &cfg)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&descriptor)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&descriptor)?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

fn write_file(base: &Path, file: &GeneratedFile) -> Result<()> {
    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(base, &file.content).with_context(|| format!("failed to write {}", base.display()))?;
    eprintln!("  wrote {}", base.display());
    Ok(())
}

fn cmd_generate(dir: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = load_config()?;
    let store = DescriptorStore::new(dir.unwrap_or_else(|| PathBuf::from(&cfg.store.dir)));
    let descriptors = store
        .load_all()
        .with_context(|| format!("failed to load descriptors from {}", store.dir().display()))?;

    if descriptors.is_empty() {
        eprintln!("No descriptors found in {}.", store.dir().display());
        return Ok(());
    }

    let files = PythonClientGenerator
        .generate(&descriptors, &cfg.client)
        .context("failed to generate client methods")?;

    for file in &files {
        match &output {
            Some(path) => write_file(path, file)?,
            None => print!("{}", file.content),
        }
    }
    eprintln!("Generated {} methods.", descriptors.len());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
