use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use pkgreview::summary::{CompletionReport, ConfigSummary};
use pkgreview::{FileGenerator, ReplacementTable, ReviewConfig, TemplateEngine, TemplateLayout};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root holding config.yml, templates/ and the generated files
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to the YAML configuration file (default: <root>/config.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Templates directory (default: <root>/templates)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Base output directory (default: <root>)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Dry run mode - render but don't write files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Running inside the review template repository itself
    #[arg(long, global = true)]
    source_repo: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an example config.yml and templates
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Render templates into the output directory (default command)
    Generate,
}

fn log_level_from_verbose(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level_from_verbose(cli.verbose))
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Init { ref path }) => init_project(path, &cli),
        Some(Commands::Generate) | None => generate(&cli),
    }
}

fn resolve(root: &Path, path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_ref().map(|p| root.join(p))
}

fn build_layout(cli: &Cli) -> TemplateLayout {
    let mut layout = TemplateLayout::new(&cli.root);
    if let Some(config) = resolve(&cli.root, &cli.config) {
        layout = layout.with_config_file(config);
    }
    if let Some(templates) = resolve(&cli.root, &cli.templates) {
        layout = layout.with_templates_dir(templates);
    }
    if let Some(output) = resolve(&cli.root, &cli.output) {
        layout = layout.with_output_dir(output);
    }
    layout
}

fn generate(cli: &Cli) -> Result<()> {
    let layout = build_layout(cli);

    if !layout.config_file.exists() {
        let shown = layout
            .config_file
            .strip_prefix(&cli.root)
            .unwrap_or(&layout.config_file);
        bail!(
            "{} not found. Run `pkgreview init` first.",
            shown.display()
        );
    }

    info!("Loading config from {:?}", layout.config_file);
    let config = ReviewConfig::load(&layout.config_file).context("Failed to load config")?;
    let table = ReplacementTable::build(&config).context("Invalid config")?;

    println!("{}", ConfigSummary::from_table(&table));

    if cli.dry_run {
        info!("=== DRY RUN MODE ===");
    }

    let generator = FileGenerator::new(TemplateEngine::new(), &table, cli.dry_run);
    let generated = generator
        .generate(&layout)
        .context("Failed to generate files")?;

    println!();
    print!(
        "{}",
        CompletionReport {
            output_dir: &layout.output_dir,
            generated: &generated,
            dry_run: cli.dry_run,
            source_repository: cli.source_repo,
        }
    );

    Ok(())
}

const EXAMPLE_CONFIG: &str = r#"organization:
  name: "My Organization"
  github_url: "https://github.com/my-org"

template:
  package: "mytemplate"
  citation_function: "cite_mytemplate"

standards:
  license: "MIT"
  style_guide: "tidyverse"
  indent_size: 2
  max_line_length: 80

analytics:
  enabled: false
  type: "plausible"
  domain: "example.org"
  script: "https://plausible.io/js/script.js"

funding:
  enabled: false
  use_default: true
  default_text: "This work is supported by My Organization."
  custom_text: ""
"#;

const EXAMPLE_GUIDE: &str = r#"# {{ORGANIZATION_NAME}} package review guide

Packages are built from the `{{TEMPLATE_PACKAGE}}` template and cite it with
`{{CITATION_FUNCTION}}()`. Source: {{GITHUB_URL}}

## Standards

- License: {{LICENSE}}
- Style guide: {{STYLE_GUIDE}}
- Indentation: {{INDENT_SIZE}} spaces
- Maximum line length: {{MAX_LINE_LENGTH}}
{{#if ANALYTICS_ENABLED}}
## Analytics

Sites use {{ANALYTICS_TYPE}} analytics for {{ANALYTICS_DOMAIN}}.
{{/if}}{{#if FUNDING_ENABLED}}
## Funding

{{FUNDING_TEXT}}
{{/if}}"#;

const EXAMPLE_COMMAND: &str = r#"# Review package

Review the package against the {{ORGANIZATION_NAME}} standards:
{{LICENSE}} license, {{STYLE_GUIDE}} style, {{INDENT_SIZE}}-space indents.
"#;

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        info!("Keeping existing {:?}", path);
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

fn init_project(path: &Path, cli: &Cli) -> Result<()> {
    info!("Initializing review templates at {:?}", path);

    if cli.config.is_some() || cli.templates.is_some() || cli.output.is_some() {
        warn!("init always writes the default layout; --config, --templates and --output are ignored");
    }

    let config_path = path.join(pkgreview::config::DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    let layout = TemplateLayout::new(path);
    let commands_dir = layout.commands_template_dir();
    std::fs::create_dir_all(&commands_dir)
        .with_context(|| format!("Failed to create {:?}", commands_dir))?;

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    write_if_absent(&layout.guide_template(), EXAMPLE_GUIDE)?;
    write_if_absent(
        &layout.commands_template_dir().join("review-package.md.template"),
        EXAMPLE_COMMAND,
    )?;

    info!("✓ Project initialized successfully!");
    info!("  Edit config.yml, then run: pkgreview");

    Ok(())
}
