// ABOUTME: Main entry point for the slidemark program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use slidemark::{
    build_presentation, generate_presentation, watch_markdown, write_presentation, Config,
    PresentationStats, SlideError, Theme, WatchConfig, DEMO_MARKDOWN,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an HTML presentation from markdown
    Generate(GenerateArgs),

    /// List the available themes
    Themes,

    /// Print size statistics for a markdown presentation
    Stats(StatsArgs),

    /// Watch a markdown file and regenerate the presentation on change
    Watch(WatchArgs),

    /// Write the built-in demo presentation
    Demo(DemoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Theme key (see `themes`)
    #[arg(long)]
    theme: Option<String>,

    /// Document title, defaults to the first top-level heading
    #[arg(long)]
    title: Option<String>,

    /// Inline the Reveal.js assets for a self-contained file
    #[arg(long)]
    embed: bool,

    /// Print size statistics after generating
    #[arg(long)]
    stats: bool,
}

#[derive(Args)]
struct StatsArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    #[arg(long)]
    theme: Option<String>,
}

#[derive(Args)]
struct WatchArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    #[arg(long)]
    theme: Option<String>,

    /// Serve the output directory over HTTP
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value_t = 8080)]
    port: u16,

    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,
}

#[derive(Args)]
struct DemoArgs {
    /// Path to output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    theme: Option<String>,
}

/// Resolve an explicit `--theme` strictly; the configured default is lenient.
fn checked_theme(theme: &Option<String>) -> slidemark::Result<Option<&str>> {
    match theme.as_deref() {
        Some(key) => Theme::find(key).map(|_| Some(key)),
        None => Ok(None),
    }
}

fn run(command: Commands, config: &Config) -> slidemark::Result<()> {
    match command {
        Commands::Generate(args) => {
            let theme = checked_theme(&args.theme)?;
            let embed = args.embed.then_some(true);
            let options = config.presentation_options(theme, args.title, embed);
            let output = args.output.unwrap_or_else(|| config.default_output.clone());

            if output == args.input {
                return Err(SlideError::ConfigError(format!(
                    "Output {:?} would overwrite the input",
                    output
                )));
            }

            let presentation = generate_presentation(&args.input, &options)?;
            write_presentation(&presentation.html, &output)?;
            println!(
                "Presentation generated successfully: {:?} ({} slides)",
                output,
                presentation.slide_count()
            );

            if args.stats {
                let stats =
                    PresentationStats::compute(&presentation.html, presentation.slide_count());
                println!("{}", stats.report());
            }
            Ok(())
        }
        Commands::Themes => {
            for theme in Theme::all() {
                println!("{:<14} {}", theme.key, theme.name);
            }
            Ok(())
        }
        Commands::Stats(args) => {
            let theme = checked_theme(&args.theme)?;
            let options = config.presentation_options(theme, None, None);
            let presentation = generate_presentation(&args.input, &options)?;
            let stats = PresentationStats::compute(&presentation.html, presentation.slide_count());
            println!("{}", stats.report());
            Ok(())
        }
        Commands::Watch(args) => {
            let theme = checked_theme(&args.theme)?;
            let watch_config = WatchConfig {
                markdown_path: args.input,
                html_output: args.output,
                options: config.presentation_options(theme, None, None),
                debounce_ms: args.debounce_ms,
                serve: args.serve,
                port: args.port,
            };
            watch_markdown(watch_config)
        }
        Commands::Demo(args) => {
            let theme = checked_theme(&args.theme)?;
            let options = config.presentation_options(theme, None, None);
            let output = args.output.unwrap_or_else(|| config.default_output.clone());

            let presentation = build_presentation(DEMO_MARKDOWN, &options)?;
            write_presentation(&presentation.html, &output)?;
            println!("Demo presentation written to {:?}", output);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::from_env();
    let result = config.validate().and_then(|_| match cli.command {
        Some(command) => {
            info!("Using default theme {}", config.default_theme);
            run(command, &config)
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
