use clap::{Parser, Subcommand};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::PathBuf;
use vitrine::{check, config, location, output, preview};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Check and preview a fragment-routed practice website")]
#[command(long_about = "\
Check and preview a fragment-routed practice website

The site is a single HTML shell plus one fragment per page. The client-side
router maps /<page> to the fragment registered for <page> in site.toml and
swaps it into the shell; unknown pages fall back to home.

Site structure:

  site/
  ├── site.toml                  # Routes, SEO, categories, structured data
  └── pages/
      ├── home.html              # Fragment for /
      ├── tarifs.html            # Fragment for /tarifs
      └── lifting-mammaire.html  # Fragment for /lifting-mammaire

Run 'vitrine gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site directory (holds site.toml and the fragments)
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Log router activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate site.toml and verify every registered fragment exists
    Check,
    /// List registered pages with their fragments and categories
    Routes,
    /// Print the page key the router resolves a URL path to
    Resolve {
        /// URL path, e.g. /tarifs or /cabinet/tarifs.html
        path: String,
        /// Base path prefix the site is served under
        #[arg(long, default_value = "")]
        base: String,
    },
    /// Load one page through the router and show the resulting document
    Render {
        /// Page key
        page: String,
        /// Base path prefix the site is served under
        #[arg(long, default_value = "")]
        base: String,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

/// Plain stderr logger for `--verbose`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.site.display());
            let site_config = config::load_config(&cli.site)?;
            let report = check::check_site(&cli.site, &site_config)?;
            output::print_check_output(&report);
            if !report.is_ok() {
                return Err(format!(
                    "{} route(s) point at missing fragments",
                    report.missing.len()
                )
                .into());
            }
        }
        Command::Routes => {
            let context = config::load_config(&cli.site)?.into_context()?;
            output::print_routes_output(&context);
        }
        Command::Resolve { path, base } => {
            let context = config::load_config(&cli.site)?.into_context()?;
            let page = location::page_from_path(&path, &base);
            let registered = context.routes.contains(&page);
            output::print_resolve_output(&path, &page, registered);
        }
        Command::Render { page, base } => {
            let context = config::load_config(&cli.site)?.into_context()?;
            let summary = preview::render_page(&cli.site, context, &page, &base)?;
            output::print_render_output(&summary);
            if !summary.loaded() {
                return Err(format!("page '{}' failed to load", summary.requested).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
