use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hearth::config::{self, Configuration};
use hearth::site::{self, Toolchain};
use hearth::{output, scan};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Blog-aware static site generator")]
#[command(long_about = "\
Blog-aware static site generator

Your source tree is the site. Files that start with front matter are
rendered, everything else is copied as-is, and any folder holding a .blog
marker becomes a blog with a generated, newest-first index.

Source structure:

  site/
  ├── _config.toml          # Site config (optional, never published)
  ├── _layouts/             # Reserved at the top level: never published
  ├── _site/                # Build output; must not exist before a build
  ├── about.md              # ---/title: About/--- → rendered page
  ├── logo.png              # Binary extension → copied verbatim
  ├── .htaccess             # Hidden → never published
  └── blog/
      ├── .blog             # Marks blog/ as a blog
      ├── 2012-hello.md     # date: 2012-03-03 → listed in blog/index.html
      └── draft.md          # published: false → skipped entirely

Run 'hearth gen-config' to generate a documented _config.toml.")]
#[command(version)]
struct Cli {
    /// Site root
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Config file (default: <source>/_config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ScanArgs {
    /// Print the inventory as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Drop raw HTML embedded in markdown
    #[arg(long)]
    safe: bool,

    /// Fail when a blog post has no parseable date
    #[arg(long)]
    strict_dates: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the source tree without writing anything
    Scan(ScanArgs),
    /// Scan, render, and export the site
    Build(BuildArgs),
    /// Print a stock _config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose.log_level_filter());

    match cli.command {
        Command::Scan(args) => {
            let config = Configuration::load(&cli.source, cli.config.as_deref())?;
            let inventory = scan::scan(&config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&inventory)?);
            } else {
                output::print_scan_output(&inventory);
            }
        }
        Command::Build(args) => {
            let config = Configuration::load_with(&cli.source, cli.config.as_deref(), |options| {
                options.safe |= args.safe;
                options.strict_dates |= args.strict_dates;
            })?;
            println!(
                "==> Building {} → {}",
                config.root().display(),
                config.output_root().display()
            );
            let report = site::build(&config, &Toolchain::default())?;
            output::print_build_output(&report, &config.output_root());
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `[level]  message` lines on stderr, filtered by `-v`/`-q`.
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let level = format!("[{}]", record.level()).to_lowercase();
            writeln!(buf, "{:8} {}", level, record.args())
        })
        .init();
}
