use clap::{Parser, Subcommand};
use simple_lightbox::config;
use simple_lightbox::content::{self, Gallery};
use simple_lightbox::controller::LightboxController;
use simple_lightbox::effects::RecordingHost;
use simple_lightbox::output;
use simple_lightbox::render;
use simple_lightbox::replay;
use simple_lightbox::router::{Page, RouteEvent, Site};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-lightbox")]
#[command(about = "Lightbox controller for photo portfolio galleries")]
#[command(long_about = "\
Lightbox controller for photo portfolio galleries

Loads portfolio content from a gallery JSON file and drives the lightbox
the way a browser would: key presses, swipes, taps, and control clicks go
through the input adapter into the session, and the resulting state is
printed after every step.

Gallery file:

  {
    \"items\": [
      {
        \"title\": \"Bridal\",
        \"category\": \"bridal\",
        \"images\": [
          { \"src\": \"/img/bridal-1.jpg\", \"alt\": \"Bride in natural light\",
            \"caption\": \"Morning prep\" }
        ]
      }
    ]
  }

Replay script (one event per line, # for comments):

  page portfolio
  open Bridal 1        # item by title or 1-based position, optional start
  key ArrowRight
  swipe -80            # negative = leftward = next
  tap                  # short touch on the image toggles zoom
  click thumb:0
  key shift+Tab
  key Escape

Run 'simple-lightbox gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Lightbox config file (stock defaults when absent)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log transitions and effects to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strictly validate a gallery file and list its contents
    Check {
        /// Gallery JSON file
        gallery: PathBuf,
    },
    /// Replay an event script against a gallery
    Replay {
        /// Gallery JSON file
        gallery: PathBuf,
        /// Event script
        script: PathBuf,
        /// Emit one JSON object per step instead of the tree view
        #[arg(long)]
        json: bool,
    },
    /// Print the lightbox HTML for one portfolio item
    Render {
        /// Gallery JSON file
        gallery: PathBuf,
        /// Item title or 1-based position
        #[arg(long, default_value = "1")]
        item: String,
        /// Index of the image to open at
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check { gallery } => {
            println!("==> Checking {}", gallery.display());
            let json = std::fs::read_to_string(&gallery)?;
            let parsed = content::parse_gallery(&json)?;
            output::print_gallery(&parsed);
            println!("==> Content is valid");
        }
        Command::Replay {
            gallery,
            script,
            json,
        } => {
            let config = config::load_config(&cli.config)?;
            let gallery = load_gallery(&gallery)?;
            let steps = replay::parse_script(&std::fs::read_to_string(&script)?)?;

            let mut site = Site::new(LightboxController::new(config, RecordingHost::new()));
            for line in &steps {
                let outcome = replay::run_step(&mut site, &gallery, &line.step);
                let lightbox = site.lightbox();
                if json {
                    let record = serde_json::json!({
                        "line": line.number,
                        "step": line.text,
                        "outcome": output::format_outcome(&outcome),
                        "page": site.page(),
                        "focus": lightbox.focused(),
                        "lightbox": lightbox.snapshot(),
                    });
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    output::print_replay_step(line, &outcome, &lightbox.snapshot(), lightbox.focused());
                }
            }
            if !json {
                println!("==> Replayed {} steps, ended on {}", steps.len(), site.page());
            }
        }
        Command::Render {
            gallery,
            item,
            start,
        } => {
            let config = config::load_config(&cli.config)?;
            let gallery = load_gallery(&gallery)?;
            let found = gallery
                .find(&item)
                .ok_or_else(|| format!("no portfolio item matches '{item}'"))?;

            let mut site = Site::new(LightboxController::new(config, RecordingHost::new()));
            site.dispatch(RouteEvent::Navigate(Page::Portfolio));
            site.open_lightbox(found.open_request(start), None)?;
            let lightbox = site.lightbox();
            println!(
                "{}",
                render::render_lightbox(&lightbox.snapshot(), lightbox.focused()).into_string()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the formatted output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Leniently load a gallery file. Unusable content leaves an empty gallery
/// rather than aborting the run.
fn load_gallery(path: &Path) -> Result<Gallery, content::ContentError> {
    content::load_gallery_file(path, Gallery::default)
}
