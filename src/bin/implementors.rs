use clap::{Parser, Subcommand};
use implementors::{
    asset::{self, AssetFormat},
    channel,
    config::{self, PanelConfig},
    ImplementorsPanel, InternalResult,
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize an implementors file
    Inspect {
        /// Implementors file (.js or .json)
        file: PathBuf,
    },

    /// Convert an implementors file between JSON and the script form
    Convert {
        file: PathBuf,

        /// Target format (json, js)
        #[arg(long, default_value = "json")]
        to: AssetFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the implementors panel for a file
    Render(RenderArgs),
}

#[derive(Parser)]
struct RenderArgs {
    file: PathBuf,

    /// Panel config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Crate whose page hosts the panel
    #[arg(long)]
    current_crate: Option<String>,

    /// Prefix for crate-relative links
    #[arg(long)]
    root_path: Option<String>,

    /// Emit HTML instead of text
    #[arg(long)]
    html: bool,
}

fn inspect(file: &Path) -> InternalResult<()> {
    let table = asset::load(file)?;

    println!(
        "{} libraries, {} records",
        table.len(),
        table.record_count()
    );
    for (library, records) in table.iter() {
        let synthetic = records.iter().filter(|r| r.is_synthetic).count();
        let mut traits: Vec<String> = records.iter().filter_map(|r| r.trait_path()).collect();
        traits.sort();
        traits.dedup();
        println!(
            "{}: {} records ({} synthetic) [{}]",
            library,
            records.len(),
            synthetic,
            traits.join(", ")
        );
    }
    Ok(())
}

fn convert(file: &Path, to: AssetFormat, output: Option<&Path>) -> InternalResult<()> {
    let table = asset::load(file)?;
    let rendered = asset::render(&table, to)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(path = %path.display(), format = %to, "written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn render(args: &RenderArgs) -> InternalResult<()> {
    let mut panel_config: PanelConfig = match &args.config {
        Some(path) => config::from_file(path)?,
        None => PanelConfig::default(),
    };
    if let Some(current_crate) = &args.current_crate {
        panel_config.current_crate = Some(current_crate.clone());
    }
    if let Some(root_path) = &args.root_path {
        panel_config.root_path = root_path.clone();
    }
    debug!("panel config: {:?}", panel_config);

    let table = asset::load(&args.file)?;

    // The table arrives before the panel exists, as it does when the data
    // script loads ahead of the page's front end.
    let delivery = channel::publish(table);
    debug!(%delivery, "published implementors");

    let panel = Arc::new(ImplementorsPanel::new(panel_config));
    let delivery = channel::global().install_registrar(panel.clone());
    debug!(%delivery, entries = panel.len(), "panel installed");

    if args.html {
        print!("{}", panel.render_html());
    } else {
        print!("{}", panel.render_text()?);
    }
    Ok(())
}

fn run(cli: &Cli) -> InternalResult<()> {
    match &cli.command {
        Commands::Inspect { file } => inspect(file),
        Commands::Convert { file, to, output } => convert(file, *to, output.as_deref()),
        Commands::Render(args) => render(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
