//! Command line lookups on the planetary mosaicking grids.
//!
//! The grid is described by a JSON config file, the `GRID_*` environment
//! variables, or the command line flags, which take precedence. Results are
//! printed to stdout as JSON; logs go to stderr.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use binning_grid::PlanetaryGrid;

#[derive(Parser, Debug)]
#[command(name = "grid-tool")]
#[command(about = "Bin lookups on ISIN and CRS mosaicking grids")]
struct Args {
    /// Grid configuration file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Grid engine: isin or crs
    #[arg(long)]
    kind: Option<String>,

    /// Global number of rows
    #[arg(long)]
    num_rows: Option<i32>,

    /// CRS identifier such as EPSG:4326 or EPSG:3995,POLYGON((...))
    #[arg(long)]
    crs: Option<String>,

    /// Pixel size in CRS units
    #[arg(long)]
    pixel_size: Option<f64>,

    /// Tile edge length used for data slices
    #[arg(long)]
    tile_size: Option<i32>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bin containing a coordinate
    Bin {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Centre coordinate of a bin
    Center {
        #[arg(allow_hyphen_values = true)]
        bin: i64,
    },
    /// Grid dimensions
    Info,
    /// Tile-aligned rectangles of a CRS grid covered by a footprint
    Slices {
        /// Footprint polygon as WKT in lon/lat
        footprint: String,
    },
    /// Output raster region covering a lon/lat region of interest
    Region {
        /// Region of interest as WKT in lon/lat; the whole raster when omitted
        roi: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let overrides = config::Overrides {
        kind: args.kind.clone(),
        num_rows: args.num_rows,
        crs: args.crs.clone(),
        pixel_size: args.pixel_size,
        tile_size: args.tile_size,
    };
    let grid_config = config::load(args.config.as_deref(), &overrides)?;
    debug!(config = ?grid_config, "Loaded grid configuration");

    let grid = PlanetaryGrid::from_config(&grid_config)?;

    let output = match &args.command {
        Command::Bin { lat, lon } => serde_json::to_value(commands::bin(&grid, *lat, *lon))?,
        Command::Center { bin } => serde_json::to_value(commands::center(&grid, *bin))?,
        Command::Info => serde_json::to_value(commands::info(&grid, &grid_config))?,
        Command::Slices { footprint } => {
            serde_json::to_value(commands::slices(&grid, footprint, grid_config.tile_size())?)?
        }
        Command::Region { roi } => serde_json::to_value(commands::region(&grid, roi.as_deref())?)?,
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);

    Ok(())
}
