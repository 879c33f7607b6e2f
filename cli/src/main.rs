use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mapcore::boundary::{BoundaryError, BoundaryPolygon};
use mapcore::consts::{
    DEFAULT_BACKEND_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TILE_SIZE,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};
use mapcore::mask::{MaskError, render_mask_tile};
use mapcore::point::{GeoPoint, Marker};
use mapcore::projection::{TileCoord, WebMercator};
use mapcore::records::{RecordError, parse_place_records};
use mapcore::viewport::{Viewport, ViewportView, fit_to_boundary};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid boundary: {0}")]
    Boundary(#[from] BoundaryError),
    #[error("tile {z}/{x}/{y} does not exist")]
    InvalidTile { z: u8, x: u32, y: u32 },
    #[error("tile size must be positive")]
    InvalidTileSize,
    #[error("mask render failed: {0}")]
    Mask(#[from] MaskError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid place list: {0}")]
    Records(#[from] RecordError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fairmap-cli", about = "Fair map boundary, mask and point tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one mask tile to a PNG file.
    Tile(TileArgs),
    /// Print the viewport fitted to a boundary.
    Fit(FitArgs),
    /// Fetch a fair's points from the backend.
    Points(PointsArgs),
}

#[derive(Args, Debug)]
struct TileArgs {
    #[arg(long, env = "FAIRMAP_BOUNDARY")]
    boundary: PathBuf,

    z: u8,
    x: u32,
    y: u32,

    #[arg(long, short, default_value = "tile.png")]
    out: PathBuf,

    #[arg(long, env = "FAIRMAP_TILE_SIZE", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,
}

#[derive(Args, Debug)]
struct FitArgs {
    #[arg(long, env = "FAIRMAP_BOUNDARY")]
    boundary: PathBuf,

    #[arg(long, env = "FAIRMAP_VIEWPORT_WIDTH", default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f64,

    #[arg(long, env = "FAIRMAP_VIEWPORT_HEIGHT", default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: f64,

    #[arg(long, env = "FAIRMAP_TILE_SIZE", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    #[arg(long, default_value_t = false, help = "Also list the tiles the fitted view covers")]
    tiles: bool,
}

#[derive(Args, Debug)]
struct PointsArgs {
    #[arg(long, env = "FAIRMAP_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[arg(long, env = "FAIRMAP_FAIR_NAME")]
    fair_name: String,

    #[arg(long, env = "FAIRMAP_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "FAIRMAP_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[arg(long, default_value_t = false, help = "Print markers (with zone colours) instead of raw points")]
    markers: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Tile(args) => {
            let written = run_tile(&args).await?;
            println!("{} ({written} bytes)", args.out.display());
            Ok(())
        }
        Command::Fit(args) => {
            let json = run_fit(&args).await?;
            print_json(&json)
        }
        Command::Points(args) => {
            let json = run_points(&args).await?;
            print_json(&json)
        }
    }
}

async fn run_tile(args: &TileArgs) -> Result<usize, CliError> {
    if args.tile_size == 0 {
        return Err(CliError::InvalidTileSize);
    }
    let coord = TileCoord::new(args.x, args.y, args.z);
    if !coord.is_valid() {
        return Err(CliError::InvalidTile { z: args.z, x: args.x, y: args.y });
    }

    let boundary = read_boundary(&args.boundary).await?;
    let tile = render_mask_tile(coord, &boundary, &WebMercator::new(args.tile_size));
    tracing::debug!(z = coord.z, x = coord.x, y = coord.y, transparent = tile.transparent_count(), "tile rendered");

    let png = tile.encode_png()?;
    tokio::fs::write(&args.out, &png)
        .await
        .map_err(|source| CliError::Write { path: args.out.clone(), source })?;
    Ok(png.len())
}

async fn run_fit(args: &FitArgs) -> Result<Value, CliError> {
    if args.tile_size == 0 {
        return Err(CliError::InvalidTileSize);
    }
    let boundary = read_boundary(&args.boundary).await?;
    let mut viewport = Viewport::new(args.width, args.height, WebMercator::new(args.tile_size));
    fit_to_boundary(&mut viewport, Some(&boundary));

    let view: ViewportView = viewport.view();
    let mut json = serde_json::to_value(view)?;
    if args.tiles {
        if let Value::Object(map) = &mut json {
            map.insert("tiles".to_owned(), serde_json::to_value(viewport.visible_tiles())?);
        }
    }
    Ok(json)
}

async fn run_points(args: &PointsArgs) -> Result<Value, CliError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.request_timeout_secs))
        .connect_timeout(Duration::from_secs(args.connect_timeout_secs))
        .build()?;
    let points = fetch_points(&client, &args.backend_url, &args.fair_name).await?;
    tracing::debug!(count = points.len(), fair = %args.fair_name, "points fetched");
    if args.markers {
        let markers: Vec<Marker> = points.iter().map(Marker::from).collect();
        return Ok(serde_json::to_value(markers)?);
    }
    Ok(serde_json::to_value(points)?)
}

/// Same request the server's backend loader makes. The server crate is a
/// binary, so its loader cannot be linked in here.
async fn fetch_points(client: &reqwest::Client, backend_url: &str, fair_name: &str) -> Result<Vec<GeoPoint>, CliError> {
    let url = format!("{}/get_fair_places", backend_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .query(&[("fair_name", fair_name)])
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), body });
    }
    Ok(parse_place_records(&body)?)
}

async fn read_boundary(path: &Path) -> Result<BoundaryPolygon, CliError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    Ok(BoundaryPolygon::from_geojson_str(&raw)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
