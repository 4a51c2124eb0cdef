//! berkeley: end-to-end demo of the bearmap crates.
//!
//! Loads (or synthesizes) a street network, builds the location index, then
//! answers one raster query, one autocomplete prefix and one nearest-node
//! lookup, printing everything as JSON on stdout.
//!
//! ```text
//! RUST_LOG=debug cargo run -p berkeley -- --prefix top --stop=-122.259,37.867 --stop=-122.268,37.856
//! ```

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::json;
use tracing::info;

use bm_core::{GeoPoint, WorldExtent};
use bm_raster::{ComposerConfig, TileComposer, TileResolver, ViewportQuery};
use bm_search::LocationIndex;
use bm_spatial::{StreetNetwork, load_network_csv};

use network::build_network;

#[derive(Parser, Debug)]
#[command(version, about = "Resolve a map viewport and search Berkeley street locations", long_about = None)]
struct Cli {
    /// Node CSV (`id,lon,lat[,name]`).  Requires `--edges`.
    #[arg(long, requires = "edges")]
    nodes: Option<PathBuf>,
    /// Edge CSV (`from,to`).
    #[arg(long, requires = "nodes")]
    edges: Option<PathBuf>,

    #[arg(long, default_value_t = -122.30410170759153, allow_hyphen_values = true)]
    ullon: f64,
    #[arg(long, default_value_t = 37.870213571328854, allow_hyphen_values = true)]
    ullat: f64,
    #[arg(long, default_value_t = -122.2104604264636, allow_hyphen_values = true)]
    lrlon: f64,
    #[arg(long, default_value_t = 37.8318576119893, allow_hyphen_values = true)]
    lrlat: f64,
    /// Viewport width in pixels.
    #[arg(short, long, default_value_t = 1085.0)]
    width: f64,
    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 566.0)]
    height: f64,

    /// Autocomplete prefix.
    #[arg(short, long, default_value = "to")]
    prefix: String,

    /// Route stop as `LON,LAT`; repeat for each stop.  Each stop is snapped
    /// to its nearest routable node.
    #[arg(long = "stop", value_parser = parse_lon_lat, allow_hyphen_values = true)]
    stops: Vec<GeoPoint>,

    /// Directory the composition plan points tile images at.
    #[arg(long, default_value = "data/tiles")]
    img_root: PathBuf,
}

fn parse_lon_lat(s: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = s.split_once(',').ok_or_else(|| format!("expected LON,LAT, got {s:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    Ok(GeoPoint::new(lon, lat))
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    // ── Network ───────────────────────────────────────────────────────────
    let t0 = Instant::now();
    let (net, default_stops): (StreetNetwork, Vec<GeoPoint>) = match (&cli.nodes, &cli.edges) {
        (Some(nodes), Some(edges)) => {
            let net = load_network_csv(nodes, edges)
                .with_context(|| format!("loading {} / {}", nodes.display(), edges.display()))?;
            (net, Vec::new())
        }
        _ => {
            let (net, [from, to]) = build_network();
            let stops = vec![net.node_pos[from.index()], net.node_pos[to.index()]];
            (net, stops)
        }
    };
    if net.is_empty() {
        bail!("street network has no nodes");
    }

    let index = LocationIndex::build(&net).context("building location index")?;
    info!(
        nodes = net.node_count(),
        segments = net.segment_count(),
        names = index.name_count(),
        routable = index.routable_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "index ready"
    );

    // ── Raster ────────────────────────────────────────────────────────────
    let resolver = TileResolver::new(WorldExtent::BERKELEY);
    let query = ViewportQuery::new(cli.ullon, cli.ullat, cli.lrlon, cli.lrlat, cli.width, cli.height);
    if let Err(reason) = resolver.check(&query) {
        info!(%reason, "raster query will fail");
    }
    let raster = resolver.resolve(&query);

    // ── Search and snapping ───────────────────────────────────────────────
    let completions = index.locations_by_prefix(&cli.prefix);
    let matches: Vec<_> = completions.iter().flat_map(|name| index.locations(name)).collect();

    let stops = if cli.stops.is_empty() { default_stops } else { cli.stops };
    let route: Vec<_> = stops.iter().filter_map(|p| index.closest(p.lon, p.lat)).collect();

    let composer = TileComposer::new(ComposerConfig { img_root: cli.img_root, ..ComposerConfig::default() });
    let plan = composer.plan(&raster, &route, &index);

    let out = json!({
        "raster":      raster.into_response(),
        "completions": completions,
        "locations":   matches,
        "route":       route,
        "plan":        plan,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
