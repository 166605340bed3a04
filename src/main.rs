#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tile_grid::stencil::{
    DEFAULT_DAMPING, HarnessReport, Neighborhood, StencilParams, compare_addressing_with,
    run_round_trip_check, sample_coordinates,
};
use tile_grid::tiled::{TileConfig, TiledAddressSpace};

/// Round-trip and stencil locality benchmark for the tiled grid layout.
#[derive(Parser, Debug)]
#[command(name = "tile-grid", version)]
struct Cli {
    /// Tile edge is 2^shift cells.
    #[arg(long, default_value_t = 4)]
    shift: u32,

    /// Grid width in cells (multiple of the tile edge).
    #[arg(long, default_value_t = 2048)]
    width: u32,

    /// Grid height in cells (multiple of the tile edge).
    #[arg(long, default_value_t = 2048)]
    height: u32,

    /// Stencil radius; cells this close to an edge are left untouched.
    #[arg(long, default_value_t = 1)]
    border: u32,

    /// Stencil generations per run.
    #[arg(long, default_value_t = 100)]
    repetitions: u32,

    /// Blend toward the neighborhood mean per generation.
    #[arg(long, default_value_t = DEFAULT_DAMPING)]
    damping: f32,

    #[arg(long, value_enum, default_value_t = NeighborhoodChoice::Square)]
    neighborhood: NeighborhoodChoice,

    /// RNG seed, decimal or 0x-prefixed hex.
    #[arg(long, default_value = "0x5EED_1234_ABCD_EF01", value_parser = parse_seed)]
    seed: u64,

    /// Random coordinates for the round-trip check.
    #[arg(long, default_value_t = 100_000)]
    random_samples: usize,

    /// Sweep every coordinate when the grid has at most this many cells.
    #[arg(long, default_value_t = 1_048_576)]
    exhaustive_limit: usize,

    /// Skip the untimed per-generation comparison; compare final fields only.
    #[arg(long)]
    final_only: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NeighborhoodChoice {
    Square,
    Cross,
}

impl From<NeighborhoodChoice> for Neighborhood {
    fn from(choice: NeighborhoodChoice) -> Self {
        match choice {
            NeighborhoodChoice::Square => Neighborhood::Square,
            NeighborhoodChoice::Cross => Neighborhood::Cross,
        }
    }
}

fn parse_seed(value: &str) -> Result<u64, String> {
    let digits = value.replace('_', "");
    let parsed = match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|err| format!("invalid seed {value:?}: {err}"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn format_report(report: &HarnessReport) -> String {
    let round_trip = &report.round_trip;
    let tile = 1u32 << report.shift;
    let mut out = format!(
        "{}/{} passed. ({:.2}% failed)\n",
        round_trip.passed, round_trip.tested, report.round_trip_failed_percent
    );
    out += &format!(
        "Test with {} x {} grid ({} x {} areas of {tile}x{tile}).\n",
        report.width, report.height, report.areas_width, report.areas_height
    );
    out += &format!("Test with grid structure took   {:.6} s\n", report.grid_ms / 1000.0);
    out += &format!("Test with linear structure took {:.6} s\n", report.linear_ms / 1000.0);
    out += &format!("grid : linear = {:.2}:1\n", report.ratio);
    match (report.mismatched_cells, report.first_mismatch_generation) {
        (0, None) if report.generations_checked > 0 => {
            out += &format!(
                "layouts agree on every cell after each of {} generations [MATCH]\n",
                report.generations_checked
            );
        }
        (0, None) => out += "layouts agree on every cell of the final field [MATCH]\n",
        (cells, generation) => {
            let generation = generation.map_or_else(|| "?".to_string(), |g| g.to_string());
            out += &format!(
                "layouts disagree on {cells} cells, first at generation {generation} [MISMATCH]\n"
            );
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TileConfig::new(cli.shift).context("building tile configuration")?;
    let space = TiledAddressSpace::for_dimensions(config, cli.width, cli.height)
        .context("building tiled address space")?;
    tracing::info!(
        width = space.width(),
        height = space.height(),
        areas_width = space.areas_width(),
        areas_height = space.areas_height(),
        "address space ready"
    );

    let coords = sample_coordinates(&space, cli.random_samples, cli.seed, cli.exhaustive_limit);
    let round_trip = run_round_trip_check(&space, &coords);

    let params = StencilParams::default()
        .border(cli.border)
        .repetitions(cli.repetitions)
        .damping(cli.damping)
        .neighborhood(cli.neighborhood.into());
    let comparison = compare_addressing_with(&space, &params, cli.seed, !cli.final_only);

    let report = HarnessReport::new(&space, &params, cli.seed, round_trip, &comparison);
    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{json}");
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_accepts_hex_and_decimal() {
        assert_eq!(parse_seed("0x5EED_1234_ABCD_EF01"), Ok(0x5EED_1234_ABCD_EF01));
        assert_eq!(parse_seed("42"), Ok(42));
        assert!(parse_seed("0xZZ").is_err());
    }

    #[test]
    fn cli_defaults_parse() {
        let cli = Cli::try_parse_from(["tile-grid"]).unwrap();
        assert_eq!(cli.shift, 4);
        assert_eq!(cli.width, 2048);
        assert_eq!(cli.seed, 0x5EED_1234_ABCD_EF01);
        assert!(!cli.json);
        assert!(!cli.final_only);

        let args = ["tile-grid", "--neighborhood", "cross", "-vv", "--seed", "7"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.neighborhood, NeighborhoodChoice::Cross));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, 7);
    }

    fn report(passed: usize, tested: usize, generations_checked: u32) -> HarnessReport {
        let space = TiledAddressSpace::new(TileConfig::new(3).unwrap(), 7, 3).unwrap();
        let params = StencilParams::default().repetitions(4);
        let comparison = tile_grid::stencil::ComparisonReport {
            grid_elapsed: std::time::Duration::from_millis(450),
            linear_elapsed: std::time::Duration::from_millis(150),
            mismatched_cells: 0,
            generations_checked,
            first_mismatch_generation: None,
        };
        let round_trip = tile_grid::stencil::RoundTripReport { passed, tested };
        HarnessReport::new(&space, &params, 1, round_trip, &comparison)
    }

    #[test]
    fn text_report_lists_counts_times_and_ratio() {
        let text = format_report(&report(11, 11, 4));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "11/11 passed. (0.00% failed)");
        assert_eq!(lines[1], "Test with 56 x 24 grid (7 x 3 areas of 8x8).");
        assert_eq!(lines[2], "Test with grid structure took   0.450000 s");
        assert_eq!(lines[3], "Test with linear structure took 0.150000 s");
        assert_eq!(lines[4], "grid : linear = 3.00:1");
        assert!(lines[5].contains("after each of 4 generations [MATCH]"));
    }

    #[test]
    fn text_report_shows_failure_percentage() {
        let text = format_report(&report(3, 4, 0));
        assert!(text.starts_with("3/4 passed. (25.00% failed)\n"));
        assert!(text.contains("final field [MATCH]"));
    }
}
