use camino::Utf8PathBuf;
use clap::Parser;
use hifitime::Epoch;
use log::info;

use planet_visibility::display::VisibilityReport;
use planet_visibility::request::ObservationRequest;
use planet_visibility::rise_set::solve_rise_set;
use planet_visibility::time::CivilDateTime;
use planet_visibility::visibility_errors::VisibilityError;

#[derive(Parser)]
#[command(name = "planet-visibility")]
#[command(about = "Positions, rise and set times of the Sun, Moon, planets, comets and stars")]
struct Cli {
    /// JSON observation request
    request: Utf8PathBuf,

    /// Local date YYYY-MM-DD, overrides the request
    #[arg(long)]
    date: Option<String>,

    /// Local time HH:MM[:SS], overrides the request
    #[arg(long)]
    time: Option<String>,

    /// Extra body to compute (sun, moon, planet or catalog name), repeatable
    #[arg(long = "body")]
    bodies: Vec<String>,

    /// Refine rise and set times iteratively
    #[arg(long)]
    iterative: bool,

    /// Add geocentric altitude, refraction, parallax and extinction columns
    #[arg(long)]
    wide: bool,
}

fn main() -> Result<(), VisibilityError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut request = ObservationRequest::from_path(&cli.request)?;
    request.date = cli.date.or(request.date);
    request.time = cli.time.or(request.time);
    request.bodies.extend(cli.bodies);
    request.iterative |= cli.iterative;

    let now = Epoch::now().map_err(|e| VisibilityError::ClockUnavailable(e.to_string()))?;
    let fallback = CivilDateTime::from_epoch(now).shifted_by_hours(request.zone + request.dst);
    let ctx = request.context(fallback)?;
    info!(
        "{} at {} (UTC{:+}, DST {})",
        ctx.observer().name(),
        ctx.local(),
        ctx.zone(),
        ctx.dst()
    );

    let mut bodies = Vec::new();
    for target in request.targets()? {
        // a crossing left unsettled is reported by the solver through `warn!`
        let body = if request.iterative {
            solve_rise_set(&target, &ctx)?.0
        } else {
            target.compute(&ctx, false)?
        };
        bodies.push(body);
    }

    let title = format!(
        "{}, {} local time (UTC{:+}{})",
        ctx.observer().name(),
        ctx.local(),
        ctx.zone(),
        if ctx.dst() > 0 { ", DST" } else { "" }
    );
    println!("{}", VisibilityReport::new(&bodies).with_title(title).wide(cli.wide));
    Ok(())
}
