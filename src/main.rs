use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use briansbrain::config::Command;
use briansbrain::config::USAGE;
use briansbrain::driver;
use briansbrain::driver::LoopSettings;
use briansbrain::io::Terminal;
use briansbrain::seeding;
use briansbrain::seeding::SeedRng;
use briansbrain::world::World;

/// Logs go to `log_file` if there is one. Otherwise only warnings reach stderr, since the terminal
/// is in raw mode while the simulation runs.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default = if log_file.is_some() { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = match Command::from_args(std::env::args().skip(1)).context("Invalid arguments")? {
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Command::Run(config) => config,
    };

    init_tracing(config.log_file.as_deref())?;

    let mut rng = match config.seed {
        Some(seed) => SeedRng::new(seed),
        None => SeedRng::from_entropy(),
    };

    let mut world =
        World::new(config.width, config.height).context("Failed to allocate the world")?;
    seeding::seed(
        &mut world,
        config.randomize,
        config.density_weight,
        &mut rng,
    );

    let census = world.census();
    info!(
        seed = rng.seed(),
        width = config.width,
        height = config.height,
        firing = census.firing,
        "seeded world"
    );

    let mut terminal =
        Terminal::init(config.cell_size, config.line_width).context("Failed to start")?;

    let settings = LoopSettings {
        step_delay: config.step_delay,
        max_generations: config.max_generations,
    };

    let summary = driver::run(&mut world, &mut terminal, &settings)?;

    // restore the terminal before anything else is printed
    drop(terminal);

    info!(generations = summary.generations, "done");

    Ok(())
}
