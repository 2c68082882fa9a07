//! The frame loop.
//!
//! Every frame advances the world one generation, renders it, drains pending input and then
//! waits a fixed delay. The delay does not account for the time spent rendering.

use std::io;
use std::thread;
use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::ScreenSize;
use crate::events::Event;
use crate::rules;
use crate::world::World;

/// Something that can show a world and report user input
pub trait Frontend {
    /// Draw one full frame of `world`
    fn render(&mut self, world: &World) -> io::Result<()>;

    /// Every event received since the last call. Must not block.
    fn poll_events(&mut self) -> io::Result<Vec<Event>>;

    fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    /// Fixed wait after each frame
    pub step_delay: Duration,

    /// Stop after this many generations
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The user asked to quit
    Exit,

    /// `max_generations` was reached
    GenerationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations advanced by this run
    pub generations: u64,
    pub reason: StopReason,
}

/// Run the frame loop until the user exits or the generation limit is reached
pub fn run<F>(world: &mut World, frontend: &mut F, settings: &LoopSettings) -> io::Result<RunSummary>
where
    F: Frontend + ?Sized,
{
    let mut generations = 0;

    let reason = loop {
        if settings.max_generations.is_some_and(|max| generations >= max) {
            break StopReason::GenerationLimit;
        }

        rules::advance(world);
        generations += 1;

        let census = world.census();
        debug!(
            generation = world.generation(),
            firing = census.firing,
            refractory = census.refractory,
            "advanced"
        );

        frontend.render(world)?;

        let mut exit = false;
        for event in frontend.poll_events()? {
            match event {
                Event::Exit => exit = true,
                Event::Resize { cols, rows } => {
                    debug!(cols, rows, "resize");
                    frontend.resize(cols, rows)?;
                }
            }
        }

        if exit {
            break StopReason::Exit;
        }

        thread::sleep(settings.step_delay);
    };

    info!(generations, ?reason, "stopped");

    Ok(RunSummary {
        generations,
        reason,
    })
}
