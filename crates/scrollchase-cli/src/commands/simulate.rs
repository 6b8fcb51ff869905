use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use scrollchase_core::{AppConfig, Axis, Point};
use scrollchase_engine::{
    FrameClock, ManualFrameClock, ScrollController, ScrollOutcome, ScrollSurface, SurfaceHandle,
};

use crate::scenario::{Scenario, ScriptedProvider, SimClock, VirtualSurface};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Scenario file (TOML) with a list of timed retargets
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Target offset as x,y; repeat to retarget mid-flight
    #[arg(short = 't', long = "to", value_parser = crate::parse_point)]
    pub targets: Vec<Point>,

    /// Animation time between successive --to targets
    #[arg(long, default_value_t = 100)]
    pub every_ms: u64,

    /// Starting offset as x,y
    #[arg(long, value_parser = crate::parse_point)]
    pub from: Option<Point>,

    /// Largest reachable offset as x,y
    #[arg(long, value_parser = crate::parse_point)]
    pub max: Option<Point>,

    /// Jump without animating
    #[arg(long)]
    pub instant: bool,

    /// Start a simulated drag at this animation time
    #[arg(long)]
    pub interact_at_ms: Option<u64>,

    /// Print frames as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Pace frames in real time instead of running as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Override the configured frame rate
    #[arg(long)]
    pub fps: Option<u32>,
}

#[derive(Serialize)]
struct FrameRecord {
    frame: u32,
    t_ms: f64,
    x: f64,
    y: f64,
    horizontal_segments: usize,
    vertical_segments: usize,
}

#[derive(Serialize)]
struct Summary {
    outcome: String,
    completed: bool,
    frames: u32,
    writes: u32,
    offset: Point,
}

struct Reporter {
    json: bool,
}

impl Reporter {
    fn header(&self) {
        if !self.json {
            println!(
                "{:>6} {:>9} {:>10} {:>10} {:>5}",
                "frame", "t(ms)", "x", "y", "segs"
            );
        }
    }

    fn frame(&self, record: &FrameRecord) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!(
                "{:>6} {:>9.1} {:>10.2} {:>10.2} {:>2}/{:<2}",
                record.frame,
                record.t_ms,
                record.x,
                record.y,
                record.horizontal_segments,
                record.vertical_segments
            );
        }
        Ok(())
    }

    fn summary(&self, summary: &Summary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(summary)?);
        } else {
            println!();
            println!("Outcome: {}", summary.outcome);
            println!("Frames:  {}", summary.frames);
            println!("Writes:  {}", summary.writes);
            println!("Offset:  {}", summary.offset);
        }
        Ok(())
    }
}

fn record(frame: u32, t: Duration, offset: Point, controller: &ScrollController) -> FrameRecord {
    FrameRecord {
        frame,
        t_ms: t.as_secs_f64() * 1000.0,
        x: offset.x,
        y: offset.y,
        horizontal_segments: controller.segment_count(Axis::Horizontal),
        vertical_segments: controller.segment_count(Axis::Vertical),
    }
}

fn build_scenario(args: &SimulateArgs) -> Result<Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            if args.targets.is_empty() {
                bail!("Nothing to simulate.\nPass --scenario <file> or at least one --to <x,y>.");
            }
            Scenario::from_targets(args.from.unwrap_or_default(), &args.targets, args.every_ms)
        }
    };

    if let Some(from) = args.from {
        scenario.from = from;
    }
    if let Some(max) = args.max {
        scenario.max_offset = Some(max);
    }
    if args.interact_at_ms.is_some() {
        scenario.interact_at_ms = args.interact_at_ms;
    }
    scenario.validate()?;

    Ok(scenario)
}

pub async fn run(config: &AppConfig, args: SimulateArgs) -> Result<()> {
    let scenario = build_scenario(&args)?;

    let mut simulation = config.simulation.clone();
    if let Some(fps) = args.fps {
        simulation.fps = fps;
    }
    let frame = simulation.frame_duration();

    let now: SimClock = Rc::new(Cell::new(Duration::ZERO));
    let provider = Rc::new(ScriptedProvider::new(&scenario, Rc::clone(&now)));
    let surface = Rc::new(RefCell::new(VirtualSurface::new(&scenario)));
    let clock = ManualFrameClock::new();
    let mut controller = ScrollController::new(config.scroll.clone(), Box::new(clock.clone()));

    let outcome: Rc<Cell<Option<ScrollOutcome>>> = Rc::new(Cell::new(None));
    let sink = Rc::clone(&outcome);

    tracing::info!(
        "Simulating {} retarget(s) from {} at {} fps",
        scenario.retargets.len(),
        scenario.from,
        simulation.fps
    );

    let reporter = Reporter { json: args.json };
    reporter.header();

    controller.start_scrolling(
        &provider,
        &surface,
        !args.instant,
        Some(Box::new(move |_: Option<SurfaceHandle>, result: ScrollOutcome| {
            sink.set(Some(result));
        })),
    );
    reporter.frame(&record(
        0,
        Duration::ZERO,
        surface.borrow().current_offset(),
        &controller,
    ))?;

    let mut ticker = args.realtime.then(|| tokio::time::interval(frame));
    let interact_at = scenario.interact_at_ms.map(Duration::from_millis);
    let mut frames = 0;

    while clock.is_running() && frames < simulation.max_frames {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }

        frames += 1;
        let t = now.get() + frame;
        now.set(t);

        if interact_at.is_some_and(|at| t >= at) {
            surface.borrow_mut().interacting = true;
        }

        controller.on_frame(frame);
        let offset = surface.borrow().current_offset();
        reporter.frame(&record(frames, t, offset, &controller))?;
    }

    if clock.is_running() {
        tracing::warn!("Cycle still running after {} frames, stopping", frames);
        controller.stop_scrolling();
    }

    let outcome = outcome.get();
    let surface = surface.borrow();
    reporter.summary(&Summary {
        outcome: outcome
            .map(|o| o.to_string())
            .unwrap_or_else(|| "pending".to_string()),
        completed: outcome.is_some_and(|o| o.completed()),
        frames,
        writes: surface.writes,
        offset: surface.current_offset(),
    })
}
