use std::{
    sync::{Arc, mpsc},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use iwf_loader::{
    loadout::compute, logging, message_bus::LocalBus, session::PlateSession, sync_state::SyncState,
    target::Target,
};

const DISPLAY_TIMEOUT: Duration = Duration::from_secs(2);

/// Competition plate loader: prints the plates for one side of the bar.
#[derive(Parser)]
struct Args {
    /// Total weight followed by the bar, e.g. `100m` or `82.5w`.
    #[arg(value_parser = clap::value_parser!(Target), required = true)]
    targets: Vec<Target>,

    /// Drive a second, display-only session over an in-process channel.
    #[arg(long)]
    mirror: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init()?;
    let args = Args::parse();

    if args.mirror {
        return mirror(&args.targets);
    }

    for target in &args.targets {
        println!("{target}: {}", compute(target.weight, target.bar_kind));
    }

    Ok(())
}

fn mirror(targets: &[Target]) -> anyhow::Result<()> {
    let bus = LocalBus::new();
    let (sender, shown) = mpsc::channel();

    let display = PlateSession::receiver_with(SyncState::default(), Arc::new(bus.clone()), move |state, result| {
        println!("display  {}kg {}: {result}", state.weight, state.bar_kind);
        let _ = sender.send(state);
    });
    let control = PlateSession::controller(SyncState::default(), Arc::new(bus));

    for target in targets {
        control.update((*target).into());
        println!("control  {target}: {}", control.loadout());
        shown
            .recv_timeout(DISPLAY_TIMEOUT)
            .with_context(|| format!("display never showed {target}"))?;
    }

    anyhow::ensure!(display.state() == control.state(), "display fell out of sync");
    Ok(())
}
