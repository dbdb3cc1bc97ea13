//! Rail Grind entry point
//!
//! Native build runs a headless demo session: a seeded rider feeds tilt
//! samples, the session drives one tick per frame, events go to the log.
//!
//! Usage: `rail-grind [tuning.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rail_grind::platform::DemoInput;
    use rail_grind::{Session, SimEvent, Tuning};

    env_logger::init();
    log::info!("Rail Grind (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let frames: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(1);
        }
        None => 60 * 60,
    };

    let seed = 12345;
    let mut demo = DemoInput::new(seed);
    let mut session = Session::new(tuning);
    log::info!("Demo rider seeded with {}, running {} frames", seed, frames);

    let dt = 1.0 / 60.0;
    for _ in 0..frames {
        if session.simulator().is_running() {
            if let Err(e) = session.push_input(demo.next_sample()) {
                log::warn!("Input rejected: {}", e);
            }
        }
        match session.frame(dt) {
            Ok(Some(SimEvent::Reset)) => demo.restart(),
            Ok(Some(SimEvent::Progressed {
                posture,
                lateral_offset,
                score,
            })) => {
                let state = session.simulator().state();
                log::trace!(
                    "{} offset={:.1} score={} rail={:.0} bg={:.0}",
                    posture.as_str(),
                    lateral_offset,
                    score,
                    state.rail_scroll,
                    state.background_scroll()
                );
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("Simulation error: {}", e);
                break;
            }
        }
    }

    let state = session.simulator().state().clone();
    session.end();
    log::info!(
        "Demo finished after {} frames: {} falls, best score {}",
        session.frames(),
        session.falls(),
        session.best_score()
    );
    match serde_json::to_string(&state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives the simulator directly through the library
}
