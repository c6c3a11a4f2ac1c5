//! Delve - walk an endless chain of procedurally generated voxel rooms
//!
//! This binary is a headless host: it steers the player straight at each
//! room's portal and logs every traversal.

mod settings;

use anyhow::{Context, Result};
use delve_core::RoomRng;
use delve_game::{FrameOutcome, MovementInput, Session};
use delve_world::RoomWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::{DemoSettings, Settings};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Delve...");

    let settings = Settings::load();
    let world = RoomWorld::with_config(settings.room.clone(), settings.movement.clone())
        .context("Invalid room configuration")?;
    let look = settings.look.clone();
    let time = settings.time.clone();

    match settings.demo.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            let session = Session::with_rng(world, look, time, StdRng::seed_from_u64(seed));
            run(session, &settings.demo)
        }
        None => {
            let session = Session::with_rng(world, look, time, rand::thread_rng());
            run(session, &settings.demo)
        }
    }
}

fn run<R: RoomRng>(mut session: Session<R>, demo: &DemoSettings) -> Result<()> {
    for _ in 0..demo.rooms_to_traverse {
        let marker = session.room().portal_marker;
        let mut frames = 0u32;
        loop {
            let player = session.player();
            let input = MovementInput::toward(player.position, marker, player.yaw);
            if let FrameOutcome::Traversed { .. } = session.frame(demo.frame_dt, input) {
                break;
            }
            frames += 1;
            if frames >= demo.max_frames_per_room {
                anyhow::bail!(
                    "Portal in {} not reached after {} frames",
                    session.player().room_label(),
                    frames
                );
            }
        }
    }

    let clock = session.clock();
    info!(
        "Reached {} after {} frames ({:.1}s of play)",
        session.player().room_label(),
        clock.frame_count,
        clock.total_time
    );
    Ok(())
}
