//! Play session: one player walking through an endless chain of rooms

use delve_core::{FrameClock, RoomRng, TimeConfig};
use delve_world::{RoomDescription, RoomWorld};
use glam::Vec2;
use rand::rngs::ThreadRng;
use tracing::info;

use crate::player::{LookConfig, PlayerState};

/// What happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The player moved (possibly by zero) and stayed in the room
    Moved,
    /// The player reached the portal and now stands in a new room
    Traversed { room_index: u32 },
}

/// A running session. The world is always in a single active-room state;
/// generation happens inside the frame that triggers it.
pub struct Session<R: RoomRng = ThreadRng> {
    world: RoomWorld,
    player: PlayerState,
    clock: FrameClock,
    look: LookConfig,
    rng: R,
    room: RoomDescription,
}

impl Session<ThreadRng> {
    /// Start a session with default configuration and unseeded randomness
    pub fn new() -> Self {
        Self::with_rng(
            RoomWorld::new(),
            LookConfig::default(),
            TimeConfig::default(),
            rand::thread_rng(),
        )
    }
}

impl Default for Session<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RoomRng> Session<R> {
    /// Start a session in room 1 of `world`, drawing layouts from `rng`
    pub fn with_rng(mut world: RoomWorld, look: LookConfig, time: TimeConfig, mut rng: R) -> Self {
        let mut player = PlayerState::default();
        let room = world.generate_room(player.room_index, &mut rng);
        player.respawn(room.spawn);
        info!("Session started in {}", player.room_label());

        Self {
            world,
            player,
            clock: FrameClock::new(time),
            look,
            rng,
            room,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn world(&self) -> &RoomWorld {
        &self.world
    }

    /// Description of the active room as last generated
    pub fn room(&self) -> &RoomDescription {
        &self.room
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Feed a look drag in pixels
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        self.player.apply_look(dx, dy, &self.look);
    }

    /// Run one frame: movement first, then the portal check, so this frame's
    /// step can carry the player through.
    pub fn frame(&mut self, raw_dt: f32, input: Vec2) -> FrameOutcome {
        let dt = self.clock.tick(raw_dt);
        self.player.position =
            self.world
                .resolve_movement(self.player.position, input, self.player.yaw, dt);

        if self.world.check_portal_proximity(self.player.position) {
            let room_index = self.advance();
            return FrameOutcome::Traversed { room_index };
        }
        FrameOutcome::Moved
    }

    fn advance(&mut self) -> u32 {
        self.player.room_index += 1;
        self.room = self
            .world
            .generate_room(self.player.room_index, &mut self.rng);
        self.player.respawn(self.room.spawn);
        info!(
            "Entered {} ({}x{}, portal {:?})",
            self.player.room_label(),
            self.room.bounds.width,
            self.room.bounds.depth,
            self.room.door_side
        );
        self.player.room_index
    }
}
