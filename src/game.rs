//! Gameplay session.
//!
//! [`GameSession`] owns the ECS [`World`] holding every piece of gameplay
//! state, plus the two schedules that advance it. The engine binding drives it
//! through the [`SceneHooks`] lifecycle and two extra calls:
//!
//! - [`SceneHooks::on_init`] – once, before anything else
//! - [`SceneHooks::on_enter`] – once, to spawn the level
//! - [`SceneHooks::on_frame`] – every frame, with that frame's [`FrameInput`]
//! - [`GameSession::report_overlap`] – for each overlap, between frames
//! - [`GameSession::drain_commands`] – to collect the [`EngineCmd`]s to execute
//!
//! # Frame order
//!
//! 1. advance [`WorldTime`] by the reported delta
//! 2. apply a pending state transition (level restart)
//! 3. fire due timed events
//! 4. fold the input report into [`InputState`](crate::resources::input::InputState)
//! 5. run the locomotion controller
//! 6. dispatch cues to engine commands
//!
//! Overlaps are processed one at a time, each completely (router, progression,
//! dispatcher) before `report_overlap` returns.

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::collectible::{Collectible, EngineHandle};
use crate::components::player::PlayerState;
use crate::events::collision::RawOverlap;
use crate::events::cue::Cue;
use crate::events::engine::EngineCmd;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::handles::HandleIndex;
use crate::resources::input::{FrameInput, InputState};
use crate::resources::level::LevelLayout;
use crate::resources::lock::PuzzleLock;
use crate::resources::scheduler::TimedScheduler;
use crate::resources::systemsstore::{ENTER_LEVEL, OVERLAP_INTAKE, SystemsStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::cues::dispatch_cues;
use crate::systems::gamestate::check_pending_state;
use crate::systems::input::update_input_state;
use crate::systems::level::enter_level;
use crate::systems::locomotion::locomotion_system;
use crate::systems::progression::progression_observer;
use crate::systems::router::{overlap_intake, route_overlap_observer};
use crate::systems::scheduler::{poll_timed_events, timer_observer};
use crate::systems::time::update_world_time;

/// Lifecycle hooks the engine calls on a scene.
pub trait SceneHooks {
    /// Set up state that lives as long as the scene.
    fn on_init(&mut self);
    /// Build the level.
    fn on_enter(&mut self);
    /// Advance one frame.
    fn on_frame(&mut self, input: &FrameInput);
}

pub struct GameSession {
    world: World,
    frame: Schedule,
    dispatch: Schedule,
    initialized: bool,
}

impl GameSession {
    /// Create a session for `layout`. Nothing runs until [`SceneHooks::on_init`].
    pub fn new(config: GameConfig, layout: LevelLayout) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(layout);

        let mut frame = Schedule::default();
        frame.add_systems(
            (
                check_pending_state,
                poll_timed_events,
                update_input_state,
                locomotion_system,
            )
                .chain(),
        );

        // The only reader of `Messages<Cue>`; kept apart so overlaps can be
        // dispatched between frames.
        let mut dispatch = Schedule::default();
        dispatch.add_systems(dispatch_cues);

        Self {
            world,
            frame,
            dispatch,
            initialized: false,
        }
    }

    /// Create a session and run `on_init` and `on_enter`.
    pub fn start(config: GameConfig, layout: LevelLayout) -> Self {
        let mut session = Self::new(config, layout);
        session.on_init();
        session.on_enter();
        session
    }

    /// Deliver one engine overlap report and process it completely.
    pub fn report_overlap(&mut self, overlap: RawOverlap) {
        let intake = self
            .world
            .get_resource::<SystemsStore>()
            .and_then(|store| store.get_overlap_system(OVERLAP_INTAKE).copied());
        let Some(intake) = intake else {
            warn!("Overlap reported before on_init; ignored");
            return;
        };
        if let Err(e) = self.world.run_system_with(intake, overlap) {
            error!("Overlap intake failed: {:?}", e);
        }
        self.world.flush();
        self.dispatch.run(&mut self.world);
    }

    /// Take every engine command emitted so far, in emission order.
    pub fn drain_commands(&mut self) -> Vec<EngineCmd> {
        match self.world.get_resource_mut::<Messages<EngineCmd>>() {
            Some(mut cmds) => cmds.drain().collect(),
            None => Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn layout(&self) -> &LevelLayout {
        self.world.resource::<LevelLayout>()
    }

    /// Engine handle of the player avatar.
    pub fn player_handle(&self) -> u32 {
        self.layout().player.handle
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        let entity = self.entity(self.player_handle())?;
        self.world.get::<PlayerState>(entity).copied()
    }

    pub fn score(&self) -> u32 {
        self.player_state().map(|p| p.score).unwrap_or(0)
    }

    pub fn is_locked(&self) -> bool {
        self.world
            .get_resource::<PuzzleLock>()
            .is_none_or(|lock| lock.locked)
    }

    pub fn state(&self) -> GameStates {
        self.world
            .get_resource::<GameState>()
            .map(|s| s.get())
            .unwrap_or_default()
    }

    /// Collectible behind an engine handle, as currently spawned.
    pub fn collectible(&self, handle: u32) -> Option<Collectible> {
        let entity = self.entity(handle)?;
        self.world.get::<Collectible>(entity).copied()
    }

    /// Entity currently standing for an engine handle.
    pub fn entity(&self, handle: u32) -> Option<Entity> {
        self.world
            .get_resource::<HandleIndex>()?
            .get(EngineHandle(handle))
    }

    pub fn scheduler(&self) -> Option<&TimedScheduler> {
        self.world.get_resource::<TimedScheduler>()
    }

    /// Session time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.world
            .get_resource::<WorldTime>()
            .map(|t| t.elapsed)
            .unwrap_or(0.0)
    }

    pub fn is_debug(&self) -> bool {
        self.world.contains_resource::<DebugMode>()
    }
}

impl SceneHooks for GameSession {
    fn on_init(&mut self) {
        if self.initialized {
            warn!("on_init called twice; ignored");
            return;
        }
        let world = &mut self.world;

        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        world.insert_resource(FrameInput::default());
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(PuzzleLock::default());
        world.insert_resource(TimedScheduler::new());
        world.insert_resource(HandleIndex::new());
        world.init_resource::<Messages<Cue>>();
        world.init_resource::<Messages<EngineCmd>>();

        world.add_observer(observe_gamestate_change_event);
        world.add_observer(switch_debug_observer);
        world.add_observer(route_overlap_observer);
        world.add_observer(progression_observer);
        world.add_observer(timer_observer);

        let mut systems_store = SystemsStore::new();
        let enter_level_id = world.register_system(enter_level);
        systems_store.insert(ENTER_LEVEL, enter_level_id);
        let intake_id = world.register_system(overlap_intake);
        systems_store.insert_overlap_system(OVERLAP_INTAKE, intake_id);
        world.insert_resource(systems_store);

        // Ensure the observers are registered before anything can trigger events.
        world.flush();

        let gravity_y = world.resource::<GameConfig>().gravity_y;
        let mut cmds = world.resource_mut::<Messages<EngineCmd>>();
        cmds.write(EngineCmd::SetGravity { y: gravity_y });
        cmds.write(EngineCmd::SetPhysicsDebug { enabled: false });

        self.initialized = true;
        info!("Session initialized");
    }

    fn on_enter(&mut self) {
        if !self.initialized {
            warn!("on_enter called before on_init; initializing now");
            self.on_init();
        }
        let enter = self
            .world
            .resource::<SystemsStore>()
            .get(ENTER_LEVEL)
            .copied();
        match enter {
            Some(id) => {
                if let Err(e) = self.world.run_system(id) {
                    error!("Entering the level failed: {:?}", e);
                }
            }
            None => error!("No '{}' system registered", ENTER_LEVEL),
        }
        self.dispatch.run(&mut self.world);
    }

    fn on_frame(&mut self, input: &FrameInput) {
        if !self.initialized {
            warn!("Frame before on_init; ignored");
            return;
        }
        self.world.insert_resource(*input);
        update_world_time(&mut self.world, input.dt);

        self.frame.run(&mut self.world);
        self.dispatch.run(&mut self.world);

        self.world.resource_mut::<Messages<Cue>>().update();
        self.world.clear_trackers();
    }
}
