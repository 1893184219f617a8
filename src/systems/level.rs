//! Level (re)construction.
//!
//! [`enter_level`] is the enter hook of the `Playing` state. It runs once when
//! the session enters the level and again for every restart, and always leaves
//! the world in the same fresh state:
//! - the player and every collectible are spawned from [`LevelLayout`], with
//!   nothing consumed and a score of 0
//! - [`HandleIndex`] maps the layout's engine handles to the new entities
//! - the lock is closed, the scheduler is empty and the state is `Playing`
//!
//! On a restart the previous entities are despawned first and the engine is
//! told to rebuild its side of the scene with [`EngineCmd::RestartLevel`].

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::collectible::{Collectible, EngineHandle};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Facing, MovementEffects, Player, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::events::cue::Cue;
use crate::events::engine::{CameraFollow, EngineCmd, TextSlot};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::handles::HandleIndex;
use crate::resources::level::LevelLayout;
use crate::resources::lock::PuzzleLock;
use crate::resources::scheduler::TimedScheduler;

/// Camera setup for a level of the given layout.
pub fn camera_follow(layout: &LevelLayout, config: &GameConfig) -> CameraFollow {
    CameraFollow {
        bounds: Vec2::new(layout.width, layout.height),
        lerp: Vec2::splat(config.camera_lerp),
        deadzone: Vec2::splat(config.camera_deadzone),
        zoom: config.camera_zoom,
        round_pixels: config.camera_round_pixels,
    }
}

/// Spawn (or respawn) the level from its layout.
#[allow(clippy::too_many_arguments)]
pub fn enter_level(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    config: Res<GameConfig>,
    existing: Query<Entity, Or<(With<Collectible>, With<Player>)>>,
    mut handles: ResMut<HandleIndex>,
    mut lock: ResMut<PuzzleLock>,
    mut scheduler: ResMut<TimedScheduler>,
    mut game_state: ResMut<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut cues: MessageWriter<Cue>,
    mut engine_cmds: MessageWriter<EngineCmd>,
) {
    let mut despawned = 0;
    for entity in existing.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    let restarting = despawned > 0;
    if restarting {
        debug!("Despawned {} level entities", despawned);
        engine_cmds.write(EngineCmd::RestartLevel);
    }

    handles.clear();

    let spawn = layout.player;
    let player = commands
        .spawn((
            Player,
            PlayerState::new(),
            MovementEffects::default(),
            RigidBody::new(),
            MapPosition::new(spawn.x, spawn.y),
            EngineHandle(spawn.handle),
        ))
        .id();
    handles.insert(EngineHandle(spawn.handle), player);

    for (kind, object) in layout.collectibles() {
        let entity = commands
            .spawn((
                Collectible::new(kind),
                EngineHandle(object.id),
                MapPosition::new(object.x, object.y),
            ))
            .id();
        handles.insert(EngineHandle(object.id), entity);
    }

    *lock = PuzzleLock::default();
    scheduler.clear();
    game_state.set(GameStates::Playing);
    next_state.reset();

    info!(
        "{} level '{}' with {} collectibles",
        if restarting { "Restarted" } else { "Entered" },
        layout.name,
        layout.collectibles().count()
    );

    engine_cmds.write(EngineCmd::ConfigureCamera(camera_follow(&layout, &config)));
    engine_cmds.write(EngineCmd::SetBlockCollider { enabled: true });
    engine_cmds.write(EngineCmd::SetText {
        slot: TextSlot::Win,
        text: String::new(),
    });
    cues.write(Cue::FacingChanged(Facing::default()));
    cues.write(Cue::ScoreChanged {
        score: 0,
        target: layout.target_score,
    });
    cues.write(Cue::HintCleared);
}
