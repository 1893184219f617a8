//! Cue dispatcher.
//!
//! Translates semantic [`Cue`]s into the [`EngineCmd`]s the engine executes.
//! The mapping lives in [`cue_commands`], a pure function; [`dispatch_cues`]
//! runs it over every cue written since its last run, preserving order.
//!
//! Asset names below are the keys the engine loaded the level's sounds and
//! particle textures under.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::player::Facing;
use crate::events::cue::Cue;
use crate::events::engine::{Emitter, EngineCmd, TextSlot};
use crate::resources::gameconfig::GameConfig;

pub const SOUND_JUMP: &str = "playerJump";
pub const SOUND_COIN: &str = "playerCollect2";
pub const SOUND_KEY: &str = "playerCollect1";
pub const SOUND_UNLOCK: &str = "unlock";
pub const SOUND_WIN: &str = "win";

pub const COIN_SOUND_VOLUME: f32 = 0.8;
pub const DEFAULT_SOUND_VOLUME: f32 = 1.0;

/// Star burst played where a coin was picked up.
pub const COIN_BURST_EFFECT: &str = "gemCollect";
pub const COIN_BURST_COUNT: u32 = 5;

pub const HINT_TEXT: &str = "Collect more gems!";
pub const WIN_TEXT: &str = "YOU WIN!";

// Emitter follow offsets for the 24x24 player sprite.
const WALK_DUST_OFFSET_LEFT: Vec2 = Vec2::new(2.0, 7.0);
const WALK_DUST_OFFSET_RIGHT: Vec2 = Vec2::new(-8.0, 7.0);
const JUMP_DUST_OFFSET: Vec2 = Vec2::new(2.0, 12.0);

/// Upper bound of commands a single cue maps to.
pub const MAX_CUE_COMMANDS: usize = 2;

/// HUD score line.
pub fn score_text(score: u32, target: u32) -> String {
    format!("Score: {} / {}", score, target)
}

fn play_sound(id: &str, volume: f32) -> EngineCmd {
    EngineCmd::PlaySound {
        id: id.to_string(),
        volume,
    }
}

fn set_text(slot: TextSlot, text: impl Into<String>) -> EngineCmd {
    EngineCmd::SetText {
        slot,
        text: text.into(),
    }
}

/// Engine commands realising `cue`.
pub fn cue_commands(cue: &Cue, config: &GameConfig) -> ArrayVec<EngineCmd, MAX_CUE_COMMANDS> {
    let mut cmds = ArrayVec::new();
    match *cue {
        Cue::WalkDustStarted(facing) => cmds.push(EngineCmd::StartEmitter {
            emitter: Emitter::Walking,
            offset: match facing {
                Facing::Left => WALK_DUST_OFFSET_LEFT,
                Facing::Right => WALK_DUST_OFFSET_RIGHT,
            },
            speed: Some(Vec2::new(config.particle_velocity, 0.0)),
        }),
        Cue::WalkDustStopped => cmds.push(EngineCmd::StopEmitter {
            emitter: Emitter::Walking,
        }),
        Cue::JumpDustStarted => cmds.push(EngineCmd::StartEmitter {
            emitter: Emitter::Jumping,
            offset: JUMP_DUST_OFFSET,
            speed: None,
        }),
        Cue::JumpDustStopped => cmds.push(EngineCmd::StopEmitter {
            emitter: Emitter::Jumping,
        }),
        Cue::Jumped => cmds.push(play_sound(SOUND_JUMP, DEFAULT_SOUND_VOLUME)),
        Cue::MovementChanged(state) => cmds.push(EngineCmd::PlayAnimation {
            key: state.animation().to_string(),
        }),
        Cue::FacingChanged(facing) => cmds.push(EngineCmd::SetFacing(facing)),
        Cue::CoinCollected(at) => {
            cmds.push(play_sound(SOUND_COIN, COIN_SOUND_VOLUME));
            cmds.push(EngineCmd::BurstParticles {
                effect: COIN_BURST_EFFECT.to_string(),
                at,
                count: COIN_BURST_COUNT,
            });
        }
        Cue::ScoreChanged { score, target } => {
            cmds.push(set_text(TextSlot::Score, score_text(score, target)))
        }
        Cue::KeyCollected => cmds.push(play_sound(SOUND_KEY, DEFAULT_SOUND_VOLUME)),
        Cue::BlockUnlocked => cmds.push(play_sound(SOUND_UNLOCK, DEFAULT_SOUND_VOLUME)),
        Cue::Won => {
            cmds.push(play_sound(SOUND_WIN, DEFAULT_SOUND_VOLUME));
            cmds.push(set_text(TextSlot::Win, WIN_TEXT));
        }
        Cue::HintShown => cmds.push(set_text(TextSlot::Hint, HINT_TEXT)),
        Cue::HintCleared => cmds.push(set_text(TextSlot::Hint, "")),
    }
    cmds
}

/// Forward every pending cue to the engine command queue.
pub fn dispatch_cues(
    mut cues: MessageReader<Cue>,
    config: Res<GameConfig>,
    mut engine_cmds: MessageWriter<EngineCmd>,
) {
    for cue in cues.read() {
        engine_cmds.write_batch(cue_commands(cue, &config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::player::MovementState;

    #[test]
    fn coin_plays_sound_then_bursts() {
        let cmds = cue_commands(&Cue::CoinCollected(Vec2::new(10.0, 20.0)), &GameConfig::new());
        assert_eq!(
            cmds.as_slice(),
            &[
                EngineCmd::PlaySound {
                    id: "playerCollect2".into(),
                    volume: 0.8
                },
                EngineCmd::BurstParticles {
                    effect: "gemCollect".into(),
                    at: Vec2::new(10.0, 20.0),
                    count: 5
                },
            ]
        );
    }

    #[test]
    fn walking_dust_offset_depends_on_facing() {
        let config = GameConfig::new();
        let left = cue_commands(&Cue::WalkDustStarted(Facing::Left), &config);
        let right = cue_commands(&Cue::WalkDustStarted(Facing::Right), &config);
        let offset = |cmds: &ArrayVec<EngineCmd, MAX_CUE_COMMANDS>| match &cmds[0] {
            EngineCmd::StartEmitter { offset, speed, .. } => (*offset, *speed),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(offset(&left), (Vec2::new(2.0, 7.0), Some(Vec2::new(50.0, 0.0))));
        assert_eq!(offset(&right).0, Vec2::new(-8.0, 7.0));
    }

    #[test]
    fn texts() {
        let config = GameConfig::new();
        assert_eq!(
            cue_commands(&Cue::ScoreChanged { score: 7, target: 30 }, &config)[0],
            EngineCmd::SetText {
                slot: TextSlot::Score,
                text: "Score: 7 / 30".into()
            }
        );
        assert_eq!(
            cue_commands(&Cue::HintShown, &config)[0],
            EngineCmd::SetText {
                slot: TextSlot::Hint,
                text: "Collect more gems!".into()
            }
        );
        assert_eq!(
            cue_commands(&Cue::HintCleared, &config)[0],
            EngineCmd::SetText {
                slot: TextSlot::Hint,
                text: String::new()
            }
        );
        let won = cue_commands(&Cue::Won, &config);
        assert_eq!(won.len(), 2);
        assert_eq!(
            won[1],
            EngineCmd::SetText {
                slot: TextSlot::Win,
                text: "YOU WIN!".into()
            }
        );
    }

    #[test]
    fn movement_maps_to_animation() {
        let cmds = cue_commands(
            &Cue::MovementChanged(MovementState::Jumping),
            &GameConfig::new(),
        );
        assert_eq!(
            cmds.as_slice(),
            &[EngineCmd::PlayAnimation { key: "jump".into() }]
        );
    }

    #[test]
    fn dispatcher_preserves_cue_order() {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.init_resource::<Messages<Cue>>();
        world.init_resource::<Messages<EngineCmd>>();
        {
            let mut cues = world.resource_mut::<Messages<Cue>>();
            cues.write(Cue::KeyCollected);
            cues.write(Cue::Jumped);
        }
        let mut schedule = Schedule::default();
        schedule.add_systems(dispatch_cues);
        schedule.run(&mut world);
        schedule.run(&mut world);

        let cmds: Vec<EngineCmd> = world.resource_mut::<Messages<EngineCmd>>().drain().collect();
        assert_eq!(
            cmds,
            vec![
                EngineCmd::PlaySound {
                    id: "playerCollect1".into(),
                    volume: 1.0
                },
                EngineCmd::PlaySound {
                    id: "playerJump".into(),
                    volume: 1.0
                },
            ]
        );
    }
}
