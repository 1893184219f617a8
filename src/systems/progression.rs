//! Progression state machine.
//!
//! [`progression_observer`] receives the typed overlaps forwarded by the
//! router and applies the level rules while the game is
//! [`Playing`](GameStates::Playing):
//!
//! | Overlap | Effect |
//! |---|---|
//! | coin | consume, `score += 1`, collect cue, score text, destroy |
//! | key | consume, unlock, disable the block collider, destroy |
//! | block | inert while locked; otherwise consume, unlock cue, destroy |
//! | checkpoint | win when `score == target`; otherwise show the hint |
//!
//! Winning switches the state to [`GameStates::Won`] immediately and
//! schedules the restart. From then on every overlap is ignored until the
//! level has been rebuilt.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::collectible::{Collectible, EngineHandle};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::events::collision::ProgressionEvent;
use crate::events::cue::Cue;
use crate::events::engine::EngineCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::level::LevelLayout;
use crate::resources::lock::PuzzleLock;
use crate::resources::scheduler::{TimedAction, TimedScheduler};
use crate::resources::worldtime::WorldTime;

/// Observer applying a [`ProgressionEvent`] to score, lock and win state.
#[allow(clippy::too_many_arguments)]
pub fn progression_observer(
    trigger: On<ProgressionEvent>,
    mut collectibles: Query<(&mut Collectible, &EngineHandle, &MapPosition)>,
    mut players: Query<&mut PlayerState, With<Player>>,
    mut game_state: ResMut<GameState>,
    mut lock: ResMut<PuzzleLock>,
    mut scheduler: ResMut<TimedScheduler>,
    layout: Res<LevelLayout>,
    config: Res<GameConfig>,
    world_time: Res<WorldTime>,
    mut cues: MessageWriter<Cue>,
    mut engine_cmds: MessageWriter<EngineCmd>,
) {
    let event = *trigger.event();

    if !game_state.is_playing() {
        debug!("{:?} while {:?}; ignored", event, game_state.get());
        return;
    }

    let Ok((mut collectible, handle, position)) = collectibles.get_mut(event.entity()) else {
        debug!("{:?} for an entity that is gone; ignored", event);
        return;
    };
    if collectible.consumed {
        return;
    }
    let Ok(mut player) = players.single_mut() else {
        debug!("{:?} without a player; ignored", event);
        return;
    };

    let target = layout.target_score;
    let now = world_time.elapsed;

    match event {
        ProgressionEvent::CoinOverlap(_) => {
            collectible.consume();
            player.score += 1;
            debug!("Coin {} collected, score {}/{}", handle, player.score, target);
            cues.write(Cue::CoinCollected(position.pos));
            cues.write(Cue::ScoreChanged {
                score: player.score,
                target,
            });
            engine_cmds.write(EngineCmd::DestroyEntity(*handle));
        }
        ProgressionEvent::KeyOverlap(_) => {
            collectible.consume();
            lock.unlock();
            info!("Key {} collected, blocks unlocked", handle);
            engine_cmds.write(EngineCmd::SetBlockCollider { enabled: false });
            cues.write(Cue::KeyCollected);
            engine_cmds.write(EngineCmd::DestroyEntity(*handle));
        }
        ProgressionEvent::BlockOverlap(_) => {
            if lock.locked {
                // The engine collider keeps the player out.
                return;
            }
            collectible.consume();
            debug!("Block {} unlocked", handle);
            cues.write(Cue::BlockUnlocked);
            engine_cmds.write(EngineCmd::DestroyEntity(*handle));
        }
        ProgressionEvent::CheckpointOverlap(_) => {
            if player.score == target {
                collectible.consume();
                game_state.set(GameStates::Won);
                info!("Level won with {} points", player.score);
                engine_cmds.write(EngineCmd::DestroyEntity(*handle));
                cues.write(Cue::Won);
                scheduler.schedule(TimedAction::RestartLevel, config.restart_delay_secs(), now);
            } else {
                debug!("Checkpoint reached with {}/{}", player.score, target);
                cues.write(Cue::HintShown);
                scheduler.schedule(TimedAction::ClearHint, config.hint_delay_secs(), now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::collectible::CollectibleKind;
    use bevy_ecs::system::SystemState;

    struct Fixture {
        world: World,
        player: Entity,
    }

    impl Fixture {
        fn new(target_score: u32) -> Self {
            let mut world = World::new();
            world.insert_resource(GameState::new());
            world.insert_resource(PuzzleLock::default());
            world.insert_resource(TimedScheduler::new());
            world.insert_resource(LevelLayout {
                target_score,
                ..Default::default()
            });
            world.insert_resource(GameConfig::new());
            world.insert_resource(WorldTime::default());
            world.init_resource::<Messages<Cue>>();
            world.init_resource::<Messages<EngineCmd>>();
            world.add_observer(progression_observer);
            world.flush();
            let player = world.spawn((Player, PlayerState::new())).id();
            Self { world, player }
        }

        fn spawn(&mut self, kind: CollectibleKind, handle: u32) -> Entity {
            self.world
                .spawn((
                    Collectible::new(kind),
                    EngineHandle(handle),
                    MapPosition::new(handle as f32, 0.0),
                ))
                .id()
        }

        fn send(&mut self, event: ProgressionEvent) {
            self.world.trigger(event);
            self.world.flush();
        }

        fn score(&self) -> u32 {
            self.world.get::<PlayerState>(self.player).unwrap().score
        }

        fn cues(&mut self) -> Vec<Cue> {
            let mut state = SystemState::<MessageReader<Cue>>::new(&mut self.world);
            let mut reader = state.get_mut(&mut self.world);
            reader.read().copied().collect()
        }

        fn engine_cmds(&mut self) -> Vec<EngineCmd> {
            let mut state = SystemState::<MessageReader<EngineCmd>>::new(&mut self.world);
            let mut reader = state.get_mut(&mut self.world);
            reader.read().cloned().collect()
        }
    }

    #[test]
    fn coin_scores_once() {
        let mut f = Fixture::new(30);
        let coin = f.spawn(CollectibleKind::Coin, 5);
        f.send(ProgressionEvent::CoinOverlap(coin));
        f.send(ProgressionEvent::CoinOverlap(coin));
        assert_eq!(f.score(), 1);
        assert!(f.world.get::<Collectible>(coin).unwrap().consumed);
        assert_eq!(
            f.cues(),
            vec![
                Cue::CoinCollected(glam::Vec2::new(5.0, 0.0)),
                Cue::ScoreChanged {
                    score: 1,
                    target: 30
                },
            ]
        );
        assert_eq!(f.engine_cmds(), vec![EngineCmd::DestroyEntity(EngineHandle(5))]);
    }

    #[test]
    fn block_is_inert_until_key() {
        let mut f = Fixture::new(30);
        let block = f.spawn(CollectibleKind::Block, 3);
        let key = f.spawn(CollectibleKind::Key, 4);

        f.send(ProgressionEvent::BlockOverlap(block));
        assert!(!f.world.get::<Collectible>(block).unwrap().consumed);
        assert!(f.cues().is_empty());

        f.send(ProgressionEvent::KeyOverlap(key));
        assert!(!f.world.resource::<PuzzleLock>().locked);
        f.send(ProgressionEvent::BlockOverlap(block));
        assert!(f.world.get::<Collectible>(block).unwrap().consumed);
        assert_eq!(f.cues(), vec![Cue::KeyCollected, Cue::BlockUnlocked]);
        assert_eq!(
            f.engine_cmds(),
            vec![
                EngineCmd::SetBlockCollider { enabled: false },
                EngineCmd::DestroyEntity(EngineHandle(4)),
                EngineCmd::DestroyEntity(EngineHandle(3)),
            ]
        );
    }

    #[test]
    fn checkpoint_short_of_target_shows_hint() {
        let mut f = Fixture::new(1);
        let checkpoint = f.spawn(CollectibleKind::Checkpoint, 9);
        f.send(ProgressionEvent::CheckpointOverlap(checkpoint));
        f.world.resource_mut::<WorldTime>().elapsed = 1.0;
        f.send(ProgressionEvent::CheckpointOverlap(checkpoint));

        assert_eq!(f.world.resource::<GameState>().get(), GameStates::Playing);
        assert!(!f.world.get::<Collectible>(checkpoint).unwrap().consumed);
        assert_eq!(f.cues(), vec![Cue::HintShown, Cue::HintShown]);
        let scheduler = f.world.resource::<TimedScheduler>();
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.fire_at(TimedAction::ClearHint), Some(3.0));
    }

    #[test]
    fn checkpoint_at_target_wins_once() {
        let mut f = Fixture::new(1);
        let coin = f.spawn(CollectibleKind::Coin, 1);
        let checkpoint = f.spawn(CollectibleKind::Checkpoint, 9);
        let other_coin = f.spawn(CollectibleKind::Coin, 2);

        f.send(ProgressionEvent::CoinOverlap(coin));
        f.send(ProgressionEvent::CheckpointOverlap(checkpoint));
        f.send(ProgressionEvent::CheckpointOverlap(checkpoint));
        f.send(ProgressionEvent::CoinOverlap(other_coin));

        assert_eq!(f.world.resource::<GameState>().get(), GameStates::Won);
        assert!(f.world.get::<Collectible>(checkpoint).unwrap().consumed);
        assert!(!f.world.get::<Collectible>(other_coin).unwrap().consumed);
        assert_eq!(f.score(), 1);
        let won = f.cues().into_iter().filter(|c| *c == Cue::Won).count();
        assert_eq!(won, 1);
        let scheduler = f.world.resource::<TimedScheduler>();
        assert_eq!(scheduler.fire_at(TimedAction::RestartLevel), Some(4.0));
        assert_eq!(scheduler.len(), 1);
    }
}
