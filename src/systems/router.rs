//! Overlap routing.
//!
//! Engine overlap reports go through two stages:
//!
//! 1. [`overlap_intake`] resolves the engine handles of a [`RawOverlap`]
//!    through [`HandleIndex`] and triggers an [`OverlapEvent`].
//! 2. [`route_overlap_observer`] checks the event against the world and
//!    forwards a typed [`ProgressionEvent`].
//!
//! Anything that does not make sense (an unknown handle or kind name, a first
//! participant that is not the player, a kind that disagrees with the entity)
//! is logged as a warning and dropped. Overlaps with objects that were already
//! consumed are expected (the engine keeps reporting them until it has
//! processed the destroy request) and are dropped quietly.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::collectible::{Collectible, CollectibleKind, EngineHandle};
use crate::components::player::Player;
use crate::events::collision::{OverlapEvent, ProgressionEvent, RawOverlap};
use crate::resources::handles::HandleIndex;

/// Resolve the handles of a raw engine overlap and trigger an [`OverlapEvent`].
///
/// Registered as a one-shot system and run with
/// [`World::run_system_with`] for every report.
pub fn overlap_intake(
    In(raw): In<RawOverlap>,
    handles: Res<HandleIndex>,
    mut commands: Commands,
) {
    let Some(player) = handles.get(EngineHandle(raw.player)) else {
        warn!(
            "Overlap from unknown handle {} with {} ({}); ignored",
            EngineHandle(raw.player),
            EngineHandle(raw.other),
            raw.other_kind
        );
        return;
    };
    let Some(other) = handles.get(EngineHandle(raw.other)) else {
        warn!(
            "Overlap with unknown handle {} ({}); ignored",
            EngineHandle(raw.other),
            raw.other_kind
        );
        return;
    };
    commands.trigger(OverlapEvent {
        player,
        other,
        other_kind: raw.other_kind,
    });
}

/// Classify an [`OverlapEvent`] and forward it to the progression observer.
pub fn route_overlap_observer(
    trigger: On<OverlapEvent>,
    players: Query<(), With<Player>>,
    collectibles: Query<(&Collectible, &EngineHandle)>,
    mut commands: Commands,
) {
    let event = trigger.event();

    if !players.contains(event.player) {
        warn!(
            "Overlap whose first participant {:?} is not the player; ignored",
            event.player
        );
        return;
    }

    let Some(kind) = CollectibleKind::from_name(&event.other_kind) else {
        warn!("Overlap with unknown kind '{}'; ignored", event.other_kind);
        return;
    };

    let Ok((collectible, handle)) = collectibles.get(event.other) else {
        warn!(
            "Overlap with {:?} reported as '{}' but it is not a collectible; ignored",
            event.other, kind
        );
        return;
    };

    if collectible.kind != kind {
        warn!(
            "Overlap with {} reported as '{}' but registered as '{}'; ignored",
            handle, kind, collectible.kind
        );
        return;
    }

    if collectible.consumed {
        debug!("Overlap with consumed {} {}; dropped", kind, handle);
        return;
    }

    let routed = match kind {
        CollectibleKind::Coin => ProgressionEvent::CoinOverlap(event.other),
        CollectibleKind::Key => ProgressionEvent::KeyOverlap(event.other),
        CollectibleKind::Block => ProgressionEvent::BlockOverlap(event.other),
        CollectibleKind::Checkpoint => ProgressionEvent::CheckpointOverlap(event.other),
    };
    commands.trigger(routed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn world_with_router() -> (World, Arc<Mutex<Vec<ProgressionEvent>>>) {
        let mut world = World::new();
        world.add_observer(route_overlap_observer);
        let routed = Arc::new(Mutex::new(Vec::new()));
        let sink = routed.clone();
        world.add_observer(move |trigger: On<ProgressionEvent>| {
            sink.lock().unwrap().push(*trigger.event());
        });
        world.flush();
        (world, routed)
    }

    fn overlap(world: &mut World, player: Entity, other: Entity, kind: &str) {
        world.trigger(OverlapEvent {
            player,
            other,
            other_kind: kind.to_string(),
        });
        world.flush();
    }

    #[test]
    fn routes_each_kind() {
        let (mut world, routed) = world_with_router();
        let player = world.spawn(Player).id();
        let coin = world
            .spawn((Collectible::new(CollectibleKind::Coin), EngineHandle(1)))
            .id();
        let key = world
            .spawn((Collectible::new(CollectibleKind::Key), EngineHandle(2)))
            .id();
        let block = world
            .spawn((Collectible::new(CollectibleKind::Block), EngineHandle(3)))
            .id();
        let checkpoint = world
            .spawn((Collectible::new(CollectibleKind::Checkpoint), EngineHandle(4)))
            .id();

        overlap(&mut world, player, coin, "coin");
        overlap(&mut world, player, key, "key");
        overlap(&mut world, player, block, "block");
        overlap(&mut world, player, checkpoint, "checkpoint");

        assert_eq!(
            *routed.lock().unwrap(),
            vec![
                ProgressionEvent::CoinOverlap(coin),
                ProgressionEvent::KeyOverlap(key),
                ProgressionEvent::BlockOverlap(block),
                ProgressionEvent::CheckpointOverlap(checkpoint),
            ]
        );
    }

    #[test]
    fn anomalies_are_dropped() {
        let (mut world, routed) = world_with_router();
        let player = world.spawn(Player).id();
        let coin = world
            .spawn((Collectible::new(CollectibleKind::Coin), EngineHandle(1)))
            .id();
        let scenery = world.spawn(EngineHandle(9)).id();

        overlap(&mut world, player, coin, "spike");
        overlap(&mut world, player, coin, "key");
        overlap(&mut world, coin, player, "coin");
        overlap(&mut world, player, scenery, "coin");

        assert!(routed.lock().unwrap().is_empty());
    }

    #[test]
    fn consumed_collectibles_are_dropped() {
        let (mut world, routed) = world_with_router();
        let player = world.spawn(Player).id();
        let mut coin = Collectible::new(CollectibleKind::Coin);
        coin.consume();
        let coin = world.spawn((coin, EngineHandle(1))).id();

        overlap(&mut world, player, coin, "coin");

        assert!(routed.lock().unwrap().is_empty());
    }

    #[test]
    fn intake_resolves_handles() {
        let (mut world, routed) = world_with_router();
        let player = world.spawn((Player, EngineHandle(0))).id();
        let coin = world
            .spawn((Collectible::new(CollectibleKind::Coin), EngineHandle(7)))
            .id();
        let mut handles = HandleIndex::new();
        handles.insert(EngineHandle(0), player);
        handles.insert(EngineHandle(7), coin);
        world.insert_resource(handles);

        let intake = world.register_system(overlap_intake);
        world
            .run_system_with(intake, RawOverlap::new(0, 7, "coin"))
            .unwrap();
        world
            .run_system_with(intake, RawOverlap::new(0, 99, "coin"))
            .unwrap();
        world
            .run_system_with(intake, RawOverlap::new(42, 7, "coin"))
            .unwrap();
        world.flush();

        assert_eq!(
            *routed.lock().unwrap(),
            vec![ProgressionEvent::CoinOverlap(coin)]
        );
    }
}
