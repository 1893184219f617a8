use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::NextGameState;
use bevy_ecs::prelude::*;

/// Trigger the state-change observer when a transition is pending.
///
/// Runs first in the frame schedule, so a transition requested during frame
/// N is applied before anything else happens in frame N+1.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::observer::On;
    use crate::resources::gamestate::GameStates;

    #[derive(Resource, Default)]
    struct Triggered(u32);

    fn count_changes(_trigger: On<GameStateChangedEvent>, mut triggered: ResMut<Triggered>) {
        triggered.0 += 1;
    }

    #[test]
    fn triggers_only_while_a_transition_is_pending() {
        let mut world = World::new();
        world.insert_resource(NextGameState::new());
        world.init_resource::<Triggered>();
        world.add_observer(count_changes);
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(check_pending_state);
        schedule.run(&mut world);
        assert_eq!(world.resource::<Triggered>().0, 0);

        world.resource_mut::<NextGameState>().set(GameStates::Playing);
        schedule.run(&mut world);
        assert_eq!(world.resource::<Triggered>().0, 1);
    }
}
