//! Agent Step System
//!
//! Runs each agent through one tick: chemistry, decision, movement and energy,
//! eating, marking, pathway learning, and the death check. Dead agents are
//! replaced by their offspring in the same slot.

use bevy_ecs::prelude::*;
use rand::Rng;

use genesis_events::AgentEvents;

use crate::components::agent::{Agent, AgentSlots, PeerView};
use crate::components::grid::EnvironmentGrid;
use crate::components::predator::Predator;
use crate::config::Config;
use crate::setup::spawn_point;
use crate::SimRng;

use super::chemistry::update_chemicals;
use super::decision::decide_move;

/// Fatigue gained per move
const FATIGUE_GAIN: f64 = 0.01;
/// Fatigue recovered per stationary tick
const FATIGUE_RECOVERY: f64 = 0.02;
/// Satiation gained per meal
const MEAL_SATIATION: f64 = 0.5;
/// Fear above which an alarm marker is left
const ALARM_FEAR_THRESHOLD: f64 = 0.01;

/// Resource storing what happened to each slot during the last tick
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub agents: [AgentEvents; 2],
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.agents = Default::default();
    }
}

/// System: step both agents in slot order, replacing the dead
pub fn step_agents(
    config: Res<Config>,
    mut rng: ResMut<SimRng>,
    mut grid: ResMut<EnvironmentGrid>,
    predator: Option<Res<Predator>>,
    mut agents: ResMut<AgentSlots>,
    mut tick_events: ResMut<TickEvents>,
) {
    tick_events.clear();
    let views = agents.peer_views();
    let predator = predator.as_deref();

    for slot in 0..agents.slots.len() {
        let peer = views[1 - slot];
        let events = step_agent(
            &mut agents.slots[slot],
            &peer,
            predator,
            &mut grid,
            &config,
            &mut rng.0,
        );

        if events.ate {
            let agent = &agents.slots[slot];
            tracing::debug!(
                tick = grid.tick_count(),
                slot,
                energy = agent.energy,
                food_eaten = agent.food_eaten,
                "Agent ate"
            );
        }

        if events.died {
            let offspring = agents.slots[slot].produce_offspring(
                spawn_point(slot, grid.size()),
                config.energy.start,
                config.agents.inheritance_strength,
            );
            let parent = agents.replace(slot, offspring);
            tracing::info!(
                tick = grid.tick_count(),
                slot,
                generation = parent.generation,
                food_eaten = parent.food_eaten,
                inherited_pathways = agents.slots[slot].pathway_count(),
                "Agent died; offspring born"
            );
        }

        tick_events.agents[slot] = events;
    }
}

/// One tick for one agent
///
/// `peer` must be the other agent as it stood at the start of the tick.
/// A dead agent does nothing and reports no events.
pub fn step_agent<R: Rng>(
    agent: &mut Agent,
    peer: &PeerView,
    predator: Option<&Predator>,
    grid: &mut EnvironmentGrid,
    config: &Config,
    rng: &mut R,
) -> AgentEvents {
    let mut events = AgentEvents::default();
    if !agent.alive {
        return events;
    }
    agent.total_ticks += 1;

    update_chemicals(agent, peer, predator, grid.diagonal(), config);

    let target = decide_move(agent, peer, predator, grid, config, rng);
    let moved = target != agent.pos;

    let drain_modifier = config.seasons.profile(grid.season()).drain_modifier;
    let fatigue_multiplier = 1.0 + agent.chemicals.fatigue;

    agent.energy -= config.energy.passive_drain * drain_modifier;
    if moved {
        agent.energy -= config.energy.move_drain * drain_modifier * fatigue_multiplier;
        agent.pos = target;
        agent.record_move(target, config.agents.trail_len);
        agent.chemicals.fatigue = (agent.chemicals.fatigue + FATIGUE_GAIN).min(1.0);
        agent.stationary_ticks = 0;
        events.moved = true;
    } else {
        agent.stationary_ticks += 1;
        agent.chemicals.fatigue = (agent.chemicals.fatigue - FATIGUE_RECOVERY).max(0.0);
    }

    let gained = grid.eat_food(agent.pos, config.world.edible_threshold, config.energy.food_gain);
    if gained > 0.0 {
        agent.energy = (agent.energy + gained).min(config.energy.max);
        agent.chemicals.satiation = (agent.chemicals.satiation + MEAL_SATIATION).min(1.0);
        agent.food_eaten += 1;
        events.ate = true;

        let consolidation = 1.0 + agent.chemicals.memory_consolidation;
        agent
            .pathways
            .reinforce_all(&agent.move_history, config.pathways.reinforce * consolidation);
        grid.deposit_food_marker(agent.pos, config.markers.food_deposit);
    }

    let fear = agent.chemicals.fear;
    if fear > ALARM_FEAR_THRESHOLD {
        grid.deposit_alarm_marker(agent.pos, fear * fear);
    }

    if !events.ate {
        if let Some(&recent) = agent.move_history.back() {
            agent
                .pathways
                .weaken(recent, config.pathways.weaken, config.pathways.prune_threshold);
        }
    }

    agent.record_history(config.pathways.lookback);

    if agent.energy <= 0.0 {
        agent.energy = 0.0;
        agent.alive = false;
        events.died = true;
    }

    events
}
