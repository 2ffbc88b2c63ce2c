//! Simulation Context
//!
//! Owns the ECS world and the tick schedule. Callers drive it one tick at a
//! time; pausing or changing speed is simply calling `step` less often.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use genesis_events::{AgentEvents, TickReport, WorldSnapshot};

use crate::components::agent::{Agent, AgentSlots};
use crate::components::grid::EnvironmentGrid;
use crate::components::predator::Predator;
use crate::config::Config;
use crate::systems::{advance_environment, step_agents, update_predator, TickEvents};
use crate::{output, setup, SimRng};

pub struct Simulation {
    world: World,
    schedule: Schedule,
    seed: u64,
}

impl Simulation {
    /// A fresh run: random food, agents at their corners, predator at its start
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = setup::create_grid(&config, &mut rng);
        let agents = setup::create_agents(&config);
        let predator = setup::create_predator(&config, &grid);
        Self::from_parts(config, seed, rng, grid, agents, predator)
    }

    /// Assemble a simulation from explicit state
    pub fn from_parts(
        config: Config,
        seed: u64,
        rng: SmallRng,
        grid: EnvironmentGrid,
        agents: AgentSlots,
        predator: Option<Predator>,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(SimRng(rng));
        world.insert_resource(grid);
        world.insert_resource(agents);
        world.insert_resource(TickEvents::new());
        if let Some(predator) = predator {
            world.insert_resource(predator);
        }

        Self {
            world,
            schedule: build_schedule(),
            seed,
        }
    }

    /// Advance everything by one tick
    pub fn step(&mut self) -> [AgentEvents; 2] {
        self.schedule.run(&mut self.world);
        self.last_events()
    }

    /// Advance one tick and package the events with the tick and season
    pub fn step_report(&mut self) -> TickReport {
        let events = self.step();
        let grid = self.grid();
        TickReport::new(grid.tick_count(), grid.season().name(), events.to_vec())
    }

    /// Advance `ticks` ticks
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Discard all state and start over with the starting seed
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Discard all state and start over with a new seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        let config = self.config().clone();
        *self = Simulation::new(config, seed);
        tracing::info!(seed, "Simulation reset");
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.grid().tick_count()
    }

    pub fn config(&self) -> &Config {
        self.world.resource::<Config>()
    }

    pub fn grid(&self) -> &EnvironmentGrid {
        self.world.resource::<EnvironmentGrid>()
    }

    pub fn agents(&self) -> &AgentSlots {
        self.world.resource::<AgentSlots>()
    }

    pub fn agent(&self, slot: usize) -> Option<&Agent> {
        self.agents().get(slot)
    }

    pub fn predator(&self) -> Option<&Predator> {
        self.world.get_resource::<Predator>()
    }

    /// Events from the most recent tick (all quiet before the first)
    pub fn last_events(&self) -> [AgentEvents; 2] {
        self.world.resource::<TickEvents>().agents
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        output::snapshot(self)
    }
}

/// environment -> predator -> agents, on a single thread
fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((advance_environment, update_predator, step_agents).chain());
    schedule
}
