//! Long-run invariant checks
//!
//! Runs several seeds for many ticks and checks the bounds every tick must
//! preserve.

use genesis_core::{Config, Simulation};

fn check_invariants(sim: &Simulation) {
    let config = sim.config();
    let grid = sim.grid();
    let tick = sim.tick();

    assert!(grid.fields_in_bounds(), "grid field out of [0, 1] at tick {}", tick);
    assert_eq!(grid.ticks_into_season(), tick % config.seasons.length);

    for agent in sim.agents().iter() {
        assert!(agent.alive, "slot {} left dead at tick {}", agent.id, tick);
        assert!(agent.energy > 0.0 && agent.energy <= config.energy.max);
        assert!(grid.in_bounds(agent.pos));
        assert!(
            agent.chemicals.in_bounds(),
            "chemicals out of bounds at tick {}: {:?}",
            tick,
            agent.chemicals
        );
        assert!(agent.move_history.len() <= config.pathways.lookback);
        assert!(agent.trail.len() <= config.agents.trail_len);
        for (_, strength) in agent.pathways.iter() {
            assert!(strength > 0.0 && strength <= 1.0);
        }
    }

    if let Some(predator) = sim.predator() {
        assert!(grid.in_bounds(predator.pos));
        assert!(predator.trail.len() <= config.predator.trail_len);
    }
}

#[test]
fn test_invariants_hold_over_long_runs() {
    for seed in [1, 7, 42] {
        let mut sim = Simulation::new(Config::default(), seed);
        for _ in 0..1000 {
            sim.step();
            check_invariants(&sim);
        }
        assert_eq!(sim.tick(), 1000);
    }
}

#[test]
fn test_invariants_hold_in_harsh_winter() {
    let mut config = Config::default();
    config.seasons.length = 50;
    config.predator.speed_interval = 1;
    config.predator.damage = 40.0;

    let mut sim = Simulation::new(config, 11);
    for _ in 0..600 {
        sim.step();
        check_invariants(&sim);
    }
}

#[test]
fn test_generations_only_grow() {
    let mut config = Config::default();
    config.predator.speed_interval = 1;
    let mut sim = Simulation::new(config, 3);

    let mut generations = [0u32; 2];
    let mut deaths = [0u32; 2];
    for _ in 0..1500 {
        let events = sim.step();
        for slot in 0..2 {
            let agent = sim.agent(slot).unwrap();
            if events[slot].died {
                deaths[slot] += 1;
                assert_eq!(agent.generation, generations[slot] + 1);
                assert_eq!(agent.total_ticks, 0);
            }
            assert!(agent.generation >= generations[slot]);
            generations[slot] = agent.generation;
        }
    }
    assert_eq!(generations, deaths, "one generation per death");
}
