//! Chemical Update
//!
//! Recomputes an agent's 12 concentrations once per tick. Later chemicals read
//! the already-updated values of earlier ones; fatigue is carried over from
//! the previous tick's movement.

use crate::components::agent::{Agent, PeerView};
use crate::components::predator::Predator;
use crate::config::Config;

/// Coupling constants between chemicals
pub mod chemistry_constants {
    /// Energy at which hunger reaches zero
    pub const HUNGER_REFERENCE_ENERGY: f64 = 100.0;
    /// Energy below which stress accumulates
    pub const STRESS_REFERENCE_ENERGY: f64 = 50.0;
    pub const SATIATION_HUNGER_SUPPRESSION: f64 = 0.5;
    pub const HUNGER_FEAR_SUPPRESSION: f64 = 0.9;
    pub const FEAR_CURIOSITY_SUPPRESSION: f64 = 0.4;
    pub const FATIGUE_CURIOSITY_SUPPRESSION: f64 = 0.3;
    pub const FATIGUE_AGGRESSION_SUPPRESSION: f64 = 0.3;
    pub const AGGRESSION_RETENTION: f64 = 0.95;
    pub const AGGRESSION_GAIN: f64 = 0.1;
    /// Squared-distance scale of the aggression proximity falloff
    pub const AGGRESSION_PROXIMITY_SCALE: f64 = 25.0;
    pub const ALERTNESS_RETENTION: f64 = 0.9;
    pub const ALERTNESS_GAIN: f64 = 0.3;
    pub const ALERTNESS_SATIATION_SUPPRESSION: f64 = 0.25;
    pub const COMFORT_RETENTION: f64 = 0.97;
    pub const COMFORT_GAIN: f64 = 0.03;
    pub const COMFORT_FEAR_SUPPRESSION: f64 = 0.3;
    pub const URGENCY_RETENTION: f64 = 0.95;
    pub const URGENCY_GAIN: f64 = 1.5;
    pub const CONSOLIDATION_RETENTION: f64 = 0.97;
    pub const CONSOLIDATION_GAIN: f64 = 0.04;
    pub const SOCIAL_RETENTION: f64 = 0.99;
    pub const SOCIAL_GAIN: f64 = 0.03;
    /// Squared-distance scale of the social proximity falloff
    pub const SOCIAL_PROXIMITY_SCALE: f64 = 50.0;
    pub const STRESS_RETENTION: f64 = 0.999;
    pub const STRESS_GAIN: f64 = 0.01;
}

use chemistry_constants::*;

/// Smooth predator signal: 1 on top of the agent, 0.5 at sense range
pub fn predator_signal(agent: &Agent, predator: Option<&Predator>, sense_range: f64) -> f64 {
    match predator {
        Some(p) if p.alive => {
            let scaled = agent.pos.distance(p.pos) / sense_range;
            1.0 / (1.0 + scaled * scaled)
        }
        _ => 0.0,
    }
}

/// Recompute all chemicals for one tick
///
/// Side effects beyond the chemicals: the current cell is added to the
/// visited set.
pub fn update_chemicals(
    agent: &mut Agent,
    peer: &PeerView,
    predator: Option<&Predator>,
    grid_diagonal: f64,
    config: &Config,
) {
    let predator_term = predator_signal(agent, predator, config.predator.sense_range);
    let peer_distance = agent.pos.distance(peer.pos);
    let pos = agent.pos;
    let energy = agent.energy;
    let c = &mut agent.chemicals;

    // hunger, relieved by satiation
    c.hunger = (1.0 - energy / HUNGER_REFERENCE_ENERGY).clamp(0.0, 1.0);
    c.satiation = (c.satiation - config.chemicals.satiation_decay).max(0.0);
    c.hunger = (c.hunger - c.satiation * SATIATION_HUNGER_SUPPRESSION).max(0.0);

    // fear of the peer and the predator, damped by hunger
    c.fear = if peer.alive {
        (1.0 - peer_distance / grid_diagonal).clamp(0.0, 1.0)
    } else {
        0.0
    };
    if predator.is_some_and(|p| p.alive) {
        c.fear = (c.fear + predator_term * config.predator.fear_boost).min(1.0);
    }
    c.fear *= 1.0 - c.hunger * c.hunger * HUNGER_FEAR_SUPPRESSION;

    // curiosity
    if agent.visited.insert(pos) {
        c.curiosity = (c.curiosity + config.chemicals.curiosity_gain).min(1.0);
    } else {
        c.curiosity = (c.curiosity - config.chemicals.curiosity_decay).max(0.0);
    }
    c.curiosity = (c.curiosity - c.fear * FEAR_CURIOSITY_SUPPRESSION).max(0.0);
    c.curiosity = (c.curiosity - c.fatigue * FATIGUE_CURIOSITY_SUPPRESSION).max(0.0);

    // aggression toward a peer near our pathways
    if peer.alive {
        let proximity = 1.0 / (1.0 + peer_distance * peer_distance / AGGRESSION_PROXIMITY_SCALE);
        let density = agent
            .pathways
            .territory_density(peer.pos, config.pathways.density_sample);
        c.aggression = (c.aggression * AGGRESSION_RETENTION
            + proximity * density * AGGRESSION_GAIN)
            .clamp(0.0, 1.0);
    }
    c.aggression = (c.aggression - c.fatigue * FATIGUE_AGGRESSION_SUPPRESSION).max(0.0);

    // alertness, which eats into satiation
    let alert_input = c.fear * 0.5 + predator_term * 0.5;
    c.alertness =
        (c.alertness * ALERTNESS_RETENTION + alert_input * ALERTNESS_GAIN).clamp(0.0, 1.0);
    c.satiation *= 1.0 - c.alertness * ALERTNESS_SATIATION_SUPPRESSION;

    // comfort, which calms fear
    let familiarity = if agent.visited.contains(&pos) { 1.0 } else { 0.0 };
    let comfort_input = familiarity * (1.0 - c.hunger) * (1.0 - c.fear);
    c.comfort = (c.comfort * COMFORT_RETENTION + comfort_input * COMFORT_GAIN).clamp(0.0, 1.0);
    c.fear = (c.fear - c.comfort * COMFORT_FEAR_SUPPRESSION).max(0.0);

    c.urgency =
        (c.urgency * URGENCY_RETENTION + c.hunger * c.fear * URGENCY_GAIN).clamp(0.0, 1.0);

    c.memory_consolidation = (c.memory_consolidation * CONSOLIDATION_RETENTION
        + c.fatigue * (1.0 - c.hunger) * CONSOLIDATION_GAIN)
        .clamp(0.0, 1.0);

    // social: positive only when both are sated
    if peer.alive {
        let proximity = 1.0 / (1.0 + peer_distance * peer_distance / SOCIAL_PROXIMITY_SCALE);
        let compatibility = (1.0 - c.hunger) * (1.0 - peer.hunger);
        let social_input = proximity * (compatibility * 2.0 - 1.0);
        c.social = (c.social * SOCIAL_RETENTION + social_input * SOCIAL_GAIN).clamp(-1.0, 1.0);
    }

    let energy_pressure = (1.0 - energy / STRESS_REFERENCE_ENERGY).max(0.0);
    c.stress = (c.stress * STRESS_RETENTION + energy_pressure * STRESS_GAIN).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentColor;
    use crate::components::grid::GridPos;

    const DIAGONAL: f64 = 84.8528137423857;

    fn agent_at(x: i32, y: i32, energy: f64) -> Agent {
        Agent::new(0, AgentColor::Blue, GridPos::new(x, y), energy)
    }

    fn peer_at(x: i32, y: i32, hunger: f64) -> PeerView {
        PeerView {
            pos: GridPos::new(x, y),
            alive: true,
            hunger,
        }
    }

    #[test]
    fn test_hunger_tracks_energy_and_satiation() {
        let config = Config::default();
        let mut agent = agent_at(10, 10, 40.0);
        update_chemicals(&mut agent, &PeerView::absent(), None, DIAGONAL, &config);
        // no predator, no peer: alertness 0.5 * 0.9 = 0.45, satiation stays 0
        assert!((agent.chemicals.hunger - 0.6).abs() < 1e-12);

        let mut sated = agent_at(10, 10, 40.0);
        sated.chemicals.satiation = 0.52;
        update_chemicals(&mut sated, &PeerView::absent(), None, DIAGONAL, &config);
        assert!((sated.chemicals.hunger - (0.6 - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_dead_peer_means_no_fear_and_no_social_change() {
        let config = Config::default();
        let mut agent = agent_at(10, 10, 100.0);
        agent.chemicals.social = 0.4;
        update_chemicals(&mut agent, &PeerView::absent(), None, DIAGONAL, &config);
        assert_eq!(agent.chemicals.fear, 0.0);
        assert_eq!(agent.chemicals.social, 0.4);
    }

    #[test]
    fn test_hunger_suppresses_fear() {
        let config = Config::default();
        let peer = peer_at(12, 10, 0.0);

        let mut fed = agent_at(10, 10, 100.0);
        let mut starving = agent_at(10, 10, 1.0);
        update_chemicals(&mut fed, &peer, None, DIAGONAL, &config);
        update_chemicals(&mut starving, &peer, None, DIAGONAL, &config);

        assert!(fed.chemicals.fear > starving.chemicals.fear * 5.0);
    }

    #[test]
    fn test_predator_raises_fear_and_alertness() {
        let config = Config::default();
        let predator = Predator::new(GridPos::new(11, 10));

        let mut calm = agent_at(10, 10, 100.0);
        let mut hunted = agent_at(10, 10, 100.0);
        update_chemicals(&mut calm, &PeerView::absent(), None, DIAGONAL, &config);
        update_chemicals(&mut hunted, &PeerView::absent(), Some(&predator), DIAGONAL, &config);

        assert!(hunted.chemicals.fear > 0.3);
        assert!(hunted.chemicals.alertness > calm.chemicals.alertness);
    }

    #[test]
    fn test_new_cell_raises_curiosity() {
        let config = Config::default();
        let mut agent = agent_at(10, 10, 100.0);
        agent.pos = GridPos::new(11, 10);
        update_chemicals(&mut agent, &PeerView::absent(), None, DIAGONAL, &config);
        assert!((agent.chemicals.curiosity - 0.65).abs() < 1e-12);
        assert!(agent.visited.contains(&GridPos::new(11, 10)));

        update_chemicals(&mut agent, &PeerView::absent(), None, DIAGONAL, &config);
        assert!((agent.chemicals.curiosity - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_social_sign_follows_hunger() {
        let config = Config::default();

        let mut sated = agent_at(10, 10, 100.0);
        update_chemicals(&mut sated, &peer_at(11, 10, 0.0), None, DIAGONAL, &config);
        assert!(sated.chemicals.social > 0.0);

        let mut hungry = agent_at(10, 10, 100.0);
        update_chemicals(&mut hungry, &peer_at(11, 10, 0.9), None, DIAGONAL, &config);
        assert!(hungry.chemicals.social < 0.0);
    }

    #[test]
    fn test_aggression_needs_pathways_near_peer() {
        let config = Config::default();
        let peer = peer_at(11, 10, 0.0);

        let mut no_territory = agent_at(10, 10, 100.0);
        update_chemicals(&mut no_territory, &peer, None, DIAGONAL, &config);
        assert_eq!(no_territory.chemicals.aggression, 0.0);

        let mut territorial = agent_at(10, 10, 100.0);
        territorial.pathways.insert(GridPos::new(11, 10), 0.9);
        update_chemicals(&mut territorial, &peer, None, DIAGONAL, &config);
        assert!(territorial.chemicals.aggression > 0.0);
    }

    #[test]
    fn test_stress_accumulates_only_at_low_energy() {
        let config = Config::default();
        let mut rich = agent_at(10, 10, 80.0);
        let mut poor = agent_at(10, 10, 10.0);
        for _ in 0..10 {
            update_chemicals(&mut rich, &PeerView::absent(), None, DIAGONAL, &config);
            update_chemicals(&mut poor, &PeerView::absent(), None, DIAGONAL, &config);
        }
        assert_eq!(rich.chemicals.stress, 0.0);
        assert!(poor.chemicals.stress > 0.0);
    }

    #[test]
    fn test_frozen_environment_stays_bounded() {
        let config = Config::default();
        let predator = Predator::new(GridPos::new(12, 12));
        let peer = peer_at(11, 11, 0.3);
        for energy in [0.0, 5.0, 49.0, 100.0, 150.0] {
            let mut agent = agent_at(10, 10, energy);
            agent.chemicals.fatigue = 0.8;
            agent.pathways.insert(GridPos::new(11, 11), 1.0);
            for _ in 0..5000 {
                update_chemicals(&mut agent, &peer, Some(&predator), DIAGONAL, &config);
                assert!(agent.chemicals.in_bounds(), "{:?}", agent.chemicals);
            }
        }
    }
}
