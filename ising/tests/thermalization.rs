//! End-to-end runs through the public API

use ising::{
    energy, render, seeded_rng, FlipSampler, IsingError, Lattice, Spin, ThermalParams,
    ThermalStatus, Thermalizer,
};

fn rendered(lattice: &Lattice) -> String {
    let mut out = Vec::new();
    render(lattice, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_reference_scenario() {
    let mut lattice = Lattice::new(5, 5).unwrap();
    lattice.fill(Spin::Down);

    assert_eq!(rendered(&lattice), "-----\n".repeat(5));
    assert_eq!(energy(&lattice), 100);

    let mut rng = seeded_rng(Some(2024));
    let params = ThermalParams::new(1.0, 3).with_max_steps(10_000);
    let report = Thermalizer::new(params)
        .unwrap()
        .run(&mut lattice, &mut rng)
        .unwrap();

    assert_eq!(report.status, ThermalStatus::Converged);
    assert_eq!(report.final_energy, energy(&lattice));
    assert_eq!(report.recent_energies.len(), 4);
    assert!(report
        .recent_energies
        .windows(2)
        .all(|pair| pair[0] == pair[1]));

    let text = rendered(&lattice);
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().all(|line| line.len() == 5));
    assert!(text.contains('+'));
}

#[test]
fn test_smallest_lattices_ground_energy() {
    let mut single = Lattice::new(1, 1).unwrap();
    single.fill(Spin::Down);
    assert_eq!(energy(&single), 4);

    let mut square = Lattice::new(2, 2).unwrap();
    square.fill(Spin::Up);
    assert_eq!(energy(&square), 16);
}

#[test]
fn test_both_ground_states_share_energy() {
    let mut up = Lattice::new(6, 3).unwrap();
    up.fill(Spin::Up);
    let mut down = up.clone();
    down.fill(Spin::Down);
    assert_eq!(energy(&up), energy(&down));
    assert_eq!(energy(&up), 4 * 18);
}

#[test]
fn test_sampler_reuse_across_lattices() {
    let mut rng = seeded_rng(Some(8));
    let mut sampler = FlipSampler::new(9);
    for (w, h) in [(3, 3), (4, 2), (1, 5)] {
        let mut lattice = Lattice::new(w, h).unwrap();
        let before = energy(&lattice);
        let (x, y) = sampler.step(&mut lattice, 0.5, &mut rng).unwrap();
        lattice.flip(x, y);
        assert_eq!(energy(&lattice), before);
    }
}

#[test]
fn test_invalid_inputs_fail_fast() {
    assert!(matches!(
        Lattice::new(0, 0),
        Err(IsingError::InvalidDimensions { .. })
    ));
    assert_eq!(
        Thermalizer::new(ThermalParams::new(1.0, 0)).unwrap_err(),
        IsingError::InvalidPatience
    );
}
