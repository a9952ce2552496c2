use ising::{boltzmann_weight, Lattice, ThermalReport, ThermalStatus};
use tracing::{debug, info, warn};

pub fn report_summary(report: &ThermalReport, lattice: &Lattice, beta: f64) {
    match report.status {
        ThermalStatus::Converged => {
            info!("\nLattice thermalized after {} steps", report.steps)
        }
        ThermalStatus::StepLimitReached => warn!(
            "\nStep limit reached after {} steps without a stable energy",
            report.steps
        ),
    }

    info!("Initial energy: {}", report.initial_energy);
    info!("Final energy: {}", report.final_energy);
    info!(
        "Magnetization per site: {:.4}",
        lattice.magnetization() as f64 / lattice.len() as f64
    );
    debug!(
        "Boltzmann weight of final configuration: {:e}",
        boltzmann_weight(lattice, beta)
    );
}
