use russell_lab::Vector;
use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds the state of a material point (e.g., an integration point of a finite element)
///
/// On entry of a stress update, the state corresponds to the beginning of the increment (step n);
/// on exit, it corresponds to the end of the increment (step n+1).
#[derive(Clone, Deserialize, Serialize)]
pub struct LocalState {
    /// Holds the strain tensor ε
    pub strain: Tensor2,

    /// Holds the stress tensor σ
    pub stress: Tensor2,

    /// Holds the internal values (history variables)
    pub internal_values: Vector,

    /// Holds the temperature T
    pub temperature: f64,

    /// Holds the time t
    pub time: f64,

    /// Holds the stored (strain) energy u
    pub energy: f64,

    /// Holds the dissipated (plastic) work p
    pub plastic_work: f64,
}

impl LocalState {
    /// Allocates a new instance with zero stress and strain
    pub fn new(n_internal_values: usize) -> Self {
        LocalState {
            strain: Tensor2::new(Mandel::Symmetric),
            stress: Tensor2::new(Mandel::Symmetric),
            internal_values: Vector::new(n_internal_values),
            temperature: 0.0,
            time: 0.0,
            energy: 0.0,
            plastic_work: 0.0,
        }
    }

    /// Copies all data from another state
    ///
    /// **Note:** The numbers of internal values must be equal.
    pub fn mirror(&mut self, other: &LocalState) {
        self.strain.set_tensor(1.0, &other.strain);
        self.stress.set_tensor(1.0, &other.stress);
        for i in 0..self.internal_values.dim() {
            self.internal_values[i] = other.internal_values[i];
        }
        self.temperature = other.temperature;
        self.time = other.time;
        self.energy = other.energy;
        self.plastic_work = other.plastic_work;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LocalState;
    use russell_lab::vec_approx_eq;

    #[test]
    fn new_and_mirror_work() {
        let state = LocalState::new(2);
        assert_eq!(state.strain.vector().dim(), 6);
        assert_eq!(state.stress.vector().dim(), 6);
        assert_eq!(state.internal_values.dim(), 2);
        assert_eq!(state.energy, 0.0);

        let mut other = LocalState::new(2);
        other.stress.vector_mut()[0] = 1.0;
        other.strain.vector_mut()[1] = 2.0;
        other.internal_values[1] = 3.0;
        other.temperature = 300.0;
        other.time = 4.0;
        other.energy = 5.0;
        other.plastic_work = 6.0;
        let mut copy = LocalState::new(2);
        copy.mirror(&other);
        vec_approx_eq(copy.stress.vector(), &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1e-15);
        vec_approx_eq(copy.strain.vector(), &[0.0, 2.0, 0.0, 0.0, 0.0, 0.0], 1e-15);
        vec_approx_eq(&copy.internal_values, &[0.0, 3.0], 1e-15);
        assert_eq!(copy.temperature, 300.0);
        assert_eq!(copy.time, 4.0);
        assert_eq!(copy.energy, 5.0);
        assert_eq!(copy.plastic_work, 6.0);
    }
}
