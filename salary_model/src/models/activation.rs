#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn f(&self, z: f64) -> f64 {
        if z >= 0. {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_and_saturates_without_nan() {
        assert_eq!(Sigmoid.f(0.), 0.5);
        assert!((Sigmoid.f(2.) + Sigmoid.f(-2.) - 1.).abs() < 1e-12);
        assert_eq!(Sigmoid.f(-1000.), 0.);
        assert_eq!(Sigmoid.f(1000.), 1.);
    }
}
