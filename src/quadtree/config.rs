use derive_custom::quadsim_parameters;

use super::MAX_DEPTH;
use crate::parameters::ParameterError;

/// Parameters controlling the construction of a tree.
#[quadsim_parameters("quadtree")]
#[derive(Debug, PartialEq, Eq)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// The maximum depth of the tree, at most `MAX_DEPTH`. Every node at this depth is a
    /// leaf, no matter how many particles it contains. This bounds
    /// the recursion for particles at (nearly) identical positions.
    pub max_depth: usize,
    /// The maximum number of particles in a leaf. The maximum can be
    /// exceeded if the leaf node is at max_depth and will therefore
    /// not be subdivided any further.
    pub max_num_particles_per_leaf: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_num_particles_per_leaf: 2,
        }
    }
}

impl QuadTreeConfig {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.max_depth > MAX_DEPTH {
            return Err(ParameterError::InvalidValue(format!(
                "max_depth must be at most {}, got {}",
                MAX_DEPTH, self.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::QuadTreeConfig;
    use crate::parameters::ParameterError;
    use crate::quadtree::MAX_DEPTH;

    #[test]
    fn max_depth_is_bounded() {
        let config = |max_depth| QuadTreeConfig {
            max_depth,
            ..Default::default()
        };
        assert!(config(0).validate().is_ok());
        assert!(config(MAX_DEPTH).validate().is_ok());
        assert!(matches!(
            config(MAX_DEPTH + 1).validate(),
            Err(ParameterError::InvalidValue(_))
        ));
        assert!(config(1000).validate().is_err());
    }
}
