//! Evaluation coefficients: six weight families, one weight per game phase.

use serde::{Deserialize, Serialize};

use crate::othello::prelude::*;

/// The sole tunable of the evaluator. Each family carries one weight per
/// phase (early, mid, late); the optimizer owns every mutation of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coefficients {
    pub name: String,
    pub material_coeffs: [i32; 3],
    pub mobility_coeffs: [i32; 3],
    pub corners_coeffs: [i32; 3],
    pub parity_coeffs: [i32; 3],
    pub stability_coeffs: [i32; 3],
    pub frontier_coeffs: [i32; 3],
}

/// One of the six weight families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Material,
    Mobility,
    Corners,
    Parity,
    Stability,
    Frontier,
}

impl Family {
    /// All families, in the order they are serialized.
    pub fn all() -> [Family; 6] {
        [
            Family::Material,
            Family::Mobility,
            Family::Corners,
            Family::Parity,
            Family::Stability,
            Family::Frontier,
        ]
    }

    /// Inclusive design range for the family's weights. All families share
    /// the minimum of 1; the caps differ by how large a feature swing the
    /// family can produce.
    pub fn range(&self) -> (i32, i32) {
        match self {
            Family::Material => (1, 500),
            Family::Mobility => (1, 1000),
            Family::Corners => (1, 5000),
            Family::Parity => (1, 100),
            Family::Stability => (1, 2000),
            Family::Frontier => (1, 1000),
        }
    }
}

impl Coefficients {
    /// Borrows one family's per-phase weights.
    pub fn family(&self, family: Family) -> &[i32; 3] {
        match family {
            Family::Material => &self.material_coeffs,
            Family::Mobility => &self.mobility_coeffs,
            Family::Corners => &self.corners_coeffs,
            Family::Parity => &self.parity_coeffs,
            Family::Stability => &self.stability_coeffs,
            Family::Frontier => &self.frontier_coeffs,
        }
    }

    /// Mutably borrows one family's per-phase weights.
    pub fn family_mut(&mut self, family: Family) -> &mut [i32; 3] {
        match family {
            Family::Material => &mut self.material_coeffs,
            Family::Mobility => &mut self.mobility_coeffs,
            Family::Corners => &mut self.corners_coeffs,
            Family::Parity => &mut self.parity_coeffs,
            Family::Stability => &mut self.stability_coeffs,
            Family::Frontier => &mut self.frontier_coeffs,
        }
    }

    /// A flat coefficient set; deliberately weak, useful as a training seed.
    pub fn uniform(name: &str) -> Coefficients {
        Coefficients {
            name: name.into(),
            material_coeffs: [1; 3],
            mobility_coeffs: [1; 3],
            corners_coeffs: [1; 3],
            parity_coeffs: [1; 3],
            stability_coeffs: [1; 3],
            frontier_coeffs: [1; 3],
        }
    }

    /// The hand-tuned reference set.
    pub fn v1() -> Coefficients {
        Coefficients {
            name: "v1".into(),
            material_coeffs: [2, 6, 60],
            mobility_coeffs: [70, 45, 10],
            corners_coeffs: [900, 700, 350],
            parity_coeffs: [5, 25, 90],
            stability_coeffs: [150, 200, 120],
            frontier_coeffs: [50, 35, 8],
        }
    }

    /// A trained successor to [`Coefficients::v1`].
    pub fn v2() -> Coefficients {
        Coefficients {
            name: "v2".into(),
            material_coeffs: [1, 4, 80],
            mobility_coeffs: [80, 50, 6],
            corners_coeffs: [1000, 800, 300],
            parity_coeffs: [8, 30, 95],
            stability_coeffs: [180, 240, 140],
            frontier_coeffs: [60, 40, 10],
        }
    }

    /// Resolves a baseline by name. Unknown names are a startup error.
    pub fn baseline(name: &str) -> Result<Coefficients> {
        match name.to_lowercase().as_str() {
            "v1" => Ok(Coefficients::v1()),
            "v2" => Ok(Coefficients::v2()),
            "uniform" => Ok(Coefficients::uniform("uniform")),
            _ => Err(anyhow!("unknown coefficient baseline {name}; known: v1, v2, uniform")),
        }
    }

    /// Whether every weight sits inside its family's design range.
    pub fn in_range(&self) -> bool {
        Family::all().iter().all(|&family| {
            let (lo, hi) = family.range();
            self.family(family).iter().all(|&w| (lo..=hi).contains(&w))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baselines_resolve_case_insensitively() {
        assert_eq!(Coefficients::baseline("V1").unwrap(), Coefficients::v1());
        assert!(Coefficients::baseline("v3").is_err());
    }

    #[test]
    fn baselines_respect_design_ranges() {
        for name in ["v1", "v2", "uniform"] {
            assert!(Coefficients::baseline(name).unwrap().in_range(), "{name}");
        }
    }

    #[test]
    fn serde_schema_round_trip() {
        let coeffs = Coefficients::v1();
        let json = serde_json::to_string(&coeffs).unwrap();
        assert!(json.contains("\"material_coeffs\""));
        assert!(json.contains("\"frontier_coeffs\""));
        let back: Coefficients = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coeffs);
    }
}
