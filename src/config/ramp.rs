//! Six-point ramp generator settings in physical units.

use serde::Deserialize;

use super::units::{Rps, RpsSquared};

/// Ramper settings in rotations per second and rotations per second squared.
///
/// The TMC5160 ramp runs VSTART → (A1) → V1 → (AMAX) → VMAX, then
/// VMAX → (DMAX) → V1 → (D1) → VSTOP when decelerating.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RampConfig {
    /// Start velocity.
    #[serde(default = "defaults::vstart", rename = "vstart_rps")]
    pub vstart: Rps,

    /// Acceleration between VSTART and V1.
    #[serde(default = "defaults::a1", rename = "a1_rps2")]
    pub a1: RpsSquared,

    /// Threshold velocity between the two acceleration phases.
    #[serde(default = "defaults::v1", rename = "v1_rps")]
    pub v1: Rps,

    /// Acceleration between V1 and VMAX.
    #[serde(default = "defaults::amax", rename = "amax_rps2")]
    pub amax: RpsSquared,

    /// Target velocity.
    #[serde(default = "defaults::vmax", rename = "vmax_rps")]
    pub vmax: Rps,

    /// Deceleration between VMAX and V1.
    #[serde(default = "defaults::dmax", rename = "dmax_rps2")]
    pub dmax: RpsSquared,

    /// Deceleration between V1 and VSTOP.
    #[serde(default = "defaults::d1", rename = "d1_rps2")]
    pub d1: RpsSquared,

    /// Stop velocity.
    #[serde(default = "defaults::vstop", rename = "vstop_rps")]
    pub vstop: Rps,
}

mod defaults {
    use super::{Rps, RpsSquared};

    pub fn vstart() -> Rps {
        Rps(0.05)
    }
    pub fn a1() -> RpsSquared {
        RpsSquared(100.0)
    }
    pub fn v1() -> Rps {
        Rps(0.7)
    }
    pub fn amax() -> RpsSquared {
        RpsSquared(70.0)
    }
    pub fn vmax() -> Rps {
        Rps(1.5)
    }
    pub fn dmax() -> RpsSquared {
        RpsSquared(60.0)
    }
    pub fn d1() -> RpsSquared {
        RpsSquared(90.0)
    }
    pub fn vstop() -> Rps {
        Rps(0.05)
    }
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            vstart: defaults::vstart(),
            a1: defaults::a1(),
            v1: defaults::v1(),
            amax: defaults::amax(),
            vmax: defaults::vmax(),
            dmax: defaults::dmax(),
            d1: defaults::d1(),
            vstop: defaults::vstop(),
        }
    }
}

impl RampConfig {
    /// Velocities by name, in write-log order.
    pub fn velocities(&self) -> [(&'static str, Rps); 4] {
        [("VSTART", self.vstart), ("V1", self.v1), ("VMAX", self.vmax), ("VSTOP", self.vstop)]
    }

    /// Accelerations by name.
    pub fn accelerations(&self) -> [(&'static str, RpsSquared); 4] {
        [("A1", self.a1), ("AMAX", self.amax), ("DMAX", self.dmax), ("D1", self.d1)]
    }
}
