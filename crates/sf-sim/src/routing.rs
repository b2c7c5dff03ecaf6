//! Per-admission routing decision and length-of-stay sampling.
//!
//! Draw order is fixed so a seed reproduces the same patients:
//!
//! ```text
//! U1 < prop_hasu_using_asu            → use_asu
//! use_asu:  U2 < prop_asu_using_esd   → esd_after_asu
//! !use_asu: U2 < prop_hasu_using_esd_only → esd_after_hasu
//! los_hasu                            (always)
//! los_asu   from with-ESD or no-ESD   (only if use_asu)
//! los_esd                             (only if use_esd)
//! ```

use sf_core::{PatientId, SimRng};
use sf_pathway::Patient;

use crate::params::{Routing, StayDistributions};

/// Outcome of the routing decision for one patient.
///
/// At most one of `esd_after_asu` / `esd_after_hasu` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub use_asu:        bool,
    pub esd_after_asu:  bool,
    pub esd_after_hasu: bool,
}

impl Route {
    /// Draw a route.  Consumes exactly two uniforms.
    pub fn decide(routing: &Routing, rng: &mut SimRng) -> Self {
        let use_asu = rng.chance(routing.hasu_using_asu);
        if use_asu {
            Route {
                use_asu,
                esd_after_asu:  rng.chance(routing.asu_using_esd),
                esd_after_hasu: false,
            }
        } else {
            Route {
                use_asu,
                esd_after_asu:  false,
                esd_after_hasu: rng.chance(routing.hasu_using_esd_only),
            }
        }
    }

    #[inline]
    pub fn use_esd(&self) -> bool {
        self.esd_after_asu || self.esd_after_hasu
    }
}

impl StayDistributions {
    /// Sample the stage durations for `route` and build the patient record.
    pub fn sample_patient(&self, id: PatientId, route: Route, rng: &mut SimRng) -> Patient {
        let hasu = self.hasu.sample(rng);
        let asu = route.use_asu.then(|| {
            let dist = if route.esd_after_asu { &self.asu_with_esd } else { &self.asu_no_esd };
            dist.sample(rng)
        });
        let esd = route.use_esd().then(|| self.esd.sample(rng));
        Patient::new(id, hasu, asu, esd)
    }
}
