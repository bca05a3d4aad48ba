//! Reference ellipsoids.

/// An ellipsoid of revolution given by its semi-axes in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub semi_major: f64,
    pub semi_minor: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major: 6378137.0,
        semi_minor: 6356752.314245179,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major: 6378137.0,
        semi_minor: 6356752.314140356,
    };

    /// Sphere used by the spherical Web Mercator formulas.
    pub const WEB_MERCATOR_SPHERE: Ellipsoid = Ellipsoid {
        semi_major: 6378137.0,
        semi_minor: 6378137.0,
    };

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        let a2 = self.semi_major * self.semi_major;
        (a2 - self.semi_minor * self.semi_minor) / a2
    }

    /// First eccentricity.
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }

    pub fn is_sphere(&self) -> bool {
        self.semi_major == self.semi_minor
    }
}
