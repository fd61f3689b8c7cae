use serde::{Deserialize, Serialize};

/// Geographic coordinate as produced by the camera's `unproject`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Axis-aligned bounds given by their south-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    pub sw: LngLat,
    pub ne: LngLat,
}

impl LngLatBounds {
    pub fn from_lng_lat(ll: LngLat) -> Self {
        Self { sw: ll, ne: ll }
    }

    /// Bounds spanning two arbitrary corners, in either order.
    pub fn from_corners(a: LngLat, b: LngLat) -> Self {
        let mut bounds = Self::from_lng_lat(a);
        bounds.extend(b);
        bounds
    }

    pub fn extend(&mut self, ll: LngLat) -> &mut Self {
        self.sw.lng = self.sw.lng.min(ll.lng);
        self.sw.lat = self.sw.lat.min(ll.lat);
        self.ne.lng = self.ne.lng.max(ll.lng);
        self.ne.lat = self.ne.lat.max(ll.lat);
        self
    }

    pub fn width(&self) -> f64 {
        self.ne.lng - self.sw.lng
    }

    pub fn height(&self) -> f64 {
        self.ne.lat - self.sw.lat
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.sw.lng + self.ne.lng) / 2.0,
            (self.sw.lat + self.ne.lat) / 2.0,
        )
    }
}
