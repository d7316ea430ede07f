/// One tri-axial acceleration reading in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Ordered samples decoded from a single inbound frame.
///
/// The gateway emits an even number of readings per frame; an odd batch is
/// tolerated downstream (the trailing reading is dropped during reduction).
pub type SampleBatch = Vec<Sample>;
