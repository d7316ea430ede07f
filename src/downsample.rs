use crate::types::{Sample, SampleBatch};

/// Halves sensor resolution by averaging consecutive sample pairs per axis.
///
/// Output length is `floor(n / 2)`. The gateway sends even-length batches;
/// if an odd batch arrives anyway, the trailing unpaired reading is dropped
/// rather than rejected. Besides matching the dashboard cadence this smooths
/// transient noise.
pub fn reduce(batch: SampleBatch) -> SampleBatch {
    batch
        .chunks_exact(2)
        .map(|pair| {
            Sample::new(
                (pair[0].x + pair[1].x) / 2.0,
                (pair[0].y + pair[1].y) / 2.0,
                (pair[0].z + pair[1].z) / 2.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(values: &[(f64, f64, f64)]) -> SampleBatch {
        values.iter().map(|&(x, y, z)| Sample::new(x, y, z)).collect()
    }

    #[test]
    fn averages_consecutive_pairs() {
        let reduced = reduce(batch(&[(2.0, 4.0, 6.0), (4.0, 6.0, 10.0)]));
        assert_eq!(reduced, batch(&[(3.0, 5.0, 8.0)]));
    }

    #[test]
    fn even_input_halves_exactly() {
        for n in [0usize, 2, 4, 60] {
            let input = batch(&vec![(1.0, 2.0, 3.0); n]);
            assert_eq!(reduce(input).len(), n / 2);
        }
    }

    #[test]
    fn odd_input_drops_trailing_sample() {
        let reduced = reduce(batch(&[
            (2.0, 2.0, 2.0),
            (4.0, 4.0, 4.0),
            (999.0, 999.0, 999.0),
        ]));
        // floor(3/2) pairs; the 999 reading never contributes
        assert_eq!(reduced, batch(&[(3.0, 3.0, 3.0)]));
    }

    #[test]
    fn single_sample_reduces_to_empty() {
        assert!(reduce(batch(&[(1.0, 1.0, 1.0)])).is_empty());
    }
}
