use serde::Deserialize;

use crate::types::{Sample, SampleBatch};

/// The gateway transmits raw accelerometer counts scaled by 100; decoding
/// converts them back to physical units.
const RAW_SCALE: f64 = 100.0;

/// Wire shape of one frame: three equal-length numeric axis arrays.
#[derive(Debug, Deserialize)]
struct AxisFrame {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

/// 帧解码错误类型
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("axis arrays have mismatched lengths (x={x}, y={y}, z={z})")]
    Shape { x: usize, y: usize, z: usize },
}

/// Decodes one raw payload into a typed sample batch.
///
/// Protocol constraint: the gateway emits exactly one complete JSON message
/// per transmission, so each socket read carries one self-contained frame.
/// There is no frame delimiter; reassembly of split or coalesced messages
/// is out of contract.
pub fn decode(raw: &[u8]) -> Result<SampleBatch, FrameError> {
    let text = std::str::from_utf8(raw)?;
    let frame: AxisFrame = serde_json::from_str(text)?;

    if frame.x.len() != frame.y.len() || frame.x.len() != frame.z.len() {
        return Err(FrameError::Shape {
            x: frame.x.len(),
            y: frame.y.len(),
            z: frame.z.len(),
        });
    }

    Ok(frame
        .x
        .iter()
        .zip(frame.y.iter())
        .zip(frame.z.iter())
        .map(|((&x, &y), &z)| Sample::new(x / RAW_SCALE, y / RAW_SCALE, z / RAW_SCALE))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_scales_a_frame() {
        let batch = decode(br#"{"x":[200,400],"y":[400,600],"z":[600,1000]}"#).unwrap();
        assert_eq!(
            batch,
            vec![Sample::new(2.0, 4.0, 6.0), Sample::new(4.0, 6.0, 10.0)]
        );
    }

    #[test]
    fn empty_axes_decode_to_empty_batch() {
        let batch = decode(br#"{"x":[],"y":[],"z":[]}"#).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn rejects_mismatched_axis_lengths() {
        let err = decode(br#"{"x":[1,2],"y":[1],"z":[1,2]}"#).unwrap_err();
        assert!(matches!(err, FrameError::Shape { x: 2, y: 1, z: 2 }));
    }

    #[test]
    fn rejects_missing_axis() {
        assert!(matches!(
            decode(br#"{"x":[1],"y":[1]}"#),
            Err(FrameError::Json(_))
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        assert!(matches!(decode(b"not a frame"), Err(FrameError::Json(_))));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(decode(&[0xff, 0xfe]), Err(FrameError::Utf8(_))));
    }
}
