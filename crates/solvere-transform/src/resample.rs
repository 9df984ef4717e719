//! Uniform downsampling with shared keyframe times.
//!
//! One [`Resampler`] is built per entity and used for every channel of that
//! entity, so all channels come out with the same row count and keys.

use solvere_core::{InputError, Result, TransformError};

/// Keeps every `stride`-th sample of a sequence of `len` samples, starting
/// at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    len: usize,
    stride: usize,
    rows: usize,
}

impl Resampler {
    /// Fails when the stride is zero or larger than a non-empty sequence.
    pub fn new(len: usize, stride: usize) -> Result<Self, TransformError> {
        if stride == 0 {
            return Err(TransformError::ZeroStride);
        }
        if len > 0 && stride > len {
            return Err(TransformError::StrideTooLarge { stride, len });
        }

        Ok(Self {
            len,
            stride,
            rows: len / stride,
        })
    }

    /// Number of samples kept: `floor(len / stride)`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Length every input sequence must have.
    pub fn source_len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Original indices of the kept samples.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let stride = self.stride;
        (0..self.rows).map(move |i| i * stride)
    }

    /// Evenly spaced keys `(i + 1) / rows`; the last key is exactly 1.
    pub fn keys(&self) -> Vec<f64> {
        let rows = self.rows as f64;
        (1..=self.rows).map(|i| i as f64 / rows).collect()
    }

    /// Keep the selected samples of one sequence.
    pub fn pick<T: Clone>(&self, values: &[T]) -> Result<Vec<T>, TransformError> {
        if values.len() != self.len {
            return Err(TransformError::LengthMismatch {
                expected: self.len,
                found: values.len(),
            });
        }
        Ok(self.indices().map(|i| values[i].clone()).collect())
    }

    /// Keys `t_i / t_last` for the kept samples, `t_last` being the final
    /// sample of the full sequence.
    pub fn time_keys(&self, times: &[f64]) -> Result<Vec<f64>> {
        let kept = self.pick(times)?;
        let Some(&last) = times.last() else {
            return Ok(Vec::new());
        };
        if last == 0.0 || !last.is_finite() {
            return Err(InputError::ZeroDuration { time: last }.into());
        }
        Ok(kept.into_iter().map(|t| t / last).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stride_two_of_ten() {
        let r = Resampler::new(10, 2).unwrap();
        let values: Vec<i32> = (0..10).collect();

        assert_eq!(r.rows(), 5);
        assert_eq!(r.pick(&values).unwrap(), vec![0, 2, 4, 6, 8]);

        let keys = r.keys();
        for (k, expected) in keys.iter().zip([0.2, 0.4, 0.6, 0.8, 1.0]) {
            assert!((k - expected).abs() < 1e-12);
        }
        assert_eq!(keys[4], 1.0);
    }

    #[test]
    fn test_remainder_is_dropped() {
        let r = Resampler::new(7, 3).unwrap();

        assert_eq!(r.rows(), 2);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn test_zero_stride() {
        assert_eq!(Resampler::new(4, 0), Err(TransformError::ZeroStride));
    }

    #[test]
    fn test_stride_larger_than_len() {
        assert_eq!(
            Resampler::new(3, 4),
            Err(TransformError::StrideTooLarge { stride: 4, len: 3 })
        );
    }

    #[test]
    fn test_empty_sequence_has_no_rows() {
        let r = Resampler::new(0, 5).unwrap();

        assert!(r.is_empty());
        assert!(r.keys().is_empty());
        assert!(r.pick::<f64>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_pick_checks_length() {
        let r = Resampler::new(4, 1).unwrap();
        assert_eq!(
            r.pick(&[1, 2, 3]),
            Err(TransformError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_time_keys() {
        let r = Resampler::new(5, 2).unwrap();
        let keys = r.time_keys(&[0.0, 0.5, 1.0, 1.5, 2.0]).unwrap();

        assert_eq!(keys, vec![0.0, 0.5]);
    }

    #[test]
    fn test_time_keys_zero_duration() {
        let r = Resampler::new(2, 1).unwrap();
        let err = r.time_keys(&[0.0, 0.0]).unwrap_err();

        assert!(matches!(
            err,
            solvere_core::SolvereError::Input(InputError::ZeroDuration { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_stride_one_is_identity(values in prop::collection::vec(-1e6f64..1e6, 1..100)) {
            let r = Resampler::new(values.len(), 1).unwrap();
            prop_assert_eq!(r.pick(&values).unwrap(), values);
        }

        #[test]
        fn prop_rows_and_last_key(len in 1usize..500, stride in 1usize..50) {
            prop_assume!(stride <= len);
            let r = Resampler::new(len, stride).unwrap();
            let keys = r.keys();

            prop_assert_eq!(r.rows(), len / stride);
            prop_assert_eq!(keys.len(), len / stride);
            prop_assert_eq!(keys.last().copied(), Some(1.0));
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
