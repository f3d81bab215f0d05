//! Synthetic spiral classification data.
//!
//! Each class is one arm of an interleaved spiral in the plane. Points are produced
//! by walking the radius from 0 to 1 while the angle sweeps a 4-radian sector per
//! class, with a little angular jitter.
//!
//! The walk stops as soon as either the radius or the angle passes its bound. The
//! step sizes are rounded to single precision and accumulated in double precision,
//! so the number of points realized for a class can be one more or one less than
//! requested depending on rounding. The same termination test is kept here so
//! generated datasets line up point for point with existing ones.

use log::debug;

use crate::{Error, Inputs, RandomInitializer, Result};

/// Angular sector swept by each class.
const SECTOR: f64 = 4.0;
/// Scale applied to the uniform `[-1, 1]` jitter before it is added to the angle.
const JITTER: f64 = 0.2;
/// Angle multiplier applied before the polar-to-Cartesian conversion.
const WINDING: f64 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SpiralDataset {
    /// Flat `x0 y0 x1 y1 ...`.
    coordinates: Vec<f64>,
    labels: Vec<usize>,
    classes: usize,
    points_per_class: usize,
}

impl SpiralDataset {
    /// Generate `classes` spiral arms of (nominally) `points_per_class` points each.
    pub fn generate(
        points_per_class: usize,
        classes: usize,
        rng: &mut RandomInitializer,
    ) -> Result<Self> {
        if points_per_class == 0 {
            return Err(Error::InvalidConfig(
                "points_per_class must be > 0".to_owned(),
            ));
        }
        if classes == 0 {
            return Err(Error::InvalidConfig("classes must be > 0".to_owned()));
        }

        let nominal = points_per_class
            .checked_mul(classes)
            .ok_or_else(|| Error::AllocationFailure("spiral point count overflows".to_owned()))?;
        // Rounding can realize one extra point per class.
        let capacity = nominal.checked_add(classes);
        let mut coordinates = reserve(
            capacity.and_then(|n| n.checked_mul(2)),
            "spiral coordinates",
        )?;
        let mut labels = reserve(capacity, "spiral labels")?;

        // Single-precision steps, see module docs.
        let intervals = points_per_class.saturating_sub(1) as f32;
        let r_step = f64::from(1.0_f32 / intervals);
        let t_step = f64::from(SECTOR as f32 / intervals);

        for class in 0..classes {
            let mut r = 0.0_f64;
            let mut t = class as f64 * SECTOR;
            let t_end = (class + 1) as f64 * SECTOR;

            while r <= 1.0 && t <= t_end {
                let theta = (t + rng.uniform(-1.0, 1.0)? * JITTER) * WINDING;
                coordinates.push(r * theta.sin());
                coordinates.push(r * theta.cos());
                labels.push(class);

                r += r_step;
                t += t_step;
            }
        }

        debug!(
            "spiral dataset: {classes} classes, {} points realized of {nominal} nominal",
            labels.len()
        );

        Ok(Self {
            coordinates,
            labels,
            classes,
            points_per_class,
        })
    }

    /// Number of realized points.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn classes(&self) -> usize {
        self.classes
    }

    #[inline]
    pub fn points_per_class(&self) -> usize {
        self.points_per_class
    }

    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Point `idx` as `(x, y)`.
    pub fn point(&self, idx: usize) -> Option<(f64, f64)> {
        if idx >= self.len() {
            return None;
        }
        let start = 2 * idx;
        let xy = self.coordinates.get(start..start + 2)?;
        Some((xy[0], xy[1]))
    }

    #[inline]
    pub fn label(&self, idx: usize) -> Option<usize> {
        self.labels.get(idx).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.coordinates.chunks_exact(2).map(|xy| (xy[0], xy[1]))
    }

    /// Number of realized points labelled `class`.
    pub fn class_count(&self, class: usize) -> usize {
        self.labels.iter().filter(|&&l| l == class).count()
    }

    /// The coordinates as a batch of 2-wide input rows.
    pub fn to_inputs(&self) -> Result<Inputs> {
        Inputs::from_flat(self.coordinates.clone(), 2)
    }
}

fn reserve<T>(len: Option<usize>, what: &str) -> Result<Vec<T>> {
    let len = len.ok_or_else(|| Error::AllocationFailure(format!("{what}: size overflows")))?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| Error::AllocationFailure(format!("{what} ({len} elements): {e}")))?;
    Ok(buf)
}
