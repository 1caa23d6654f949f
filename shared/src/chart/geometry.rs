use std::f64::consts::TAU;

/// Pixel geometry of a drawn chart, kept so pointer positions can be mapped
/// back to data indices.
#[derive(Debug, Clone, PartialEq)]
pub enum HitMap {
    /// Ring segments. Angles are measured clockwise from twelve o'clock and
    /// `ends[i]` is where segment `i` stops.
    Radial {
        center: (f64, f64),
        inner_radius: f64,
        outer_radius: f64,
        ends: Vec<f64>,
    },
    /// Vertical slots over the plot area; `slots[i]` is the x range of index `i`.
    Columns {
        slots: Vec<(f64, f64)>,
        top: f64,
        bottom: f64,
    },
}

impl HitMap {
    /// Build the radial map for segment `values`, skipping nothing: zero and
    /// negative values get an empty arc.
    pub fn radial(
        center: (f64, f64),
        inner_radius: f64,
        outer_radius: f64,
        values: &[f64],
    ) -> Self {
        let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
        let mut acc = 0.0;
        let ends = values
            .iter()
            .map(|v| {
                if total > 0.0 && *v > 0.0 {
                    acc += v / total * TAU;
                }
                acc
            })
            .collect();
        HitMap::Radial { center, inner_radius, outer_radius, ends }
    }

    /// Build column slots from the x pixel position of each index. Slot edges
    /// sit halfway between neighbours; the outer slots extend by the same
    /// half gap.
    pub fn columns(centers: &[f64], top: f64, bottom: f64) -> Self {
        let half_gap = |i: usize, j: usize| (centers[j] - centers[i]).abs() / 2.0;
        let slots = centers
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let left = if i > 0 {
                    half_gap(i - 1, i)
                } else if centers.len() > 1 {
                    half_gap(0, 1)
                } else {
                    f64::INFINITY
                };
                let right = if i + 1 < centers.len() { half_gap(i, i + 1) } else { left };
                (x - left, x + right)
            })
            .collect();
        HitMap::Columns { slots, top, bottom }
    }

    /// Data index under the pointer at `(x, y)`, in canvas pixels.
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        match self {
            HitMap::Radial { center, inner_radius, outer_radius, ends } => {
                let (dx, dy) = (x - center.0, y - center.1);
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < *inner_radius || distance > *outer_radius {
                    return None;
                }
                let angle = dx.atan2(-dy).rem_euclid(TAU);
                let mut start = 0.0;
                for (index, end) in ends.iter().enumerate() {
                    if angle >= start && angle < *end {
                        return Some(index);
                    }
                    start = *end;
                }
                None
            }
            HitMap::Columns { slots, top, bottom } => {
                if y < *top || y > *bottom {
                    return None;
                }
                slots.iter().position(|(left, right)| x >= *left && x < *right)
            }
        }
    }
}

/// Round `max` up to a value axis bound of 1, 2, 2.5 or 5 times a power of
/// ten, leaving a little headroom above the data.
pub fn nice_upper_bound(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let raw = max * 1.05;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|candidate| normalized <= *candidate)
        .unwrap_or(10.0);
    step * magnitude
}

/// Point on a circle at `angle` radians clockwise from twelve o'clock.
pub fn polar_point(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (center.0 + radius * angle.sin(), center.1 - radius * angle.cos())
}

/// Outline of a ring segment between `start` and `end` angles, as a closed
/// polygon: outer arc forwards, inner arc backwards.
pub fn ring_segment(
    center: (f64, f64),
    inner_radius: f64,
    outer_radius: f64,
    start: f64,
    end: f64,
) -> Vec<(f64, f64)> {
    let sweep = end - start;
    let steps = ((sweep / TAU) * 180.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(2 * (steps + 1));
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push(polar_point(center, outer_radius, angle));
    }
    for step in (0..=steps).rev() {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push(polar_point(center, inner_radius, angle));
    }
    points
}

/// Smooth a polyline with cubic Bezier segments whose control points follow
/// the neighbouring points, scaled by `tension` (0 keeps straight lines).
/// Points must be in a space where both axes share a unit, such as pixels.
pub fn smooth_path(
    points: &[(f64, f64)],
    tension: f64,
    samples_per_segment: usize,
) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension <= 0.0 || samples_per_segment == 0 {
        return points.to_vec();
    }

    let distance = |a: (f64, f64), b: (f64, f64)| (b.0 - a.0).hypot(b.1 - a.1);

    // Control points before and after each point.
    let controls: Vec<((f64, f64), (f64, f64))> = (0..points.len())
        .map(|i| {
            let current = points[i];
            let previous = if i > 0 { points[i - 1] } else { current };
            let next = if i + 1 < points.len() { points[i + 1] } else { current };
            let d01 = distance(previous, current);
            let d12 = distance(current, next);
            let sum = d01 + d12;
            let (fa, fb) = if sum > 0.0 {
                (tension * d01 / sum, tension * d12 / sum)
            } else {
                (0.0, 0.0)
            };
            let span = (next.0 - previous.0, next.1 - previous.1);
            (
                (current.0 - fa * span.0, current.1 - fa * span.1),
                (current.0 + fb * span.0, current.1 + fb * span.1),
            )
        })
        .collect();

    let mut path = Vec::with_capacity((points.len() - 1) * samples_per_segment + 1);
    path.push(points[0]);
    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let c1 = controls[i].1;
        let c2 = controls[i + 1].0;
        let p3 = points[i + 1];
        for step in 1..=samples_per_segment {
            let t = step as f64 / samples_per_segment as f64;
            let u = 1.0 - t;
            let bezier = |a: f64, b: f64, c: f64, d: f64| {
                u * u * u * a + 3.0 * u * u * t * b + 3.0 * u * t * t * c + t * t * t * d
            };
            let x = bezier(p0.0, c1.0, c2.0, p3.0);
            let y = bezier(p0.1, c1.1, c2.1, p3.1);
            path.push((x, y));
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_hit_quadrants() {
        // Four equal segments: top-right, bottom-right, bottom-left, top-left.
        let map = HitMap::radial((100.0, 100.0), 40.0, 80.0, &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(map.hit(130.0, 50.0), Some(0));
        assert_eq!(map.hit(150.0, 130.0), Some(1));
        assert_eq!(map.hit(60.0, 150.0), Some(2));
        assert_eq!(map.hit(50.0, 70.0), Some(3));
    }

    #[test]
    fn test_radial_hit_ignores_hole_and_outside() {
        let map = HitMap::radial((100.0, 100.0), 40.0, 80.0, &[3.0, 1.0]);
        assert_eq!(map.hit(100.0, 100.0), None);
        assert_eq!(map.hit(100.0, 10.0), None);
        assert_eq!(map.hit(160.0, 100.0), Some(0));
    }

    #[test]
    fn test_radial_zero_total_hits_nothing() {
        let map = HitMap::radial((0.0, 0.0), 1.0, 10.0, &[0.0, 0.0]);
        assert_eq!(map.hit(5.0, 0.0), None);
    }

    #[test]
    fn test_column_slots_split_halfway() {
        let map = HitMap::columns(&[10.0, 30.0, 50.0], 0.0, 100.0);
        assert_eq!(map.hit(0.5, 50.0), Some(0));
        assert_eq!(map.hit(19.9, 50.0), Some(0));
        assert_eq!(map.hit(20.0, 50.0), Some(1));
        assert_eq!(map.hit(59.0, 50.0), Some(2));
        assert_eq!(map.hit(61.0, 50.0), None);
        assert_eq!(map.hit(30.0, 150.0), None);
    }

    #[test]
    fn test_single_column_covers_whole_width() {
        let map = HitMap::columns(&[40.0], 0.0, 10.0);
        assert_eq!(map.hit(-1000.0, 5.0), Some(0));
        assert_eq!(map.hit(1000.0, 5.0), Some(0));
    }

    #[test]
    fn test_ring_segment_closes_between_radii() {
        let points = ring_segment((0.0, 0.0), 5.0, 10.0, 0.0, TAU / 4.0);
        let first = points[0];
        let last = *points.last().unwrap();
        assert!((first.0 - 0.0).abs() < 1e-9 && (first.1 + 10.0).abs() < 1e-9);
        assert!((last.0 - 0.0).abs() < 1e-9 && (last.1 + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_nice_upper_bound() {
        assert_eq!(nice_upper_bound(0.0), 1.0);
        assert_eq!(nice_upper_bound(f64::NAN), 1.0);
        assert_eq!(nice_upper_bound(90.0), 100.0);
        assert_eq!(nice_upper_bound(1200.0), 2000.0);
        assert_eq!(nice_upper_bound(2300.0), 2500.0);
        assert_eq!(nice_upper_bound(4000.0), 5000.0);
    }

    #[test]
    fn test_smooth_path_passes_through_points() {
        let points = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 5.0)];
        let path = smooth_path(&points, 0.4, 8);
        assert_eq!(path.len(), 3 * 8 + 1);
        for (i, point) in points.iter().enumerate() {
            let sample = path[i * 8];
            assert!((sample.0 - point.0).abs() < 1e-9);
            assert!((sample.1 - point.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_smooth_path_without_tension_is_identity() {
        let points = [(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)];
        assert_eq!(smooth_path(&points, 0.0, 8), points.to_vec());
        assert_eq!(smooth_path(&points[..2], 0.4, 8), points[..2].to_vec());
    }
}
