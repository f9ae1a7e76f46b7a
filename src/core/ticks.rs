use smallvec::SmallVec;

/// Tick values for one axis; most axes carry a dozen ticks or fewer.
pub type TickValues = SmallVec<[f64; 12]>;

const SQRT_50: f64 = 7.071_067_811_865_476;
const SQRT_10: f64 = 3.162_277_660_168_379_5;
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Picks a 1/2/5 × 10^k step giving roughly `count` intervals over the span.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let span = (stop - start).abs();
    if !span.is_finite() || span == 0.0 || count == 0 {
        return None;
    }

    let raw = span / count as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let error = raw / magnitude;
    let factor = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= SQRT_2 {
        2.0
    } else {
        1.0
    };
    let step = factor * magnitude;
    (step.is_finite() && step > 0.0).then_some(step)
}

/// Evenly spaced round values inside `[start, stop]`, ordered like the inputs.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> TickValues {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return TickValues::new();
    }
    if start == stop {
        return smallvec::smallvec![start];
    }

    let (lo, hi) = (start.min(stop), start.max(stop));
    let Some(step) = tick_step(lo, hi, count) else {
        return TickValues::new();
    };

    let first = snap_index(lo, step, f64::ceil);
    let last = snap_index(hi, step, f64::floor);
    let mut ticks: TickValues = (first..=last).map(|index| value_at(index, step)).collect();
    if start > stop {
        ticks.reverse();
    }
    ticks
}

/// Extends `[start, stop]` outward to round tick boundaries.
#[must_use]
pub fn nice_interval(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = (start.min(stop), start.max(stop));
    // A second pass settles cases where widening the interval changes the step.
    for _ in 0..2 {
        let Some(step) = tick_step(lo, hi, count) else {
            break;
        };
        lo = value_at(snap_index(lo, step, f64::floor), step);
        hi = value_at(snap_index(hi, step, f64::ceil), step);
    }
    if start > stop { (hi, lo) } else { (lo, hi) }
}

fn snap_index(value: f64, step: f64, round: fn(f64) -> f64) -> i64 {
    if step < 1.0 {
        let inverse = (1.0 / step).round();
        round(value * inverse) as i64
    } else {
        round(value / step) as i64
    }
}

// Dividing by the inverse step keeps decimal ticks such as 0.1 free of float noise.
fn value_at(index: i64, step: f64) -> f64 {
    if step < 1.0 {
        index as f64 / (1.0 / step).round()
    } else {
        index as f64 * step
    }
}

#[cfg(test)]
mod tests {
    use super::{linear_ticks, nice_interval, tick_step};

    #[test]
    fn step_follows_one_two_five_rule() {
        assert_eq!(tick_step(0.0, 10.0, 10), Some(1.0));
        assert_eq!(tick_step(0.0, 100.0, 5), Some(20.0));
        assert_eq!(tick_step(0.0, 1.0, 2), Some(0.5));
        assert_eq!(tick_step(3.0, 3.0, 5), None);
    }

    #[test]
    fn decimal_ticks_have_no_float_noise() {
        let ticks = linear_ticks(0.0, 1.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks[7], 0.7);
    }

    #[test]
    fn reversed_input_yields_descending_ticks() {
        let ticks = linear_ticks(10.0, 0.0, 5);
        assert_eq!(ticks.as_slice(), &[10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn nice_interval_rounds_outward() {
        assert_eq!(nice_interval(0.0, 97.0, 10), (0.0, 100.0));
        assert_eq!(nice_interval(-3.2, 41.0, 5), (-10.0, 50.0));
    }
}
