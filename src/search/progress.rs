//! Progress reporting and cancellation for long searches.

/// Implemented by the host to drive a progress display.
///
/// `update` receives the completed fraction in `[0, 1]` and returns whether
/// the search should continue; returning `false` cancels it at the next
/// checkpoint, and the AI then reports no move.
pub trait ProgressIndicator {
    fn begin(&mut self) {}
    fn update(&mut self, fraction: f32) -> bool;
    fn end(&mut self) {}
}

/// Ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressIndicator for NullProgress {
    #[inline]
    fn update(&mut self, _fraction: f32) -> bool {
        true
    }
}

/// Adapts a closure to `ProgressIndicator`.
pub struct FnProgress<F>(pub F);

impl<F: FnMut(f32) -> bool> ProgressIndicator for FnProgress<F> {
    fn update(&mut self, fraction: f32) -> bool {
        (self.0)(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_progress_sees_every_update() {
        let mut seen = Vec::new();
        {
            let mut progress = FnProgress(|fraction| {
                seen.push(fraction);
                fraction < 0.5
            });
            progress.begin();
            assert!(progress.update(0.25));
            assert!(!progress.update(0.75));
            progress.end();
        }
        assert_eq!(seen, vec![0.25, 0.75]);
        assert!(NullProgress.update(1.0));
    }
}
