use crate::math::Real;

/// Receives the progress of a structure generation, for display by the host.
///
/// Reports are fire-and-forget: the generator doesn’t wait on them and can’t be cancelled
/// through them.
pub trait ProgressSink {
    /// Reports that the fraction `fraction` (in `[0, 1]`) of the work is done.
    fn report(&mut self, fraction: Real);
}

impl<F: FnMut(Real)> ProgressSink for F {
    #[inline]
    fn report(&mut self, fraction: Real) {
        self(fraction)
    }
}

/// A [`ProgressSink`] ignoring every report.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    #[inline]
    fn report(&mut self, _: Real) {}
}
