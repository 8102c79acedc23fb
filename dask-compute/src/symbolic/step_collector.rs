/// A sink for the rewrite steps taken while transforming a tree.
///
/// Rules report every rewrite they perform through this trait, so a caller can choose between
/// discarding the steps with `()` or recording them in order with a `Vec`.
pub trait StepCollector<S> {
    /// Records that a step was taken.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
