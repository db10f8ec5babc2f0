//! Periodic tick subscription seam

/// A periodic source that calls back into the engine once per second while
/// subscribed.
pub trait TickSource {
    /// Subscribe the periodic source. Calling this while already subscribed
    /// must not create a second subscription.
    fn begin(&mut self);

    /// Release the subscription. Must take effect before returning.
    fn halt(&mut self);
}
