//! Lock brackets around drawing into on-screen surfaces
//!
//! A window surface is shared between every device that draws into it. Each drawing
//! call locks it for its duration, nested calls only bump a counter. Once a burst of
//! drawing has been going on for longer than the configured flush period the surface
//! is flushed when the outermost lock is released.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

/// The windowing side of a surface
pub trait WindowSurface: Send + Sync {
    fn lock(&self);

    fn unlock(&self);

    /// Push everything drawn so far to the screen
    fn flush(&self);
}

#[derive(Debug, Default)]
struct BracketState {
    depth: usize,

    /// When the current burst of drawing started, reset on every flush
    draw_start: Option<Instant>,
}

/// Reentrant lock count for one [WindowSurface]
pub struct SurfaceBracket {
    surface: Arc<dyn WindowSurface>,
    flush_period: Duration,
    state: Mutex<BracketState>,
}

impl std::fmt::Debug for SurfaceBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceBracket")
            .field("flush_period", &self.flush_period)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SurfaceBracket {
    #[must_use]
    pub fn new(surface: Arc<dyn WindowSurface>) -> Self {
        Self::with_flush_period(surface, settings::get().flush_period)
    }

    #[must_use]
    pub fn with_flush_period(surface: Arc<dyn WindowSurface>, flush_period: Duration) -> Self {
        Self {
            surface,
            flush_period,
            state: Mutex::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, BracketState> {
        // The state stays consistent even if a drawing call panicked
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.state().depth
    }

    /// Whether both brackets lock the same surface
    #[must_use]
    pub fn shares_surface_with(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.surface).cast::<()>(),
            Arc::as_ptr(&other.surface).cast::<()>(),
        )
    }

    /// Lock the surface until the returned guard is dropped
    pub fn lock(&self) -> SurfaceGuard<'_> {
        let mut state = self.state();
        if state.depth == 0 {
            self.surface.lock();
        }
        state.depth += 1;
        state.draw_start.get_or_insert_with(Instant::now);

        SurfaceGuard { bracket: self }
    }

    fn unlock(&self) {
        let mut state = self.state();
        state.depth = state.depth.saturating_sub(1);
        if state.depth != 0 {
            return;
        }

        let should_flush = state
            .draw_start
            .is_some_and(|start| start.elapsed() >= self.flush_period);
        self.surface.unlock();

        if should_flush {
            log::debug!("Flushing window surface after {:?}", self.flush_period);
            state.draw_start = None;
            self.surface.flush();
        }
    }
}

/// Keeps a [SurfaceBracket] locked
#[derive(Debug)]
#[must_use = "the surface is unlocked as soon as the guard is dropped"]
pub struct SurfaceGuard<'a> {
    bracket: &'a SurfaceBracket,
}

impl Drop for SurfaceGuard<'_> {
    fn drop(&mut self) {
        self.bracket.unlock();
    }
}

/// Lock the surfaces of both ends of a blit
///
/// If both brackets draw into the same surface it is only locked once.
pub fn lock_pair<'a>(
    dst: &'a SurfaceBracket,
    src: &'a SurfaceBracket,
) -> (SurfaceGuard<'a>, Option<SurfaceGuard<'a>>) {
    let dst_guard = dst.lock();
    if dst.shares_surface_with(src) {
        return (dst_guard, None);
    }
    (dst_guard, Some(src.lock()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingSurface {
        locked: AtomicIsize,
        locks: AtomicUsize,
        flushes: AtomicUsize,
    }

    impl WindowSurface for CountingSurface {
        fn lock(&self) {
            self.locked.fetch_add(1, Ordering::SeqCst);
            self.locks.fetch_add(1, Ordering::SeqCst);
        }

        fn unlock(&self) {
            self.locked.fetch_sub(1, Ordering::SeqCst);
        }

        fn flush(&self) {
            self.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn nested_locks_reach_the_surface_once() {
        let surface = Arc::new(CountingSurface::default());
        let bracket = SurfaceBracket::with_flush_period(surface.clone(), Duration::from_secs(60));

        {
            let _outer = bracket.lock();
            let _inner = bracket.lock();
            assert_eq!(bracket.depth(), 2);
            assert_eq!(surface.locks.load(Ordering::SeqCst), 1);
        }

        assert_eq!(bracket.depth(), 0);
        assert_eq!(surface.locked.load(Ordering::SeqCst), 0);
        assert_eq!(surface.flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn long_bursts_are_flushed() {
        let surface = Arc::new(CountingSurface::default());
        let bracket = SurfaceBracket::with_flush_period(surface.clone(), Duration::ZERO);

        {
            let _outer = bracket.lock();
            drop(bracket.lock());
            assert_eq!(surface.flushes.load(Ordering::SeqCst), 0);
        }
        assert_eq!(surface.flushes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shared_surfaces_are_locked_once() {
        let surface = Arc::new(CountingSurface::default());
        let period = Duration::from_secs(60);
        let first = SurfaceBracket::with_flush_period(surface.clone(), period);
        let second = SurfaceBracket::with_flush_period(surface.clone(), period);

        {
            let (_dst, src) = lock_pair(&first, &second);
            assert!(src.is_none());
            assert_eq!(surface.locked.load(Ordering::SeqCst), 1);
        }

        let other = Arc::new(CountingSurface::default());
        let third = SurfaceBracket::with_flush_period(other.clone(), period);
        let (_dst, src) = lock_pair(&second, &third);
        assert!(src.is_some());
        assert_eq!(surface.locked.load(Ordering::SeqCst), 1);
        assert_eq!(other.locked.load(Ordering::SeqCst), 1);
    }
}
