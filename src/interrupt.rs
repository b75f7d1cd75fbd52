use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Cooperative cancellation token.
///
/// Holds a stack of shared flags plus an optional deadline. Fixpoint loops
/// and the candidate loop poll [`Interrupt::check`] at iteration boundaries,
/// so abandoning work never leaves partial results behind.
///
/// [`Interrupt::child`] pushes a fresh flag: raising the child cancels
/// everything holding the child, while the parent stays untouched. The
/// parallel search uses this to stop siblings once one candidate wins.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flags: Vec<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Interrupt {
    /// Token that never fires on its own.
    pub fn never() -> Self {
        Self::default()
    }
    /// Token that fires once `duration` has elapsed from now.
    pub fn after(duration: Duration) -> Self {
        Self {
            flags: Vec::new(),
            deadline: Some(Instant::now() + duration),
        }
    }
    /// Token that fires after `duration` if one is given.
    pub fn within(duration: Option<Duration>) -> Self {
        duration.map(Self::after).unwrap_or_default()
    }
    /// Derive a token that also fires when the returned token is raised.
    pub fn child(&self) -> Self {
        let mut flags = self.flags.clone();
        flags.push(Arc::new(AtomicBool::new(false)));
        Self {
            flags,
            deadline: self.deadline,
        }
    }
    /// Raise the innermost flag.
    pub fn raise(&self) {
        if let Some(flag) = self.flags.last() {
            flag.store(true, Ordering::Relaxed);
        }
    }
    pub fn interrupted(&self) -> bool {
        self.flags.iter().any(|f| f.load(Ordering::Relaxed))
            || self.deadline.map_or(false, |d| Instant::now() >= d)
    }
    pub fn check(&self) -> Result<(), crate::Error> {
        match self.interrupted() {
            true => Err(crate::Error::Interrupted),
            false => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_fires() {
        let interrupt = Interrupt::never();
        interrupt.raise();
        assert!(!interrupt.interrupted(), "no flag to raise");
        assert!(interrupt.check().is_ok());
    }

    #[test]
    fn child_does_not_raise_parent() {
        let parent = Interrupt::never().child();
        let child = parent.child();
        child.raise();
        assert!(child.interrupted());
        assert!(!parent.interrupted());
    }

    #[test]
    fn parent_raises_child() {
        let parent = Interrupt::never().child();
        let child = parent.child();
        parent.raise();
        assert!(child.interrupted());
        assert_eq!(child.check(), Err(crate::Error::Interrupted));
    }

    #[test]
    fn deadline_elapses() {
        let interrupt = Interrupt::after(Duration::ZERO);
        assert!(interrupt.interrupted());
        assert!(!Interrupt::within(None).interrupted());
    }
}
