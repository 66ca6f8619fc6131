//! Scope-bound rollback.
//!
//! [`ArenaScope`] captures the arena's bump pointer when opened and rolls
//! back to it when dropped, so every allocation made through the scope is
//! released on all exit paths. The mark never leaves the scope.

use std::ops::{Deref, DerefMut};

use crate::arena::Arena;
use crate::slice::ArenaMark;

/// Guard releasing every allocation made while it is alive.
///
/// Created by [`Arena::scope()`]. Dereferences to the [`Arena`] so callers
/// allocate and access memory exactly as they would on the arena itself.
/// Slices allocated through the scope become stale once it drops.
#[must_use]
pub struct ArenaScope<'a> {
    arena: &'a mut Arena,
    mark: ArenaMark,
}

impl<'a> ArenaScope<'a> {
    pub(crate) fn new(arena: &'a mut Arena) -> Self {
        let mark = arena.mark();
        Self { arena, mark }
    }

    /// The position this scope will roll back to.
    pub fn start(&self) -> usize {
        self.mark.offset()
    }

    /// Bytes allocated through this scope so far.
    pub fn allocated(&self) -> usize {
        self.arena.used().saturating_sub(self.mark.offset())
    }
}

impl Deref for ArenaScope<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl DerefMut for ArenaScope<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        self.arena
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        // The mark was taken from this arena, so it is always in range.
        let _ = self.arena.rollback(self.mark);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arena, ArenaError};

    #[test]
    fn drop_releases_scope_allocations() {
        let mut arena = Arena::with_capacity(128);
        let outer = arena.allocate(16).unwrap();
        {
            let mut scope = arena.scope();
            assert_eq!(scope.start(), 16);
            scope.allocate(32).unwrap();
            scope.allocate(8).unwrap();
            assert_eq!(scope.allocated(), 40);
        }
        assert_eq!(arena.used(), 16);
        assert!(arena.is_live(&outer));
    }

    #[test]
    fn early_return_still_rolls_back() {
        fn fill(arena: &mut Arena) -> Result<(), ArenaError> {
            let mut scope = arena.scope();
            scope.allocate(40)?;
            scope.allocate(1000)?;
            Ok(())
        }

        let mut arena = Arena::with_capacity(64);
        assert!(fill(&mut arena).is_err());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut arena = Arena::with_capacity(256);
        {
            let mut outer = arena.scope();
            outer.allocate(10).unwrap();
            {
                let mut inner = outer.scope();
                inner.allocate(20).unwrap();
                assert_eq!(inner.used(), 30);
            }
            assert_eq!(outer.used(), 10);
        }
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn scope_slices_go_stale_after_drop() {
        let mut arena = Arena::with_capacity(64);
        let inner = {
            let mut scope = arena.scope();
            scope.allocate(8).unwrap()
        };
        assert!(!arena.is_live(&inner));
    }

    #[test]
    fn empty_scope_does_not_bump_generation() {
        let mut arena = Arena::with_capacity(64);
        {
            let _scope = arena.scope();
        }
        assert_eq!(arena.generation(), 0);
    }
}
