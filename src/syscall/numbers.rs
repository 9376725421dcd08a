/*!
 * Simulator-Bound Syscalls
 * Injected set of numbers the simulator must see from any context
 */

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::core::types::SyscallNumber;

/// Immutable sorted set of syscall numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyscallSet {
    numbers: Box<[SyscallNumber]>,
}

impl SyscallSet {
    /// The empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Membership by binary search
    #[inline]
    pub fn contains(&self, n: SyscallNumber) -> bool {
        self.numbers.binary_search(&n).is_ok()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl FromIterator<SyscallNumber> for SyscallSet {
    fn from_iter<I: IntoIterator<Item = SyscallNumber>>(iter: I) -> Self {
        let mut numbers: Vec<SyscallNumber> = iter.into_iter().collect();
        numbers.sort_unstable();
        numbers.dedup();
        Self {
            numbers: numbers.into_boxed_slice(),
        }
    }
}

// Loaded lock-free on every dispatch, stored once at bootstrap
static SIMULATOR_SYSCALLS: ArcSwapOption<SyscallSet> = ArcSwapOption::const_empty();

/// Install the numbers the simulator must see regardless of execution
/// context; replaces any previously installed set
///
/// Which numbers belong here is the surrounding runtime's call; nothing is
/// built in.
pub fn install_simulator_syscalls(set: SyscallSet) {
    SIMULATOR_SYSCALLS.store(Some(Arc::new(set)));
}

/// Drop the installed set, leaving execution context alone to steer routing
pub fn clear_simulator_syscalls() {
    SIMULATOR_SYSCALLS.store(None);
}

/// Whether `n` must reach the simulator even from simulator-internal code
#[inline]
pub(crate) fn is_simulator_bound(n: SyscallNumber) -> bool {
    SIMULATOR_SYSCALLS
        .load()
        .as_ref()
        .map_or(false, |set| set.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_membership_after_unsorted_duplicated_input() {
        let set = SyscallSet::from_iter([9, 3, 7, 3, 9]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(set.contains(9));
        assert!(!set.contains(4));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = SyscallSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains(0));
    }

    #[test]
    #[serial]
    fn test_nothing_is_simulator_bound_until_installed() {
        clear_simulator_syscalls();
        assert!(!is_simulator_bound(libc::SYS_getpid));

        install_simulator_syscalls(SyscallSet::from_iter([libc::SYS_getpid]));
        assert!(is_simulator_bound(libc::SYS_getpid));
        assert!(!is_simulator_bound(libc::SYS_read));

        clear_simulator_syscalls();
        assert!(!is_simulator_bound(libc::SYS_getpid));
    }
}
