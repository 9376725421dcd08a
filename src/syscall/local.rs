/*!
 * Local Syscall Handler
 * Resolves a fixed set of syscalls from state mirrored in the shim
 */

use nix::errno::Errno;

use crate::clock;
use crate::core::types::SyscallNumber;
use crate::syscall::types::{SyscallArgs, SyscallResult};

/// Kernel `struct timezone` layout (obsolete `gettimeofday` argument).
///
/// `libc` exposes `timezone` as an opaque extern type on Linux, so the
/// field layout is restated here to write through the out-pointer.
#[repr(C)]
struct Timezone {
    tz_minuteswest: libc::c_int,
    tz_dsttime: libc::c_int,
}

/// Try to resolve syscall `n` without leaving the process
///
/// Only syscalls whose answer the shim already mirrors are enumerated;
/// anything else reports unhandled so dispatch falls through. The whole
/// table reports unhandled until the runtime publishes a simulated time,
/// since a half-right local answer would be worse than the IPC round trip.
///
/// # Safety
/// Pointer-typed arguments must be valid out-pointers for the matched
/// syscall; results are written through them exactly as the kernel would.
pub unsafe fn try_handle(n: SyscallNumber, args: &SyscallArgs) -> Option<SyscallResult> {
    let nanos = clock::nanos()?;
    match n {
        libc::SYS_clock_gettime => clock_gettime(nanos, args),
        #[cfg(target_arch = "x86_64")]
        libc::SYS_time => Some(time(nanos, args)),
        libc::SYS_gettimeofday => Some(gettimeofday(nanos, args)),
        _ => None,
    }
}

unsafe fn clock_gettime(nanos: u64, args: &SyscallArgs) -> Option<SyscallResult> {
    match args.get(0) as libc::clockid_t {
        libc::CLOCK_REALTIME | libc::CLOCK_MONOTONIC => {}
        // Unmirrored clock; the simulator decides what it means
        _ => return None,
    }
    let ts = args.as_ptr::<libc::timespec>(1);
    if ts.is_null() {
        return Some(SyscallResult::from_errno(Errno::EFAULT));
    }
    let (secs, nsecs) = clock::split_timespec(nanos);
    (*ts).tv_sec = secs;
    (*ts).tv_nsec = nsecs;
    Some(SyscallResult::new(0))
}

#[cfg(target_arch = "x86_64")]
unsafe fn time(nanos: u64, args: &SyscallArgs) -> SyscallResult {
    let (secs, _) = clock::split_timespec(nanos);
    let out = args.as_ptr::<libc::time_t>(0);
    // A null out-pointer is fine, the result still rides the return value
    if !out.is_null() {
        *out = secs;
    }
    SyscallResult::new(secs)
}

unsafe fn gettimeofday(nanos: u64, args: &SyscallArgs) -> SyscallResult {
    let tv = args.as_ptr::<libc::timeval>(0);
    if !tv.is_null() {
        let (secs, usecs) = clock::split_timeval(nanos);
        (*tv).tv_sec = secs;
        (*tv).tv_usec = usecs;
    }
    // The kernel zeroes the obsolete timezone argument when one is passed
    let tz = args.as_ptr::<Timezone>(1);
    if !tz.is_null() {
        (*tz).tz_minuteswest = 0;
        (*tz).tz_dsttime = 0;
    }
    SyscallResult::new(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_unhandled_until_simulated_time_is_published() {
        clock::clear();
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        let args = SyscallArgs::new(&[libc::CLOCK_REALTIME as u64, &mut ts as *mut _ as u64]);
        assert_eq!(unsafe { try_handle(libc::SYS_clock_gettime, &args) }, None);
    }

    #[test]
    #[serial]
    fn test_clock_gettime_reads_the_mirror() {
        clock::set_nanos(1_500_000_042);
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        let args = SyscallArgs::new(&[libc::CLOCK_MONOTONIC as u64, &mut ts as *mut _ as u64]);
        let rv = unsafe { try_handle(libc::SYS_clock_gettime, &args) }.unwrap();
        assert_eq!(rv.raw(), 0);
        assert_eq!((ts.tv_sec, ts.tv_nsec), (1, 500_000_042));
        clock::clear();
    }

    #[test]
    #[serial]
    fn test_clock_gettime_null_timespec_faults() {
        clock::set_nanos(1);
        let args = SyscallArgs::new(&[libc::CLOCK_REALTIME as u64, 0]);
        let rv = unsafe { try_handle(libc::SYS_clock_gettime, &args) }.unwrap();
        assert_eq!(rv.errno(), Some(Errno::EFAULT));
        clock::clear();
    }

    #[test]
    #[serial]
    fn test_unmirrored_clock_id_falls_through() {
        clock::set_nanos(1);
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        let args = SyscallArgs::new(&[libc::CLOCK_BOOTTIME as u64, &mut ts as *mut _ as u64]);
        assert_eq!(unsafe { try_handle(libc::SYS_clock_gettime, &args) }, None);
        clock::clear();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    #[serial]
    fn test_time_returns_seconds_and_honors_the_out_pointer() {
        clock::set_nanos(90_000_000_007);
        let mut out: libc::time_t = 0;
        let args = SyscallArgs::new(&[&mut out as *mut _ as u64]);
        let rv = unsafe { try_handle(libc::SYS_time, &args) }.unwrap();
        assert_eq!(rv.raw(), 90);
        assert_eq!(out, 90);

        // Null out-pointer still succeeds
        let args = SyscallArgs::new(&[0]);
        let rv = unsafe { try_handle(libc::SYS_time, &args) }.unwrap();
        assert_eq!(rv.raw(), 90);
        clock::clear();
    }

    #[test]
    #[serial]
    fn test_gettimeofday_fills_timeval_and_zeroes_timezone() {
        clock::set_nanos(2_000_123_456);
        let mut tv = libc::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        let mut tz = Timezone {
            tz_minuteswest: 77,
            tz_dsttime: 1,
        };
        let args =
            SyscallArgs::new(&[&mut tv as *mut _ as u64, &mut tz as *mut _ as u64]);
        let rv = unsafe { try_handle(libc::SYS_gettimeofday, &args) }.unwrap();
        assert_eq!(rv.raw(), 0);
        assert_eq!((tv.tv_sec, tv.tv_usec), (2, 123));
        assert_eq!((tz.tz_minuteswest, tz.tz_dsttime), (0, 0));

        // Null timeval is tolerated, as the kernel tolerates it
        let args = SyscallArgs::new(&[0, 0]);
        let rv = unsafe { try_handle(libc::SYS_gettimeofday, &args) }.unwrap();
        assert_eq!(rv.raw(), 0);
        clock::clear();
    }

    #[test]
    #[serial]
    fn test_unlisted_syscalls_report_unhandled() {
        clock::set_nanos(1);
        let args = SyscallArgs::new(&[]);
        assert_eq!(unsafe { try_handle(libc::SYS_getpid, &args) }, None);
        assert_eq!(unsafe { try_handle(-1, &args) }, None);
        clock::clear();
    }
}
