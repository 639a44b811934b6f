//! Process runtime statistics for the metrics endpoint.
//!
//! Heap usage is tracked by [`TrackingAllocator`], a counting wrapper around
//! the system allocator installed as the global allocator in `lib.rs`.
//! Resident-set size comes from `/proc/self/status`; the remaining figures
//! come from the standard library and the tokio runtime.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Cumulative bytes handed out by the allocator over the process lifetime.
static ALLOCATED: AtomicU64 = AtomicU64::new(0);

/// Cumulative bytes returned to the allocator.
static FREED: AtomicU64 = AtomicU64::new(0);

/// Counting wrapper around the system allocator.
///
/// Counters use relaxed ordering: the metrics endpoint reports a snapshot,
/// not a consistent cut, and the counters only ever grow.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        FREED.fetch_add(layout.size() as u64, Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            ALLOCATED.fetch_add(new_size as u64, Ordering::Relaxed);
            FREED.fetch_add(layout.size() as u64, Ordering::Relaxed);
        }
        new_ptr
    }
}

/// Memory figures reported by the metrics endpoint.
///
/// `num_gc` is kept for wire compatibility with the original service and is
/// always zero: there is no collector here.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemoryStats {
    /// Live heap bytes (allocated minus freed)
    pub alloc: u64,
    /// Cumulative bytes allocated over the process lifetime
    pub total_alloc: u64,
    /// Resident-set bytes reported by the kernel; 0 where unavailable
    pub sys: u64,
    /// Garbage-collection cycles; always 0
    pub num_gc: u64,
}

/// Snapshot of current memory usage.
pub fn memory_stats() -> MemoryStats {
    let allocated = ALLOCATED.load(Ordering::Relaxed);
    let freed = FREED.load(Ordering::Relaxed);
    MemoryStats {
        alloc: allocated.saturating_sub(freed),
        total_alloc: allocated,
        sys: resident_set_bytes(),
        num_gc: 0,
    }
}

/// Number of logical CPUs available to the process, at least 1.
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Number of tasks currently alive on the tokio runtime, or 0 when called
/// outside a runtime.
pub fn alive_tasks() -> usize {
    tokio::runtime::Handle::try_current()
        .map(|handle| handle.metrics().num_alive_tasks())
        .unwrap_or(0)
}

#[cfg(target_os = "linux")]
fn resident_set_bytes() -> u64 {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_vm_rss(&status))
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
fn resident_set_bytes() -> u64 {
    0
}

/// Extracts the VmRSS value (reported in kB) from /proc/self/status.
#[cfg(any(target_os = "linux", test))]
fn parse_vm_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

/// Formats an uptime the way the health endpoint reports it, e.g. "1h2m3.412s".
///
/// Zero-valued leading units are omitted; fractional seconds are printed to
/// millisecond precision and dropped entirely when zero.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let millis = uptime.subsec_millis();

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let seconds_part = if millis == 0 {
        format!("{seconds}s")
    } else {
        format!("{seconds}.{millis:03}s")
    };

    match (hours, minutes) {
        (0, 0) => seconds_part,
        (0, m) => format!("{m}m{seconds_part}"),
        (h, m) => format!("{h}h{m}m{seconds_part}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn format_uptime_seconds_only() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0s");
        assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
    }

    #[test]
    fn format_uptime_fractional_seconds() {
        assert_eq!(format_uptime(Duration::from_millis(42)), "0.042s");
        assert_eq!(format_uptime(Duration::from_millis(3_500)), "3.500s");
    }

    #[test]
    fn format_uptime_minutes_and_hours() {
        assert_eq!(format_uptime(Duration::from_secs(62)), "1m2s");
        assert_eq!(format_uptime(Duration::from_secs(3_723)), "1h2m3s");
        assert_eq!(
            format_uptime(Duration::from_millis(3_723_412)),
            "1h2m3.412s"
        );
    }

    #[test]
    fn format_uptime_omits_zero_minutes_only_when_no_hours() {
        // An exact hour still prints the minutes slot
        assert_eq!(format_uptime(Duration::from_secs(3_600)), "1h0m0s");
    }

    #[test]
    fn parse_vm_rss_from_status() {
        let status = "Name:\tskiff\nVmPeak:\t  10000 kB\nVmRSS:\t   2048 kB\nThreads:\t4\n";
        assert_eq!(parse_vm_rss(status), Some(2048 * 1024));
    }

    #[test]
    fn parse_vm_rss_missing_field() {
        assert_eq!(parse_vm_rss("Name:\tskiff\n"), None);
    }

    #[test]
    fn memory_stats_counters_grow_with_allocation() {
        let before = memory_stats();
        let buffer = black_box(vec![0u8; 1 << 20]);
        let after = memory_stats();

        assert!(after.total_alloc >= before.total_alloc + (1 << 20));
        assert!(after.alloc <= after.total_alloc);
        assert_eq!(after.num_gc, 0);
        drop(buffer);
    }

    #[test]
    fn cpu_count_at_least_one() {
        assert!(cpu_count() >= 1);
    }
}
