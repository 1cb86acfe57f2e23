//! Process memory sampling

use sysinfo::{Pid, System};

/// Source of the current process memory usage
///
/// Sampling is read-only: a probe observes memory, it never reserves it.
pub trait MemoryProbe {
    /// Current memory usage of this process in bytes
    fn current_usage(&mut self) -> u64;
}

impl<P: MemoryProbe + ?Sized> MemoryProbe for &mut P {
    fn current_usage(&mut self) -> u64 {
        (**self).current_usage()
    }
}

/// Resident memory of the current process, sampled through sysinfo
pub struct ProcessMemoryProbe {
    system: System,
    pid: Option<Pid>,
}

impl ProcessMemoryProbe {
    /// Create a probe for the current process
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for ProcessMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcessMemoryProbe {
    /// Returns 0 when the platform cannot report process memory, which
    /// leaves the guard permanently within limits.
    fn current_usage(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        if !self.system.refresh_process(pid) {
            return 0;
        }

        self.system
            .process(pid)
            .map(|process| process.memory())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_probe_does_not_panic() {
        let mut probe = ProcessMemoryProbe::new();
        let _ = probe.current_usage();
        let _ = probe.current_usage();
    }

    #[test]
    fn test_probe_through_mutable_reference() {
        struct Fixed(u64);
        impl MemoryProbe for Fixed {
            fn current_usage(&mut self) -> u64 {
                self.0
            }
        }

        fn sample<P: MemoryProbe>(mut probe: P) -> u64 {
            probe.current_usage()
        }

        let mut fixed = Fixed(1024);
        assert_eq!(sample(&mut fixed), 1024);
        assert_eq!(fixed.current_usage(), 1024);
    }
}
