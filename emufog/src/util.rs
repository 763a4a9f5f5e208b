// EmuFog: Emulating Fog Computing Infrastructures
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Small helpers shared across the crate.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Format a duration as `1h2min3s4ms`, omitting all leading zero units.
pub(crate) fn interval_to_string(duration: Duration) -> String {
    let mut result = String::new();

    let hours = duration.as_secs() / 3600;
    if hours > 0 {
        result.push_str(&format!("{}h", hours));
    }
    let minutes = (duration.as_secs() / 60) % 60;
    if minutes > 0 {
        result.push_str(&format!("{}min", minutes));
    }
    let seconds = duration.as_secs() % 60;
    if seconds > 0 {
        result.push_str(&format!("{}s", seconds));
    }
    let millis = duration.subsec_millis();
    if millis > 0 || result.is_empty() {
        result.push_str(&format!("{}ms", millis));
    }

    result
}

/// Sequential IPv4 address pool for emulated containers.
#[derive(Debug, Clone)]
pub(crate) struct IpPool {
    next: u32,
}

impl IpPool {
    /// Create a pool starting at the given base address.
    pub(crate) fn new(base: &str) -> Option<Self> {
        let base: Ipv4Addr = base.parse().ok()?;
        Some(Self { next: u32::from(base) })
    }

    /// Hand out the next free address of the pool.
    pub(crate) fn next_address(&mut self) -> String {
        let address = Ipv4Addr::from(self.next);
        self.next = self.next.wrapping_add(1);
        address.to_string()
    }

    /// Skip the next `n` addresses of the pool.
    pub(crate) fn advance(&mut self, n: u32) {
        self.next = self.next.wrapping_add(n);
    }
}

/// Number of worker threads for a stage operating on `n_tasks` independent tasks.
pub(crate) fn pool_size(configured: usize, n_tasks: usize) -> usize {
    let threads = if configured > 0 { configured } else { num_cpus::get() };
    threads.min(n_tasks).max(1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_interval_to_string() {
        assert_eq!(interval_to_string(Duration::from_millis(0)), "0ms");
        assert_eq!(interval_to_string(Duration::from_millis(12)), "12ms");
        assert_eq!(interval_to_string(Duration::from_millis(61_500)), "1min1s500ms");
        assert_eq!(interval_to_string(Duration::from_secs(3600)), "1h");
    }

    #[test]
    fn test_ip_pool() {
        let mut pool = IpPool::new("10.0.0.1").unwrap();
        assert_eq!(pool.next_address(), "10.0.0.1");
        assert_eq!(pool.next_address(), "10.0.0.2");
        pool.advance(254);
        assert_eq!(pool.next_address(), "10.0.1.0");
    }
}
