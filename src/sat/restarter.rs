#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Restart schedules.
//!
//! A restart drops every decision and goes back to level 0 while keeping
//! learnt clauses, activities and saved phases. The schedule is counted in
//! conflicts: the engine calls [`Restarter::should_restart`] once per conflict.
//!
//! - [`Luby`] restarts after `N * luby(i)` conflicts, where `luby` is the
//!   sequence `1, 1, 2, 1, 1, 2, 4, 1, 1, 2, ...`.
//! - [`Geometric`] multiplies the interval by `N` after each restart.
//! - [`Never`] disables restarts.

use clap::ValueEnum;
use std::fmt::{Debug, Display};

pub trait Restarter: Debug + Clone {
    fn new() -> Self;

    /// Conflicts left until the next restart.
    fn restarts_in(&self) -> usize;

    fn increment_restarts_in(&mut self);

    /// Resets the countdown to the next interval and counts the restart.
    fn restart(&mut self);

    fn num_restarts(&self) -> usize;

    /// Counts one conflict; returns `true` when the countdown has run out.
    fn should_restart(&mut self) -> bool {
        if self.restarts_in() == 0 {
            self.restart();
            true
        } else {
            self.increment_restarts_in();
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Luby<const N: usize> {
    restarts: usize,
    restarts_in: usize,
    /// 0-based position in the Luby sequence of the next interval.
    restarts_next: usize,
}

impl<const N: usize> Luby<N> {
    /// The `x`-th (0-based) element of the Luby sequence.
    #[must_use]
    pub fn luby(mut x: usize) -> usize {
        let mut size = 1;
        let mut seq = 0;
        while size < x + 1 {
            seq += 1;
            size = 2 * size + 1;
        }
        while size - 1 != x {
            size = (size - 1) >> 1;
            seq -= 1;
            x %= size;
        }
        1 << seq
    }
}

impl<const N: usize> Restarter for Luby<N> {
    fn new() -> Self {
        Self {
            restarts: 0,
            restarts_in: N,
            restarts_next: 1,
        }
    }

    fn restarts_in(&self) -> usize {
        self.restarts_in
    }

    fn increment_restarts_in(&mut self) {
        self.restarts_in = self.restarts_in.saturating_sub(1);
    }

    fn restart(&mut self) {
        self.restarts = self.restarts.wrapping_add(1);
        self.restarts_in = Self::luby(self.restarts_next) * N;
        self.restarts_next = self.restarts_next.wrapping_add(1);
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometric<const N: usize> {
    restarts: usize,
    restarts_in: usize,
    restarts_interval: usize,
}

/// First interval of the geometric schedule, in conflicts.
const GEOMETRIC_START: usize = 100;

impl<const N: usize> Restarter for Geometric<N> {
    fn new() -> Self {
        Self {
            restarts: 0,
            restarts_in: GEOMETRIC_START,
            restarts_interval: GEOMETRIC_START,
        }
    }

    fn restarts_in(&self) -> usize {
        self.restarts_in
    }

    fn increment_restarts_in(&mut self) {
        self.restarts_in = self.restarts_in.saturating_sub(1);
    }

    fn restart(&mut self) {
        self.restarts = self.restarts.wrapping_add(1);
        self.restarts_interval = self.restarts_interval.saturating_mul(N);
        self.restarts_in = self.restarts_interval;
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Never {}

impl Restarter for Never {
    fn new() -> Self {
        Self {}
    }

    fn restarts_in(&self) -> usize {
        usize::MAX
    }

    fn increment_restarts_in(&mut self) {}

    fn restart(&mut self) {}

    fn num_restarts(&self) -> usize {
        0
    }

    fn should_restart(&mut self) -> bool {
        false
    }
}

/// Restart schedule chosen at runtime.
#[derive(Debug, Clone)]
pub enum RestarterImpls {
    Luby(Luby<100>),
    Geometric(Geometric<2>),
    Never(Never),
}

impl Restarter for RestarterImpls {
    fn new() -> Self {
        Self::Luby(Luby::new())
    }

    fn restarts_in(&self) -> usize {
        match self {
            Self::Luby(r) => r.restarts_in(),
            Self::Geometric(r) => r.restarts_in(),
            Self::Never(r) => r.restarts_in(),
        }
    }

    fn increment_restarts_in(&mut self) {
        match self {
            Self::Luby(r) => r.increment_restarts_in(),
            Self::Geometric(r) => r.increment_restarts_in(),
            Self::Never(r) => r.increment_restarts_in(),
        }
    }

    fn restart(&mut self) {
        match self {
            Self::Luby(r) => r.restart(),
            Self::Geometric(r) => r.restart(),
            Self::Never(r) => r.restart(),
        }
    }

    fn num_restarts(&self) -> usize {
        match self {
            Self::Luby(r) => r.num_restarts(),
            Self::Geometric(r) => r.num_restarts(),
            Self::Never(r) => r.num_restarts(),
        }
    }

    fn should_restart(&mut self) -> bool {
        match self {
            Self::Luby(r) => r.should_restart(),
            Self::Geometric(r) => r.should_restart(),
            Self::Never(r) => r.should_restart(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RestarterType {
    #[default]
    Luby,
    Geometric,
    Never,
}

impl RestarterType {
    #[must_use]
    pub fn to_impl(self) -> RestarterImpls {
        match self {
            Self::Luby => RestarterImpls::Luby(Luby::new()),
            Self::Geometric => RestarterImpls::Geometric(Geometric::new()),
            Self::Never => RestarterImpls::Never(Never::new()),
        }
    }
}

impl Display for RestarterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Luby => write!(f, "luby"),
            Self::Geometric => write!(f, "geometric"),
            Self::Never => write!(f, "never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luby_sequence() {
        let seq = (0..15).map(Luby::<1>::luby).collect::<Vec<_>>();
        assert_eq!(seq, vec![1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8]);
    }

    #[test]
    fn test_luby_restarts_after_interval() {
        let mut r = Luby::<2>::new();
        let fired = (0..20).filter(|_| r.should_restart()).count();
        // intervals 2, 2, 4, 2, 2, 4, ... each taking interval + 1 calls
        assert_eq!(fired, 5);
        assert_eq!(r.num_restarts(), 5);
    }

    #[test]
    fn test_geometric_intervals_grow() {
        let mut r = Geometric::<2>::new();
        for _ in 0..GEOMETRIC_START {
            assert!(!r.should_restart());
        }
        assert!(r.should_restart());
        assert_eq!(r.restarts_in(), GEOMETRIC_START * 2);
    }

    #[test]
    fn test_never_restarts() {
        let mut r = RestarterType::Never.to_impl();
        assert!((0..1000).all(|_| !r.should_restart()));
        assert_eq!(r.num_restarts(), 0);
    }
}
