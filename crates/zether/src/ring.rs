//! Anonymity ring construction from registered decoys

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use zether_core::{is_power_of_two, Point, ZetherError, ZetherResult};

/// Registered public keys a ring can draw decoys from
pub trait DecoySource {
    /// Public key registered at `index`
    fn fetch(&self, index: u64) -> ZetherResult<Point>;

    /// Number of registered keys
    fn population(&self) -> u64;
}

impl DecoySource for [Point] {
    fn fetch(&self, index: u64) -> ZetherResult<Point> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.get(i))
            .copied()
            .ok_or(ZetherError::AccountNotFound)
    }

    fn population(&self) -> u64 {
        self.len() as u64
    }
}

impl DecoySource for Vec<Point> {
    fn fetch(&self, index: u64) -> ZetherResult<Point> {
        self.as_slice().fetch(index)
    }

    fn population(&self) -> u64 {
        self.len() as u64
    }
}

/// Sampling policy for decoys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoyPolicy {
    /// Times one key may be drawn before sampling gives up
    pub retry_threshold: usize,
}

impl Default for DecoyPolicy {
    fn default() -> Self {
        Self { retry_threshold: 16 }
    }
}

/// A shuffled ring with the sender at `l0` and the receiver at `l1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    pub members: Vec<Point>,
    pub l0: usize,
    pub l1: usize,
}

impl Ring {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds rings whose sender and receiver indices have opposite parity
#[derive(Debug)]
pub struct RingBuilder<'a, S: DecoySource + ?Sized> {
    source: &'a S,
    policy: DecoyPolicy,
}

impl<'a, S: DecoySource + ?Sized> RingBuilder<'a, S> {
    pub fn new(source: &'a S, policy: DecoyPolicy) -> Self {
        Self { source, policy }
    }

    pub fn build<R: Rng + ?Sized>(&self, sender: Point, receiver: Point, size: usize, rng: &mut R) -> ZetherResult<Ring> {
        if sender == receiver {
            return Err(ZetherError::SelfTransferDisallowed);
        }
        if size < 4 || !is_power_of_two(size) {
            return Err(ZetherError::InvalidParameters(format!(
                "ring size {} must be a power of two of at least 4",
                size
            )));
        }

        let mut members = Vec::with_capacity(size);
        members.push(sender);
        members.push(receiver);
        let mut draws: HashMap<Point, usize> = HashMap::with_capacity(size);
        draws.insert(sender, 1);
        draws.insert(receiver, 1);

        let population = self.source.population();
        while members.len() < size {
            let exhausted = ZetherError::DecoyExhausted {
                needed: size - 2,
                found: members.len() - 2,
            };
            if population == 0 {
                return Err(exhausted);
            }
            let candidate = self.source.fetch(rng.gen_range(0..population))?;
            let count = draws.entry(candidate).or_insert(0);
            *count += 1;
            if *count > 1 {
                if *count > self.policy.retry_threshold {
                    warn!(size, found = members.len() - 2, "decoy sampling exhausted");
                    return Err(exhausted);
                }
                continue;
            }
            members.push(candidate);
        }

        members.shuffle(rng);
        let l0 = position(&members, &sender)?;
        let mut l1 = position(&members, &receiver)?;
        if l0 % 2 == l1 % 2 {
            let neighbour = l1 ^ 1;
            members.swap(l1, neighbour);
            l1 = neighbour;
        }
        debug!(size, "ring built");
        Ok(Ring { members, l0, l1 })
    }
}

fn position(members: &[Point], key: &Point) -> ZetherResult<usize> {
    members
        .iter()
        .position(|m| m == key)
        .ok_or(ZetherError::AccountNotFound)
}
