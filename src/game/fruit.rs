//! Fruit slots with per-kind live counters.
//!
//! A slot is live while `enabled`; `count(kind)` is kept equal to the number
//! of live slots of that kind by every method that enables or disables one.
//! Slots never move, so expiring a fruit in the middle of a pass leaves the
//! remaining ones where they are.

use crate::config::CELLS;
use crate::grid::Position;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum FruitKind {
    /// Makes the snake longer.
    #[default]
    Normal,
    /// Makes the snake shorter.
    Hazard,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Fruit {
    pub pos: Position,
    pub kind: FruitKind,
    pub enabled: bool,
    /// Remaining ticks before it disappears.
    pub ttl: u16,
}

impl Fruit {
    const VACANT: Self = Self {
        pos: Position::new(0, 0),
        kind: FruitKind::Normal,
        enabled: false,
        ttl: 0,
    };
}

/// Fruits removed by one [`FruitPool::expire_tick`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Expired {
    pub normal: u8,
    pub hazard: u8,
}

#[derive(Clone, Debug)]
pub struct FruitPool {
    slots: [Fruit; CELLS],
    normal: usize,
    hazard: usize,
}

impl FruitPool {
    pub const fn new() -> Self {
        Self {
            slots: [Fruit::VACANT; CELLS],
            normal: 0,
            hazard: 0,
        }
    }

    pub fn clear(&mut self) { *self = Self::new(); }

    /// Live fruits of `kind`.
    pub const fn count(
        &self,
        kind: FruitKind,
    ) -> usize {
        match kind {
            FruitKind::Normal => self.normal,
            FruitKind::Hazard => self.hazard,
        }
    }

    fn counter(
        &mut self,
        kind: FruitKind,
    ) -> &mut usize {
        match kind {
            FruitKind::Normal => &mut self.normal,
            FruitKind::Hazard => &mut self.hazard,
        }
    }

    /// Place a fruit in the first vacant slot. False when every slot is live.
    pub fn spawn(
        &mut self,
        pos: Position,
        kind: FruitKind,
        ttl: u16,
    ) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|f| !f.enabled) else {
            return false;
        };
        *slot = Fruit {
            pos,
            kind,
            enabled: true,
            ttl,
        };
        *self.counter(kind) += 1;
        true
    }

    /// Remove the live fruit at `pos`, returning its kind.
    pub fn take_at(
        &mut self,
        pos: Position,
    ) -> Option<FruitKind> {
        let slot = self.slots.iter_mut().find(|f| f.enabled && f.pos == pos)?;
        slot.enabled = false;
        let kind = slot.kind;
        let counter = self.counter(kind);
        *counter = counter.saturating_sub(1);
        Some(kind)
    }

    pub fn occupies(
        &self,
        pos: Position,
    ) -> bool {
        self.iter().any(|f| f.pos == pos)
    }

    /// Count every live fruit down by one tick and disable the ones that
    /// reach zero.
    pub fn expire_tick(&mut self) -> Expired {
        let mut expired = Expired::default();
        for slot in self.slots.iter_mut().filter(|f| f.enabled) {
            slot.ttl = slot.ttl.saturating_sub(1);
            if slot.ttl == 0 {
                slot.enabled = false;
                match slot.kind {
                    FruitKind::Normal => {
                        self.normal = self.normal.saturating_sub(1);
                        expired.normal += 1;
                    }
                    FruitKind::Hazard => {
                        self.hazard = self.hazard.saturating_sub(1);
                        expired.hazard += 1;
                    }
                }
            }
        }
        expired
    }

    /// Live fruits in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Fruit> { self.slots.iter().filter(|f| f.enabled) }
}

impl Default for FruitPool {
    fn default() -> Self { Self::new() }
}
