//! Fixed-capacity structure-of-arrays pools for enemies and bullets.
//!
//! Both pools keep their live records packed in `0..len`. Removal moves the
//! last live record into the vacated slot, so any index held across a removal
//! may now name a different record. Public accessors are bounds-checked
//! against `len`; the crate-internal hot-path accessors assume the caller
//! already iterates below `len`.

use thiserror::Error;
use turret_survivor_core::{BulletView, DamageType, EnemyView, GroundPoint, StatusKind};

/// Returned by `spawn` when every slot of a pool is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("pool is at its capacity of {capacity} records")]
pub struct PoolFull {
    /// Capacity of the pool that rejected the record.
    pub capacity: usize,
}

/// Field tuple describing a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyRecord {
    /// Ground position.
    pub position: GroundPoint,
    /// Remaining hit points.
    pub hit_points: i16,
    /// Distance travelled per tick before status modifiers.
    pub speed: f32,
    /// Active status effect.
    pub status: StatusKind,
    /// Ticks left before the status expires.
    pub status_ticks: u16,
}

impl EnemyRecord {
    /// Creates an enemy without any status effect.
    #[must_use]
    pub const fn new(position: GroundPoint, hit_points: i16, speed: f32) -> Self {
        Self {
            position,
            hit_points,
            speed,
            status: StatusKind::None,
            status_ticks: 0,
        }
    }
}

/// Field tuple describing a single bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletRecord {
    /// Ground position.
    pub position: GroundPoint,
    /// Lateral displacement per tick.
    pub velocity_x: f32,
    /// Depth displacement per tick.
    pub velocity_z: f32,
    /// Behavioural class of the bullet.
    pub damage_type: DamageType,
    /// Hits left before the bullet is consumed.
    pub pierce: u8,
}

/// Dense pool of enemies stored column by column.
#[derive(Clone, Debug)]
pub struct EnemyPool {
    len: usize,
    x: Vec<f32>,
    z: Vec<f32>,
    hit_points: Vec<i16>,
    speed: Vec<f32>,
    status: Vec<StatusKind>,
    status_ticks: Vec<u16>,
}

impl EnemyPool {
    /// Allocates a pool able to hold `capacity` enemies.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            len: 0,
            x: vec![0.0; capacity],
            z: vec![0.0; capacity],
            hit_points: vec![0; capacity],
            speed: vec![0.0; capacity],
            status: vec![StatusKind::None; capacity],
            status_ticks: vec![0; capacity],
        }
    }

    /// Maximum number of live enemies.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a record and returns its index.
    pub fn spawn(&mut self, record: EnemyRecord) -> Result<usize, PoolFull> {
        let index = self.len;
        if index >= self.capacity() {
            return Err(PoolFull {
                capacity: self.capacity(),
            });
        }

        self.x[index] = record.position.x();
        self.z[index] = record.position.z();
        self.hit_points[index] = record.hit_points;
        self.speed[index] = record.speed;
        self.status[index] = record.status;
        self.status_ticks[index] = record.status_ticks;
        self.len += 1;
        Ok(index)
    }

    /// Swap-removes the enemy at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }

        self.len -= 1;
        let last = self.len;
        if index != last {
            move_slot(&mut self.x, last, index);
            move_slot(&mut self.z, last, index);
            move_slot(&mut self.hit_points, last, index);
            move_slot(&mut self.speed, last, index);
            move_slot(&mut self.status, last, index);
            move_slot(&mut self.status_ticks, last, index);
        }
    }

    /// Record at `index`, if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EnemyRecord> {
        if index >= self.len {
            return None;
        }
        Some(EnemyRecord {
            position: self.position(index),
            hit_points: self.hit_points[index],
            speed: self.speed[index],
            status: self.status[index],
            status_ticks: self.status_ticks[index],
        })
    }

    /// Iterator over live records in dense index order.
    pub fn iter(&self) -> impl Iterator<Item = EnemyRecord> + '_ {
        (0..self.len).filter_map(move |index| self.get(index))
    }

    /// Borrowed columns truncated to the live range.
    #[must_use]
    pub fn view(&self) -> EnemyView<'_> {
        let len = self.len;
        EnemyView::new(
            &self.x[..len],
            &self.z[..len],
            &self.hit_points[..len],
            &self.status[..len],
            &self.status_ticks[..len],
        )
    }

    pub(crate) fn position(&self, index: usize) -> GroundPoint {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        GroundPoint::new(self.x[index], self.z[index])
    }

    pub(crate) fn set_position(&mut self, index: usize, position: GroundPoint) {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        self.x[index] = position.x();
        self.z[index] = position.z();
    }

    pub(crate) fn hit_points(&self, index: usize) -> i16 {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        self.hit_points[index]
    }

    pub(crate) fn speed(&self, index: usize) -> f32 {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        self.speed[index]
    }

    pub(crate) fn status(&self, index: usize) -> StatusKind {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        self.status[index]
    }

    /// Subtracts `amount` hit points and reports whether this crossed zero.
    pub(crate) fn apply_damage(&mut self, index: usize, amount: i16) -> bool {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        let before = self.hit_points[index];
        let after = before.saturating_sub(amount);
        self.hit_points[index] = after;
        before > 0 && after <= 0
    }

    pub(crate) fn set_status(&mut self, index: usize, status: StatusKind, ticks: u16) {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        self.status[index] = status;
        self.status_ticks[index] = ticks;
    }

    /// Counts the status timer down by one tick, clearing the status at zero.
    pub(crate) fn decay_status(&mut self, index: usize) {
        debug_assert!(index < self.len, "enemy index {index} is not live");
        if self.status_ticks[index] == 0 {
            return;
        }
        self.status_ticks[index] -= 1;
        if self.status_ticks[index] == 0 {
            self.status[index] = StatusKind::None;
        }
    }
}

/// Dense pool of bullets stored column by column.
#[derive(Clone, Debug)]
pub struct BulletPool {
    len: usize,
    x: Vec<f32>,
    z: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_z: Vec<f32>,
    damage_type: Vec<DamageType>,
    pierce: Vec<u8>,
}

impl BulletPool {
    /// Allocates a pool able to hold `capacity` bullets.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            len: 0,
            x: vec![0.0; capacity],
            z: vec![0.0; capacity],
            velocity_x: vec![0.0; capacity],
            velocity_z: vec![0.0; capacity],
            damage_type: vec![DamageType::Standard; capacity],
            pierce: vec![0; capacity],
        }
    }

    /// Maximum number of live bullets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// Number of live bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no bullet is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a record and returns its index.
    ///
    /// A pierce of zero is raised to one so every bullet can land a hit.
    pub fn spawn(&mut self, record: BulletRecord) -> Result<usize, PoolFull> {
        let index = self.len;
        if index >= self.capacity() {
            return Err(PoolFull {
                capacity: self.capacity(),
            });
        }

        self.x[index] = record.position.x();
        self.z[index] = record.position.z();
        self.velocity_x[index] = record.velocity_x;
        self.velocity_z[index] = record.velocity_z;
        self.damage_type[index] = record.damage_type;
        self.pierce[index] = record.pierce.max(1);
        self.len += 1;
        Ok(index)
    }

    /// Swap-removes the bullet at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }

        self.len -= 1;
        let last = self.len;
        if index != last {
            move_slot(&mut self.x, last, index);
            move_slot(&mut self.z, last, index);
            move_slot(&mut self.velocity_x, last, index);
            move_slot(&mut self.velocity_z, last, index);
            move_slot(&mut self.damage_type, last, index);
            move_slot(&mut self.pierce, last, index);
        }
    }

    /// Record at `index`, if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<BulletRecord> {
        if index >= self.len {
            return None;
        }
        Some(BulletRecord {
            position: self.position(index),
            velocity_x: self.velocity_x[index],
            velocity_z: self.velocity_z[index],
            damage_type: self.damage_type[index],
            pierce: self.pierce[index],
        })
    }

    /// Iterator over live records in dense index order.
    pub fn iter(&self) -> impl Iterator<Item = BulletRecord> + '_ {
        (0..self.len).filter_map(move |index| self.get(index))
    }

    /// Borrowed columns truncated to the live range.
    #[must_use]
    pub fn view(&self) -> BulletView<'_> {
        let len = self.len;
        BulletView::new(
            &self.x[..len],
            &self.z[..len],
            &self.velocity_x[..len],
            &self.velocity_z[..len],
            &self.damage_type[..len],
            &self.pierce[..len],
        )
    }

    pub(crate) fn position(&self, index: usize) -> GroundPoint {
        debug_assert!(index < self.len, "bullet index {index} is not live");
        GroundPoint::new(self.x[index], self.z[index])
    }

    pub(crate) fn damage_type(&self, index: usize) -> DamageType {
        debug_assert!(index < self.len, "bullet index {index} is not live");
        self.damage_type[index]
    }

    /// Moves the bullet by one tick of its velocity and returns the new position.
    pub(crate) fn advance(&mut self, index: usize) -> GroundPoint {
        debug_assert!(index < self.len, "bullet index {index} is not live");
        self.x[index] += self.velocity_x[index];
        self.z[index] += self.velocity_z[index];
        self.position(index)
    }

    /// Spends one pierce charge and returns the charges left.
    pub(crate) fn consume_pierce(&mut self, index: usize) -> u8 {
        debug_assert!(index < self.len, "bullet index {index} is not live");
        self.pierce[index] = self.pierce[index].saturating_sub(1);
        self.pierce[index]
    }
}

fn move_slot<T: Copy>(column: &mut [T], from: usize, to: usize) {
    column[to] = column[from];
}
