//! Sprite collections.
//!
//! A `Group` is an unordered bag of entities of one type.  Members never
//! touch the group themselves: removal is decided by whoever owns the group,
//! either through `retain`, through the dead-sweep at the end of `update`, or
//! through `group_collide`, which scans first and removes afterwards.

use std::time::Instant;

use crate::rect::Rect;
use crate::settings::Settings;

/// Everything an entity may read while it steps forward one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub settings: &'a Settings,
    pub now: Instant,
}

pub trait Updatable {
    fn update(&mut self, ctx: &TickContext);

    /// Dead members are swept out of their group right after an update.
    fn is_alive(&self) -> bool {
        true
    }
}

/// Anything with a collision box.
pub trait Sprite {
    fn rect(&self) -> Rect;
}

#[derive(Clone, Debug)]
pub struct Group<T> {
    members: Vec<T>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Group { members: Vec::new() }
    }
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: T) {
        self.members.push(member);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove every member.
    pub fn empty(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.members.retain(keep);
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Updatable> Group<T> {
    /// Step every member, then drop the ones that died doing so.
    pub fn update(&mut self, ctx: &TickContext) {
        for member in &mut self.members {
            member.update(ctx);
        }
        self.members.retain(|m| m.is_alive());
    }
}

impl<T: Sprite> Group<T> {
    /// True if any member overlaps `rect`.
    pub fn collide_any(&self, rect: &Rect) -> bool {
        self.members.iter().any(|m| m.rect().overlaps(rect))
    }
}

/// Find every member of `a` overlapping members of `b` and remove both sides.
///
/// Members of `a` are visited in order.  A member of `b` is consumed by the
/// first `a` member found touching it, so it appears in at most one entry.
/// Each returned entry pairs a removed `a` member with every `b` member it
/// took out.
pub fn group_collide<A: Sprite, B: Sprite>(a: &mut Group<A>, b: &mut Group<B>) -> Vec<(A, Vec<B>)> {
    let mut taken = vec![false; b.members.len()];
    let mut hits: Vec<(usize, Vec<usize>)> = Vec::new();

    for (ai, a_member) in a.members.iter().enumerate() {
        let rect = a_member.rect();
        let touched: Vec<usize> = b
            .members
            .iter()
            .enumerate()
            .filter(|(bi, b_member)| !taken[*bi] && b_member.rect().overlaps(&rect))
            .map(|(bi, _)| bi)
            .collect();
        if touched.is_empty() {
            continue;
        }
        for &bi in &touched {
            taken[bi] = true;
        }
        hits.push((ai, touched));
    }

    if hits.is_empty() {
        return Vec::new();
    }

    let mut a_slots: Vec<Option<A>> = a.members.drain(..).map(Some).collect();
    let mut b_slots: Vec<Option<B>> = b.members.drain(..).map(Some).collect();

    let collided: Vec<(A, Vec<B>)> = hits
        .into_iter()
        .filter_map(|(ai, touched)| {
            let a_member = a_slots[ai].take()?;
            let b_members: Vec<B> = touched.into_iter().filter_map(|bi| b_slots[bi].take()).collect();
            Some((a_member, b_members))
        })
        .collect();

    a.members = a_slots.into_iter().flatten().collect();
    b.members = b_slots.into_iter().flatten().collect();
    collided
}
