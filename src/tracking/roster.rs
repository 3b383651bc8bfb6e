use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::config::RigConfig;
use crate::error::RigError;
use crate::rig::{PlayerRig, PresentationContext, DEFAULT_EXPIRY};
use crate::tracking::SkeletonFrame;

/// プレイヤーの出入り
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterEvent {
    Joined { slot: usize },
    Left { slot: usize },
    /// 定員超過で無視したフレーム
    Rejected { slot: usize },
    /// 描画に失敗したリグ（他のリグの描画と破棄は続ける）
    Failed { slot: usize, error: RigError },
}

/// 追跡スロットごとのリグを管理する
///
/// 新しいスロットを見たらリグを作り、退場したリグは `draw_all` で破棄する。
pub struct PlayerRoster<'a, C: PresentationContext> {
    context: &'a C,
    rigs: BTreeMap<usize, PlayerRig<C::Segment>>,
    max_players: usize,
    expiry: Duration,
}

impl<'a, C: PresentationContext> PlayerRoster<'a, C> {
    pub fn new(context: &'a C, max_players: usize) -> Self {
        Self {
            context,
            rigs: BTreeMap::new(),
            max_players,
            expiry: DEFAULT_EXPIRY,
        }
    }

    pub fn from_config(config: &RigConfig, context: &'a C) -> Self {
        Self::new(context, config.max_players).with_expiry(config.expiry())
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn len(&self) -> usize {
        self.rigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rigs.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&PlayerRig<C::Segment>> {
        self.rigs.get(&slot)
    }

    /// 管理中のスロット（昇順）
    pub fn slots(&self) -> Vec<usize> {
        self.rigs.keys().copied().collect()
    }

    pub fn apply_frame(&mut self, frame: SkeletonFrame, now: Instant) -> Option<RosterEvent> {
        let mut event = None;
        if !self.rigs.contains_key(&frame.slot) {
            if self.rigs.len() >= self.max_players {
                return Some(RosterEvent::Rejected { slot: frame.slot });
            }
            let rig = PlayerRig::new_at(frame.slot, self.context, now).with_expiry(self.expiry);
            self.rigs.insert(frame.slot, rig);
            event = Some(RosterEvent::Joined { slot: frame.slot });
        }

        if let Some(rig) = self.rigs.get_mut(&frame.slot) {
            rig.set_bounds(frame.bounds);
            rig.set_joints_at(frame.joints, now);
        }
        event
    }

    /// 全リグを描画し、退場したリグを破棄する
    ///
    /// 1体の失敗で止めず、`Failed` をスロット順に並べてから `Left` を返す。
    pub fn draw_all(&mut self, now: Instant) -> Vec<RosterEvent> {
        let mut events: Vec<RosterEvent> = self
            .rigs
            .iter_mut()
            .filter_map(|(&slot, rig)| {
                rig.draw_at(now)
                    .err()
                    .map(|error| RosterEvent::Failed { slot, error })
            })
            .collect();

        let dead: Vec<usize> = self
            .rigs
            .iter()
            .filter(|(_, rig)| !rig.is_alive())
            .map(|(&slot, _)| slot)
            .collect();
        for &slot in &dead {
            self.rigs.remove(&slot);
        }
        events.extend(dead.into_iter().map(|slot| RosterEvent::Left { slot }));
        events
    }
}
