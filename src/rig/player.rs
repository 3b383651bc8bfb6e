use std::time::{Duration, Instant};

use nalgebra::Point3;

use crate::error::RigError;
use crate::rig::bounds::{PlayerBounds, Rect};
use crate::rig::segment::{Bone, PresentationContext, Segment};
use crate::skeleton::JointSnapshot;

/// 最後のスナップショットからこれを超えたらプレイヤーは退場扱い
pub const DEFAULT_EXPIRY: Duration = Duration::from_millis(500);

/// リグの生存状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// まだスナップショットを受け取っていない
    Pending,
    Alive,
    /// 期限切れ。戻らない
    Dead,
}

/// 1人分の骨格を 15 本のセグメントに割り当てるリグ
///
/// 生存状態は「未受信 → 生存 → 退場」の一方向のみ。退場したリグは
/// 呼び出し側が破棄し、同じスロットが再追跡されたら作り直す。
pub struct PlayerRig<S: Segment> {
    id: usize,
    bounds: PlayerBounds,
    joints: Option<JointSnapshot>,
    segments: [S; Bone::COUNT],
    liveness: Liveness,
    last_updated: Instant,
    expiry: Duration,
}

impl<S: Segment> PlayerRig<S> {
    pub fn new<C>(slot: usize, context: &C) -> Self
    where
        C: PresentationContext<Segment = S>,
    {
        Self::new_at(slot, context, Instant::now())
    }

    pub fn new_at<C>(slot: usize, context: &C, now: Instant) -> Self
    where
        C: PresentationContext<Segment = S>,
    {
        let segments = std::array::from_fn(|i| context.create_segment(Bone::ALL[i].thickness()));
        Self {
            id: slot,
            bounds: PlayerBounds::default(),
            joints: None,
            segments,
            liveness: Liveness::Pending,
            last_updated: now,
            expiry: DEFAULT_EXPIRY,
        }
    }

    /// 退場までの猶予を変更する
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// センサーの追跡スロット番号
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.liveness == Liveness::Alive
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn last_updated(&self) -> Instant {
        self.last_updated
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn bounds(&self) -> &PlayerBounds {
        &self.bounds
    }

    pub fn joints(&self) -> Option<&JointSnapshot> {
        self.joints.as_ref()
    }

    pub fn segment(&self, bone: Bone) -> &S {
        &self.segments[bone as usize]
    }

    pub fn segments(&self) -> impl Iterator<Item = (Bone, &S)> {
        Bone::ALL.iter().copied().zip(self.segments.iter())
    }

    pub fn set_bounds(&mut self, rect: Rect) {
        self.bounds = PlayerBounds::from_rect(rect);
    }

    /// 新しいフレームを受け取る。生存扱いにし、タイムスタンプを更新する。
    /// 退場済みのリグには何もしない。
    /// セグメントの再計算は `draw` で行う。
    pub fn set_joints(&mut self, joints: JointSnapshot) {
        self.set_joints_at(joints, Instant::now());
    }

    pub fn set_joints_at(&mut self, joints: JointSnapshot, now: Instant) {
        if self.liveness == Liveness::Dead {
            return;
        }
        self.joints = Some(joints);
        self.last_updated = now;
        self.liveness = Liveness::Alive;
    }

    /// 現在のスナップショットを全セグメントに反映し、期限切れなら退場にする
    ///
    /// ジョイント欠損でエラーを返す場合も期限チェックは行う。
    pub fn draw(&mut self) -> Result<(), RigError> {
        self.draw_at(Instant::now())
    }

    pub fn draw_at(&mut self, now: Instant) -> Result<(), RigError> {
        if !self.is_alive() {
            return Ok(());
        }

        // 全端点を先に解決: 欠損があればどのセグメントにも触れない
        let result = match self.joints.as_ref().map(resolve_endpoints) {
            Some(Ok(endpoints)) => {
                for (segment, (start, end)) in self.segments.iter_mut().zip(endpoints) {
                    segment.update(start, end);
                }
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Ok(()),
        };

        self.check_liveness(now);
        result
    }

    /// 期限切れなら退場にし、現在の生存状態を返す
    pub fn check_liveness(&mut self, now: Instant) -> bool {
        if self.is_alive() && now.saturating_duration_since(self.last_updated) > self.expiry {
            self.liveness = Liveness::Dead;
        }
        self.is_alive()
    }
}

fn resolve_endpoints(
    joints: &JointSnapshot,
) -> Result<[(Point3<f32>, Point3<f32>); Bone::COUNT], RigError> {
    let mut endpoints = [(Point3::origin(), Point3::origin()); Bone::COUNT];
    for (slot, bone) in endpoints.iter_mut().zip(Bone::ALL) {
        let (start, end) = bone.joints();
        *slot = (joints.get(start)?, joints.get(end)?);
    }
    Ok(endpoints)
}
