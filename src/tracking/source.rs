use crate::rig::Rect;
use crate::skeleton::JointSnapshot;

/// 1スロット分の追跡フレーム
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonFrame {
    /// センサーの追跡スロット（2人用センサーなら 0 か 1）
    pub slot: usize,
    pub joints: JointSnapshot,
    pub bounds: Rect,
}

/// 骨格フレームの供給元（センサードライバや記録ファイル）
pub trait SkeletonSource {
    /// 前回呼び出し以降に届いたフレームを返す。無ければ空
    fn poll_frames(&mut self) -> Vec<SkeletonFrame>;

    /// これ以上フレームが来ない
    fn is_finished(&self) -> bool {
        false
    }
}
