use serde::{Deserialize, Serialize};

/// 画面座標の矩形（オーバーレイ配置用）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// プレイヤーの矩形と、そこから導いた中心・スケール
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerBounds {
    pub rect: Rect,
    pub center: [f32; 2],
    pub scale: f32,
}

impl PlayerBounds {
    /// 検証なし。面積ゼロの矩形もそのまま受け取る
    pub fn from_rect(rect: Rect) -> Self {
        let center = [
            (rect.left + rect.right) / 2.0,
            (rect.top + rect.bottom) / 2.0,
        ];
        let scale = rect.width().min(rect.height() / 2.0);
        Self { rect, center, scale }
    }
}
