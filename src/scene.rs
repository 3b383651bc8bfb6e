use std::sync::{Arc, Mutex};

use nalgebra::Point3;

use crate::rig::{PresentationContext, Segment, SegmentTransform};

#[derive(Default)]
struct Slots {
    transforms: Vec<Option<SegmentTransform>>,
    free: Vec<usize>,
}

/// プロセス内のシーン。各セグメントの最新の変換を保持する
///
/// 描画バックエンドはここから `live_segments` を読み出す。
#[derive(Clone, Default)]
pub struct Scene {
    slots: Arc<Mutex<Slots>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// 確保中のセグメント数
    pub fn len(&self) -> usize {
        match self.slots.lock() {
            Ok(slots) => slots.transforms.iter().filter(|t| t.is_some()).count(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 確保中の全セグメントの変換（スロット順）
    pub fn live_segments(&self) -> Vec<SegmentTransform> {
        match self.slots.lock() {
            Ok(slots) => slots.transforms.iter().flatten().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl PresentationContext for Scene {
    type Segment = CuboidSegment;

    fn create_segment(&self, thickness: f32) -> CuboidSegment {
        let initial = SegmentTransform::identity(thickness);
        let slot = match self.slots.lock() {
            Ok(mut slots) => match slots.free.pop() {
                Some(slot) => {
                    slots.transforms[slot] = Some(initial);
                    Some(slot)
                }
                None => {
                    slots.transforms.push(Some(initial));
                    Some(slots.transforms.len() - 1)
                }
            },
            Err(_) => None,
        };
        CuboidSegment {
            scene: Arc::clone(&self.slots),
            slot,
            transform: initial,
        }
    }
}

/// シーンに登録された直方体。drop でシーンから外れる
pub struct CuboidSegment {
    scene: Arc<Mutex<Slots>>,
    slot: Option<usize>,
    transform: SegmentTransform,
}

impl CuboidSegment {
    pub fn transform(&self) -> &SegmentTransform {
        &self.transform
    }
}

impl Segment for CuboidSegment {
    fn update(&mut self, start: Point3<f32>, end: Point3<f32>) {
        self.transform = SegmentTransform::from_endpoints(start, end, self.transform.thickness);
        if let (Some(slot), Ok(mut slots)) = (self.slot, self.scene.lock()) {
            slots.transforms[slot] = Some(self.transform);
        }
    }
}

impl Drop for CuboidSegment {
    fn drop(&mut self) {
        if let (Some(slot), Ok(mut slots)) = (self.slot, self.scene.lock()) {
            slots.transforms[slot] = None;
            slots.free.push(slot);
        }
    }
}
