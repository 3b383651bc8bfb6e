use nalgebra::Point3;

use crate::skeleton::JointType;

/// 描画側が持つ向き付きセグメント（骨1本分の直方体など）
pub trait Segment {
    /// 2端点から自身の変換（中点・長さ・回転）を再計算する
    fn update(&mut self, start: Point3<f32>, end: Point3<f32>);
}

/// セグメントを確保する描画コンテキスト（シーン/ビューポート）
///
/// 複数のリグが同じコンテキストを共有するため `&self` で確保する。
/// 返したハンドルの解放はハンドルの drop で行う。
pub trait PresentationContext {
    type Segment: Segment;

    fn create_segment(&self, thickness: f32) -> Self::Segment;
}

/// リグを構成する 15 本の骨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Bone {
    Head = 0,
    LeftUpperArm = 1,
    RightUpperArm = 2,
    LeftForearm = 3,
    RightForearm = 4,
    LeftHand = 5,
    RightHand = 6,
    LeftThigh = 7,
    RightThigh = 8,
    LeftCalf = 9,
    RightCalf = 10,
    LeftFoot = 11,
    RightFoot = 12,
    Chest = 13,
    Torso = 14,
}

impl Bone {
    pub const COUNT: usize = 15;

    pub const ALL: [Bone; Self::COUNT] = [
        Self::Head,
        Self::LeftUpperArm,
        Self::RightUpperArm,
        Self::LeftForearm,
        Self::RightForearm,
        Self::LeftHand,
        Self::RightHand,
        Self::LeftThigh,
        Self::RightThigh,
        Self::LeftCalf,
        Self::RightCalf,
        Self::LeftFoot,
        Self::RightFoot,
        Self::Chest,
        Self::Torso,
    ];

    /// (開始ジョイント, 終了ジョイント)
    pub fn joints(self) -> (JointType, JointType) {
        BONE_CONNECTIONS[self as usize]
    }

    /// 直方体の太さ
    pub fn thickness(self) -> f32 {
        match self {
            Self::Head => 0.5,
            Self::LeftUpperArm | Self::RightUpperArm => 0.2,
            Self::LeftForearm | Self::RightForearm => 0.2,
            Self::LeftHand | Self::RightHand => 0.7,
            Self::LeftThigh | Self::RightThigh => 0.2,
            Self::LeftCalf | Self::RightCalf => 0.2,
            Self::LeftFoot | Self::RightFoot => 0.7,
            Self::Chest => 0.45,
            Self::Torso => 0.6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::LeftUpperArm => "left_upper_arm",
            Self::RightUpperArm => "right_upper_arm",
            Self::LeftForearm => "left_forearm",
            Self::RightForearm => "right_forearm",
            Self::LeftHand => "left_hand",
            Self::RightHand => "right_hand",
            Self::LeftThigh => "left_thigh",
            Self::RightThigh => "right_thigh",
            Self::LeftCalf => "left_calf",
            Self::RightCalf => "right_calf",
            Self::LeftFoot => "left_foot",
            Self::RightFoot => "right_foot",
            Self::Chest => "chest",
            Self::Torso => "torso",
        }
    }
}

/// 骨の接続定義 (開始ジョイント, 終了ジョイント)。`Bone` の並び順
pub const BONE_CONNECTIONS: [(JointType, JointType); Bone::COUNT] = [
    // 頭
    (JointType::ShoulderCenter, JointType::Head),
    // 腕
    (JointType::ShoulderLeft, JointType::ElbowLeft),
    (JointType::ShoulderRight, JointType::ElbowRight),
    (JointType::ElbowLeft, JointType::WristLeft),
    (JointType::ElbowRight, JointType::WristRight),
    (JointType::WristLeft, JointType::HandLeft),
    (JointType::WristRight, JointType::HandRight),
    // 脚
    (JointType::HipLeft, JointType::KneeLeft),
    (JointType::HipRight, JointType::KneeRight),
    (JointType::KneeLeft, JointType::AnkleLeft),
    (JointType::KneeRight, JointType::AnkleRight),
    (JointType::AnkleLeft, JointType::FootLeft),
    (JointType::AnkleRight, JointType::FootRight),
    // 胴体
    (JointType::ShoulderCenter, JointType::Spine),
    (JointType::Spine, JointType::HipCenter),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bone_order_matches_discriminant() {
        for (i, bone) in Bone::ALL.iter().enumerate() {
            assert_eq!(*bone as usize, i, "{} is out of order", bone.name());
        }
    }

    #[test]
    fn test_connections_are_unique() {
        let pairs: HashSet<(JointType, JointType)> = BONE_CONNECTIONS.iter().copied().collect();
        assert_eq!(pairs.len(), Bone::COUNT);
    }

    #[test]
    fn test_head_and_torso_pairs() {
        assert_eq!(Bone::Head.joints(), (JointType::ShoulderCenter, JointType::Head));
        assert_eq!(Bone::Chest.joints(), (JointType::ShoulderCenter, JointType::Spine));
        assert_eq!(Bone::Torso.joints(), (JointType::Spine, JointType::HipCenter));
        assert_eq!(Bone::RightFoot.joints(), (JointType::AnkleRight, JointType::FootRight));
    }

    #[test]
    fn test_thickness_constants() {
        assert_eq!(Bone::Head.thickness(), 0.5);
        assert_eq!(Bone::LeftUpperArm.thickness(), 0.2);
        assert_eq!(Bone::RightForearm.thickness(), 0.2);
        assert_eq!(Bone::LeftHand.thickness(), 0.7);
        assert_eq!(Bone::RightThigh.thickness(), 0.2);
        assert_eq!(Bone::LeftCalf.thickness(), 0.2);
        assert_eq!(Bone::RightFoot.thickness(), 0.7);
        assert_eq!(Bone::Torso.thickness(), 0.6);
        assert_eq!(Bone::Chest.thickness(), 0.45);
    }

    #[test]
    fn test_every_joint_is_used() {
        // 20 ジョイント全てがどこかの骨に使われる
        let used: HashSet<JointType> = BONE_CONNECTIONS
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        assert_eq!(used.len(), JointType::COUNT);
    }
}
