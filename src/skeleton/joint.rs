/// Kinect 骨格の 20 ジョイント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum JointType {
    HipCenter = 0,
    Spine = 1,
    ShoulderCenter = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
}

impl JointType {
    pub const COUNT: usize = 20;

    /// インデックス順の全ジョイント
    pub const ALL: [JointType; Self::COUNT] = [
        Self::HipCenter,
        Self::Spine,
        Self::ShoulderCenter,
        Self::Head,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 記録ファイルで使う名前
    pub fn name(self) -> &'static str {
        match self {
            Self::HipCenter => "HipCenter",
            Self::Spine => "Spine",
            Self::ShoulderCenter => "ShoulderCenter",
            Self::Head => "Head",
            Self::ShoulderLeft => "ShoulderLeft",
            Self::ElbowLeft => "ElbowLeft",
            Self::WristLeft => "WristLeft",
            Self::HandLeft => "HandLeft",
            Self::ShoulderRight => "ShoulderRight",
            Self::ElbowRight => "ElbowRight",
            Self::WristRight => "WristRight",
            Self::HandRight => "HandRight",
            Self::HipLeft => "HipLeft",
            Self::KneeLeft => "KneeLeft",
            Self::AnkleLeft => "AnkleLeft",
            Self::FootLeft => "FootLeft",
            Self::HipRight => "HipRight",
            Self::KneeRight => "KneeRight",
            Self::AnkleRight => "AnkleRight",
            Self::FootRight => "FootRight",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|j| j.name() == name)
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_type_count() {
        assert_eq!(JointType::COUNT, 20);
        assert_eq!(JointType::ALL.len(), JointType::COUNT);
    }

    #[test]
    fn test_all_matches_discriminant() {
        for (i, joint) in JointType::ALL.iter().enumerate() {
            assert_eq!(*joint as usize, i, "{} is out of order", joint);
        }
    }

    #[test]
    fn test_joint_type_from_index() {
        assert_eq!(JointType::from_index(0), Some(JointType::HipCenter));
        assert_eq!(JointType::from_index(19), Some(JointType::FootRight));
        assert_eq!(JointType::from_index(20), None);
    }

    #[test]
    fn test_name_lookup() {
        for joint in JointType::ALL {
            assert_eq!(JointType::from_name(joint.name()), Some(joint));
        }
        assert_eq!(JointType::from_name("Nose"), None);
        assert_eq!(JointType::from_name("head"), None);
    }
}
