use nalgebra::Point3;

use crate::error::RigError;
use crate::skeleton::JointType;

/// 1フレーム分のジョイント位置（メートル、センサー座標系）
///
/// 欠けたジョイントは `None`。欠損の扱いは読み出し側が決める。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSnapshot {
    positions: [Option<Point3<f32>>; JointType::COUNT],
}

impl JointSnapshot {
    /// 全ジョイント欠損の空スナップショット
    pub fn empty() -> Self {
        Self {
            positions: [None; JointType::COUNT],
        }
    }

    /// 全ジョイントが揃ったスナップショット
    pub fn from_positions(positions: [Point3<f32>; JointType::COUNT]) -> Self {
        Self {
            positions: positions.map(Some),
        }
    }

    pub fn set(&mut self, joint: JointType, position: Point3<f32>) {
        self.positions[joint as usize] = Some(position);
    }

    pub fn with(mut self, joint: JointType, position: Point3<f32>) -> Self {
        self.set(joint, position);
        self
    }

    pub fn remove(&mut self, joint: JointType) {
        self.positions[joint as usize] = None;
    }

    pub fn try_get(&self, joint: JointType) -> Option<Point3<f32>> {
        self.positions[joint as usize]
    }

    /// 欠損なら `RigError::MissingJoint`
    pub fn get(&self, joint: JointType) -> Result<Point3<f32>, RigError> {
        self.try_get(joint).ok_or(RigError::missing(joint))
    }

    pub fn is_complete(&self) -> bool {
        self.positions.iter().all(Option::is_some)
    }

    /// 欠けているジョイント（インデックス順）
    pub fn missing(&self) -> Vec<JointType> {
        JointType::ALL
            .iter()
            .copied()
            .filter(|&j| self.positions[j as usize].is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointType, Point3<f32>)> + '_ {
        JointType::ALL
            .iter()
            .filter_map(move |&j| self.positions[j as usize].map(|p| (j, p)))
    }
}

impl Default for JointSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<(JointType, Point3<f32>)> for JointSnapshot {
    fn from_iter<I: IntoIterator<Item = (JointType, Point3<f32>)>>(iter: I) -> Self {
        let mut snapshot = Self::empty();
        for (joint, position) in iter {
            snapshot.set(joint, position);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_reports_all_missing() {
        let snapshot = JointSnapshot::empty();
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.missing().len(), JointType::COUNT);
        assert_eq!(
            snapshot.get(JointType::Head),
            Err(RigError::MissingJoint { joint: JointType::Head })
        );
    }

    #[test]
    fn test_from_positions_is_complete() {
        let positions = [Point3::new(1.0, 2.0, 3.0); JointType::COUNT];
        let snapshot = JointSnapshot::from_positions(positions);
        assert!(snapshot.is_complete());
        assert!(snapshot.missing().is_empty());
        assert_eq!(snapshot.get(JointType::FootRight), Ok(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_remove_makes_lookup_fail() {
        let mut snapshot =
            JointSnapshot::from_positions([Point3::origin(); JointType::COUNT]);
        snapshot.remove(JointType::AnkleRight);
        assert_eq!(snapshot.missing(), vec![JointType::AnkleRight]);
        assert!(snapshot.try_get(JointType::AnkleRight).is_none());
        assert!(snapshot.get(JointType::AnkleLeft).is_ok());
    }

    #[test]
    fn test_collect_and_iter() {
        let snapshot: JointSnapshot = [
            (JointType::Head, Point3::new(0.0, 1.0, 0.0)),
            (JointType::ShoulderCenter, Point3::new(0.0, 0.8, 0.0)),
        ]
        .into_iter()
        .collect();

        let joints: Vec<JointType> = snapshot.iter().map(|(j, _)| j).collect();
        // インデックス順で返る
        assert_eq!(joints, vec![JointType::ShoulderCenter, JointType::Head]);
    }
}
