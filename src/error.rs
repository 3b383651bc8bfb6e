use thiserror::Error;

use crate::skeleton::JointType;

/// リグ操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RigError {
    /// スナップショットに必須ジョイントが無い（フレーム供給側の契約違反）
    #[error("joint {joint} missing from skeleton snapshot")]
    MissingJoint { joint: JointType },
}

impl RigError {
    pub fn missing(joint: JointType) -> Self {
        Self::MissingJoint { joint }
    }
}
