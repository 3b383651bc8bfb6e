use nalgebra::{Point3, UnitQuaternion, Vector3};

/// 長さがこれ未満の骨は向きを持たない
const MIN_LENGTH: f32 = 1e-6;

/// 骨1本分の直方体の変換
///
/// 直方体はローカル +Y 方向に伸びる単位立方体で、
/// 中心に平行移動・回転し (thickness, length, thickness) でスケールする。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTransform {
    /// 中心（2端点の中点）
    pub center: Point3<f32>,
    /// 端点間の距離
    pub length: f32,
    pub thickness: f32,
    /// +Y を start→end に向ける回転
    pub rotation: UnitQuaternion<f32>,
}

impl SegmentTransform {
    /// 原点、長さ0、回転なし
    pub fn identity(thickness: f32) -> Self {
        Self {
            center: Point3::origin(),
            length: 0.0,
            thickness,
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn from_endpoints(start: Point3<f32>, end: Point3<f32>, thickness: f32) -> Self {
        let axis = end - start;
        let length = axis.norm();
        let center = nalgebra::center(&start, &end);

        let rotation = if length < MIN_LENGTH {
            UnitQuaternion::identity()
        } else {
            let dir = axis / length;
            // 真下向きは rotation_between が None を返すので X 軸まわり180度
            UnitQuaternion::rotation_between(&Vector3::y(), &dir).unwrap_or_else(|| {
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI)
            })
        };

        Self {
            center,
            length,
            thickness,
            rotation,
        }
    }

    /// ローカルスケール (x, y, z)
    pub fn scale(&self) -> [f32; 3] {
        [self.thickness, self.length, self.thickness]
    }

    /// 回転 (クォータニオン: x, y, z, w)
    pub fn rotation_xyzw(&self) -> [f32; 4] {
        let q = self.rotation.quaternion();
        [q.i, q.j, q.k, q.w]
    }

    /// ローカル ±Y 端を世界座標へ戻す (start, end)
    pub fn endpoints(&self) -> (Point3<f32>, Point3<f32>) {
        let half = self.rotation * Vector3::new(0.0, self.length / 2.0, 0.0);
        (self.center - half, self.center + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq_3(a: &Point3<f32>, b: &Point3<f32>, eps: f32) -> bool {
        (*a - *b).norm() < eps
    }

    #[test]
    fn test_identity() {
        let t = SegmentTransform::identity(0.2);
        assert_eq!(t.center, Point3::origin());
        assert_eq!(t.length, 0.0);
        assert_eq!(t.rotation_xyzw(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vertical_segment_has_no_rotation() {
        let t = SegmentTransform::from_endpoints(
            Point3::new(0.0, 0.8, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            0.5,
        );
        assert!(approx_eq_3(&t.center, &Point3::new(0.0, 0.9, 0.0), 1e-6));
        assert!((t.length - 0.2).abs() < 1e-6);
        assert!(t.rotation.angle().abs() < 1e-6);
        assert_eq!(t.scale(), [0.5, t.length, 0.5]);
    }

    #[test]
    fn test_horizontal_segment_rotates_y_onto_x() {
        let t = SegmentTransform::from_endpoints(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            0.2,
        );
        let dir = t.rotation * Vector3::y();
        assert!((dir - Vector3::x()).norm() < 1e-5, "got {:?}", dir);
        assert!((t.length - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_downward_segment() {
        // 脚の骨は下向き: rotation_between が退化する向き
        let t = SegmentTransform::from_endpoints(
            Point3::new(0.1, 0.5, 2.0),
            Point3::new(0.1, 0.0, 2.0),
            0.2,
        );
        let dir = t.rotation * Vector3::y();
        assert!((dir + Vector3::y()).norm() < 1e-5, "got {:?}", dir);
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let t = SegmentTransform::from_endpoints(p, p, 0.7);
        assert_eq!(t.center, p);
        assert_eq!(t.length, 0.0);
        assert_eq!(t.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn test_endpoints_recovered() {
        let start = Point3::new(-0.3, 0.4, 1.8);
        let end = Point3::new(-0.1, 0.1, 2.1);
        let t = SegmentTransform::from_endpoints(start, end, 0.2);
        let (s, e) = t.endpoints();
        assert!(approx_eq_3(&s, &start, 1e-5), "start {:?}", s);
        assert!(approx_eq_3(&e, &end, 1e-5), "end {:?}", e);
    }

    #[test]
    fn test_rotation_is_unit() {
        let t = SegmentTransform::from_endpoints(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            0.2,
        );
        let q = t.rotation_xyzw();
        let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }
}
