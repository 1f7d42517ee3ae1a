/// 鼻子需要高出左髋的最小距离(归一化坐标)
pub const MARGIN: f64 = 0.1;

/// 用到的人体关键点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Nose,
    LeftHip,
}

impl Landmark {
    /// 姿态数据流中的字段名
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftHip => "left_hip",
        }
    }
}

/// 归一化坐标点，y 轴 0 为画面顶部，1 为画面底部
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// 两个坐标都落在 [0, 1] 内
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// 单帧画面中检测到的关键点，保证包含鼻子和左髋
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    nose: Point,
    left_hip: Point,
}

impl LandmarkSet {
    /// 任一关键点超出归一化范围时返回 None
    pub fn new(nose: Point, left_hip: Point) -> Option<Self> {
        if nose.is_normalized() && left_hip.is_normalized() {
            Some(Self { nose, left_hip })
        } else {
            None
        }
    }

    pub fn get(&self, landmark: Landmark) -> Point {
        match landmark {
            Landmark::Nose => self.nose,
            Landmark::LeftHip => self.left_hip,
        }
    }
}

/// 姿态判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    /// 躺着
    Reclined,
    /// 坐起或站起
    Risen,
}

impl Posture {
    pub fn is_risen(self) -> bool {
        self == Self::Risen
    }
}

/// 判断是否起身
///
/// y 值越小越靠上，鼻子比左髋高出 [`MARGIN`] 以上即认为躯干已离开躺卧姿态。
/// 每帧独立判断，不做平滑。
pub fn classify(landmarks: &LandmarkSet) -> Posture {
    let nose_y = landmarks.get(Landmark::Nose).y;
    let hip_y = landmarks.get(Landmark::LeftHip).y;
    if nose_y < hip_y - MARGIN {
        Posture::Risen
    } else {
        Posture::Reclined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(nose_y: f64, hip_y: f64) -> LandmarkSet {
        LandmarkSet::new(Point { x: 0.5, y: nose_y }, Point { x: 0.5, y: hip_y }).unwrap()
    }

    #[test]
    fn nose_well_above_hip_is_risen() {
        assert_eq!(classify(&set(0.3, 0.5)), Posture::Risen);
    }

    #[test]
    fn lying_flat_is_reclined() {
        assert_eq!(classify(&set(0.52, 0.5)), Posture::Reclined);
        assert_eq!(classify(&set(0.45, 0.5)), Posture::Reclined);
    }

    #[test]
    fn decimal_margin_boundary_is_not_risen() {
        for (nose, hip) in [(0.2, 0.3), (0.05, 0.15), (0.4, 0.5), (0.6, 0.7), (0.0, 0.1)] {
            assert_eq!(classify(&set(nose, hip)), Posture::Reclined, "nose={nose} hip={hip}");
        }
    }

    #[test]
    fn just_past_margin_is_risen() {
        assert_eq!(classify(&set(0.19, 0.3)), Posture::Risen);
        assert_eq!(classify(&set(0.399, 0.5)), Posture::Risen);
        assert_eq!(classify(&set(0.0, 0.11)), Posture::Risen);
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        let ok = Point { x: 0.5, y: 0.5 };
        assert!(LandmarkSet::new(Point { x: 0.5, y: 1.2 }, ok).is_none());
        assert!(LandmarkSet::new(ok, Point { x: -0.1, y: 0.5 }).is_none());
    }
}
