use chrono::Timelike;

/// 启用时段，按小时计的半开区间 [start, end)
///
/// start > end 表示跨越午夜，例如 22 点到次日 6 点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    /// 默认夜间时段 00:00-06:00
    pub const NIGHT: Self = Self::new(0, 6);

    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// 只比较小时，分钟不参与判断
    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

/// 当前本地时间是否处于启用时段
pub fn is_active_window<T: Timelike>(now: &T, window: &TimeWindow) -> bool {
    window.contains_hour(now.hour())
}
