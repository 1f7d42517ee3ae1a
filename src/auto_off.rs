use std::time::{Duration, Instant};

/// 自动关灯计时器
///
/// 记录灯被打开的时刻，超过时限后提示关灯。
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoOffTimer {
    activated_at: Option<Instant>,
}

impl AutoOffTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始计时，已在计时则以 now 重新计时
    pub fn start(&mut self, now: Instant) {
        self.activated_at = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.activated_at.is_some()
    }

    /// 距离最近一次 start 经过的时间
    pub fn elapsed_since(&self, now: Instant) -> Option<Duration> {
        self.activated_at
            .map(|activated_at| now.saturating_duration_since(activated_at))
    }

    /// 计时中且已严格超过 limit
    pub fn expired(&self, now: Instant, limit: Duration) -> bool {
        self.elapsed_since(now).is_some_and(|elapsed| elapsed > limit)
    }

    pub fn clear(&mut self) {
        self.activated_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(120);

    #[test]
    fn idle_timer_never_expires() {
        let timer = AutoOffTimer::new();
        let now = Instant::now();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_since(now), None);
        assert!(!timer.expired(now + Duration::from_secs(3600), LIMIT));
    }

    #[test]
    fn expiry_is_strict() {
        let t0 = Instant::now();
        let mut timer = AutoOffTimer::new();
        timer.start(t0);

        assert!(!timer.expired(t0 + LIMIT, LIMIT));
        assert!(timer.expired(t0 + LIMIT + Duration::from_millis(1), LIMIT));
    }

    #[test]
    fn restart_moves_reference() {
        let t0 = Instant::now();
        let mut timer = AutoOffTimer::new();

        for step in 0..5u64 {
            timer.start(t0 + Duration::from_secs(step * 30));
        }
        let last = t0 + Duration::from_secs(120);

        assert_eq!(
            timer.elapsed_since(last + Duration::from_secs(7)),
            Some(Duration::from_secs(7))
        );
        assert!(!timer.expired(last + LIMIT, LIMIT));
    }

    #[test]
    fn clear_stops_timer() {
        let t0 = Instant::now();
        let mut timer = AutoOffTimer::new();
        timer.start(t0);
        timer.clear();

        assert!(!timer.is_running());
        assert!(!timer.expired(t0 + Duration::from_secs(500), LIMIT));
    }
}
