use chrono::{Local, NaiveTime};
use embedded_timers::clock::Clock;

/// 本地墙上时间，用于判断是否处于夜间时段
pub trait WallClock {
    fn local_time(&self) -> NaiveTime;
}

/// 标准时钟：单调时钟用于自动关灯计时，本地时间用于时段判断
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock {}

impl StdClock {
    pub fn new() -> Self {
        Self {}
    }
}

impl Clock for StdClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn elapsed(&self, instant: Self::Instant) -> std::time::Duration {
        instant.elapsed()
    }
}

impl WallClock for StdClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}
