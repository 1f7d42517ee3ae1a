use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::digital::OutputPin;
use embedded_timers::clock::Clock;
use tracing::{debug, info, warn};

use crate::auto_off::AutoOffTimer;
use crate::config::ControlSettings;
use crate::posture::{Posture, classify};
use crate::schedule::is_active_window;
use crate::sensor::pose_feed::{FrameSource, LandmarkExtractor};
use crate::sensor::relay::Relay;
use crate::std_clock::WallClock;

/// 控制循环认为的继电器状态（继电器本身不回传状态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActuatorState {
    On,
    #[default]
    Off,
}

/// 一次轮询的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 不在启用时段，未做任何操作
    Idle,
    /// 取帧失败，本轮在打开补光灯后中止
    FrameUnavailable,
    /// 完成一轮检测
    Active {
        /// None 表示画面中没有检测到人
        posture: Option<Posture>,
        /// 本轮是否因超时关闭了夜灯
        auto_off: bool,
    },
}

/// 夜灯控制器
///
/// 启动时构建一次，持有两路继电器、画面来源、计时器和配置，
/// 是灯光状态的唯一记录者。
pub struct NightLight<C, P, S, E> {
    clock: C,
    illuminator: Relay<P>,
    light: Relay<P>,
    source: S,
    extractor: E,
    settings: ControlSettings,
    timer: AutoOffTimer,
    illuminator_state: ActuatorState,
    light_state: ActuatorState,
    in_window: bool,
    frame_failures: u32,
}

impl<C, P, S, E> NightLight<C, P, S, E>
where
    C: Clock<Instant = Instant> + WallClock,
    P: OutputPin,
    S: FrameSource,
    E: LandmarkExtractor<Frame = S::Frame>,
{
    pub fn new(
        clock: C,
        illuminator: Relay<P>,
        light: Relay<P>,
        source: S,
        extractor: E,
        settings: ControlSettings,
    ) -> Self {
        Self {
            clock,
            illuminator,
            light,
            source,
            extractor,
            settings,
            timer: AutoOffTimer::new(),
            illuminator_state: ActuatorState::Off,
            light_state: ActuatorState::Off,
            in_window: false,
            frame_failures: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn light_state(&self) -> ActuatorState {
        self.light_state
    }

    pub fn illuminator_state(&self) -> ActuatorState {
        self.illuminator_state
    }

    pub fn timer(&self) -> &AutoOffTimer {
        &self.timer
    }

    /// 连续取帧失败的次数
    pub fn frame_failures(&self) -> u32 {
        self.frame_failures
    }

    /// 执行一轮轮询，不包含休眠
    pub fn tick(&mut self) -> Tick {
        // 1. 判断是否处于夜间时段
        let active = is_active_window(&self.clock.local_time(), &self.settings.window);
        if active != self.in_window {
            self.in_window = active;
            if active {
                info!("🌙 进入夜间时段，开始侦测");
            } else {
                info!("☀️ 离开夜间时段，暂停侦测");
            }
        }
        if !active {
            return Tick::Idle;
        }

        // 2. 每轮都打开红外补光灯，写失败下一轮会再发
        match self.illuminator.on() {
            Ok(()) => self.illuminator_state = ActuatorState::On,
            Err(err) => warn!("❌ {} 开启指令发送失败: {err:?}", self.illuminator.name()),
        }

        // 3. 取帧，失败则本轮直接结束（不检查自动关灯）
        // 连续失败只告警一次，例如数据流结束后每轮都会失败
        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(err) => {
                if self.frame_failures == 0 {
                    warn!("❌ 读取画面失败: {err}");
                } else {
                    debug!("读取画面仍然失败: {err}");
                }
                self.frame_failures = self.frame_failures.saturating_add(1);
                return Tick::FrameUnavailable;
            }
        };
        if self.frame_failures > 0 {
            info!("✅ 画面恢复，此前连续失败 {} 次", self.frame_failures);
            self.frame_failures = 0;
        }
        let now = self.clock.now();

        // 4. 5. 提取关键点并判断姿态，没有人则不改变任何状态
        let posture = self.extractor.extract(&frame).map(|landmarks| classify(&landmarks));
        if posture.is_some_and(Posture::is_risen) {
            self.on_risen(now);
        }

        // 6. 检查自动关灯
        let auto_off = self.timer.expired(now, self.settings.auto_off);
        if auto_off {
            info!(
                "⏱️ 已亮 {} 秒，自动关闭 {}",
                self.settings.auto_off.as_secs(),
                self.light.name()
            );
            match self.light.off() {
                Ok(()) => self.light_state = ActuatorState::Off,
                Err(err) => warn!("❌ {} 关闭指令发送失败: {err:?}", self.light.name()),
            }
            self.timer.clear();
        }

        debug!(?posture, auto_off, light = ?self.light_state, "轮询完成");
        Tick::Active { posture, auto_off }
    }

    /// 起身：打开夜灯并重新计时
    ///
    /// 计时器未在运行时即为一次新的起身，返回 true
    fn on_risen(&mut self, now: Instant) -> bool {
        let new_episode = !self.timer.is_running();
        if new_episode {
            info!("🧍 侦测到起身！启动 {}", self.light.name());
        } else {
            debug!("仍处于起身姿态，重新计时");
        }
        match self.light.on() {
            Ok(()) => self.light_state = ActuatorState::On,
            Err(err) => warn!("❌ {} 开启指令发送失败: {err:?}", self.light.name()),
        }
        self.timer.start(now);
        new_episode
    }

    /// 本轮结束后的休眠时长
    pub fn interval_after(&self, tick: Tick) -> Duration {
        match tick {
            Tick::Idle => self.settings.poll_interval_idle,
            Tick::FrameUnavailable | Tick::Active { .. } => self.settings.poll_interval_active,
        }
    }

    /// 死循环轮询，直到进程被终止
    pub fn run(&mut self) -> ! {
        loop {
            let tick = self.tick();
            thread::sleep(self.interval_after(tick));
        }
    }
}
