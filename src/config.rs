use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::schedule::TimeWindow;

/// 夜灯配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub relay: RelayConfig,
    pub schedule: ScheduleConfig,
    pub light: LightConfig,
    pub pose: PoseConfig,
}

/// USB继电器设备（用 `ls /dev/serial/by-id/` 确认路径）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// 夜灯（USB LED）继电器
    pub light_port: String,
    /// 红外补光灯继电器
    pub illuminator_port: String,
    pub baud_rate: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            light_port: "/dev/serial/by-id/usb-relay-usbled".to_owned(),
            illuminator_port: "/dev/serial/by-id/usb-relay-irled".to_owned(),
            baud_rate: 9600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub active_window_start: u32,
    pub active_window_end: u32,
    pub poll_interval_active_secs: u64,
    pub poll_interval_idle_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            active_window_start: TimeWindow::NIGHT.start,
            active_window_end: TimeWindow::NIGHT.end,
            poll_interval_active_secs: 1,
            poll_interval_idle_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    /// 起身后夜灯保持亮起的秒数
    pub auto_off_secs: u64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { auto_off_secs: 120 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoseConfig {
    /// 姿态数据流来源，`-` 为标准输入
    pub feed: String,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            feed: "-".to_owned(),
        }
    }
}

/// 控制循环用到的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSettings {
    pub window: TimeWindow,
    pub auto_off: Duration,
    pub poll_interval_active: Duration,
    pub poll_interval_idle: Duration,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            window: TimeWindow::NIGHT,
            auto_off: Duration::from_secs(120),
            poll_interval_active: Duration::from_secs(1),
            poll_interval_idle: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// 读取并校验 TOML 配置文件
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        // OK
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let schedule = &self.schedule;
        if schedule.active_window_start >= 24 {
            return Err(invalid("schedule.active_window_start", "小时必须在 0-23 之间"));
        }
        if schedule.active_window_end >= 24 {
            return Err(invalid("schedule.active_window_end", "小时必须在 0-23 之间"));
        }
        if schedule.active_window_start == schedule.active_window_end {
            return Err(invalid("schedule.active_window_end", "开始与结束不能相同"));
        }
        if schedule.poll_interval_active_secs == 0 {
            return Err(invalid("schedule.poll_interval_active_secs", "必须大于 0"));
        }
        if schedule.poll_interval_idle_secs == 0 {
            return Err(invalid("schedule.poll_interval_idle_secs", "必须大于 0"));
        }
        if self.light.auto_off_secs == 0 {
            return Err(invalid("light.auto_off_secs", "必须大于 0"));
        }
        if self.relay.baud_rate == 0 {
            return Err(invalid("relay.baud_rate", "必须大于 0"));
        }
        if self.relay.light_port == self.relay.illuminator_port {
            return Err(invalid("relay.illuminator_port", "不能与夜灯使用同一个设备"));
        }
        Ok(())
    }

    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            window: TimeWindow::new(
                self.schedule.active_window_start,
                self.schedule.active_window_end,
            ),
            auto_off: Duration::from_secs(self.light.auto_off_secs),
            poll_interval_active: Duration::from_secs(self.schedule.poll_interval_active_secs),
            poll_interval_idle: Duration::from_secs(self.schedule.poll_interval_idle_secs),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}
