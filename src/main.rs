use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use raspi_nightlight::config::Config;
use raspi_nightlight::controller::NightLight;
use raspi_nightlight::relay_wapper::UartRelayWapper;
use raspi_nightlight::sensor::pose_feed::{JsonLandmarks, PoseFeed};
use raspi_nightlight::sensor::relay::Relay;
use raspi_nightlight::std_clock::StdClock;

/// 智慧夜灯：夜间侦测起身姿态，自动开关USB夜灯
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML 配置文件，不指定则使用默认配置
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = config.control_settings();

    // 两路继电器缺一不可，打不开直接退出
    let relay = &config.relay;
    let light = UartRelayWapper::open(&relay.light_port, relay.baud_rate)
        .with_context(|| format!("无法打开夜灯继电器 {}", relay.light_port))?;
    let illuminator = UartRelayWapper::open(&relay.illuminator_port, relay.baud_rate)
        .with_context(|| format!("无法打开补光灯继电器 {}", relay.illuminator_port))?;

    // 姿态数据流
    let feed = PoseFeed::open(&config.pose.feed)?;

    let mut night_light = NightLight::new(
        StdClock::new(),
        Relay::new("IR 补光灯", illuminator),
        Relay::new("USB LED", light),
        feed,
        JsonLandmarks,
        settings,
    );

    info!(
        "🚀 系统启动中... 只在 {:02}:00-{:02}:00 侦测，夜灯亮 {} 秒后自动关闭",
        settings.window.start,
        settings.window.end,
        settings.auto_off.as_secs()
    );

    // 死循环轮询
    night_light.run()
}
