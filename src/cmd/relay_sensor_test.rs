use std::{thread, time::Duration};

use raspi_nightlight::relay_wapper::UartRelayWapper;
use raspi_nightlight::sensor::relay::Relay;

// 继电器串口设备（用 ls /dev/serial/by-id/ 确认），可用第一个参数覆盖
const RELAY_PORT: &str = "/dev/serial/by-id/usb-relay-usbled";
// 波特率
const BAUD_RATE: u32 = 9600;

/// USB串口继电器测试程序
fn main() -> anyhow::Result<()> {
    let port = std::env::args().nth(1).unwrap_or_else(|| RELAY_PORT.to_owned());
    println!("⚡ 继电器测试: {port}");

    // 创建继电器实例
    let mut relay = Relay::new("relay", UartRelayWapper::open(&port, BAUD_RATE)?);
    // 初始将继电器断开
    relay.off()?;

    // 死循环切换继电器
    loop {
        // 等1秒后闭合
        thread::sleep(Duration::from_secs(1));
        relay.on()?;
        println!("✅ 闭合");
        // 等1秒后断开
        thread::sleep(Duration::from_secs(1));
        relay.off()?;
        println!("✅ 断开");
    }
}
