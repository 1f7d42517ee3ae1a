use std::path::Path;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use rppal::uart::{Parity, Uart};

use crate::error::RelayError;

/// 帧头
const FRAME_HEAD: u8 = 0xA0;
/// 单路继电器的通道号
pub const RELAY_CHANNEL: u8 = 1;

/// 生成继电器指令帧: 帧头 + 通道号 + 开关状态 + 校验和
///
/// 校验和为前三个字节之和(溢出截断)
pub const fn command_frame(channel: u8, on: bool) -> [u8; 4] {
    let state = if on { 0x01 } else { 0x00 };
    let checksum = FRAME_HEAD.wrapping_add(channel).wrapping_add(state);
    [FRAME_HEAD, channel, state, checksum]
}

/// 吸合指令 `A0 01 01 A2`
pub const RELAY_ON_FRAME: [u8; 4] = command_frame(RELAY_CHANNEL, true);
/// 断开指令 `A0 01 00 A1`
pub const RELAY_OFF_FRAME: [u8; 4] = command_frame(RELAY_CHANNEL, false);

/// USB串口继电器 Wapper
///
/// 把串口继电器包装成一个数字输出针脚：高电平为吸合，低电平为断开。
/// 指令只写不读，设备不会回传应答。
pub struct UartRelayWapper {
    uart: Uart,
}

impl ErrorType for UartRelayWapper {
    type Error = RelayError;
}

impl UartRelayWapper {
    /// 以 8N1 打开继电器串口
    pub fn open(path: impl AsRef<Path>, baud_rate: u32) -> Result<Self, RelayError> {
        let uart = Uart::with_path(path, baud_rate, Parity::None, 8, 1)?;
        // OK
        Ok(Self { uart })
    }

    fn send(&mut self, frame: &[u8; 4]) -> Result<(), RelayError> {
        let written = self.uart.write(frame)?;
        if written != frame.len() {
            return Err(RelayError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }
        Ok(())
    }
}

impl OutputPin for UartRelayWapper {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.send(&RELAY_ON_FRAME)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.send(&RELAY_OFF_FRAME)
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        match state {
            PinState::High => self.send(&RELAY_ON_FRAME),
            PinState::Low => self.send(&RELAY_OFF_FRAME),
        }
    }
}
