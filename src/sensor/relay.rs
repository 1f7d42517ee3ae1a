use embedded_hal::digital::OutputPin;

/// 继电器通道封装对象
///
/// 通道本身不保存开关状态，每次调用都会把指令发送出去，
/// 是否重发由调用方决定。
pub struct Relay<P> {
    name: &'static str,
    pin: P,
}

impl<P: OutputPin> Relay<P> {
    /// 创建继电器通道实例
    pub fn new(name: &'static str, pin: P) -> Self {
        Self { name, pin }
    }

    /// 通道名称，用于日志
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 闭合继电器
    pub fn on(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()
    }

    /// 断开继电器
    pub fn off(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Command {
        On(&'static str),
        Off(&'static str),
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Unplugged;

    impl embedded_hal::digital::Error for Unplugged {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// 记录收到的指令，多个针脚可共享同一份记录以检查先后顺序
    pub struct RecordingPin {
        name: &'static str,
        log: Rc<RefCell<Vec<Command>>>,
        pub fail: Rc<RefCell<bool>>,
    }

    impl RecordingPin {
        pub fn new(name: &'static str, log: &Rc<RefCell<Vec<Command>>>) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                fail: Rc::new(RefCell::new(false)),
            }
        }
    }

    impl ErrorType for RecordingPin {
        type Error = Unplugged;
    }

    impl OutputPin for RecordingPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if *self.fail.borrow() {
                return Err(Unplugged);
            }
            self.log.borrow_mut().push(Command::On(self.name));
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if *self.fail.borrow() {
                return Err(Unplugged);
            }
            self.log.borrow_mut().push(Command::Off(self.name));
            Ok(())
        }
    }

    /// 永不失败的针脚
    pub struct NullPin;

    impl ErrorType for NullPin {
        type Error = Infallible;
    }

    impl OutputPin for NullPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}
