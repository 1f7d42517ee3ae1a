use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::FeedError;
use crate::posture::{Landmark, LandmarkSet, Point};

/// 画面来源，每次调用取一帧
pub trait FrameSource {
    type Frame;

    fn read_frame(&mut self) -> Result<Self::Frame, FeedError>;
}

/// 关键点提取，画面中没有人时返回 None
pub trait LandmarkExtractor {
    type Frame;

    fn extract(&mut self, frame: &Self::Frame) -> Option<LandmarkSet>;
}

/// 读缓冲大小，足够容纳数百行积压的关键点记录
const FEED_BUFFER_CAPACITY: usize = 64 * 1024;

/// 姿态数据流
///
/// 姿态模型在外部进程中运行，每处理一帧画面就输出一行 JSON:
///
/// ```text
/// {"nose": {"x": 0.51, "y": 0.30}, "left_hip": {"x": 0.49, "y": 0.55}}
/// null
/// ```
///
/// 读到一行即取到一帧，读到末尾或读取出错即取帧失败。
/// 模型输出通常快于轮询，每次取帧只返回已缓冲的最新一行，较旧的行直接丢弃；
/// 积压超过读缓冲时要多轮才能追上，模型最好按轮询间隔输出。
pub struct PoseFeed<R> {
    reader: BufReader<R>,
    line: String,
}

impl<R: Read> PoseFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(FEED_BUFFER_CAPACITY, reader),
            line: String::new(),
        }
    }

    /// 缓冲区中是否还有完整的一行（判断时不读取底层数据流，不会阻塞）
    fn has_buffered_line(&self) -> bool {
        self.reader.buffer().contains(&b'\n')
    }
}

impl PoseFeed<Box<dyn Read + Send>> {
    /// `-` 为标准输入，否则为文件或命名管道路径
    pub fn open(source: &str) -> Result<Self, FeedError> {
        let reader: Box<dyn Read + Send> = if source == "-" {
            Box::new(io::stdin())
        } else {
            let file = File::open(Path::new(source)).map_err(|source_err| FeedError::Open {
                path: source.into(),
                source: source_err,
            })?;
            Box::new(file)
        };
        // OK
        Ok(Self::new(reader))
    }
}

impl<R: Read> FrameSource for PoseFeed<R> {
    type Frame = String;

    fn read_frame(&mut self) -> Result<String, FeedError> {
        // 阻塞等待至少一行
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(FeedError::EndOfStream);
        }
        // 跳过积压的旧帧，只保留最新一行
        let mut skipped = 0usize;
        while self.has_buffered_line() {
            self.line.clear();
            self.reader.read_line(&mut self.line)?;
            skipped += 1;
        }
        if skipped > 0 {
            debug!("丢弃 {skipped} 帧积压的关键点记录");
        }
        Ok(self.line.trim().to_owned())
    }
}

/// 从 JSON 行中解析关键点
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLandmarks;

impl JsonLandmarks {
    fn parse(frame: &str) -> Option<LandmarkSet> {
        if frame.is_empty() {
            return None;
        }
        let points: Option<HashMap<String, Point>> = match serde_json::from_str(frame) {
            Ok(points) => points,
            Err(err) => {
                warn!("⚠️ 无法解析关键点数据: {err}");
                return None;
            }
        };
        let points = points?;
        let nose = points.get(Landmark::Nose.key())?;
        let left_hip = points.get(Landmark::LeftHip.key())?;
        let landmarks = LandmarkSet::new(*nose, *left_hip);
        if landmarks.is_none() {
            warn!("⚠️ 关键点坐标超出归一化范围: nose={nose:?} left_hip={left_hip:?}");
        }
        landmarks
    }
}

impl LandmarkExtractor for JsonLandmarks {
    type Frame = String;

    fn extract(&mut self, frame: &String) -> Option<LandmarkSet> {
        Self::parse(frame)
    }
}
