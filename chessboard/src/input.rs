//! 输入处理
//!
//! 逐行读取手势负载（每行一个 JSON 对象），校验后发给手势中心。
//! 格式错误的负载只记录日志并跳过，不会中断读取。

use std::io::BufRead;

use protocol::{GestureEvent, PayloadError};
use tracing::{debug, warn};

use crate::hub::GestureHub;

/// 读取统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    /// 已送达的事件数
    pub delivered: usize,
    /// 因格式错误跳过的行数
    pub skipped: usize,
}

/// 解析单行负载，空行和 `#` 注释行返回 `None`
pub fn parse_line(line: &str) -> Option<Result<GestureEvent, PayloadError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(GestureEvent::from_json(line))
}

/// 读取所有手势并逐个分发
pub fn pump<R: BufRead>(mut reader: R, hub: &GestureHub) -> std::io::Result<InputStats> {
    let mut stats = InputStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // 非 UTF-8 的行与格式错误的负载同样处理
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("Ignoring non UTF-8 gesture payload: {}", e);
                stats.skipped += 1;
                continue;
            }
        };

        let event = match parse_line(line) {
            None => continue,
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("Ignoring malformed gesture payload {:?}: {}", line.trim(), e);
                stats.skipped += 1;
                continue;
            }
        };

        debug!("Gesture: {}", event.name());
        hub.emit(event);
        stats.delivered += 1;
    }

    Ok(stats)
}
