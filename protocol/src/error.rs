//! 错误类型定义

use thiserror::Error;

/// 棋盘模型错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 起点没有棋子（调用方未先做合法性检查）
    #[error("No piece at position [{row}, {col}]")]
    NoPieceAt { row: i32, col: i32 },

    /// 两个棋子占用同一格
    #[error("Two pieces share position [{row}, {col}]")]
    DuplicateLocation { row: i32, col: i32 },

    /// 无效的布局字符串
    #[error("Invalid layout string: {reason}")]
    InvalidLayout { reason: String },
}

/// 手势负载解析错误
///
/// 这些错误只在边界上产生，上层一律按"忽略本次事件"处理。
#[derive(Error, Debug)]
pub enum PayloadError {
    /// 文本不是合法 JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// 负载不是 JSON 对象
    #[error("Payload is not an object")]
    NotAnObject,

    /// 未知事件名
    #[error("Unknown gesture event: {0}")]
    UnknownEvent(String),

    /// 缺少必需字段
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// 坐标格式错误
    #[error("Malformed coordinate in field `{0}`")]
    MalformedCoordinate(&'static str),

    /// 无法识别的棋子类型
    #[error("Unknown piece kind")]
    UnknownPieceKind,

    /// 拖拽源不是棋盘上的棋子
    #[error("Drag source is not a grid item")]
    NotGridItem,
}
