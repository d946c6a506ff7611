//! 拖拽手势事件定义
//!
//! 手势源发来的负载是松散类型的 JSON（与拖放适配器的数据格式一致），
//! 在这里统一校验并转换为强类型的 `GestureEvent`：
//!
//! ```text
//! {"event":"drag_start","source":{"type":"grid-item","location":[3,3],"pieceType":"King"}}
//! {"event":"drag_enter","square":[3,4]}
//! {"event":"drag_leave","square":[3,4]}
//! {"event":"drop","destination":[3,4]}
//! {"event":"cancel"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::GRID_ITEM_TYPE;
use crate::error::PayloadError;
use crate::piece::{Coordinate, PieceKind};

/// 手势事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    /// 开始拖拽某个棋子
    DragStart { from: Coordinate, kind: PieceKind },
    /// 指针进入某格
    DragEnter { square: Coordinate },
    /// 指针离开某格
    DragLeave { square: Coordinate },
    /// 松开；在任何格子之外松开时没有目标
    Drop { destination: Option<Coordinate> },
    /// 手势被外部中止（例如按下 Esc）
    Cancel,
}

impl GestureEvent {
    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<GestureEvent, PayloadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_payload(&value)
    }

    /// 从松散类型的负载解析
    ///
    /// `drop` 的目标缺失、为 null 或格式错误时都视为没有目标，而不是报错。
    pub fn from_payload(payload: &Value) -> Result<GestureEvent, PayloadError> {
        let obj = payload.as_object().ok_or(PayloadError::NotAnObject)?;
        let name = obj
            .get("event")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("event"))?;

        match name {
            "drag_start" => {
                let source = obj
                    .get("source")
                    .and_then(Value::as_object)
                    .ok_or(PayloadError::MissingField("source"))?;

                if source.get("type").and_then(Value::as_str) != Some(GRID_ITEM_TYPE) {
                    return Err(PayloadError::NotGridItem);
                }

                let from = source
                    .get("location")
                    .and_then(is_coordinate)
                    .ok_or(PayloadError::MalformedCoordinate("location"))?;
                let kind = source
                    .get("pieceType")
                    .and_then(is_piece_kind)
                    .ok_or(PayloadError::UnknownPieceKind)?;

                Ok(GestureEvent::DragStart { from, kind })
            }
            "drag_enter" => Ok(GestureEvent::DragEnter {
                square: square_field(obj)?,
            }),
            "drag_leave" => Ok(GestureEvent::DragLeave {
                square: square_field(obj)?,
            }),
            "drop" => Ok(GestureEvent::Drop {
                destination: obj.get("destination").and_then(is_coordinate),
            }),
            "cancel" => Ok(GestureEvent::Cancel),
            other => Err(PayloadError::UnknownEvent(other.to_string())),
        }
    }

    /// 事件名
    pub fn name(&self) -> &'static str {
        match self {
            GestureEvent::DragStart { .. } => "drag_start",
            GestureEvent::DragEnter { .. } => "drag_enter",
            GestureEvent::DragLeave { .. } => "drag_leave",
            GestureEvent::Drop { .. } => "drop",
            GestureEvent::Cancel => "cancel",
        }
    }
}

fn square_field(obj: &serde_json::Map<String, Value>) -> Result<Coordinate, PayloadError> {
    let value = obj.get("square").ok_or(PayloadError::MissingField("square"))?;
    is_coordinate(value).ok_or(PayloadError::MalformedCoordinate("square"))
}

/// 校验坐标：恰好两个整数组成的数组
pub fn is_coordinate(value: &Value) -> Option<Coordinate> {
    let [row, col] = value.as_array()?.as_slice() else {
        return None;
    };
    let row = i32::try_from(row.as_i64()?).ok()?;
    let col = i32::try_from(col.as_i64()?).ok()?;
    Some(Coordinate::new(row, col))
}

/// 校验棋子类型：接受名称（"King"）或序号（0）
pub fn is_piece_kind(value: &Value) -> Option<PieceKind> {
    match value {
        Value::String(name) => PieceKind::from_name(name),
        Value::Number(n) => n.as_u64().and_then(PieceKind::from_ordinal),
        _ => None,
    }
}
