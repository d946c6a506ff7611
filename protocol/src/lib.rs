//! 拖拽棋盘共享协议库
//!
//! 包含:
//! - 棋子、坐标、棋盘等核心数据结构
//! - 走法规则验证
//! - 拖拽手势事件定义及负载校验
//! - 布局字符串格式

mod board;
mod constants;
mod error;
mod gesture;
mod layout;
mod moves;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::{BoardError, PayloadError};
pub use gesture::{is_coordinate, is_piece_kind, GestureEvent};
pub use layout::Layout;
pub use moves::{Move, MoveRules};
pub use piece::{Coordinate, Piece, PieceKind};
