//! 协议常量定义

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 拖拽源的类型标记，只有带此标记的拖拽才被棋盘接受
pub const GRID_ITEM_TYPE: &str = "grid-item";

/// 演示用的默认布局：王在 [3, 3]，兵在 [1, 6]
pub const DEFAULT_LAYOUT: &str = "8/6P1/8/3K4/8/8/8/8";
