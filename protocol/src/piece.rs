//! 棋子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;

/// 棋子类型
///
/// 新增棋子只需要在这里加一个变体，并在 `MoveRules` 中补上对应的走法分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    /// 王
    King,
    /// 兵
    Pawn,
}

impl PieceKind {
    /// 所有棋子类型，按序号排列
    pub const ALL: [PieceKind; 2] = [PieceKind::King, PieceKind::Pawn];

    /// 序号（手势负载里可以用数字表示棋子类型）
    pub fn ordinal(&self) -> u64 {
        match self {
            PieceKind::King => 0,
            PieceKind::Pawn => 1,
        }
    }

    /// 从序号解析
    pub fn from_ordinal(n: u64) -> Option<PieceKind> {
        Self::ALL.iter().copied().find(|kind| kind.ordinal() == n)
    }

    /// 名称，同时用作渲染器的替代文本
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Pawn => "Pawn",
        }
    }

    /// 从名称解析
    pub fn from_name(name: &str) -> Option<PieceKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// 渲染器使用的图片资源名
    pub fn asset(&self) -> &'static str {
        match self {
            PieceKind::King => "king.png",
            PieceKind::Pawn => "pawn.png",
        }
    }

    /// 布局字符
    pub fn to_layout_char(&self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Pawn => 'P',
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<PieceKind> {
        match c {
            'K' => Some(PieceKind::King),
            'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 棋盘坐标 (行, 列)
///
/// 不在构造时检查边界：走法引擎需要能安全地处理棋盘外的坐标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    /// 创建新坐标
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// 检查坐标是否在 8x8 棋盘内
    pub fn is_on_board(&self) -> bool {
        let size = BOARD_SIZE as i32;
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }

    /// 深色格：行列之和为奇数
    pub fn is_dark(&self) -> bool {
        (i64::from(self.row) + i64::from(self.col)).rem_euclid(2) == 1
    }

    /// 行距离（绝对值）
    pub fn row_distance(&self, other: Coordinate) -> u32 {
        self.row.abs_diff(other.row)
    }

    /// 列距离（绝对值）
    pub fn col_distance(&self, other: Coordinate) -> u32 {
        self.col.abs_diff(other.col)
    }

    /// 遍历棋盘上所有格子，行优先
    pub fn all() -> impl Iterator<Item = Coordinate> {
        let size = BOARD_SIZE as i32;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coordinate::new(row, col)))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub location: Coordinate,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, location: Coordinate) -> Self {
        Self { kind, location }
    }
}
