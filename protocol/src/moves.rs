//! 走法验证

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Coordinate, PieceKind};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Coordinate,
    /// 目标位置
    pub to: Coordinate,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法规则
///
/// 纯函数，不修改棋盘；棋盘上是否还有起点处的棋子不影响判断。
pub struct MoveRules;

impl MoveRules {
    /// 判断指定类型的棋子能否从 `from` 走到 `to`
    pub fn can_move(board: &Board, from: Coordinate, to: Coordinate, kind: PieceKind) -> bool {
        // 不支持吃子，目标格必须为空（from == to 时目标格就是棋子自己）
        if board.is_occupied(to) {
            return false;
        }

        match kind {
            PieceKind::King => Self::king_can_reach(from, to),
            PieceKind::Pawn => Self::pawn_can_reach(from, to),
        }
    }

    /// 列出棋盘内所有合法落点
    pub fn legal_destinations(board: &Board, from: Coordinate, kind: PieceKind) -> Vec<Coordinate> {
        Coordinate::all()
            .filter(|&to| Self::can_move(board, from, to, kind))
            .collect()
    }

    /// 王：横、竖、斜各走一格
    fn king_can_reach(from: Coordinate, to: Coordinate) -> bool {
        from.row_distance(to) <= 1 && from.col_distance(to) <= 1
    }

    /// 兵：同列，只能朝行号减小的方向走一格
    ///
    /// 按 `from.row - to.row == -1` 判断的写法会让兵朝行号增大的方向走，
    /// 与 [1, 6] -> [0, 6] 合法、反向不合法的走法相反，这里不采用。
    fn pawn_can_reach(from: Coordinate, to: Coordinate) -> bool {
        from.col == to.col && i64::from(from.row) - i64::from(to.row) == 1
    }
}
