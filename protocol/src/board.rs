//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::piece::{Coordinate, Piece, PieceKind};

/// 棋盘
///
/// 只保存棋子集合，不限定棋盘尺寸；插入顺序无意义，相等比较按 (类型, 位置) 集合进行。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self { pieces: Vec::new() }
    }

    /// 从棋子列表创建棋盘，拒绝两个棋子占同一格
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for piece in pieces {
            board.place(piece)?;
        }
        Ok(board)
    }

    /// 演示用的默认布局：王在 [3, 3]，兵在 [1, 6]
    pub fn default_layout() -> Self {
        Self {
            pieces: vec![
                Piece::new(PieceKind::King, Coordinate::new(3, 3)),
                Piece::new(PieceKind::Pawn, Coordinate::new(1, 6)),
            ],
        }
    }

    /// 放置棋子
    pub fn place(&mut self, piece: Piece) -> Result<(), BoardError> {
        if self.is_occupied(piece.location) {
            return Err(BoardError::DuplicateLocation {
                row: piece.location.row,
                col: piece.location.col,
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// 获取指定位置的棋子
    pub fn find_piece_at(&self, coord: Coordinate) -> Option<Piece> {
        self.pieces.iter().copied().find(|p| p.location == coord)
    }

    /// 指定位置是否有棋子
    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.find_piece_at(coord).is_some()
    }

    /// 移动棋子（不检查规则），返回新棋盘
    ///
    /// 调用方必须已经通过 `MoveRules::can_move` 验证过走法。
    pub fn with_move(&self, from: Coordinate, to: Coordinate) -> Result<Board, BoardError> {
        let Some(moving) = self.find_piece_at(from) else {
            return Err(BoardError::NoPieceAt {
                row: from.row,
                col: from.col,
            });
        };

        let pieces = self
            .pieces
            .iter()
            .map(|p| {
                if p.location == from {
                    Piece::new(moving.kind, to)
                } else {
                    *p
                }
            })
            .collect();

        Ok(Board { pieces })
    }

    /// 所有棋子
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// 棋子数量
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// 是否没有棋子
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// 按位置排序后的棋子，用于与顺序无关的比较
    fn sorted(&self) -> Vec<(Coordinate, PieceKind)> {
        let mut placement: Vec<_> = self.pieces.iter().map(|p| (p.location, p.kind)).collect();
        placement.sort();
        placement
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Board {}
