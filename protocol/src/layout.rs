//! 布局字符串解析和生成
//!
//! 格式与 FEN 的棋盘部分类似：8 行用 `/` 分隔，第 0 行在最前；
//! `K` 表示王，`P` 表示兵，数字 1-8 表示连续空格。
//!
//! 示例：
//! `8/6P1/8/3K4/8/8/8/8`（王在 [3, 3]，兵在 [1, 6]）

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::BoardError;
use crate::piece::{Coordinate, Piece, PieceKind};

/// 布局字符串处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串为棋盘
    pub fn parse(layout: &str) -> Result<Board, BoardError> {
        let layout = layout.trim();
        if layout.is_empty() {
            return Err(BoardError::InvalidLayout {
                reason: "Empty layout string".to_string(),
            });
        }

        let rows: Vec<&str> = layout.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidLayout {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for ch in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(BoardError::InvalidLayout {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = ch.to_digit(10) {
                    if empty_count == 0 {
                        return Err(BoardError::InvalidLayout {
                            reason: format!("Row {} contains a zero-length gap", row_idx),
                        });
                    }
                    col += empty_count as usize;
                } else if let Some(kind) = PieceKind::from_layout_char(ch) {
                    let location = Coordinate::new(row_idx as i32, col as i32);
                    board.place(Piece::new(kind, location))?;
                    col += 1;
                } else {
                    return Err(BoardError::InvalidLayout {
                        reason: format!("Invalid piece character: {}", ch),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(BoardError::InvalidLayout {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘转换为布局字符串（棋盘外的棋子无法表示，直接忽略）
    pub fn to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as i32 {
            let mut line = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as i32 {
                if let Some(piece) = board.find_piece_at(Coordinate::new(row, col)) {
                    if empty_count > 0 {
                        line.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    line.push(piece.kind.to_layout_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                line.push_str(&empty_count.to_string());
            }

            rows.push(line);
        }

        rows.join("/")
    }
}
