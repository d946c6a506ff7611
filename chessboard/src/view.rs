//! 渲染视图
//!
//! 由 (棋盘, 提示状态) 纯函数地生成每个格子的显示信息，渲染器只读不写。

use serde::Serialize;

use protocol::{Board, Coordinate, PieceKind, BOARD_SIZE};

use crate::advisory::{AdvisoryMap, SquareStatus};
use crate::session::{DragState, Session};
use crate::theme::{ColorToken, Theme};

/// 单个格子的显示信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareView {
    pub location: Coordinate,
    /// 格子上的棋子
    pub occupant: Option<PieceKind>,
    pub background: ColorToken,
    /// 显示合法落点圆点
    pub show_move_indicator: bool,
    /// 被拖拽的棋子在原位隐藏
    pub piece_hidden: bool,
}

/// 计算单个格子的显示信息
pub fn square_view(
    board: &Board,
    drag: DragState,
    advisory: &AdvisoryMap,
    square: Coordinate,
    show_move_hints: bool,
) -> SquareView {
    let state = advisory.get(square);

    let background = if state.is_valid_hover() {
        ColorToken::ValidHover
    } else if state.is_invalid_hover() {
        ColorToken::InvalidHover
    } else if square.is_dark() {
        ColorToken::DarkSquare
    } else {
        ColorToken::LightSquare
    };

    let piece_hidden = matches!(drag, DragState::Dragging { from, .. } if from == square);

    SquareView {
        location: square,
        occupant: board.find_piece_at(square).map(|p| p.kind),
        background,
        show_move_indicator: show_move_hints && state.status == SquareStatus::ValidMoveTarget,
        piece_hidden,
    }
}

/// 按行优先生成全部 64 个格子的显示信息
pub fn render(session: &Session, show_move_hints: bool) -> Vec<SquareView> {
    Coordinate::all()
        .map(|square| {
            square_view(
                session.board(),
                session.drag_state(),
                session.advisory_map(),
                square,
                show_move_hints,
            )
        })
        .collect()
}

/// 按主题换算颜色后的格子，渲染器直接使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintedSquare<'a> {
    pub location: Coordinate,
    pub occupant: Option<PieceKind>,
    pub color: &'a str,
    /// 合法落点圆点的图片，不显示时为 `None`
    pub move_indicator: Option<&'a str>,
    pub piece_hidden: bool,
}

/// 用主题把格子的颜色标记换算为具体颜色
pub fn paint<'a>(views: &[SquareView], theme: &'a Theme) -> Vec<PaintedSquare<'a>> {
    views
        .iter()
        .map(|view| PaintedSquare {
            location: view.location,
            occupant: view.occupant,
            color: theme.color(view.background),
            move_indicator: view.show_move_indicator.then_some(theme.move_indicator.as_str()),
            piece_hidden: view.piece_hidden,
        })
        .collect()
}

/// 文本形式的棋盘，供命令行使用
///
/// `K`/`P` 为棋子，`*` 为合法落点，`+`/`x` 为悬停的合法/非法落点，`.` 为空格。
pub fn render_text(views: &[SquareView]) -> String {
    let mut out = String::from("  ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}", col));
    }
    out.push('\n');

    for (row, chunk) in views.chunks(BOARD_SIZE).enumerate() {
        out.push_str(&format!("{} ", row));
        for view in chunk {
            let ch = match (view.occupant, view.background) {
                (Some(kind), _) if !view.piece_hidden => kind.to_layout_char(),
                (_, ColorToken::ValidHover) => '+',
                (_, ColorToken::InvalidHover) => 'x',
                _ if view.show_move_indicator => '*',
                _ => '.',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }

    out
}
