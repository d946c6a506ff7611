//! 拖拽会话
//!
//! 会话独占棋盘，是唯一的修改入口：棋盘只会在松开时、且走法验证通过后被整体替换。
//! 每次拖拽期间的格子提示状态也由会话持有，拖拽结束时统一清空。

use std::cell::RefCell;
use std::rc::Rc;

use protocol::{Board, BoardError, Coordinate, GestureEvent, Layout, Move, MoveRules, PieceKind};
use tracing::{debug, error, info, warn};

use crate::advisory::{AdvisoryMap, SquareAdvisory, SquareStatus};
use crate::hub::{GestureHub, Subscription};

/// 拖拽状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { from: Coordinate, kind: PieceKind },
}

/// 处理一个手势事件的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 事件与当前状态无关，未做任何改动
    Ignored,
    /// 提示状态已更新
    Updated,
    /// 走法合法，棋盘已更新
    Committed(Move),
    /// 走法不合法，棋盘不变
    Rejected(Move),
    /// 拖拽结束但没有可判定的落点
    Reset,
}

/// 拖拽会话
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    drag: DragState,
    advisory: AdvisoryMap,
}

impl Session {
    /// 以给定棋盘开始会话
    pub fn new(board: Board) -> Self {
        Self {
            board,
            drag: DragState::Idle,
            advisory: AdvisoryMap::new(),
        }
    }

    /// 以布局字符串开始会话
    pub fn from_layout(layout: &str) -> Result<Self, BoardError> {
        Ok(Self::new(Layout::parse(layout)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn advisory(&self, square: Coordinate) -> SquareAdvisory {
        self.advisory.get(square)
    }

    pub fn advisory_map(&self) -> &AdvisoryMap {
        &self.advisory
    }

    /// 处理手势事件
    pub fn handle(&mut self, event: GestureEvent) -> Outcome {
        match event {
            GestureEvent::DragStart { from, kind } => self.drag_start(from, kind),
            GestureEvent::DragEnter { square } => self.set_hovered(square, true),
            GestureEvent::DragLeave { square } => self.set_hovered(square, false),
            GestureEvent::Drop { destination } => self.drop_on(destination),
            GestureEvent::Cancel => self.cancel(),
        }
    }

    /// 开始拖拽，并为每个格子计算提示状态
    pub fn drag_start(&mut self, from: Coordinate, kind: PieceKind) -> Outcome {
        if let DragState::Dragging { from: previous, .. } = self.drag {
            warn!("Drag from {} still in flight, cancelling it", previous);
            self.reset();
        }

        if !from.is_on_board() {
            warn!("Ignoring drag start from off-board square {}", from);
            return Outcome::Ignored;
        }

        self.drag = DragState::Dragging { from, kind };

        // 起点格保持空闲
        for square in Coordinate::all().filter(|&square| square != from) {
            let status = if MoveRules::can_move(&self.board, from, square, kind) {
                SquareStatus::ValidMoveTarget
            } else {
                SquareStatus::InvalidMoveTarget
            };
            self.advisory.set_status(square, status);
        }

        debug!("Drag started: {} from {}", kind, from);
        Outcome::Updated
    }

    fn set_hovered(&mut self, square: Coordinate, hovered: bool) -> Outcome {
        if self.drag == DragState::Idle {
            debug!("Ignoring hover change on {} with no drag in flight", square);
            return Outcome::Ignored;
        }

        self.advisory.set_hovered(square, hovered);
        Outcome::Updated
    }

    /// 松开：验证并提交走法，然后清空提示状态
    pub fn drop_on(&mut self, destination: Option<Coordinate>) -> Outcome {
        let DragState::Dragging { from, kind } = self.drag else {
            debug!("Ignoring drop with no drag in flight");
            return Outcome::Ignored;
        };

        let outcome = self.resolve_drop(from, kind, destination);
        self.reset();
        outcome
    }

    fn resolve_drop(&mut self, from: Coordinate, kind: PieceKind, destination: Option<Coordinate>) -> Outcome {
        // 起点格和棋盘外都不是可放置的目标
        let Some(to) = destination.filter(|to| to.is_on_board() && *to != from) else {
            debug!("Drop from {} without a destination", from);
            return Outcome::Reset;
        };

        if self.board.find_piece_at(from).is_none() {
            warn!("Drop from {} but no piece is there", from);
            return Outcome::Reset;
        }

        let mv = Move::new(from, to);
        if !MoveRules::can_move(&self.board, from, to, kind) {
            debug!("Rejected {} move {}", kind, mv);
            return Outcome::Rejected(mv);
        }

        let next = self.board.with_move(from, to);
        debug_assert!(next.is_ok(), "commit attempted without a piece at {}", from);
        match next {
            Ok(board) => {
                self.board = board;
                info!("Committed {} move {}", kind, mv);
                Outcome::Committed(mv)
            }
            Err(e) => {
                error!("Failed to commit {}: {}", mv, e);
                Outcome::Reset
            }
        }
    }

    /// 中止拖拽，不修改棋盘
    pub fn cancel(&mut self) -> Outcome {
        if self.drag == DragState::Idle {
            return Outcome::Ignored;
        }

        debug!("Drag cancelled");
        self.reset();
        Outcome::Reset
    }

    fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.advisory.reset();
    }
}

/// 把会话挂到手势中心上，返回的订阅句柄被丢弃时自动注销
pub fn attach(session: Rc<RefCell<Session>>, hub: &GestureHub) -> Subscription {
    hub.subscribe(move |event| {
        session.borrow_mut().handle(*event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Piece;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_drag_start_marks_targets() {
        let mut session = Session::new(Board::default_layout());
        assert_eq!(session.drag_start(c(3, 3), PieceKind::King), Outcome::Updated);

        assert_eq!(
            session.drag_state(),
            DragState::Dragging { from: c(3, 3), kind: PieceKind::King }
        );

        let valid = Coordinate::all()
            .filter(|&sq| session.advisory(sq).status == SquareStatus::ValidMoveTarget)
            .count();
        assert_eq!(valid, 8);

        assert_eq!(session.advisory(c(3, 3)).status, SquareStatus::Idle);
        assert_eq!(session.advisory(c(5, 5)).status, SquareStatus::InvalidMoveTarget);
        assert_eq!(session.advisory(c(1, 6)).status, SquareStatus::InvalidMoveTarget);
    }

    #[test]
    fn test_hover_tracking() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::King);

        session.handle(GestureEvent::DragEnter { square: c(3, 4) });
        assert!(session.advisory(c(3, 4)).is_valid_hover());

        session.handle(GestureEvent::DragLeave { square: c(3, 4) });
        session.handle(GestureEvent::DragEnter { square: c(6, 6) });
        assert!(!session.advisory(c(3, 4)).hovered);
        assert!(session.advisory(c(6, 6)).is_invalid_hover());
    }

    #[test]
    fn test_hover_without_drag_ignored() {
        let mut session = Session::new(Board::default_layout());
        assert_eq!(
            session.handle(GestureEvent::DragEnter { square: c(3, 4) }),
            Outcome::Ignored
        );
        assert!(session.advisory_map().is_idle());
    }

    #[test]
    fn test_drop_commits_legal_move() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::King);
        session.handle(GestureEvent::DragEnter { square: c(3, 4) });

        let outcome = session.drop_on(Some(c(3, 4)));
        assert_eq!(outcome, Outcome::Committed(Move::new(c(3, 3), c(3, 4))));
        assert_eq!(
            session.board().find_piece_at(c(3, 4)),
            Some(Piece::new(PieceKind::King, c(3, 4)))
        );
        assert_eq!(session.drag_state(), DragState::Idle);
        assert!(session.advisory_map().is_idle());
    }

    #[test]
    fn test_drop_rejects_illegal_move() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::King);
        session.handle(GestureEvent::DragEnter { square: c(5, 5) });

        let outcome = session.drop_on(Some(c(5, 5)));
        assert_eq!(outcome, Outcome::Rejected(Move::new(c(3, 3), c(5, 5))));
        assert_eq!(session.board(), &Board::default_layout());
        assert!(session.advisory_map().is_idle());
    }

    #[test]
    fn test_drop_on_origin_is_noop() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::King);
        assert_eq!(session.drop_on(Some(c(3, 3))), Outcome::Reset);
        assert_eq!(session.board(), &Board::default_layout());
    }

    #[test]
    fn test_drop_off_board_is_noop() {
        let mut session = Session::new(Board::from_pieces([Piece::new(PieceKind::King, c(0, 0))]).unwrap());
        session.drag_start(c(0, 0), PieceKind::King);
        assert_eq!(session.drop_on(Some(c(-1, 0))), Outcome::Reset);
        assert!(session.board().is_occupied(c(0, 0)));
    }

    #[test]
    fn test_drop_without_piece_at_source() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(6, 6), PieceKind::King);
        assert_eq!(session.drop_on(Some(c(6, 7))), Outcome::Reset);
        assert_eq!(session.board(), &Board::default_layout());
        assert_eq!(session.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_commit_keeps_board_piece_kind() {
        // 规则按拖拽上报的类型判断，提交时保留棋盘上原有的棋子
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::Pawn);
        assert_eq!(session.drop_on(Some(c(4, 3))), Outcome::Rejected(Move::new(c(3, 3), c(4, 3))));

        session.drag_start(c(3, 3), PieceKind::Pawn);
        assert_eq!(session.drop_on(Some(c(2, 3))), Outcome::Committed(Move::new(c(3, 3), c(2, 3))));
        assert_eq!(
            session.board().find_piece_at(c(2, 3)).map(|p| p.kind),
            Some(PieceKind::King)
        );
    }

    #[test]
    fn test_cancel_resets() {
        let mut session = Session::new(Board::default_layout());
        assert_eq!(session.cancel(), Outcome::Ignored);

        session.drag_start(c(1, 6), PieceKind::Pawn);
        session.handle(GestureEvent::DragEnter { square: c(0, 6) });
        assert_eq!(session.handle(GestureEvent::Cancel), Outcome::Reset);
        assert_eq!(session.board(), &Board::default_layout());
        assert!(session.advisory_map().is_idle());
    }

    #[test]
    fn test_second_drag_start_replaces_first() {
        let mut session = Session::new(Board::default_layout());
        session.drag_start(c(3, 3), PieceKind::King);
        session.handle(GestureEvent::DragEnter { square: c(3, 4) });

        session.drag_start(c(1, 6), PieceKind::Pawn);
        assert!(!session.advisory(c(3, 4)).hovered);
        assert_eq!(session.advisory(c(0, 6)).status, SquareStatus::ValidMoveTarget);
        assert_eq!(session.advisory(c(3, 4)).status, SquareStatus::InvalidMoveTarget);
    }

    #[test]
    fn test_drop_while_idle_ignored() {
        let mut session = Session::new(Board::default_layout());
        assert_eq!(session.drop_on(Some(c(3, 4))), Outcome::Ignored);
        assert_eq!(session.board(), &Board::default_layout());
    }

    #[test]
    fn test_attach_to_hub() {
        let session = Rc::new(RefCell::new(Session::new(Board::default_layout())));
        let hub = GestureHub::new();

        {
            let _subscription = attach(Rc::clone(&session), &hub);
            hub.emit(GestureEvent::DragStart { from: c(3, 3), kind: PieceKind::King });
            hub.emit(GestureEvent::Drop { destination: Some(c(2, 2)) });
        }
        assert!(session.borrow().board().is_occupied(c(2, 2)));

        // 订阅已注销，后续事件不再送达
        hub.emit(GestureEvent::DragStart { from: c(2, 2), kind: PieceKind::King });
        assert_eq!(session.borrow().drag_state(), DragState::Idle);
    }
}
