//! 格子提示状态
//!
//! 只在一次拖拽期间有效，仅用于视觉反馈，与棋盘的正确性无关。

use std::collections::HashMap;

use protocol::Coordinate;

/// 格子作为落点的判定结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SquareStatus {
    #[default]
    Idle,
    ValidMoveTarget,
    InvalidMoveTarget,
}

/// 单个格子的提示状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareAdvisory {
    pub status: SquareStatus,
    pub hovered: bool,
}

impl SquareAdvisory {
    /// 悬停在合法落点上
    pub fn is_valid_hover(&self) -> bool {
        self.hovered && self.status == SquareStatus::ValidMoveTarget
    }

    /// 悬停在非法落点上
    pub fn is_invalid_hover(&self) -> bool {
        self.hovered && self.status == SquareStatus::InvalidMoveTarget
    }
}

/// 所有格子的提示状态，未记录的格子视为空闲
#[derive(Debug, Clone, Default)]
pub struct AdvisoryMap {
    squares: HashMap<Coordinate, SquareAdvisory>,
}

impl AdvisoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, square: Coordinate) -> SquareAdvisory {
        self.squares.get(&square).copied().unwrap_or_default()
    }

    pub fn set_status(&mut self, square: Coordinate, status: SquareStatus) {
        self.squares.entry(square).or_default().status = status;
    }

    pub fn set_hovered(&mut self, square: Coordinate, hovered: bool) {
        self.squares.entry(square).or_default().hovered = hovered;
    }

    /// 清空所有状态
    pub fn reset(&mut self) {
        self.squares.clear();
    }

    /// 是否所有格子都处于空闲、未悬停状态
    pub fn is_idle(&self) -> bool {
        self.squares.values().all(|a| *a == SquareAdvisory::default())
    }

    /// 当前被悬停的格子
    pub fn hovered(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.squares
            .iter()
            .filter(|(_, a)| a.hovered)
            .map(|(square, _)| *square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_square_is_idle() {
        let map = AdvisoryMap::new();
        assert_eq!(map.get(Coordinate::new(4, 4)), SquareAdvisory::default());
        assert!(map.is_idle());
    }

    #[test]
    fn test_status_and_hover_are_independent() {
        let mut map = AdvisoryMap::new();
        let sq = Coordinate::new(2, 2);

        map.set_hovered(sq, true);
        assert!(!map.get(sq).is_valid_hover());

        map.set_status(sq, SquareStatus::ValidMoveTarget);
        assert!(map.get(sq).is_valid_hover());
        assert!(!map.get(sq).is_invalid_hover());

        map.set_hovered(sq, false);
        assert_eq!(map.get(sq).status, SquareStatus::ValidMoveTarget);
        assert!(!map.is_idle());
    }

    #[test]
    fn test_reset() {
        let mut map = AdvisoryMap::new();
        map.set_status(Coordinate::new(0, 0), SquareStatus::InvalidMoveTarget);
        map.set_hovered(Coordinate::new(0, 0), true);
        map.set_hovered(Coordinate::new(1, 0), true);
        assert_eq!(map.hovered().count(), 2);

        map.reset();
        assert!(map.is_idle());
        assert_eq!(map.hovered().count(), 0);
    }
}
