//! 主题和配色方案
//!
//! 定义格子背景色标记到具体颜色名的映射

use serde::{Deserialize, Serialize};

/// 格子背景色标记，渲染器按主题换算为具体颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    /// 浅色格
    LightSquare,
    /// 深色格
    DarkSquare,
    /// 悬停在合法落点上
    ValidHover,
    /// 悬停在非法落点上
    InvalidHover,
}

/// 颜色主题配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,

    // 棋盘
    pub light_square: String,
    pub dark_square: String,

    // 交互高亮
    pub valid_hover: String,
    pub invalid_hover: String,

    /// 合法落点上的圆点指示图
    pub move_indicator: String,
}

impl Theme {
    /// 经典配色
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),

            light_square: "white".to_string(),
            dark_square: "lightgrey".to_string(),

            valid_hover: "lightgreen".to_string(),
            invalid_hover: "pink".to_string(),

            move_indicator: "circle.svg".to_string(),
        }
    }

    /// 高对比度配色
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),

            light_square: "white".to_string(),
            dark_square: "dimgray".to_string(),

            valid_hover: "limegreen".to_string(),
            invalid_hover: "crimson".to_string(),

            move_indicator: "circle.svg".to_string(),
        }
    }

    /// 按名称查找内置主题
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// 标记对应的颜色
    pub fn color(&self, token: ColorToken) -> &str {
        match token {
            ColorToken::LightSquare => &self.light_square,
            ColorToken::DarkSquare => &self.dark_square,
            ColorToken::ValidHover => &self.valid_hover,
            ColorToken::InvalidHover => &self.invalid_hover,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
