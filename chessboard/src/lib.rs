//! 拖拽棋盘
//!
//! 把原始拖拽手势转换为经过验证的棋盘状态变化：
//! 拖拽期间计算每个格子的提示状态，松开时提交或拒绝走法。

pub mod advisory;
pub mod hub;
pub mod input;
pub mod session;
pub mod settings;
pub mod theme;
pub mod view;

pub use advisory::{AdvisoryMap, SquareAdvisory, SquareStatus};
pub use hub::{GestureHub, Subscription};
pub use session::{attach, DragState, Outcome, Session};
pub use settings::{LogLevel, Settings, SettingsError};
pub use theme::{ColorToken, Theme};
pub use view::{paint, render, render_text, PaintedSquare, SquareView};
