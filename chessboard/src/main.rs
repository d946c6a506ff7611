use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use protocol::Layout;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chessboard::{
    input, paint, render, render_text, GestureHub, Outcome, Session, Settings, SettingsError, Theme,
};

/// 从手势脚本驱动拖拽棋盘，每行一个 JSON 手势负载
#[derive(Parser, Debug)]
#[command(name = "chessboard", version)]
struct Args {
    /// 手势脚本文件，默认读取标准输入
    #[arg(long)]
    script: Option<PathBuf>,

    /// 初始布局，覆盖设置中的布局
    #[arg(long)]
    layout: Option<String>,

    /// 设置文件路径，默认使用配置目录下的 settings.json
    #[arg(long)]
    settings: Option<PathBuf>,

    /// 内置主题名（classic、high-contrast），覆盖设置中的主题
    #[arg(long)]
    theme: Option<String>,

    /// 以 JSON 输出按主题着色的格子，而不是文本棋盘
    #[arg(long)]
    json: bool,
}

/// 输出当前棋盘
fn show(session: &Session, settings: &Settings, json: bool) -> Result<()> {
    let views = render(session, settings.show_move_hints);
    if json {
        println!("{}", serde_json::to_string(&paint(&views, &settings.theme))?);
    } else {
        println!("{}", render_text(&views));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut settings, fallback) = match &args.settings {
        Some(path) => (
            Settings::load_from(path).with_context(|| format!("无法读取设置文件: {:?}", path))?,
            None,
        ),
        None => Settings::load(),
    };

    // 初始化日志，RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.directive()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match fallback {
        None => info!("已加载设置"),
        Some(SettingsError::Missing(path)) => info!("设置文件 {:?} 不存在，使用默认设置", path),
        Some(e) => warn!("读取设置失败: {}，使用默认设置", e),
    }

    if let Some(name) = &args.theme {
        settings.theme = Theme::by_name(name).with_context(|| format!("未知主题: {}", name))?;
    }

    let board = match &args.layout {
        Some(layout) => Layout::parse(layout).with_context(|| format!("无效的布局: {}", layout))?,
        None => settings
            .initial_board()
            .with_context(|| format!("无效的布局: {}", settings.layout))?,
    };
    info!("初始布局: {}", Layout::to_string(&board));

    let session = Rc::new(RefCell::new(Session::new(board)));
    show(&session.borrow(), &settings, args.json)?;

    let hub = GestureHub::new();
    let printer = Rc::clone(&session);
    let json = args.json;
    // 句柄在 main 返回（包括出错提前返回）时注销
    let _subscription = hub.subscribe(move |event| {
        let mut session = printer.borrow_mut();
        if let Outcome::Committed(mv) = session.handle(*event) {
            println!("{}", mv);
            if let Err(e) = show(&session, &settings, json) {
                warn!("输出棋盘失败: {}", e);
            }
        }
    });

    let stats = match &args.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("无法打开手势脚本: {:?}", path))?;
            input::pump(BufReader::new(file), &hub)?
        }
        None => input::pump(io::stdin().lock(), &hub)?,
    };

    info!("已处理 {} 个手势，跳过 {} 行", stats.delivered, stats.skipped);
    println!("{}", Layout::to_string(session.borrow().board()));

    Ok(())
}
