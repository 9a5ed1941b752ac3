mod api;
mod app;
mod cli;
mod error;
mod event;
mod form;
mod logging;
mod model;
mod notify;
mod query;
mod route;
mod storage;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use api::StoreTaskApi;
use app::App;
use cli::{Cli, Commands};
use error::{Result, TaskdeckError};
use storage::config::Config;
use storage::tasks::TaskStore;

/// 选择启动时打开的项目：命令行 > 配置 > 第一个已有项目
fn resolve_project(store: &TaskStore, config: &Config, requested: Option<String>) -> Result<String> {
    if let Some(project) = requested.or_else(|| config.ui.default_project.clone()) {
        return Ok(project);
    }
    store.list_projects()?.into_iter().next().ok_or_else(|| {
        TaskdeckError::not_found("no projects yet, run `taskdeck seed <project>` first")
    })
}

/// 启动 TUI 界面
fn run_tui(runtime: &tokio::runtime::Runtime, config: &Config, project: Option<String>) -> Result<()> {
    let store = TaskStore::open_default();
    let project = resolve_project(&store, config, project)?;
    tracing::info!(project = %project, "starting board");

    // 初始化终端
    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture).and_then(|_| {
        // 创建应用
        let api = Arc::new(StoreTaskApi::new(store));
        let mut app = App::new(api, &project, config, runtime.handle().clone());

        // 运行主循环
        run(&mut terminal, &mut app)
    });

    // 无论主循环是否出错都要恢复终端
    finish_session(result, || {
        let disabled = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        disabled
    })
    .map_err(TaskdeckError::from)
}

/// 先执行恢复，再返回结果；主循环的错误优先于恢复时的错误
fn finish_session(
    result: io::Result<()>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let restored = restore();
    result.and(restored)
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 检查后台操作结果，同步弹窗与路由
        app.tick(Instant::now());

        // 渲染界面
        app.click_areas.reset();
        terminal.draw(|frame| ui::board::render(frame, app, Instant::now()))?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}

fn dispatch(command: Commands, config: &Config) -> Result<bool> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match command {
        Commands::Tui { project } => {
            run_tui(&runtime, config, project)?;
            Ok(true)
        }
        Commands::Seed { project } => {
            let tasks = cli::seed::execute(&TaskStore::open_default(), &project)?;
            println!("Seeded '{}' with {} tasks", project, tasks.len());
            Ok(true)
        }
        Commands::List { project } => {
            cli::list::execute(&TaskStore::open_default(), &project)?;
            Ok(true)
        }
        Commands::Edit {
            project,
            task,
            name,
            description,
        } => {
            let api = StoreTaskApi::new(TaskStore::open_default());
            let outcome =
                runtime.block_on(cli::edit::run(&api, &project, &task, name, description))?;
            Ok(cli::edit::report(&outcome))
        }
    }
}

fn main() -> ExitCode {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        // Call the original panic hook
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();
    let config = storage::config::load_config();

    // guard 持有到退出，保证日志写完
    let _log_guard = logging::init(&config.log.level, &storage::logs_dir());

    let command = cli.command.unwrap_or(Commands::Tui { project: None });
    match dispatch(command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("taskdeck: {}", e);
            ExitCode::FAILURE
        }
    }
}
