//! 日志基础设施

use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// - 日志级别优先取 `RUST_LOG`，否则使用配置中的级别
    /// - 配置了日志目录时，按日期分割写入文件
    /// - `console_output` 为真时同时输出到控制台
    ///
    /// 返回的 guard 必须在进程退出前一直持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        let (file_layer, guard) = match &config.log_dir {
            Some(log_dir) => {
                std::fs::create_dir_all(log_dir)?;
                let file_appender = rolling::daily(log_dir, &config.file_prefix);
                let (writer, guard) = non_blocking(file_appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false) // 文件中不使用颜色
                    .with_target(false)
                    .with_thread_names(true);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let console_layer = config
            .console_output
            .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .try_init()?;

        Ok(guard)
    }
}
