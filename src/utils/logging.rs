/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 `debug` 或 `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 本次使用的模型
/// - `continue_on_error`: 失败后是否继续
pub fn log_startup(model: &str, continue_on_error: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 RFP 回答助手启动");
    info!("🤖 模型: {}", model);
    info!(
        "📋 失败策略: {}",
        if continue_on_error { "跳过并继续" } else { "立即中止" }
    );
    info!("{}", "=".repeat(60));
}

/// 打印本次提交的统计信息
pub fn print_submission_stats(answered: usize, corrected: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本次提交处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已回答: {}/{}", answered, total);
    info!("📝 来自更正库: {}", corrected);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 问题预览：按字符截断，超长时追加 `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
