use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use rfp_answer_assistant::error::{LlmError, StoreError};
use rfp_answer_assistant::models::{load_request_file, RequestFile};
use rfp_answer_assistant::services::{load_corrections_or_empty, AccessGate};
use rfp_answer_assistant::utils::logging;
use rfp_answer_assistant::{
    Answer, AnswerSink, Config, CorrectionStore, LlmService, Product, Question, QuestionCtx,
    SubmissionProcessor,
};

#[derive(Debug, Parser)]
#[command(name = "rfp-answer", version, about = "Skyhigh Security - RFI/RFP AI Tool")]
struct Cli {
    /// 配置文件（TOML），环境变量优先级更高
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 提交单个问题或一个表格列的问题
    Submit(SubmitArgs),
    /// 保存一条答案更正
    Correct(CorrectArgs),
    /// 列出可选的产品 / 模型
    Products,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// 从 TOML 文件读取提交内容，命令行参数覆盖文件中的值
    #[arg(long)]
    request: Option<PathBuf>,
    /// 单个问题
    #[arg(long)]
    question: Option<String>,
    /// 客户名称
    #[arg(long)]
    customer: Option<String>,
    /// CSV 或 Excel 文件（单个工作表）
    #[arg(long)]
    file: Option<PathBuf>,
    /// 问题所在列，例如 B
    #[arg(long)]
    column: Option<String>,
    /// 产品标签
    #[arg(long)]
    product: Option<String>,
    #[arg(long, env = "RFP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// 下载文件路径，默认使用配置中的 output_file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CorrectArgs {
    /// 问题原文
    #[arg(long)]
    question: String,
    /// 更正后的答案
    #[arg(long)]
    answer: String,
    #[arg(long, env = "RFP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

/// 把答案逐条打印到标准输出
struct StdoutSink;

impl AnswerSink for StdoutSink {
    fn show(&mut self, ctx: &QuestionCtx, question: &Question, answer: &Answer) {
        println!("Q{}: {}", ctx.index, question.text);
        println!("{}", answer.text);
        println!();
    }

    fn show_failure(&mut self, ctx: &QuestionCtx, question: &Question, error: &LlmError) {
        println!("Q{}: {}", ctx.index, question.text);
        println!("(failed: {})", error);
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    match cli.command {
        Command::Submit(args) => submit(&config, args).await,
        Command::Correct(args) => correct(&config, args).await,
        Command::Products => {
            for product in Product::all() {
                println!("{:<28} {:<64} {}", product.label, product.model_id, product.caption);
            }
            Ok(())
        }
    }
}

async fn submit(config: &Config, args: SubmitArgs) -> Result<()> {
    let from_file = match &args.request {
        Some(path) => load_request_file(path).await?,
        None => RequestFile::default(),
    };

    let request = from_file.into_request(args.overrides()).await?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_file));

    logging::log_startup(request.product.model_id, config.continue_on_error);

    let store = CorrectionStore::from_config(config);
    let corrections = load_corrections_or_empty(store.as_ref()).await;

    let llm = LlmService::new(config);
    let processor = SubmissionProcessor::new(config, &llm);

    let outcome = match processor.process(&request, &corrections, &mut StdoutSink).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_file_processing() => {
            error!("Error processing file: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    match outcome.export {
        Some(export) => {
            let bytes = export.to_xlsx_bytes()?;
            tokio::fs::write(&output, bytes)
                .await
                .with_context(|| format!("无法写入下载文件: {}", output.display()))?;
            info!("📥 Download Responses: {}", output.display());
        }
        None if outcome.batch => {
            warn!("⚠️ 有问题未成功回答，本次不生成下载文件");
        }
        None => {}
    }

    Ok(())
}

impl SubmitArgs {
    /// 命令行给出的字段，作为对 TOML 文件的覆盖
    fn overrides(&self) -> RequestFile {
        RequestFile {
            question: self.question.clone(),
            customer: self.customer.clone(),
            file: self.file.clone(),
            column: self.column.clone(),
            product: self.product.clone(),
            password: self.password.clone(),
        }
    }
}

async fn correct(config: &Config, args: CorrectArgs) -> Result<()> {
    AccessGate::from_config(config).verify(args.password.as_deref())?;

    let store = CorrectionStore::from_config(config).ok_or(StoreError::NotConfigured)?;
    let corrections = store.submit_correction(&args.question, &args.answer).await?;

    info!("更正库当前共 {} 条", corrections.len());
    Ok(())
}
