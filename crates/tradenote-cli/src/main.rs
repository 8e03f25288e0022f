//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 오늘 날짜로 매매 기록 추가
//! tradenote add -s 삼성전자 -p long -r win --profit 150000 --profit-reason "돌파 매매"
//!
//! # 차트 이미지를 첨부해 손절 기록 추가
//! tradenote add -d 2024-03-01 -s NVDA -r loss --profit 42000 --chart ./nvda.png --loss-reason "추격 매수"
//!
//! # 이번 달 기록 / 요약 / 종목별 비율
//! tradenote list -w month
//! tradenote summary
//! tradenote chart -w all -f json
//!
//! # 반복되는 손절 사유
//! tradenote reasons -k loss
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tradenote_analytics::ReasonKind;
use tradenote_cli::commands::output::OutputFormat;
use tradenote_cli::commands::{records, report};
use tradenote_cli::JournalContext;
use tradenote_core::{init_logging, AggregationWindow, AppConfig, LogConfig};

#[derive(Parser)]
#[command(name = "tradenote")]
#[command(about = "TradeNote - 개인 매매일지", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/tradenote.toml, 없어도 됨)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 원장, 동기화 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 매매 기록 추가
    Add {
        /// 매매 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        date: Option<String>,

        /// 종목명
        #[arg(short, long, default_value = "")]
        stock: String,

        /// 포지션 (long, short)
        #[arg(short, long)]
        position: Option<String>,

        /// 결과 (win, draw, loss)
        #[arg(short, long)]
        result: Option<String>,

        /// 손익 (원, 소수점 이하 절사)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        profit: String,

        /// 차트 이미지 파일 (png, jpg, gif, webp)
        #[arg(long)]
        chart: Option<PathBuf>,

        /// 익절 사유
        #[arg(long)]
        profit_reason: Option<String>,

        /// 손절 사유
        #[arg(long)]
        loss_reason: Option<String>,
    },

    /// 매매 기록 삭제
    Delete {
        /// 삭제할 기록 ID
        id: String,
    },

    /// 매매 기록 목록 (최신순)
    List {
        /// 집계 기간 (today, month, all)
        #[arg(short, long, default_value = "all")]
        window: String,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 기간별 손익 요약
    Summary {
        /// 집계 기간 (today, month, all, 기본: 모두)
        #[arg(short, long)]
        window: Option<String>,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 종목별 손익 비율 (차트 데이터)
    Chart {
        /// 집계 기간 (today, month, all)
        #[arg(short, long, default_value = "today")]
        window: String,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 반복되는 익절/손절 사유
    Reasons {
        /// 사유 종류 (loss, profit)
        #[arg(short, long, default_value = "loss")]
        kind: String,

        /// 집계 기간 (today, month, all)
        #[arg(short, long, default_value = "all")]
        window: String,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn parse_window(s: &str) -> Result<AggregationWindow> {
    AggregationWindow::from_str(s).map_err(anyhow::Error::msg)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_default()?,
    };

    init_logging(LogConfig::from(&config.logging).with_verbose(cli.verbose))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
    debug!(command_config = ?cli.config, "Configuration loaded");

    let ctx = JournalContext::from_config(&config)?;
    let outcome = run(&ctx, cli.command);

    // 실패한 명령이어도 이미 시작된 동기화는 기다린다
    ctx.shutdown().await;

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            Err(e)
        }
    }
}

fn run(ctx: &JournalContext, command: Commands) -> Result<String> {
    match command {
        Commands::Add {
            date,
            stock,
            position,
            result,
            profit,
            chart,
            profit_reason,
            loss_reason,
        } => records::add(
            ctx,
            records::AddRequest {
                date,
                stock,
                position,
                result,
                profit,
                chart,
                profit_reason,
                loss_reason,
            },
        ),

        Commands::Delete { id } => records::delete(ctx, &id),

        Commands::List { window, format } => {
            records::list(ctx, parse_window(&window)?, OutputFormat::parse(&format)?)
        }

        Commands::Summary { window, format } => {
            let window = window.as_deref().map(parse_window).transpose()?;
            report::summary(ctx, window, OutputFormat::parse(&format)?)
        }

        Commands::Chart { window, format } => {
            report::chart(ctx, parse_window(&window)?, OutputFormat::parse(&format)?)
        }

        Commands::Reasons {
            kind,
            window,
            format,
        } => {
            let kind = ReasonKind::from_str(&kind).map_err(anyhow::Error::msg)?;
            report::reasons(
                ctx,
                kind,
                parse_window(&window)?,
                OutputFormat::parse(&format)?,
            )
        }
    }
}
