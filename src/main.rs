use advent_mount::core::runner::PlannedMount;
use advent_mount::utils::error::ErrorSeverity;
use advent_mount::utils::monitor::RunMonitor;
use advent_mount::utils::{logger, validation::Validate};
use advent_mount::{
    input_source_for, ApplicationRegistry, CliConfig, Harness, HarnessConfig, HarnessError, Page,
    Runner,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let registry = ApplicationRegistry::with_builtins();
    if args.list_applications {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入並驗證配置
    let config = match HarnessConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let format = args.format.unwrap_or_else(|| config.output_format());
    let output_path = args
        .output
        .clone()
        .or_else(|| config.output_path().map(str::to_string));
    let monitor = RunMonitor::new(args.monitor.unwrap_or_else(|| config.monitoring_enabled()));
    let title = config.harness.name.clone();

    let inputs = match input_source_for(config.input_base()) {
        Ok(inputs) => inputs,
        Err(e) => fail(&e),
    };
    let page = Page::new();
    let harness = Harness::new(Arc::new(page.clone()), inputs);
    let runner = Runner::new(config, registry, harness);

    if args.dry_run {
        match runner.plan(&args.day) {
            Ok(planned) => print_plan(&runner, &planned),
            Err(e) => fail(&e),
        }
        return Ok(());
    }

    let pending = match runner.mount_all(&args.day) {
        Ok(pending) => pending,
        Err(e) => fail(&e),
    };
    monitor.log_phase("Mounted");

    let report = Runner::settle(pending).await;
    monitor.log_phase("Settled");

    // 失敗的 mount 只記錄警告，容器保持空白
    for failure in &report.failures {
        tracing::warn!(
            "⚠️ {} part {} ({}) left empty: {}",
            failure.day,
            failure.part,
            failure.locator,
            failure.error
        );
    }
    tracing::info!(
        "✅ {}/{} part(s) initialized",
        report.initialized,
        report.mounted
    );

    let rendered = page.render(format, &title)?;
    match output_path {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            tracing::info!("📁 Page saved to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn fail(e: &HarnessError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_plan(runner: &Runner, planned: &[PlannedMount]) {
    println!("🔍 Dry Run Analysis:");
    println!("  Harness: {}", runner.config().harness.name);
    println!("  Input base: {}", runner.config().input_base());
    println!();

    for mount in planned {
        println!(
            "  {} (Solution {}) -> {} with input {}",
            mount.day,
            mount.part,
            mount.application.name(),
            mount.input
        );
    }

    println!();
    println!("✅ {} mount(s) planned. Nothing was fetched.", planned.len());
}
