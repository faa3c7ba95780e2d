//! The `lexigrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create lexigrade.toml
    if std::path::Path::new("lexigrade.toml").exists() {
        println!("lexigrade.toml already exists, skipping.");
    } else {
        std::fs::write("lexigrade.toml", SAMPLE_CONFIG)?;
        println!("Created lexigrade.toml");
    }

    // Create a sample feed
    if std::path::Path::new("sample-feed.txt").exists() {
        println!("sample-feed.txt already exists, skipping.");
    } else {
        std::fs::write("sample-feed.txt", SAMPLE_FEED)?;
        println!("Created sample-feed.txt");
    }

    println!("\nNext steps:");
    println!("  1. Paste a real activity feed over sample-feed.txt");
    println!("  2. Run: lexigrade check --input sample-feed.txt");
    println!("  3. Run: lexigrade analyze --input sample-feed.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexigrade configuration

threshold = 94
show_failed = false
output_dir = "./lexigrade-results"
"#;

const SAMPLE_FEED: &str = r#"小明 : 【词测 托福核心-看测-2601~2700-100】: 已完成 词数：100，正确率：95%，平均反应时间：3.67 s，错误个数：5, 【题卡 [SAT] Unit 5】: 已完成 错误个数: 3/20，订正后错误个数: 1/20

李雷 : 【词测 听测-500】: 已完成 词数：50，正确率：90%，平均反应时间：2.10 s，错误个数：5, 【词测 听测-500】: 已完成 词数：50，正确率：96%，平均反应时间：1.80 s，错误个数：2, 【题卡 托福阅读 Day 3】: 错误个数: 2/10
"#;
