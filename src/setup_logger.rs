use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;

pub fn setup_logger(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = LevelFilter::from_str(level)?;

    // ビルダーでロガーをカスタマイズ
    Builder::new()
        // ログレベルの設定
        .filter_level(level)
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),  // モジュールパスが表示される
                record.args()
            )
        })
        // 標準出力はデータの表示に使うので標準エラーに出す
        .target(Target::Stderr)
        .try_init()?;

    Ok(())
}
