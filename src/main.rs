// 命令行入口：转写参数与库接口一一对应，输出结果原样打印

use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hanzi_pinyin_lib::{init_logging, AppConfig, PinyinEngine, ToneStyle};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "hanzi-pinyin", about = "Converts Chinese text to pinyin")]
struct Args {
    /// Text to convert. Reads lines from stdin when omitted.
    text: Option<String>,

    /// Tone style: marked, numeric or toneless (also 0, 1, 2).
    #[arg(short = 't', long)]
    tone_style: Option<ToneStyle>,

    /// Uppercases every syllable.
    #[arg(short = 'u', long)]
    upper: bool,

    /// Capitalizes the first letter of every syllable.
    #[arg(short = 'c', long)]
    cap: bool,

    /// Separator inserted before each syllable. Empty string disables it.
    #[arg(short = 's', long)]
    separator: Option<String>,

    /// Character reading dictionary (text or .json).
    #[arg(long)]
    chars: Option<PathBuf>,

    /// Polyphone word dictionary (text or .json).
    #[arg(long)]
    words: Option<PathBuf>,

    /// Config file. Defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };

    // 命令行参数覆盖配置文件
    if let Some(tone_style) = args.tone_style {
        config.transcribe.tone_style = tone_style;
    }
    if args.upper {
        config.transcribe.upper = true;
    }
    if args.cap {
        config.transcribe.cap = true;
    }
    if let Some(separator) = args.separator {
        config.transcribe.separator = separator;
    }
    if let Some(path) = args.chars {
        config.dictionary.characters_path = Some(path);
    }
    if let Some(path) = args.words {
        config.dictionary.polyphones_path = Some(path);
    }

    let engine = PinyinEngine::new(config.dictionary.load()?);
    let options = &config.transcribe;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.text {
        Some(text) => writeln!(out, "{}", engine.transcribe(&text, options))?,
        None => {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                writeln!(out, "{}", engine.transcribe(&line, options))?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
