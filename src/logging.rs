use anyhow::{Context, Result};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 標準出力と共有するログファイル
pub type LogFile = Arc<Mutex<BufWriter<fs::File>>>;

/// `dir/rig_YYYYmmdd_HHMMSS.log` を作る
pub fn open_log_file<P: AsRef<Path>>(dir: P) -> Result<(LogFile, PathBuf)> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("rig_{}.log", ts));
    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    Ok((Arc::new(Mutex::new(BufWriter::new(file))), path))
}

/// 標準出力とログファイルの両方に1行書く
#[macro_export]
macro_rules! log {
    ($logfile:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let msg = format!($($arg)*);
        println!("{}", msg);
        if let Ok(mut f) = $logfile.lock() {
            let _ = writeln!(f, "{}", msg);
        }
    }};
}
